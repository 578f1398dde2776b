mod config;

pub(crate) use snake_common::config::{
    ConfigManager, FileContentConfigProvider, YamlConfigSerializer,
};

pub use config::{ClientConfig, get_config_manager};
