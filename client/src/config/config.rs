use serde::{Deserialize, Serialize};
use snake_common::config::Validate;
use snake_common::snake::SnakeSettings;

use super::{ConfigManager, FileContentConfigProvider, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "snake_client_config.yaml";

fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager()
-> ConfigManager<FileContentConfigProvider, ClientConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(get_config_path())
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    pub snake: SnakeSettings,
    /// The terminal belongs to the board, so logs only go to a file.
    #[serde(default)]
    pub log_file: Option<String>,
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        self.snake.validate()?;
        if let Some(path) = &self.log_file
            && path.is_empty()
        {
            return Err("log_file must not be empty if provided".to_string());
        }
        Ok(())
    }
}
