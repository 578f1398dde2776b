mod config;
mod input;
mod render;
mod runner;

use std::path::{Path, PathBuf};

use clap::Parser;
use snake_common::config::Validate;
use snake_common::{log, logger};

use config::{ClientConfig, ConfigManager, get_config_manager};

#[derive(Parser, Debug)]
#[command(name = "snake_client", about = "Terminal snake")]
struct Args {
    /// Config file to use instead of the one next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    columns: Option<usize>,

    /// Milliseconds between moves
    #[arg(long)]
    tick_ms: Option<u32>,

    /// Fixes food placement for reproducible sessions
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    log_file: Option<String>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(rows) = self.rows {
            config.snake.rows = rows;
        }
        if let Some(columns) = self.columns {
            config.snake.columns = columns;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.snake.tick_interval_ms = tick_ms;
        }
        if self.seed.is_some() {
            config.snake.seed = self.seed;
        }
        if self.log_file.is_some() {
            config.log_file = self.log_file.clone();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = match &args.config {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => get_config_manager(),
    };
    let mut config = config_manager.get_config()?;
    args.apply_overrides(&mut config);
    config.validate()?;

    if args.save_config {
        config_manager.set_config(&config)?;
    }

    if let Some(log_file) = &config.log_file {
        let prefix = args.use_log_prefix.then(|| "Client".to_string());
        logger::init_file_logger(prefix, Path::new(log_file))?;
    }

    log!(
        "Starting {}x{} board, {}ms per tick",
        config.snake.rows,
        config.snake.columns,
        config.snake.tick_interval_ms
    );

    runner::run(&config.snake).await?;

    log!("Client exited");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_only_given_values() {
        let args = Args::try_parse_from(["snake_client", "--rows", "12", "--seed", "5"]).unwrap();
        let mut config = ClientConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.snake.rows, 12);
        assert_eq!(config.snake.columns, 20);
        assert_eq!(config.snake.seed, Some(5));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_overrides_can_produce_invalid_config() {
        let args = Args::try_parse_from(["snake_client", "--columns", "2"]).unwrap();
        let mut config = ClientConfig::default();
        args.apply_overrides(&mut config);
        assert!(config.validate().is_err());
    }
}
