use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;

pub const MIN_ROWS: usize = 2;
pub const MIN_COLUMNS: usize = 4;
pub const MAX_SIDE: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeSettings {
    pub rows: usize,
    pub columns: usize,
    pub tick_interval_ms: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_countdown_secs")]
    pub countdown_secs: u32,
    #[serde(default = "default_death_frame_ms")]
    pub death_frame_ms: u32,
}

fn default_countdown_secs() -> u32 {
    3
}

fn default_death_frame_ms() -> u32 {
    50
}

impl SnakeSettings {
    pub fn with_size(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms as u64)
    }

    pub fn death_frame(&self) -> Duration {
        Duration::from_millis(self.death_frame_ms as u64)
    }
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            rows: 20,
            columns: 20,
            tick_interval_ms: 100,
            seed: None,
            countdown_secs: default_countdown_secs(),
            death_frame_ms: default_death_frame_ms(),
        }
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if self.rows < MIN_ROWS || self.rows > MAX_SIDE {
            return Err(format!("Rows must be between {} and {}", MIN_ROWS, MAX_SIDE));
        }
        if self.columns < MIN_COLUMNS || self.columns > MAX_SIDE {
            return Err(format!(
                "Columns must be between {} and {}",
                MIN_COLUMNS, MAX_SIDE
            ));
        }
        if self.tick_interval_ms < 20 || self.tick_interval_ms > 5000 {
            return Err("Tick interval must be between 20ms and 5000ms".to_string());
        }
        if self.countdown_secs > 10 {
            return Err("Countdown must be at most 10 seconds".to_string());
        }
        if self.death_frame_ms > 1000 {
            return Err("Death animation frame must be at most 1000ms".to_string());
        }
        Ok(())
    }
}
