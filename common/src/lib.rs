//! Game-state engine for a single-player grid snake, plus the pieces a front
//! end needs around it: a tick-loop session driver, YAML settings and a
//! logger.

pub mod config;
pub mod games;
pub mod logger;

pub use games::snake;
