use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Appends timestamped lines to a file. The terminal belongs to the board,
/// so there is no stdout sink.
pub struct Logger {
    prefix: Option<String>,
    file: Mutex<File>,
}

impl Logger {
    fn new(prefix: Option<String>, file: File) -> Self {
        Self {
            prefix,
            file: Mutex::new(file),
        }
    }

    pub fn log(&self, message: &str) {
        let line = format_line(self.prefix.as_deref(), message);
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", line);
        }
    }
}

pub fn format_line(prefix: Option<&str>, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    match prefix {
        Some(prefix) => format!("[{}][{}] {}", timestamp, prefix, message),
        None => format!("[{}] {}", timestamp, message),
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

pub fn init_file_logger(prefix: Option<String>, path: &Path) -> std::io::Result<()> {
    let file = open_append(path)?;
    LOGGER.get_or_init(|| Logger::new(prefix, file));
    Ok(())
}

/// Drops the message when no logger has been initialized.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log_path() -> std::path::PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_snake_log_{}.log", random_number))
    }

    #[test]
    fn test_format_line_with_prefix() {
        let line = format_line(Some("Snake"), "hello");
        assert!(line.starts_with('['));
        assert!(line.ends_with("][Snake] hello"), "{}", line);
    }

    #[test]
    fn test_format_line_without_prefix() {
        let line = format_line(None, "hello");
        assert!(line.ends_with("] hello"));
        assert!(!line.contains("]["));
    }

    #[test]
    fn test_logger_appends_lines() {
        let path = temp_log_path();
        let logger = Logger::new(Some("Client".to_string()), open_append(&path).unwrap());

        logger.log("first");
        logger.log("second");

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("][Client] first"));
        assert!(lines[1].ends_with("][Client] second"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_global_logger_writes_through_macro() {
        let path = temp_log_path();
        init_file_logger(None, &path).unwrap();
        crate::log!("tick {}", 7);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.lines().any(|line| line.ends_with("] tick 7")), "{}", content);
        let _ = std::fs::remove_file(&path);
    }
}
