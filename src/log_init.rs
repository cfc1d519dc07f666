//! Append-to-file logger for the `log` facade.
//!
//! Escape sequences make stdout a poor place for diagnostics, so rule set
//! construction and sheet warnings can be sent to a file instead.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use log::{LevelFilter, Metadata, Record, SetLoggerError};

struct FileLogger {
    file_path: PathBuf,
    level: LevelFilter,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)
        {
            let _ = writeln!(
                file,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Install a file logger at `Debug` level.
///
/// Fails if a logger is already installed.
pub fn init_logger(path: impl Into<PathBuf>) -> Result<(), SetLoggerError> {
    init_logger_with_level(path, LevelFilter::Debug)
}

/// Install a file logger at the given level.
pub fn init_logger_with_level(
    path: impl Into<PathBuf>,
    level: LevelFilter,
) -> Result<(), SetLoggerError> {
    let logger = FileLogger {
        file_path: path.into(),
        level,
    };
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}
