use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Forwards `log` records into the in-app console. The terminal owns stdout
/// while the UI runs, so nothing is printed directly.
pub struct ConsoleLogger {
    level: LevelFilter,
    tx: Mutex<Sender<String>>,
}

impl ConsoleLogger {
    pub fn new(level: LevelFilter) -> (Self, Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                level,
                tx: Mutex::new(tx),
            },
            rx,
        )
    }

    /// Installs the logger globally and returns the receiving end of the console feed.
    pub fn install(level: LevelFilter) -> Result<Receiver<String>, SetLoggerError> {
        let (logger, rx) = Self::new(level);
        log::set_boxed_logger(Box::new(logger))?;
        log::set_max_level(level);
        Ok(rx)
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), &record.args().to_string());
        if let Ok(tx) = self.tx.lock() {
            let _ = tx.send(line);
        }
    }

    fn flush(&self) {}
}

pub fn format_line(level: Level, msg: &str) -> String {
    let tag = match level {
        Level::Error => "[ERROR]",
        Level::Warn => "[WARN]",
        Level::Info => "[INFO]",
        Level::Debug => "[DEBUG]",
        Level::Trace => "[TRACE]",
    };
    format!("{tag} {msg}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_below_level_are_dropped() {
        let (logger, rx) = ConsoleLogger::new(LevelFilter::Info);
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .args(format_args!("noise"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("stock low"))
                .build(),
        );
        let lines: Vec<String> = rx.try_iter().collect();
        assert_eq!(lines, vec!["[WARN] stock low".to_string()]);
    }
}
