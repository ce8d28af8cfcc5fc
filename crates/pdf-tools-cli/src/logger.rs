use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::io::Write;

/// Writes log records to stderr with a local timestamp
pub struct CliLogger {
    level: LevelFilter,
}

impl CliLogger {
    pub fn new(verbose: bool) -> Self {
        Self {
            level: if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let timestamp = Local::now().format("%H:%M:%S%.3f");
        let mut stderr = std::io::stderr().lock();
        let _ = match record.level() {
            Level::Error | Level::Warn => writeln!(
                stderr,
                "{} {:<5} [{}] {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            ),
            _ => writeln!(stderr, "{} {:<5} {}", timestamp, record.level(), record.args()),
        };
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
