use crate::domain::logging::{LogEntry, LogLevel};
use crate::domain::port::Logger;

/// コンソールログ実装
/// 標準出力・標準エラー出力にログを出力する
/// 最低レベル未満のエントリは出力しない
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    /// エントリを出力するかどうか
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if !self.enabled(entry.level) {
            return;
        }

        match entry.level {
            LogLevel::Error => eprintln!("{}", entry.format()),
            _ => println!("{}", entry.format()),
        }
    }
}
