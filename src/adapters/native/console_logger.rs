use crate::ports::LoggerPort;

/// Native logger implementation using stdout/stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerPort for ConsoleLogger {
    fn log(&self, message: &str) {
        println!("[notifyx] {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("[notifyx][ERROR] {message}");
    }

    fn warn(&self, message: &str) {
        eprintln!("[notifyx][WARN] {message}");
    }

    fn time(&self, label: &str) {
        println!("[notifyx][TIME:START] {label}");
    }

    fn time_end(&self, label: &str) {
        println!("[notifyx][TIME:END] {label}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_all_methods() {
        let logger = ConsoleLogger::new();
        logger.log("test log");
        logger.warn("test warn");
        logger.error("test error");
        logger.time("poll");
        logger.time_end("poll");
    }
}
