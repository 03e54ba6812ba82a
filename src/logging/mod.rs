//! Console output for copy runs
//!
//! [`Logger`] is passed by value into the proxy and the cleanup guard so every
//! tagging, pull, push and removal line goes through the same verbosity rules.
//! Errors always reach stderr, even in quiet mode.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Logger {
    pub verbose: bool,
    pub quiet: bool,
    started: Instant,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
            started: Instant::now(),
        }
    }

    pub fn new_quiet() -> Self {
        Self {
            verbose: false,
            quiet: true,
            started: Instant::now(),
        }
    }

    fn emit(&self, prefix: &str, message: &str) {
        if !self.quiet {
            println!("{}{}", prefix, message);
        }
    }

    pub fn section(&self, title: &str) {
        self.emit("\n=== ", &format!("{} ===", title));
    }

    pub fn subsection(&self, title: &str) {
        self.emit("\n--- ", &format!("{} ---", title));
    }

    pub fn info(&self, message: &str) {
        self.emit("ℹ️  ", message);
    }

    pub fn success(&self, message: &str) {
        self.emit("✅ ", message);
    }

    pub fn warning(&self, message: &str) {
        self.emit("⚠️  WARNING: ", message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("❌ ERROR: {}", message);
    }

    /// One workflow step (pull, push)
    pub fn step(&self, message: &str) {
        self.emit("▶️  ", message);
    }

    /// Verbose-only
    pub fn detail(&self, message: &str) {
        if self.verbose {
            self.emit("   ", message);
        }
    }

    pub fn summary_kv(&self, title: &str, items: &[(&str, String)]) {
        self.subsection(title);
        let width = items.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        for (key, value) in items {
            self.emit("  ", &format!("{:<width$}  {}", key, value, width = width));
        }
    }

    pub fn format_duration(&self, duration: Duration) -> String {
        let secs = duration.as_secs();
        match secs {
            0..60 => format!("{}s", secs),
            60..3600 => format!("{}m{}s", secs / 60, secs % 60),
            _ => format!("{}h{}m{}s", secs / 3600, (secs % 3600) / 60, secs % 60),
        }
    }

    /// Time since the logger was created
    pub fn elapsed(&self) -> String {
        self.format_duration(self.started.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        let logger = Logger::new(false);
        assert_eq!(logger.format_duration(Duration::from_secs(0)), "0s");
        assert_eq!(logger.format_duration(Duration::from_secs(42)), "42s");
        assert_eq!(logger.format_duration(Duration::from_secs(125)), "2m5s");
        assert_eq!(logger.format_duration(Duration::from_secs(3725)), "1h2m5s");
    }

    #[test]
    fn test_quiet_logger_is_not_verbose() {
        let logger = Logger::new_quiet();
        assert!(logger.quiet);
        assert!(!logger.verbose);
    }
}
