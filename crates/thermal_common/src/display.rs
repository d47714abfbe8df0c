//! Display Library - console reporting for the thermal loop
//!
//! Handlers never touch terminal colours directly. They hand a `Severity`
//! and a message to a `Reporting` sink, and the sink owns presentation.
//!
//! - Status: plain progress lines ("Device starting.")
//! - Info: green
//! - Warning: yellow
//! - Emergency: red

use std::cell::RefCell;
use std::fmt;

use owo_colors::OwoColorize;

/// Severity attached to every reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Progress chatter, no colour
    Status,
    /// Informational alert (temperature back to normal)
    Info,
    /// Elevated but not critical
    Warning,
    /// Critical, shutdown territory
    Emergency,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Status => "STATUS",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Emergency => "EMERGENCY",
        }
    }

    /// Alerts are preceded by a blank line on the console
    pub fn is_alert(&self) -> bool {
        !matches!(self, Severity::Status)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Output sink for human-readable reporting
pub trait Reporting {
    fn report(&self, severity: Severity, message: &str);
}

/// Render one reported message the way the console shows it
pub fn render(severity: Severity, message: &str, use_color: bool) -> String {
    if !use_color {
        return message.to_string();
    }
    match severity {
        Severity::Status => message.to_string(),
        Severity::Info => message.green().to_string(),
        Severity::Warning => message.yellow().to_string(),
        Severity::Emergency => message.red().to_string(),
    }
}

/// Writes reported lines to stdout
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    use_color: bool,
}

impl ConsoleSink {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Reporting for ConsoleSink {
    fn report(&self, severity: Severity, message: &str) {
        if severity.is_alert() {
            println!();
        }
        println!("{}", render(severity, message, self.use_color));
    }
}

/// Keeps reported lines in memory, in order
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: RefCell<Vec<(Severity, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.borrow().clone()
    }

    /// Messages reported with the given severity
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Number of lines containing `needle`
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines
            .borrow()
            .iter()
            .filter(|(_, m)| m.contains(needle))
            .count()
    }
}

impl Reporting for MemorySink {
    fn report(&self, severity: Severity, message: &str) {
        self.lines
            .borrow_mut()
            .push((severity, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_color_is_verbatim() {
        for severity in [
            Severity::Status,
            Severity::Info,
            Severity::Warning,
            Severity::Emergency,
        ] {
            assert_eq!(render(severity, "hello", false), "hello");
        }
    }

    #[test]
    fn test_render_with_color_adds_escape_codes() {
        let red = render(Severity::Emergency, "hot", true);
        assert!(red.contains("hot"));
        assert!(red.contains("\u{1b}["));
        assert_ne!(red, render(Severity::Warning, "hot", true));
        assert_ne!(red, render(Severity::Info, "hot", true));
    }

    #[test]
    fn test_status_never_colored() {
        assert_eq!(render(Severity::Status, "Device starting.", true), "Device starting.");
    }

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.report(Severity::Status, "one");
        sink.report(Severity::Warning, "two");
        sink.report(Severity::Warning, "three");

        assert_eq!(sink.lines().len(), 3);
        assert_eq!(sink.messages(Severity::Warning), vec!["two", "three"]);
        assert_eq!(sink.count_containing("t"), 2);
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Emergency.to_string(), "EMERGENCY");
        assert!(Severity::Info.is_alert());
        assert!(!Severity::Status.is_alert());
    }
}
