//! Record formatting.
//!
//! A [`Formatter`] turns a [`Record`] into one line of text using a small
//! template with `{timestamp}`, `{level}` and `{message}` placeholders.

use std::fmt::Write as _;

use chrono::{DateTime, Local};
use log::Level;

use crate::error::{LoggerError, Result};

pub const DEFAULT_TEMPLATE: &str = "{timestamp} - {message}";

/// Date, time to the millisecond, local time without offset.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// A single message on its way to the handlers.
#[derive(Clone, Debug)]
pub struct Record {
    pub level: Level,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

impl Record {
    /// Create a record stamped with the current local time.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Local::now(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Formatter {
    template: String,
    timestamp_format: String,
}

impl Formatter {
    /// Build a formatter, rejecting strftime patterns chrono cannot render.
    /// The pattern is checked by rendering the current time with it, which
    /// also catches parse-only specifiers such as `%#z`.
    pub fn new(template: impl Into<String>, timestamp_format: impl Into<String>) -> Result<Self> {
        let timestamp_format = timestamp_format.into();
        let mut rendered = String::new();
        if write!(rendered, "{}", Local::now().format(&timestamp_format)).is_err() {
            return Err(LoggerError::InvalidTimestampFormat(timestamp_format));
        }

        Ok(Self {
            template: template.into(),
            timestamp_format,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render a record into a single line (no trailing newline).
    ///
    /// The template is scanned once, so braces coming from the timestamp or
    /// the message are copied verbatim.
    pub fn format(&self, record: &Record) -> String {
        let mut line = String::with_capacity(self.template.len() + record.message.len() + 32);
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            line.push_str(&rest[..start]);
            let tail = &rest[start..];

            if let Some(after) = tail.strip_prefix("{timestamp}") {
                // Pattern was rendered once in `new`; a failure here only truncates.
                let _ = write!(line, "{}", record.timestamp.format(&self.timestamp_format));
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{level}") {
                line.push_str(record.level.as_str());
                rest = after;
            } else if let Some(after) = tail.strip_prefix("{message}") {
                line.push_str(&record.message);
                rest = after;
            } else {
                line.push('{');
                rest = &tail[1..];
            }
        }

        line.push_str(rest);
        line
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_at_noon(message: &str) -> Record {
        Record {
            level: Level::Info,
            message: message.to_string(),
            timestamp: Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().unwrap(),
        }
    }

    #[test]
    fn default_format_prepends_timestamp() {
        let line = Formatter::default().format(&record_at_noon("Task A completed"));
        assert_eq!(line, "2024-01-01 12:00:00,000 - Task A completed");
    }

    #[test]
    fn custom_template_can_include_level() {
        let formatter = Formatter::new("[{level}] {timestamp} {message}", "%H:%M").unwrap();
        let line = formatter.format(&record_at_noon("done"));
        assert_eq!(line, "[INFO] 12:00 done");
    }

    #[test]
    fn message_text_is_not_expanded() {
        let line = Formatter::default().format(&record_at_noon("literal {level}"));
        assert!(line.ends_with(" - literal {level}"));
    }

    #[test]
    fn timestamp_text_is_not_expanded() {
        let formatter = Formatter::new("{timestamp} | {message}", "{message} {level} %H").unwrap();
        let line = formatter.format(&record_at_noon("done"));
        assert_eq!(line, "{message} {level} 12 | done");
    }

    #[test]
    fn unknown_braces_are_kept() {
        let formatter = Formatter::new("{task} {message} {", "%H").unwrap();
        assert_eq!(formatter.format(&record_at_noon("ok")), "{task} ok {");
    }

    #[test]
    fn rejects_broken_timestamp_format() {
        let err = Formatter::new(DEFAULT_TEMPLATE, "%Y-%").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidTimestampFormat(f) if f == "%Y-%"));
    }

    #[test]
    fn rejects_parse_only_specifier() {
        let err = Formatter::new(DEFAULT_TEMPLATE, "%#z").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidTimestampFormat(f) if f == "%#z"));
    }
}
