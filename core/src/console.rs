//! Console echo of logged messages.
//!
//! Color values are raw ANSI escape prefixes supplied by the caller. The
//! constants below are conveniences; any string is accepted unchecked.

use std::io::{self, Write};

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";

/// Render the console form of a message, without the trailing newline.
/// An empty color is treated the same as no color.
pub fn render(message: &str, color: Option<&str>) -> String {
    match color {
        Some(code) if !code.is_empty() => format!("{code}{message}{RESET}"),
        _ => message.to_string(),
    }
}

/// Write one rendered line to `out` and flush it.
pub fn write_line<W: Write + ?Sized>(
    out: &mut W,
    message: &str,
    color: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "{}", render(message, color))?;
    out.flush()
}
