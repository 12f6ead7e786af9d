//! Fixed color tables for methods and status codes.

use colored::{Color, Colorize};

pub const SUCCESS_MARKER: &str = "✔ ";
pub const FAILURE_MARKER: &str = "✗ ";

static METHODS: &[(&str, Color)] = &[
    ("GET", Color::Green),
    ("POST", Color::Blue),
    ("PUT", Color::Yellow),
    ("DELETE", Color::Red),
    ("PATCH", Color::Magenta),
    ("OPTIONS", Color::Cyan),
    ("HEAD", Color::BrightBlack),
];

static STATUSES: &[(u16, Color)] = &[
    (200, Color::Green),
    (201, Color::Blue),
    (204, Color::Yellow),
    (400, Color::Red),
    (401, Color::Magenta),
    (403, Color::Cyan),
    (404, Color::BrightBlack),
    (500, Color::BrightRed),
];

pub fn method_color(method: &str) -> Option<Color> {
    METHODS.iter().find(|(m, _)| *m == method).map(|&(_, c)| c)
}

pub fn status_color(status: u16) -> Option<Color> {
    STATUSES.iter().find(|(s, _)| *s == status).map(|&(_, c)| c)
}

/// `marker + method`, bold, in the method's color. Methods outside the table
/// stay uncolored.
pub fn render_method(method: &str, marker: &str) -> String {
    let token = format!("{marker}{method}").bold();
    match method_color(method) {
        Some(color) => token.color(color).to_string(),
        None => token.to_string(),
    }
}

/// `marker + method` in the error style, whatever the method.
pub fn render_failed_method(method: &str, marker: &str) -> String {
    format!("{marker}{method}").bold().red().to_string()
}

/// The status code, bold, in its table color. `None` renders nothing.
pub fn render_status(status: Option<u16>) -> Option<String> {
    let status = status?;
    let token = status.to_string().bold();
    Some(match status_color(status) {
        Some(color) => token.color(color).to_string(),
        None => token.to_string(),
    })
}

pub fn render_forwarded_for(value: &str) -> String {
    format!("[{}]", value.cyan())
}

pub fn render_error_marker() -> String {
    "Error".red().to_string()
}

pub fn render_separator() -> String {
    "❘".white().to_string()
}
