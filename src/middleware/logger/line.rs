//! One log line per request.

use std::time::Duration;

use super::duration::render_duration;
use super::palette::{
    FAILURE_MARKER, SUCCESS_MARKER, render_error_marker, render_failed_method,
    render_forwarded_for, render_method, render_status,
};

/// Everything a log line says about one finished request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEvent<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub forwarded_for: Option<&'a str>,
    pub outcome: Outcome<'a>,
    /// `None` when the start of the request was never recorded.
    pub elapsed: Option<Duration>,
}

/// How the request left the handler chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<'a> {
    Success { status: Option<u16> },
    Error { message: &'a str, status: Option<u16> },
}

impl LogEvent<'_> {
    /// The line, without a trailing newline.
    pub fn compose(&self) -> String {
        self.tokens().join(" ")
    }

    fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(7);

        if let Some(ip) = self.forwarded_for.filter(|ip| !ip.is_empty()) {
            tokens.push(render_forwarded_for(ip));
        }

        match &self.outcome {
            Outcome::Success { status } => {
                tokens.push(render_method(self.method, SUCCESS_MARKER));
                tokens.push(self.path.to_owned());
                tokens.extend(render_status(*status));
            }
            Outcome::Error { message, status } => {
                tokens.push(render_failed_method(self.method, FAILURE_MARKER));
                tokens.push(self.path.to_owned());
                tokens.push(render_error_marker());
                tokens.extend(status.map(|s| s.to_string()));
                tokens.push((*message).to_owned());
            }
        }

        tokens.extend(self.elapsed.map(render_duration));
        tokens.retain(|t| !t.is_empty());
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn health() -> LogEvent<'static> {
        LogEvent {
            method: "GET",
            path: "/health",
            forwarded_for: None,
            outcome: Outcome::Success { status: Some(200) },
            elapsed: Some(Duration::from_micros(500)),
        }
    }

    fn failed_signup() -> LogEvent<'static> {
        LogEvent {
            method: "POST",
            path: "/users",
            forwarded_for: Some("10.0.0.5"),
            outcome: Outcome::Error { message: "validation failed", status: Some(400) },
            elapsed: Some(Duration::from_millis(2)),
        }
    }

    #[test]
    fn success_tokens_in_order() {
        let tokens = health().tokens();

        assert_eq!(tokens.len(), 4);
        assert!(tokens[0].contains("GET"));
        assert_eq!(tokens[1], "/health");
        assert!(tokens[2].contains("200"));
        assert!(tokens[3].ends_with("500.0µs"));
    }

    #[test]
    fn absent_forwarded_for_leaves_no_tag() {
        let tokens = health().tokens();
        assert!(tokens[0].contains(SUCCESS_MARKER));
        assert!(!health().compose().contains("[]"));
    }

    #[test]
    fn empty_forwarded_for_leaves_no_tag() {
        let tokens = LogEvent { forwarded_for: Some(""), ..health() }.tokens();
        assert_eq!(tokens.len(), 4);
        assert!(tokens[0].contains(SUCCESS_MARKER));
    }

    #[test]
    fn error_tokens_in_order() {
        let tokens = failed_signup().tokens();

        assert_eq!(tokens.len(), 7);
        assert!(tokens[0].contains("10.0.0.5"));
        assert!(tokens[1].contains(&format!("{FAILURE_MARKER}POST")));
        assert_eq!(tokens[2], "/users");
        assert!(tokens[3].contains("Error"));
        assert_eq!(tokens[4], "400");
        assert_eq!(tokens[5], "validation failed");
        assert!(tokens[6].ends_with("2.0ms"));
    }

    #[test]
    fn optional_tokens_are_dropped() {
        let event = LogEvent {
            outcome: Outcome::Error { message: "boom", status: None },
            elapsed: None,
            forwarded_for: None,
            ..failed_signup()
        };

        let tokens = event.tokens();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[3], "boom");
    }

    #[test]
    fn unmeasurable_duration_is_dropped() {
        let event = LogEvent { elapsed: Some(Duration::ZERO), ..health() };
        assert_eq!(event.tokens().len(), 3);
    }

    #[test]
    fn composing_twice_is_identical() {
        let event = failed_signup();
        assert_eq!(event.compose(), event.compose());
        assert_eq!(health().compose(), health().compose());
    }
}
