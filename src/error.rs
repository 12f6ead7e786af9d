//! Error types.
//!
//! Two kinds of failure exist and they never mix:
//!
//! - [`Error`]: infrastructure: binding a port, accepting a connection.
//!   Returned from [`Server`](crate::Server) methods.
//! - [`HttpError`]: a single request failed. Returned by handlers or raised by
//!   the router itself, observed by the `on_error` hooks and then turned into
//!   the response.

use http::StatusCode;

use crate::response::Response;

/// The error type returned by the server's fallible operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid socket address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// A request-level failure: a message and, optionally, the status it maps to.
///
/// ```rust
/// use hooklog::{HttpError, StatusCode};
///
/// let err = HttpError::with_status(StatusCode::BAD_REQUEST, "validation failed");
/// assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
/// assert_eq!(err.message(), "validation failed");
/// ```
#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub struct HttpError {
    message: String,
    status: Option<StatusCode>,
}

impl HttpError {
    /// An error without a status. Answered with `500 Internal Server Error`.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), status: None }
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self { message: message.into(), status: Some(status) }
    }

    pub(crate) fn not_found() -> Self {
        Self::with_status(StatusCode::NOT_FOUND, "Not Found")
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub(crate) fn to_response(&self) -> Response {
        let status = self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Response::builder()
            .status(status)
            .text(self.message.clone())
    }
}

impl From<StatusCode> for HttpError {
    fn from(status: StatusCode) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown Status");
        Self::with_status(status, reason)
    }
}

impl From<String> for HttpError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&'static str> for HttpError {
    fn from(message: &'static str) -> Self {
        Self::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_less_error_answers_500() {
        let res = HttpError::new("boom").to_response();
        assert_eq!(res.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.body(), b"boom".as_slice());
    }

    #[test]
    fn status_code_conversion_uses_reason_phrase() {
        let err = HttpError::from(StatusCode::FORBIDDEN);
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
        assert_eq!(err.to_string(), "Forbidden");
    }

    #[test]
    fn bad_address_is_reported_with_input() {
        let source = "nope".parse::<std::net::SocketAddr>().unwrap_err();
        let err = Error::Addr { addr: "nope".into(), source };
        assert!(err.to_string().starts_with("invalid socket address `nope`"));
    }
}
