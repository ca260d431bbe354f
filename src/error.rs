//! Error types returned by the request/response layer.

use std::fmt;

use thiserror::Error;

/// Error produced by a [`GraphParser`](crate::graph::GraphParser) implementation.
///
/// The request layer never inspects or rewraps it; callers can downcast to the
/// parser's concrete error type.
pub type ParseError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used across the crate.
pub type Result<T, E = ParliamentError> = std::result::Result<T, E>;

/// Status line details of a response that was turned into an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseContext {
    pub status_code: u16,
    pub url: String,
    pub status_message: String,
}

impl ResponseContext {
    pub fn new(
        status_code: u16,
        url: impl Into<String>,
        status_message: impl Into<String>,
    ) -> Self {
        Self {
            status_code,
            url: url.into(),
            status_message: status_message.into(),
        }
    }
}

impl fmt::Display for ResponseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} HTTP status code received from: {} - {}",
            self.status_code, self.url, self.status_message
        )
    }
}

/// Failures raised by the transport before any status code is available.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request to {url} failed: {source}")]
    Other {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// Sorts a reqwest failure into timeout, connection or other.
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            TransportError::Timeout { url, source }
        } else if source.is_connect() {
            TransportError::Connect { url, source }
        } else {
            TransportError::Other { url, source }
        }
    }

    pub fn url(&self) -> &str {
        match self {
            TransportError::Timeout { url, .. }
            | TransportError::Connect { url, .. }
            | TransportError::Other { url, .. } => url,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout { .. })
    }
}

/// Errors that can occur when talking to the parliamentary data API.
///
/// The status-bearing variants all render as
/// `"<code> HTTP status code received from: <url> - <status message>"`, so they
/// can be logged verbatim without further lookup.
///
/// ```
/// use parliament::{ParliamentError, ResponseContext};
///
/// let error = ParliamentError::Client(ResponseContext::new(
///     404,
///     "http://localhost:3030/dogs/cats",
///     "",
/// ));
/// assert_eq!(
///     error.to_string(),
///     "404 HTTP status code received from: http://localhost:3030/dogs/cats - "
/// );
/// assert!(error.is_client_error());
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParliamentError {
    /// No base URL could be resolved from the instance or the defaults.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid request URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A 2xx response whose body was empty once any content encoding was undone.
    #[error("{0}")]
    NoContentResponse(ResponseContext),

    /// A 4xx response.
    #[error("{0}")]
    Client(ResponseContext),

    /// A 5xx response.
    #[error("{0}")]
    Server(ResponseContext),

    /// A status code of 600 or above.
    #[error("{0}")]
    UnknownStatus(ResponseContext),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to parse response body: {0}")]
    Parse(#[source] ParseError),
}

impl ParliamentError {
    fn response_context(&self) -> Option<&ResponseContext> {
        match self {
            ParliamentError::NoContentResponse(ctx)
            | ParliamentError::Client(ctx)
            | ParliamentError::Server(ctx)
            | ParliamentError::UnknownStatus(ctx) => Some(ctx),
            _ => None,
        }
    }

    /// Status code of the response behind this error, if one was received.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        self.response_context().map(|ctx| ctx.status_code)
    }

    /// URL the failing request was sent to, if known.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            ParliamentError::Transport(e) => Some(e.url()),
            ParliamentError::InvalidUrl { url, .. } => Some(url),
            _ => self.response_context().map(|ctx| ctx.url.as_str()),
        }
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, ParliamentError::Client(_))
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, ParliamentError::Server(_))
    }

    #[must_use]
    pub fn is_no_content(&self) -> bool {
        matches!(self, ParliamentError::NoContentResponse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_context_display() {
        let ctx = ResponseContext::new(200, "http://localhost:3030/parties/current", "OK");
        assert_eq!(
            ctx.to_string(),
            "200 HTTP status code received from: http://localhost:3030/parties/current - OK"
        );
    }

    #[test]
    fn test_status_variants_share_message_format() {
        let ctx = ResponseContext::new(500, "http://localhost:3030/parties/current", "");
        let expected = "500 HTTP status code received from: http://localhost:3030/parties/current - ";

        assert_eq!(ParliamentError::Server(ctx.clone()).to_string(), expected);
        assert_eq!(
            ParliamentError::UnknownStatus(ctx.clone()).to_string(),
            expected
        );
        assert_eq!(ParliamentError::Client(ctx).to_string(), expected);
    }

    #[test]
    fn test_status_code_and_url_helpers() {
        let error = ParliamentError::NoContentResponse(ResponseContext::new(
            204,
            "http://test.com/people",
            "No Content",
        ));
        assert_eq!(error.status_code(), Some(204));
        assert_eq!(error.url(), Some("http://test.com/people"));
        assert!(error.is_no_content());
        assert!(!error.is_client_error());
        assert!(!error.is_server_error());
    }

    #[test]
    fn test_configuration_error_has_no_status() {
        let error = ParliamentError::Configuration("base_url is not set".to_string());
        assert_eq!(error.status_code(), None);
        assert_eq!(error.url(), None);
        assert!(error.to_string().contains("base_url is not set"));
    }

    #[test]
    fn test_parse_error_keeps_source() {
        #[derive(Debug)]
        struct BadTriple;

        impl std::fmt::Display for BadTriple {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "bad triple on line 3")
            }
        }

        impl std::error::Error for BadTriple {}

        let error = ParliamentError::Parse(Box::new(BadTriple));
        assert!(error.to_string().contains("bad triple on line 3"));

        match error {
            ParliamentError::Parse(source) => assert!(source.downcast_ref::<BadTriple>().is_some()),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_header_display() {
        let error = ParliamentError::InvalidHeader {
            name: "Bad Header".to_string(),
            reason: "invalid HTTP header name".to_string(),
        };
        assert!(error.to_string().contains("Bad Header"));
        assert!(error.to_string().contains("invalid HTTP header name"));
    }
}
