//! Error types.
//!
//! - [`OutcomeError`] is the failure side of every classified result.
//! - [`TransportError`] covers what went wrong before a document could be read.
//! - [`DecodeError`] is the outer (structural) decode failure.
//! - [`Error`] covers failures while *building* a request.

use std::fmt;

use derive_more::{Display, Error, From};

use crate::ErrorObject;

// ============================================================================
// Outcome Errors
// ============================================================================

/// Transport-level failure of a call.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum TransportError {
    /// The request URL could not be used.
    #[display("bad url: {_0}")]
    BadUrl(#[error(not(source))] String),

    /// The configured timeout elapsed.
    #[display("request timeout")]
    Timeout,

    /// The server could not be reached or the connection broke.
    #[display("network error")]
    NetworkError,

    /// The server answered with a status that is not handled.
    #[display("bad status: {_0}")]
    BadStatus(#[error(not(source))] u16),

    /// The response body could not be decoded.
    #[display("bad body: {_0}")]
    BadBody(#[error(not(source))] String),
}

/// Failure of a classified call. Exactly one kind of error per outcome.
#[derive(Debug, Clone, PartialEq, Error, From)]
pub enum OutcomeError {
    /// Transport or structural decoding failure.
    Transport(TransportError),

    /// The server returned JSON:API error objects, in server order.
    #[from(skip)]
    Document(#[error(not(source))] Vec<ErrorObject>),

    /// Application-defined failure.
    #[from(skip)]
    Custom(#[error(not(source))] String),
}

impl fmt::Display for OutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Document(errors) => {
                write!(f, "document errors:")?;
                for error in errors {
                    write!(f, " [{error}]")?;
                }
                Ok(())
            }
            Self::Custom(message) => write!(f, "{message}"),
        }
    }
}

impl OutcomeError {
    /// Create a custom error.
    #[must_use]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Create a bad-body error from an outer decode failure.
    #[must_use]
    pub fn bad_body(error: DecodeError) -> Self {
        Self::Transport(TransportError::BadBody(error.into_message()))
    }

    /// Returns the HTTP status if this is a bad-status error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(TransportError::BadStatus(status)) => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(TransportError::Timeout))
    }

    /// Returns `true` if this is a network error.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Transport(TransportError::NetworkError))
    }

    /// Returns the JSON:API error objects, if any.
    #[must_use]
    pub fn errors(&self) -> Option<&[ErrorObject]> {
        match self {
            Self::Document(errors) => Some(errors),
            _ => None,
        }
    }

    /// Pairs each error object pointing at an attribute with its message.
    ///
    /// Errors whose source does not point into `/data/attributes/` are skipped.
    #[must_use]
    pub fn field_errors(&self) -> Vec<(&str, String)> {
        self.errors()
            .unwrap_or_default()
            .iter()
            .filter_map(|error| error.field().map(|field| (field, error.to_string())))
            .collect()
    }
}

// ============================================================================
// Decode Error
// ============================================================================

/// Outer decode failure: the body is not the expected structure.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{message}")]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    /// Create a decode error from a parser message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The parser message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Consume into the parser message.
    #[must_use]
    pub fn into_message(self) -> String {
        self.message
    }
}

// ============================================================================
// Request Building Error
// ============================================================================

/// Error raised while building a request.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// Query string serialization error.
    #[display("query serialization error: {_0}")]
    #[from]
    QuerySerialization(serde_html_form::ser::Error),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::ErrorSource;

    fn password_error() -> ErrorObject {
        ErrorObject {
            detail: Some("is too short".to_string()),
            source: Some(ErrorSource::pointer("/data/attributes/password")),
            ..ErrorObject::default()
        }
    }

    #[test]
    fn transport_error_display() {
        assert_snapshot!(TransportError::BadUrl("nope".to_string()), @"bad url: nope");
        assert_snapshot!(TransportError::Timeout, @"request timeout");
        assert_snapshot!(TransportError::NetworkError, @"network error");
        assert_snapshot!(TransportError::BadStatus(503), @"bad status: 503");
        assert_snapshot!(TransportError::BadBody("expected value".to_string()), @"bad body: expected value");
    }

    #[test]
    fn outcome_error_display() {
        let err = OutcomeError::Document(vec![
            password_error(),
            ErrorObject {
                title: Some("Invalid Attribute".to_string()),
                ..ErrorObject::default()
            },
        ]);
        assert_snapshot!(err, @"document errors: [is too short] [Invalid Attribute]");
        assert_snapshot!(OutcomeError::custom("quota exceeded"), @"quota exceeded");
        assert_snapshot!(OutcomeError::from(TransportError::Timeout), @"request timeout");
    }

    #[test]
    fn outcome_error_accessors() {
        let err = OutcomeError::from(TransportError::BadStatus(404));
        assert_eq!(err.status(), Some(404));
        assert!(err.errors().is_none());
        assert!(!err.is_timeout());

        assert!(OutcomeError::from(TransportError::Timeout).is_timeout());
        assert!(OutcomeError::from(TransportError::NetworkError).is_network());
        assert_eq!(OutcomeError::custom("x").status(), None);
    }

    #[test]
    fn outcome_error_bad_body() {
        let err = OutcomeError::bad_body(DecodeError::new("expected `,` at line 1"));
        assert_eq!(
            err,
            OutcomeError::Transport(TransportError::BadBody(
                "expected `,` at line 1".to_string()
            ))
        );
    }

    #[test]
    fn outcome_error_field_errors() {
        let err = OutcomeError::Document(vec![
            password_error(),
            ErrorObject {
                detail: Some("server is sad".to_string()),
                ..ErrorObject::default()
            },
        ]);
        assert_eq!(
            err.field_errors(),
            vec![("password", "is too short".to_string())]
        );
        assert!(OutcomeError::custom("x").field_errors().is_empty());
    }

    #[test]
    fn request_error_display() {
        let err = Error::invalid_request("missing body");
        assert_eq!(err.to_string(), "invalid request: missing body");
    }
}
