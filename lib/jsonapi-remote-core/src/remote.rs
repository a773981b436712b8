//! Remote data: the four states of a value fetched from a server.
//!
//! [`RemoteData`] is what every call resolves to. Classified results pair
//! both sides with the [`ExtractedHeaders`] requested by the caller; use
//! [`RemoteData::without_headers`] when they are not needed.
//!
//! # Example
//!
//! ```
//! use jsonapi_remote_core::{ExtractedHeaders, OutcomeError, RemoteData, WithHeaders};
//!
//! let result: RemoteData<WithHeaders<OutcomeError>, WithHeaders<u32>> =
//!     RemoteData::Succeeded(WithHeaders::new(42, ExtractedHeaders::new()));
//!
//! assert_eq!(result.without_headers(), RemoteData::Succeeded(42));
//! ```

use crate::{ExtractedHeaders, OutcomeError};

/// State of a value fetched from a server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum RemoteData<E, S> {
    /// No request was made yet.
    #[default]
    NotRequested,
    /// A request is running.
    InFlight,
    /// The request failed.
    Failed(E),
    /// The request succeeded.
    Succeeded(S),
}

/// Classified call result, with extracted headers on both sides.
pub type Classified<S> = RemoteData<WithHeaders<OutcomeError>, WithHeaders<S>>;

/// Classified call result without headers.
pub type Remote<S> = RemoteData<OutcomeError, S>;

impl<E, S> RemoteData<E, S> {
    /// Settle from a `Result`.
    pub fn from_result(result: Result<S, E>) -> Self {
        match result {
            Ok(value) => Self::Succeeded(value),
            Err(error) => Self::Failed(error),
        }
    }

    /// Returns `true` if no request was made yet.
    #[must_use]
    pub const fn is_not_requested(&self) -> bool {
        matches!(self, Self::NotRequested)
    }

    /// Returns `true` while the request is running.
    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight)
    }

    /// Returns `true` if the request failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns `true` if the request succeeded.
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// Returns `true` once the request failed or succeeded.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Failed(_) | Self::Succeeded(_))
    }

    /// Borrow both sides.
    #[must_use]
    pub const fn as_ref(&self) -> RemoteData<&E, &S> {
        match self {
            Self::NotRequested => RemoteData::NotRequested,
            Self::InFlight => RemoteData::InFlight,
            Self::Failed(error) => RemoteData::Failed(error),
            Self::Succeeded(value) => RemoteData::Succeeded(value),
        }
    }

    /// The success value, if any.
    #[must_use]
    pub const fn success(&self) -> Option<&S> {
        match self {
            Self::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if any.
    #[must_use]
    pub const fn failure(&self) -> Option<&E> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// `None` until settled, then the outcome as a `Result`.
    pub fn into_result(self) -> Option<Result<S, E>> {
        match self {
            Self::NotRequested | Self::InFlight => None,
            Self::Failed(error) => Some(Err(error)),
            Self::Succeeded(value) => Some(Ok(value)),
        }
    }

    /// Transform the success value.
    pub fn map<S2, F>(self, f: F) -> RemoteData<E, S2>
    where
        F: FnOnce(S) -> S2,
    {
        match self {
            Self::NotRequested => RemoteData::NotRequested,
            Self::InFlight => RemoteData::InFlight,
            Self::Failed(error) => RemoteData::Failed(error),
            Self::Succeeded(value) => RemoteData::Succeeded(f(value)),
        }
    }

    /// Transform the failure.
    pub fn map_err<E2, F>(self, f: F) -> RemoteData<E2, S>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::NotRequested => RemoteData::NotRequested,
            Self::InFlight => RemoteData::InFlight,
            Self::Failed(error) => RemoteData::Failed(f(error)),
            Self::Succeeded(value) => RemoteData::Succeeded(value),
        }
    }

    /// Chain a computation on the success value.
    pub fn and_then<S2, F>(self, f: F) -> RemoteData<E, S2>
    where
        F: FnOnce(S) -> RemoteData<E, S2>,
    {
        match self {
            Self::NotRequested => RemoteData::NotRequested,
            Self::InFlight => RemoteData::InFlight,
            Self::Failed(error) => RemoteData::Failed(error),
            Self::Succeeded(value) => f(value),
        }
    }
}

// ============================================================================
// Headers
// ============================================================================

/// A value paired with the headers extracted from its response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WithHeaders<T> {
    /// The value.
    pub value: T,
    /// Extracted response headers.
    pub headers: ExtractedHeaders,
}

impl<T> WithHeaders<T> {
    /// Pair a value with headers.
    #[must_use]
    pub const fn new(value: T, headers: ExtractedHeaders) -> Self {
        Self { value, headers }
    }

    /// Drop the headers.
    #[must_use]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping the headers.
    pub fn map<U, F>(self, f: F) -> WithHeaders<U>
    where
        F: FnOnce(T) -> U,
    {
        WithHeaders {
            value: f(self.value),
            headers: self.headers,
        }
    }
}

impl<E, S> RemoteData<WithHeaders<E>, WithHeaders<S>> {
    /// Discard the extracted headers on both sides.
    #[must_use]
    pub fn without_headers(self) -> RemoteData<E, S> {
        self.map(WithHeaders::into_value)
            .map_err(WithHeaders::into_value)
    }

    /// Headers of a settled result.
    #[must_use]
    pub const fn headers(&self) -> Option<&ExtractedHeaders> {
        match self {
            Self::Failed(WithHeaders { headers, .. })
            | Self::Succeeded(WithHeaders { headers, .. }) => Some(headers),
            Self::NotRequested | Self::InFlight => None,
        }
    }
}

impl<S> Classified<S> {
    /// Validate the success value, failing with [`OutcomeError::Custom`].
    ///
    /// Headers are kept on both sides.
    pub fn try_map<S2, F>(self, f: F) -> Classified<S2>
    where
        F: FnOnce(S) -> Result<S2, String>,
    {
        self.and_then(|WithHeaders { value, headers }| match f(value) {
            Ok(value) => RemoteData::Succeeded(WithHeaders::new(value, headers)),
            Err(message) => {
                RemoteData::Failed(WithHeaders::new(OutcomeError::Custom(message), headers))
            }
        })
    }
}
