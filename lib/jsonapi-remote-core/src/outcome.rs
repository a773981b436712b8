//! What a transport reports back for one call.

use crate::Response;

/// Raw outcome of a transport call, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOutcome {
    /// The URL could not be used.
    BadUrl(String),
    /// The configured timeout elapsed.
    Timeout,
    /// The server could not be reached.
    NetworkError,
    /// A response with a non-2xx status.
    BadStatus(Response),
    /// A response with a 2xx status.
    GoodStatus(Response),
}

impl RawOutcome {
    /// Sort a received response into the good (2xx) or bad tier.
    #[must_use]
    pub fn from_response(response: Response) -> Self {
        if response.is_success() {
            Self::GoodStatus(response)
        } else {
            Self::BadStatus(response)
        }
    }

    /// The received response, if any.
    #[must_use]
    pub const fn response(&self) -> Option<&Response> {
        match self {
            Self::BadStatus(response) | Self::GoodStatus(response) => Some(response),
            Self::BadUrl(_) | Self::Timeout | Self::NetworkError => None,
        }
    }

    /// HTTP status of the received response, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(Response::status)
    }
}
