//! Response classification.
//!
//! Turns a [`RawOutcome`] into a [`Classified`] result. One decision table is
//! shared by every call shape:
//!
//! | Outcome | Result |
//! |---------|--------|
//! | `BadUrl`, `Timeout`, `NetworkError` | transport failure, no headers |
//! | `BadStatus(422)` | body decoded, error objects become [`OutcomeError::Document`] |
//! | `BadStatus(_)` | [`TransportError::BadStatus`], body ignored |
//! | `GoodStatus(_)` | interpreted by the [`SuccessShape`] |
//!
//! The shapes only differ in how they read a 2xx response:
//!
//! - [`Decoded`] always decodes the body,
//! - [`NoContent`] never decodes, accepting 200, 202 and 204,
//! - [`Advance`] gives [`Content::NoContent`] on 204 and decodes otherwise.

use crate::{
    Classified, DecodeResult, Decoder, ErrorsOnly, ExtractedHeaders, OutcomeError, RawOutcome,
    RemoteData, TransportError, WithHeaders, extract,
};

/// Status of JSON:API validation failures.
pub const UNPROCESSABLE_ENTITY: u16 = 422;

/// Status of a successful response without body.
pub const NO_CONTENT: u16 = 204;

/// Statuses the no-content shape accepts.
pub const NO_CONTENT_STATUSES: [u16; 3] = [200, 202, NO_CONTENT];

/// How a call shape reads the responses that carry its outcome.
pub trait SuccessShape {
    /// The success value.
    type Success;

    /// Interpret a 2xx response.
    fn good_status(&self, status: u16, body: &[u8]) -> Result<Self::Success, OutcomeError>;

    /// Interpret a 422 response.
    fn unprocessable(&self, body: &[u8]) -> Result<Self::Success, OutcomeError>;
}

/// Success value of the [`Advance`] shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Content<T> {
    /// The response carried a document.
    Document(T),
    /// The server answered 204 No Content.
    NoContent,
}

impl<T> Content<T> {
    /// The document, if any.
    #[must_use]
    pub fn into_document(self) -> Option<T> {
        match self {
            Self::Document(value) => Some(value),
            Self::NoContent => None,
        }
    }
}

// ============================================================================
// Shapes
// ============================================================================

/// Decode every response with `D`.
#[derive(Debug, Clone, Copy)]
pub struct Decoded<D>(pub D);

impl<D: Decoder> SuccessShape for Decoded<D> {
    type Success = D::Output;

    fn good_status(&self, _status: u16, body: &[u8]) -> Result<D::Output, OutcomeError> {
        decode_body(&self.0, body)
    }

    fn unprocessable(&self, body: &[u8]) -> Result<D::Output, OutcomeError> {
        decode_body(&self.0, body)
    }
}

/// Only the status matters; bodies of 2xx responses are never read.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl SuccessShape for NoContent {
    type Success = ();

    fn good_status(&self, status: u16, _body: &[u8]) -> Result<(), OutcomeError> {
        if NO_CONTENT_STATUSES.contains(&status) {
            Ok(())
        } else {
            Err(TransportError::BadStatus(status).into())
        }
    }

    fn unprocessable(&self, body: &[u8]) -> Result<(), OutcomeError> {
        // A 422 without error objects is not a success.
        decode_body(&ErrorsOnly, body)
            .and_then(|()| Err(TransportError::BadStatus(UNPROCESSABLE_ENTITY).into()))
    }
}

/// Either a document or an explicit 204.
#[derive(Debug, Clone, Copy)]
pub struct Advance<D>(pub D);

impl<D: Decoder> SuccessShape for Advance<D> {
    type Success = Content<D::Output>;

    fn good_status(&self, status: u16, body: &[u8]) -> Result<Self::Success, OutcomeError> {
        if status == NO_CONTENT {
            return Ok(Content::NoContent);
        }
        decode_body(&self.0, body).map(Content::Document)
    }

    fn unprocessable(&self, body: &[u8]) -> Result<Self::Success, OutcomeError> {
        decode_body(&self.0, body).map(Content::Document)
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Run a decoder over a body, flattening both levels into one `Result`.
///
/// A body that is not UTF-8 is an outer failure.
pub fn decode_body<D: Decoder>(decoder: &D, body: &[u8]) -> Result<D::Output, OutcomeError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| TransportError::BadBody(format!("response body is not UTF-8: {e}")))?;
    flatten(decoder.decode(text))
}

fn flatten<T>(result: DecodeResult<T>) -> Result<T, OutcomeError> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(errors)) => Err(OutcomeError::Document(errors)),
        Err(error) => Err(OutcomeError::bad_body(error)),
    }
}

/// Classify an outcome with the given shape.
///
/// `extract_headers` lists the response headers to keep; it applies to every
/// outcome that carries a response.
pub fn classify_with<S: SuccessShape>(
    outcome: RawOutcome,
    shape: &S,
    extract_headers: &[String],
) -> Classified<S::Success> {
    let (result, headers) = match outcome {
        RawOutcome::BadUrl(url) => (
            Err(TransportError::BadUrl(url).into()),
            ExtractedHeaders::new(),
        ),
        RawOutcome::Timeout => (Err(TransportError::Timeout.into()), ExtractedHeaders::new()),
        RawOutcome::NetworkError => (
            Err(TransportError::NetworkError.into()),
            ExtractedHeaders::new(),
        ),
        RawOutcome::BadStatus(response) => {
            let headers = extract(response.headers(), extract_headers);
            let result = if response.status() == UNPROCESSABLE_ENTITY {
                shape.unprocessable(response.body())
            } else {
                Err(TransportError::BadStatus(response.status()).into())
            };
            (result, headers)
        }
        RawOutcome::GoodStatus(response) => {
            let headers = extract(response.headers(), extract_headers);
            (
                shape.good_status(response.status(), response.body()),
                headers,
            )
        }
    };

    match result {
        Ok(value) => RemoteData::Succeeded(WithHeaders::new(value, headers)),
        Err(error) => RemoteData::Failed(WithHeaders::new(error, headers)),
    }
}

/// Classify an outcome, decoding the body with `decoder`.
pub fn classify<D: Decoder>(
    outcome: RawOutcome,
    decoder: D,
    extract_headers: &[String],
) -> Classified<D::Output> {
    classify_with(outcome, &Decoded(decoder), extract_headers)
}

/// Classify an outcome where no body is expected.
pub fn classify_no_content(outcome: RawOutcome, extract_headers: &[String]) -> Classified<()> {
    classify_with(outcome, &NoContent, extract_headers)
}

/// Classify an outcome that may carry a document or be a 204.
pub fn classify_advance<D: Decoder>(
    outcome: RawOutcome,
    decoder: D,
    extract_headers: &[String],
) -> Classified<Content<D::Output>> {
    classify_with(outcome, &Advance(decoder), extract_headers)
}
