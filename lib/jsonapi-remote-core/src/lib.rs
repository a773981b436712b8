//! Core types and response classification for the jsonapi-remote client.
//!
//! This crate has no I/O. It provides:
//! - [`Request`] and [`RequestBuilder`] - JSON:API request descriptors
//! - [`RawOutcome`] and [`Response`] - what a transport reports
//! - [`classify`], [`classify_no_content`], [`classify_advance`] - the
//!   response classifier
//! - [`RemoteData`] - the not-requested / in-flight / failed / succeeded result
//! - [`OutcomeError`] and [`TransportError`] - classified failures
//! - [`Decoder`], [`JsonApi`], [`Json`] - two-level body decoders
//! - [`ErrorObject`], [`Resource`], [`Document`] - JSON:API document types
//! - [`Transport`] - the trait transports implement
//! - [`extract`] - response header whitelisting

mod body;
mod classify;
mod document;
mod error;
mod headers;
mod method;
mod multipart;
mod outcome;
pub mod prelude;
mod remote;
mod request;
mod response;
mod transport;

pub use body::{JSON_API_MEDIA_TYPE, from_json, to_json, to_query_string};
pub use classify::{
    Advance, Content, Decoded, NO_CONTENT, NO_CONTENT_STATUSES, NoContent, SuccessShape,
    UNPROCESSABLE_ENTITY, classify, classify_advance, classify_no_content, classify_with,
    decode_body,
};
pub use document::{
    ATTRIBUTES_POINTER_PREFIX, DecodeResult, Decoder, Document, ErrorObject, ErrorSource,
    ErrorsOnly, Json, JsonApi, NewResource, Resource,
};
pub use error::{DecodeError, Error, OutcomeError, Result, TransportError};
pub use headers::{ExtractedHeaders, extract};
pub use method::Method;
pub use multipart::{Form, Part};
pub use outcome::RawOutcome;
pub use remote::{Classified, Remote, RemoteData, WithHeaders};
pub use request::{Body, Request, RequestBuilder};
pub use response::Response;
pub use transport::{Progress, ProgressSink, Transport};

// Re-export http crate types for status codes
pub use http::StatusCode;
