//! JSON:API documents and decoders.
//!
//! A [`Decoder`] turns a response body into a two-level result:
//!
//! - the outer `Result` fails with a [`DecodeError`] when the body is not the
//!   expected structure,
//! - the inner `Result` holds either the decoded value or the ordered list of
//!   [`ErrorObject`]s the server sent.
//!
//! # Example
//!
//! ```
//! use jsonapi_remote_core::{Decoder, JsonApi, Resource};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct User { name: String }
//!
//! let body = r#"{"data":{"type":"users","id":"1","attributes":{"name":"Alice"}}}"#;
//! let document = JsonApi::<Resource<User>>::new()
//!     .decode(body)
//!     .expect("valid structure")
//!     .expect("no errors");
//! assert_eq!(document.data.attributes.name, "Alice");
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DecodeError, body};

/// Prefix of pointers that target a resource attribute.
pub const ATTRIBUTES_POINTER_PREFIX: &str = "/data/attributes/";

/// Result of a two-level decode.
pub type DecodeResult<T> = Result<Result<T, Vec<ErrorObject>>, DecodeError>;

// ============================================================================
// Error Objects
// ============================================================================

/// A single JSON:API error object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Unique identifier of this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// HTTP status applicable to this problem, as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Application-specific error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short summary of the problem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Explanation specific to this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// What caused the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
    /// Non-standard meta information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Links with further details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

impl ErrorObject {
    /// Attribute name targeted by `source.pointer`.
    ///
    /// `/data/attributes/username` gives `username`. Errors without a source,
    /// without a pointer, or pointing elsewhere give `None`.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.source
            .as_ref()?
            .pointer
            .as_deref()?
            .strip_prefix(ATTRIBUTES_POINTER_PREFIX)
    }
}

impl fmt::Display for ErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self
            .detail
            .as_deref()
            .or(self.title.as_deref())
            .or(self.code.as_deref())
            .unwrap_or("unknown error");
        f.write_str(message)
    }
}

/// The `source` member of an error object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSource {
    /// JSON Pointer to the offending value in the request document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    /// Offending query parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
    /// Offending request header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

impl ErrorSource {
    /// Create a source from a JSON Pointer.
    #[must_use]
    pub fn pointer(pointer: impl Into<String>) -> Self {
        Self {
            pointer: Some(pointer.into()),
            ..Self::default()
        }
    }
}

// ============================================================================
// Resources and Documents
// ============================================================================

/// A JSON:API resource object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<A> {
    /// Resource type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource identifier.
    pub id: String,
    /// Resource attributes.
    pub attributes: A,
    /// Relationships, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Value>,
    /// Links, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    /// Meta information, kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl<A> Resource<A> {
    /// Create a resource object.
    #[must_use]
    pub fn new(kind: impl Into<String>, id: impl Into<String>, attributes: A) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            attributes,
            relationships: None,
            links: None,
            meta: None,
        }
    }
}

/// A resource object about to be created (no server-assigned id yet).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewResource<A> {
    /// Resource type.
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource attributes.
    pub attributes: A,
    /// Relationships, kept as raw JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<Value>,
}

impl<A> NewResource<A> {
    /// Create a resource object without id.
    #[must_use]
    pub fn new(kind: impl Into<String>, attributes: A) -> Self {
        Self {
            kind: kind.into(),
            attributes,
            relationships: None,
        }
    }

    /// Attach relationships.
    #[must_use]
    pub fn with_relationships(mut self, relationships: Value) -> Self {
        self.relationships = Some(relationships);
        self
    }
}

/// A decoded JSON:API document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T> {
    /// Primary data.
    pub data: T,
    /// Included resources, kept as raw JSON.
    pub included: Vec<Value>,
    /// Top-level meta information.
    pub meta: Option<Value>,
    /// Top-level links.
    pub links: Option<Value>,
}

/// Outbound document: `{"data": ...}`.
#[derive(Serialize)]
pub(crate) struct Outbound<'a, T> {
    pub(crate) data: &'a T,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<ErrorObject>>,
    #[serde(default)]
    included: Vec<Value>,
    #[serde(default)]
    meta: Option<Value>,
    #[serde(default)]
    links: Option<Value>,
}

#[derive(Deserialize)]
struct RawErrors {
    #[serde(default)]
    errors: Option<Vec<ErrorObject>>,
}

fn non_empty(errors: Option<Vec<ErrorObject>>) -> Option<Vec<ErrorObject>> {
    errors.filter(|errors| !errors.is_empty())
}

// ============================================================================
// Decoders
// ============================================================================

/// Two-level decoder of response bodies.
///
/// Implemented for closures `Fn(&str) -> DecodeResult<T>`.
pub trait Decoder {
    /// The decoded value.
    type Output;

    /// Decode a response body.
    fn decode(&self, body: &str) -> DecodeResult<Self::Output>;
}

impl<F, T> Decoder for F
where
    F: Fn(&str) -> DecodeResult<T>,
{
    type Output = T;

    fn decode(&self, body: &str) -> DecodeResult<T> {
        self(body)
    }
}

/// Decoder for JSON:API documents whose primary data is a `T`.
///
/// A non-empty `errors` member wins over `data`. A missing `data` member is
/// decoded as `null`, so `Option<_>` primary data accepts meta-only documents.
pub struct JsonApi<T>(PhantomData<fn() -> T>);

impl<T> JsonApi<T> {
    /// Create the decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for JsonApi<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for JsonApi<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JsonApi<T> {}

impl<T> fmt::Debug for JsonApi<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsonApi")
            .field(&std::any::type_name::<T>())
            .finish()
    }
}

impl<T: serde::de::DeserializeOwned> Decoder for JsonApi<T> {
    type Output = Document<T>;

    fn decode(&self, body: &str) -> DecodeResult<Document<T>> {
        let raw: RawDocument = body::from_json(body.as_bytes())?;
        if let Some(errors) = non_empty(raw.errors) {
            return Ok(Err(errors));
        }

        let data = body::from_value("data", raw.data.unwrap_or(Value::Null))?;
        Ok(Ok(Document {
            data,
            included: raw.included,
            meta: raw.meta,
            links: raw.links,
        }))
    }
}

/// Decoder for custom (non JSON:API) JSON payloads.
///
/// Never yields error objects.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T> Json<T> {
    /// Create the decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Json<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Json<T> {}

impl<T> fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Json")
            .field(&std::any::type_name::<T>())
            .finish()
    }
}

impl<T: serde::de::DeserializeOwned> Decoder for Json<T> {
    type Output = T;

    fn decode(&self, body: &str) -> DecodeResult<T> {
        body::from_json(body.as_bytes()).map(Ok)
    }
}

/// Decoder reading only the `errors` member of a document.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorsOnly;

impl Decoder for ErrorsOnly {
    type Output = ();

    fn decode(&self, body: &str) -> DecodeResult<()> {
        let raw: RawErrors = body::from_json(body.as_bytes())?;
        Ok(non_empty(raw.errors).map_or(Ok(()), Err))
    }
}
