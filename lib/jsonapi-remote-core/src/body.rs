//! Body serialization utilities.

use bytes::Bytes;

use crate::{DecodeError, Result};

/// Media type of JSON:API documents.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Serialize a value to compact JSON bytes.
///
/// # Example
///
/// ```
/// use jsonapi_remote_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let bytes = to_json(&user).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Serialize a value to a query string.
///
/// Uses `serde_html_form`, so `Vec<T>` fields become repeated parameters.
///
/// # Example
///
/// ```
/// use jsonapi_remote_core::to_query_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Page {
///     #[serde(rename = "page[number]")]
///     number: u32,
///     include: String,
/// }
///
/// let query = to_query_string(&Page { number: 2, include: "author".to_string() })
///     .expect("serialize");
/// assert_eq!(query, "page%5Bnumber%5D=2&include=author");
/// ```
pub fn to_query_string<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_html_form::to_string(value).map_err(Into::into)
}

/// Deserialize JSON bytes with path-aware error messages.
///
/// The error message includes the path to the field that failed
/// (e.g., `data.attributes.name`).
pub fn from_json<T: serde::de::DeserializeOwned>(
    bytes: &[u8],
) -> std::result::Result<T, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| path_error(&e.path().to_string(), &e.inner().to_string()))
}

/// Deserialize an already parsed JSON value found at `prefix`.
pub(crate) fn from_value<T: serde::de::DeserializeOwned>(
    prefix: &str,
    value: serde_json::Value,
) -> std::result::Result<T, DecodeError> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().to_string();
        let path = if path == "." {
            prefix.to_string()
        } else {
            format!("{prefix}.{path}")
        };
        path_error(&path, &e.inner().to_string())
    })
}

fn path_error(path: &str, message: &str) -> DecodeError {
    DecodeError::new(format!(
        "JSON deserialization error at '{path}': {message}"
    ))
}
