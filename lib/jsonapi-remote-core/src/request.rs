//! JSON:API request building.
//!
//! Use [`Request::builder`] to construct requests with headers, query
//! parameters, a document body and the list of response headers to extract.
//!
//! # Example
//!
//! ```
//! use jsonapi_remote_core::{Method, Request};
//!
//! let request = Request::builder(Method::Get, "https://api.example.com/articles")
//!     .header("Authorization", "Bearer token")
//!     .query("include", "author")
//!     .extract_header("X-Total-Count")
//!     .build();
//!
//! assert_eq!(request.url(), "https://api.example.com/articles?include=author");
//! assert_eq!(request.wire_headers()[0].1, "application/vnd.api+json");
//! ```
//!
//! The URL stays a string until it is sent: a malformed URL is reported by the
//! transport as [`RawOutcome::BadUrl`](crate::RawOutcome::BadUrl).

use bytes::Bytes;

use crate::document::Outbound;
use crate::{Form, JSON_API_MEDIA_TYPE, Method};

/// Request body with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    content_type: String,
    bytes: Bytes,
}

impl Body {
    /// Create a body.
    #[must_use]
    pub fn new(content_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// The `Content-Type` header value.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// The encoded bytes.
    #[must_use]
    pub const fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Consume into the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// An outbound JSON:API call.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Body>,
    extract_headers: Vec<String>,
    extensions: http::Extensions,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Target URL, unparsed.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Caller-supplied headers, in order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First caller header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// Names of the response headers to extract.
    #[must_use]
    pub fn extract_headers(&self) -> &[String] {
        &self.extract_headers
    }

    /// Per-request data for the transport.
    #[must_use]
    pub const fn extensions(&self) -> &http::Extensions {
        &self.extensions
    }

    /// Mutable access to extensions.
    #[must_use]
    pub fn extensions_mut(&mut self) -> &mut http::Extensions {
        &mut self.extensions
    }

    /// Headers as sent on the wire.
    ///
    /// `Accept: application/vnd.api+json` comes first, then the caller's
    /// headers, then `Content-Type` when there is a body.
    #[must_use]
    pub fn wire_headers(&self) -> Vec<(String, String)> {
        let mut headers = Vec::with_capacity(self.headers.len() + 2);
        headers.push(("Accept".to_string(), JSON_API_MEDIA_TYPE.to_string()));
        headers.extend(self.headers.iter().cloned());
        if let Some(body) = &self.body {
            headers.push(("Content-Type".to_string(), body.content_type.clone()));
        }
        headers
    }

    /// Consume into (method, url, wire headers, body bytes, extensions).
    #[must_use]
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        Method,
        String,
        Vec<(String, String)>,
        Option<Bytes>,
        http::Extensions,
    ) {
        let headers = self.wire_headers();
        (
            self.method,
            self.url,
            headers,
            self.body.map(Body::into_bytes),
            self.extensions,
        )
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: Vec<(String, String)>,
    body: Option<Body>,
    extract_headers: Vec<String>,
    extensions: http::Extensions,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            extract_headers: Vec::new(),
            extensions: http::Extensions::new(),
        }
    }

    /// Appends a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Appends a query parameter to the URL, form-encoding name and value.
    #[must_use]
    pub fn query(self, name: &str, value: &str) -> Self {
        // A sequence of string pairs always serializes; only maps with
        // non-string keys or nested values can fail.
        let pair = crate::to_query_string(&[(name, value)]).unwrap_or_default();
        self.append_query(&pair)
    }

    /// Appends query parameters serialized from `params`.
    ///
    /// # Example
    ///
    /// ```
    /// use jsonapi_remote_core::{Method, Request};
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Page {
    ///     #[serde(rename = "page[size]")]
    ///     size: u32,
    /// }
    ///
    /// let request = Request::builder(Method::Get, "https://api.example.com/articles")
    ///     .query_params(&Page { size: 10 })
    ///     .expect("serialize")
    ///     .build();
    /// assert_eq!(request.url(), "https://api.example.com/articles?page%5Bsize%5D=10");
    /// ```
    pub fn query_params<T: serde::Serialize>(self, params: &T) -> crate::Result<Self> {
        let query = crate::to_query_string(params)?;
        Ok(self.append_query(&query))
    }

    fn append_query(mut self, query: &str) -> Self {
        if query.is_empty() {
            return self;
        }

        let fragment = self.url.find('#').map(|at| self.url.split_off(at));
        if !self.url.contains('?') {
            self.url.push('?');
        } else if !self.url.ends_with('?') && !self.url.ends_with('&') {
            self.url.push('&');
        }
        self.url.push_str(query);
        if let Some(fragment) = fragment {
            self.url.push_str(&fragment);
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Set a compact JSON body sent as `application/vnd.api+json`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`](crate::Error::InvalidRequest) when the
    /// method carries no body (`GET`, `DELETE`), or a serialization error.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        if !self.method.has_body() {
            return Err(crate::Error::invalid_request(format!(
                "{} requests do not carry a body",
                self.method
            )));
        }
        let bytes = crate::to_json(value)?;
        Ok(self.body(Body::new(JSON_API_MEDIA_TYPE, bytes)))
    }

    /// Set a JSON:API document body with `data` as primary data.
    ///
    /// # Errors
    ///
    /// Same as [`json`](Self::json).
    ///
    /// # Example
    ///
    /// ```
    /// use jsonapi_remote_core::{Method, NewResource, Request};
    ///
    /// let article = NewResource::new("articles", serde_json::json!({ "title": "Hello" }));
    /// let request = Request::builder(Method::Post, "https://api.example.com/articles")
    ///     .document(&article)
    ///     .expect("serialize")
    ///     .build();
    ///
    /// let body = request.body().expect("body");
    /// assert_eq!(
    ///     body.bytes().as_ref(),
    ///     br#"{"data":{"type":"articles","attributes":{"title":"Hello"}}}"#
    /// );
    /// ```
    pub fn document<T: serde::Serialize>(self, data: &T) -> crate::Result<Self> {
        self.json(&Outbound { data })
    }

    /// Set a multipart/form-data body.
    #[must_use]
    pub fn multipart(self, form: Form) -> Self {
        let (content_type, bytes) = form.into_body();
        self.body(Body::new(content_type, bytes))
    }

    /// Extract a response header into the result.
    #[must_use]
    pub fn extract_header(mut self, name: impl Into<String>) -> Self {
        self.extract_headers.push(name.into());
        self
    }

    /// Extract several response headers into the result.
    #[must_use]
    pub fn extract_headers<I, N>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.extract_headers.extend(names.into_iter().map(Into::into));
        self
    }

    /// Attach per-request data for the transport.
    #[must_use]
    pub fn extension<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.extensions.insert(value);
        self
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
            extract_headers: self.extract_headers,
            extensions: self.extensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://api.example.com/users";

    #[test]
    fn request_builder_basic() {
        let request = Request::builder(Method::Get, URL)
            .header("Authorization", "Bearer t")
            .build();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url(), URL);
        assert_eq!(request.header("authorization"), Some("Bearer t"));
        assert!(request.body().is_none());
        assert!(request.extract_headers().is_empty());
    }

    #[test]
    fn wire_headers_prepend_accept() {
        let request = Request::builder(Method::Get, URL)
            .header("Accept", "text/html")
            .header("X-Trace", "1")
            .build();

        assert_eq!(
            request.wire_headers(),
            vec![
                ("Accept".to_string(), "application/vnd.api+json".to_string()),
                ("Accept".to_string(), "text/html".to_string()),
                ("X-Trace".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn wire_headers_with_body() {
        let request = Request::builder(Method::Patch, URL)
            .json(&serde_json::json!({"data": null}))
            .expect("json")
            .build();

        let headers = request.wire_headers();
        assert_eq!(headers.len(), 2);
        assert_eq!(
            headers.last(),
            Some(&(
                "Content-Type".to_string(),
                "application/vnd.api+json".to_string()
            ))
        );
        assert_eq!(
            request.body().map(|body| body.bytes().as_ref()),
            Some(&br#"{"data":null}"#[..])
        );
    }

    #[test]
    fn request_builder_with_query() {
        let request = Request::builder(Method::Get, URL)
            .query("page[number]", "2")
            .query("include", "author,comments")
            .build();

        assert_eq!(
            request.url(),
            "https://api.example.com/users?page%5Bnumber%5D=2&include=author%2Ccomments"
        );
    }

    #[test]
    fn query_keeps_existing_query_and_fragment() {
        let request = Request::builder(Method::Get, "https://api.example.com/users?sort=name#top")
            .query("include", "team")
            .build();

        assert_eq!(
            request.url(),
            "https://api.example.com/users?sort=name&include=team#top"
        );
    }

    #[test]
    fn query_on_malformed_url_is_kept_verbatim() {
        let request = Request::builder(Method::Get, "not a url").query("a", "b").build();
        assert_eq!(request.url(), "not a url?a=b");
    }

    #[test]
    fn document_wraps_data() {
        #[derive(serde::Serialize)]
        struct Attributes {
            name: String,
        }

        let resource = crate::Resource::new(
            "users",
            "1",
            Attributes {
                name: "Alice".to_string(),
            },
        );
        let request = Request::builder(Method::Patch, URL)
            .document(&resource)
            .expect("document")
            .build();

        let body = request.body().expect("body");
        assert_eq!(body.content_type(), "application/vnd.api+json");
        let json: serde_json::Value = serde_json::from_slice(body.bytes()).expect("json");
        assert_eq!(json["data"]["id"], "1");
        assert_eq!(json["data"]["attributes"]["name"], "Alice");
    }

    #[test]
    fn multipart_body() {
        let form = Form::with_boundary("b0undary").text("title", "Report");
        let request = Request::builder(Method::Post, URL).multipart(form).build();

        let body = request.body().expect("body");
        assert_eq!(body.content_type(), "multipart/form-data; boundary=b0undary");
        let wire = request.wire_headers();
        assert_eq!(
            wire.first().map(|(_, value)| value.as_str()),
            Some("application/vnd.api+json")
        );
    }

    #[test]
    fn query_encodes_reserved_characters() {
        let request = Request::builder(Method::Get, URL)
            .query("filter[name]", "a&b=c d")
            .query("empty", "")
            .query("city", "Zürich")
            .build();

        assert_eq!(
            request.url(),
            "https://api.example.com/users?filter%5Bname%5D=a%26b%3Dc+d&empty=&city=Z%C3%BCrich"
        );
    }

    #[test]
    fn document_rejected_without_body_method() {
        for method in [Method::Get, Method::Delete] {
            let err = Request::builder(method, URL)
                .document(&serde_json::json!({"type": "users"}))
                .expect_err("no body on GET or DELETE");
            assert!(matches!(err, crate::Error::InvalidRequest(_)));
            assert_eq!(
                err.to_string(),
                format!("invalid request: {method} requests do not carry a body")
            );
        }

        let request = Request::builder(Method::Put, URL)
            .json(&serde_json::json!({"data": null}))
            .expect("PUT carries a body")
            .build();
        assert!(request.body().is_some());
    }

    #[test]
    fn extraction_list() {
        let request = Request::builder(Method::Get, URL)
            .extract_header("X-Total")
            .extract_headers(["ETag", "Link"])
            .build();

        assert_eq!(request.extract_headers(), ["X-Total", "ETag", "Link"]);
    }

    #[test]
    fn into_parts_uses_wire_headers() {
        #[derive(Debug, Clone, PartialEq)]
        struct Marker(u8);

        let request = Request::builder(Method::Delete, URL)
            .extension(Marker(3))
            .build();
        let (method, url, headers, body, extensions) = request.into_parts();

        assert_eq!(method, Method::Delete);
        assert_eq!(url, URL);
        assert_eq!(headers.len(), 1);
        assert!(body.is_none());
        assert_eq!(extensions.get::<Marker>(), Some(&Marker(3)));
    }
}
