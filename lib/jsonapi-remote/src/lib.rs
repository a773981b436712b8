//! JSON:API HTTP client returning classified remote data.
//!
//! Calls never return raw responses. Each one resolves to a
//! [`RemoteData`]: the decoded document or payload, or a typed
//! [`OutcomeError`] (transport failure, HTTP status, JSON:API error objects,
//! or a custom message), paired with the response headers the caller asked
//! to keep.
//!
//! # Example
//!
//! ```no_run
//! use jsonapi_remote::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! struct Article {
//!     title: String,
//! }
//!
//! # async fn run() -> jsonapi_remote::Result<()> {
//! let client = Client::new(HyperTransport::builder().with_logging().build());
//!
//! let request = client
//!     .post("https://api.example.com/articles")
//!     .document(&NewResource::new("articles", serde_json::json!({"title": "Hello"})))?
//!     .build();
//!
//! match client.request(request, JsonApi::<Article>::new()).await.without_headers() {
//!     RemoteData::Succeeded(document) => println!("created {:?}", document.data),
//!     RemoteData::Failed(error) => {
//!         for (field, message) in error.field_errors() {
//!             println!("{field}: {message}");
//!         }
//!     }
//!     RemoteData::NotRequested | RemoteData::InFlight => {}
//! }
//! # Ok(())
//! # }
//! ```

mod body;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod transport;

pub use client::{Client, Tracker};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use transport::{BoxedService, HyperTransport, HyperTransportBuilder, ServiceFuture};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use jsonapi_remote_core::{
    Advance, Body, Classified, Content, DecodeError, DecodeResult, Decoded, Decoder,
    Document, Error, ErrorObject, ErrorSource, ErrorsOnly, ExtractedHeaders, Form, JSON_API_MEDIA_TYPE,
    Json, JsonApi, Method, NewResource, NoContent, OutcomeError, Part, Progress, ProgressSink,
    RawOutcome, Remote, RemoteData, Request, RequestBuilder, Resource, Response, Result,
    StatusCode, SuccessShape, Transport, TransportError, WithHeaders, classify, classify_advance,
    classify_no_content, classify_with, extract, from_json, to_json, to_query_string,
};
