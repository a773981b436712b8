//! Prelude module for convenient imports.
//!
//! ```ignore
//! use jsonapi_remote_core::prelude::*;
//! ```

pub use crate::{
    Classified, Content, Decoder, Document, ErrorObject, Form, Json, JsonApi, Method,
    NewResource, OutcomeError, Part, RawOutcome, Remote, RemoteData, Request, RequestBuilder,
    Resource, Response, Transport, TransportError, WithHeaders,
};
