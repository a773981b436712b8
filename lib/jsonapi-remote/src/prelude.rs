//! Prelude module for convenient imports.
//!
//! ```ignore
//! use jsonapi_remote::prelude::*;
//! ```

pub use crate::{
    Classified, Client, ClientConfig, Content, Decoder, Document, ErrorObject, ErrorsOnly, Form,
    HyperTransport, Json, JsonApi, Method, NewResource, OutcomeError, Part, Progress, RemoteData,
    Request, RequestBuilder, Resource, Tracker, Transport, TransportError, WithHeaders,
};
pub use serde::{Deserialize, Serialize};
