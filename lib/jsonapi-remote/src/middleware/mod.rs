//! Tower middleware layers for the hyper transport.
//!
//! Layers wrap a `Service<Request, Response = RawOutcome, Error = Infallible>`
//! and are added with [`HyperTransportBuilder::layer`]. The last layer added
//! is the first to see a request.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs calls and outcomes using `tracing`
//! - [`ConcurrencyLimitLayer`] - Limits concurrent calls (from tower)
//!
//! # Example
//!
//! ```
//! use jsonapi_remote::HyperTransport;
//! use jsonapi_remote::middleware::{ConcurrencyLimitLayer, LoggingLayer};
//!
//! let transport = HyperTransport::builder()
//!     .layer(ConcurrencyLimitLayer::new(4))
//!     .layer(LoggingLayer::new())
//!     .build();
//! # drop(transport);
//! ```
//!
//! [`HyperTransportBuilder::layer`]: crate::HyperTransportBuilder::layer

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};

pub use tower::limit::ConcurrencyLimitLayer;
