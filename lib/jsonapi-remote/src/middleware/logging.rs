//! Call logging middleware.
//!
//! Logs each call and its raw outcome using the `tracing` crate.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use jsonapi_remote_core::{RawOutcome, Request};
use tower::{Layer, Service};
use tracing::{Instrument, Level, debug, info, span, warn};

/// Layer that adds call logging.
///
/// # Example
///
/// ```
/// use jsonapi_remote::HyperTransport;
/// use jsonapi_remote::middleware::LoggingLayer;
///
/// let transport = HyperTransport::builder()
///     .layer(LoggingLayer::new())
///     .build();
/// # drop(transport);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLayer {
    level: LogLevel,
}

/// Log level for the logging middleware.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Log at debug level (request headers included).
    Debug,
    /// Log at info level (summary only).
    #[default]
    Info,
}

impl LoggingLayer {
    /// Create a new logging layer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging layer that logs at debug level.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            level: LogLevel::Debug,
        }
    }
}

impl<S> Layer<S> for LoggingLayer {
    type Service = Logging<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Logging {
            inner,
            level: self.level,
        }
    }
}

/// Service that logs calls and their outcomes.
#[derive(Debug, Clone)]
pub struct Logging<S> {
    inner: S,
    level: LogLevel,
}

impl<S> Logging<S> {
    /// Create a new logging service wrapping the given service.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            level: LogLevel::Info,
        }
    }
}

impl<S> Service<Request> for Logging<S>
where
    S: Service<Request, Response = RawOutcome, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = RawOutcome;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<RawOutcome, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Infallible>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let method = request.method();
        let url = request.url().to_string();
        let level = self.level;

        let span = span!(Level::INFO, "http_request", %method, %url);

        // the clone may not be ready; keep the one that was polled
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(
            async move {
                let start = Instant::now();

                match level {
                    LogLevel::Debug => {
                        debug!(
                            method = %method,
                            url = %url,
                            headers = ?request.wire_headers(),
                            "sending request"
                        );
                    }
                    LogLevel::Info => {
                        info!(method = %method, url = %url, "sending request");
                    }
                }

                let result = inner.call(request).await;
                let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

                if let Ok(outcome) = &result {
                    log_outcome(outcome, elapsed_ms);
                }

                result
            }
            .instrument(span),
        )
    }
}

fn log_outcome(outcome: &RawOutcome, elapsed_ms: u64) {
    match outcome {
        RawOutcome::GoodStatus(response) => {
            info!(status = response.status(), elapsed_ms, "request completed");
        }
        RawOutcome::BadStatus(response) => {
            warn!(
                status = response.status(),
                elapsed_ms, "request failed with HTTP error"
            );
        }
        RawOutcome::Timeout => warn!(elapsed_ms, "request timed out"),
        RawOutcome::NetworkError => warn!(elapsed_ms, "network error"),
        RawOutcome::BadUrl(url) => warn!(%url, "bad url"),
    }
}

#[cfg(test)]
mod tests {
    use jsonapi_remote_core::{Method, Response};
    use tower::ServiceExt;
    use tower::service_fn;

    use super::*;

    #[test]
    fn logging_layer_default() {
        let layer = LoggingLayer::new();
        assert_eq!(layer.level, LogLevel::Info);
    }

    #[test]
    fn logging_layer_debug() {
        let layer = LoggingLayer::debug();
        assert_eq!(layer.level, LogLevel::Debug);
    }

    #[tokio::test]
    async fn logging_passes_outcome_through() {
        let inner = service_fn(|_request: Request| async {
            Ok::<_, Infallible>(RawOutcome::from_response(Response::new(
                404,
                Vec::new(),
                "",
            )))
        });
        let service = LoggingLayer::debug().layer(inner);

        let request = Request::builder(Method::Get, "http://localhost/articles").build();
        let outcome = service.oneshot(request).await.expect("infallible");

        assert_eq!(outcome.status(), Some(404));
    }
}
