//! Transport trait.
//!
//! A [`Transport`] executes a [`Request`] and reports exactly one
//! [`RawOutcome`]. It never fails: every failure mode is one of the outcome
//! variants. Implement it directly for custom stacks or for tests.
//!
//! # Example
//!
//! ```
//! use std::future::Future;
//!
//! use jsonapi_remote_core::{RawOutcome, Request, Response, Transport};
//!
//! #[derive(Clone)]
//! struct Canned(u16);
//!
//! impl Transport for Canned {
//!     fn send(&self, _request: Request) -> impl Future<Output = RawOutcome> + Send {
//!         let status = self.0;
//!         async move { RawOutcome::from_response(Response::new(status, Vec::new(), "")) }
//!     }
//! }
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::{RawOutcome, Request};

/// Executes requests.
pub trait Transport: Send + Sync {
    /// Send a request and report what happened.
    fn send(&self, request: Request) -> impl Future<Output = RawOutcome> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn send(&self, request: Request) -> impl Future<Output = RawOutcome> + Send {
        self.as_ref().send(request)
    }
}

// ============================================================================
// Progress
// ============================================================================

/// Transfer progress of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Progress {
    /// Request body bytes handed to the connection.
    Sending {
        /// Bytes sent so far.
        sent: u64,
        /// Total body size.
        size: u64,
    },
    /// Response body bytes received.
    Receiving {
        /// Bytes received so far.
        received: u64,
        /// Total size, when the server announced it.
        size: Option<u64>,
    },
}

impl Progress {
    /// Completed fraction in `0.0..=1.0`, when the total is known.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> Option<f64> {
        let (done, total) = match *self {
            Self::Sending { sent, size } => (sent, Some(size)),
            Self::Receiving { received, size } => (received, size),
        };
        match total {
            Some(0) => Some(1.0),
            Some(total) => Some((done as f64 / total as f64).min(1.0)),
            None => None,
        }
    }
}

/// Shared progress callback, carried in [`Request::extensions`].
///
/// Transports that can observe body transfer look it up and report to it.
#[derive(Clone)]
pub struct ProgressSink(Arc<dyn Fn(Progress) + Send + Sync>);

impl ProgressSink {
    /// Wrap a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Progress) + Send + Sync + 'static,
    {
        Self(Arc::new(callback))
    }

    /// Report progress.
    pub fn report(&self, progress: Progress) {
        (self.0)(progress);
    }
}

impl fmt::Debug for ProgressSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressSink").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[test]
    fn fraction() {
        assert_eq!(Progress::Sending { sent: 5, size: 10 }.fraction(), Some(0.5));
        assert_eq!(Progress::Sending { sent: 0, size: 0 }.fraction(), Some(1.0));
        assert_eq!(
            Progress::Receiving {
                received: 7,
                size: None
            }
            .fraction(),
            None
        );
        assert_eq!(
            Progress::Receiving {
                received: 12,
                size: Some(10)
            }
            .fraction(),
            Some(1.0)
        );
    }

    #[test]
    fn sink_reports() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            ProgressSink::new(move |progress| {
                seen.lock().expect("lock").push(progress);
            })
        };

        sink.report(Progress::Sending { sent: 1, size: 2 });
        sink.clone().report(Progress::Sending { sent: 2, size: 2 });

        assert_eq!(seen.lock().expect("lock").len(), 2);
        assert!(format!("{sink:?}").contains("ProgressSink"));
    }
}
