//! Request and response bodies with progress reporting.

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use http_body::{Body, Frame, SizeHint};
use http_body_util::BodyExt;
use jsonapi_remote_core::{Progress, ProgressSink};

/// Bytes handed to the connection per frame.
pub(crate) const CHUNK_SIZE: usize = 16 * 1024;

/// Request body that yields its bytes in chunks and reports each one.
pub(crate) struct ProgressBody {
    remaining: Bytes,
    sent: u64,
    size: u64,
    sink: Option<ProgressSink>,
}

impl ProgressBody {
    pub(crate) fn new(bytes: Option<Bytes>, sink: Option<ProgressSink>) -> Self {
        let remaining = bytes.unwrap_or_default();
        Self {
            size: remaining.len() as u64,
            remaining,
            sent: 0,
            sink,
        }
    }
}

impl Body for ProgressBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        if this.remaining.is_empty() {
            return Poll::Ready(None);
        }

        let chunk = this
            .remaining
            .split_to(CHUNK_SIZE.min(this.remaining.len()));
        this.sent += chunk.len() as u64;
        if let Some(sink) = &this.sink {
            sink.report(Progress::Sending {
                sent: this.sent,
                size: this.size,
            });
        }

        Poll::Ready(Some(Ok(Frame::data(chunk))))
    }

    fn is_end_stream(&self) -> bool {
        self.remaining.is_empty()
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(self.remaining.len() as u64)
    }
}

/// Read a response body to the end, reporting received bytes.
pub(crate) async fn collect_with_progress<B>(
    body: B,
    size: Option<u64>,
    sink: Option<&ProgressSink>,
) -> Result<Bytes, B::Error>
where
    B: Body<Data = Bytes>,
{
    let mut body = std::pin::pin!(body);
    let mut buf = BytesMut::new();
    while let Some(frame) = body.as_mut().frame().await {
        let Ok(data) = frame?.into_data() else {
            // trailers
            continue;
        };
        buf.extend_from_slice(&data);
        if let Some(sink) = sink {
            sink.report(Progress::Receiving {
                received: buf.len() as u64,
                size,
            });
        }
    }
    Ok(buf.freeze())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use http_body_util::Full;

    use super::*;

    fn recording_sink() -> (ProgressSink, Arc<Mutex<Vec<Progress>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            ProgressSink::new(move |progress| seen.lock().expect("lock").push(progress))
        };
        (sink, seen)
    }

    #[tokio::test]
    async fn empty_body_ends_immediately() {
        let body = ProgressBody::new(None, None);
        assert!(body.is_end_stream());
        assert_eq!(body.size_hint().exact(), Some(0));

        let collected = body.collect().await.expect("infallible").to_bytes();
        assert!(collected.is_empty());
    }

    #[tokio::test]
    async fn body_reports_each_chunk() {
        let (sink, seen) = recording_sink();
        let data = Bytes::from(vec![7_u8; CHUNK_SIZE * 2 + 10]);
        let body = ProgressBody::new(Some(data.clone()), Some(sink));
        assert_eq!(body.size_hint().exact(), Some(data.len() as u64));

        let collected = body.collect().await.expect("infallible").to_bytes();
        assert_eq!(collected, data);

        let size = data.len() as u64;
        let seen = seen.lock().expect("lock").clone();
        assert_eq!(
            seen,
            vec![
                Progress::Sending {
                    sent: CHUNK_SIZE as u64,
                    size
                },
                Progress::Sending {
                    sent: 2 * CHUNK_SIZE as u64,
                    size
                },
                Progress::Sending { sent: size, size },
            ]
        );
    }

    #[tokio::test]
    async fn collect_reports_received_bytes() {
        let (sink, seen) = recording_sink();
        let body = Full::new(Bytes::from_static(b"hello"));

        let bytes = collect_with_progress(body, Some(5), Some(&sink))
            .await
            .expect("infallible");

        assert_eq!(bytes.as_ref(), b"hello");
        assert_eq!(
            seen.lock().expect("lock").as_slice(),
            &[Progress::Receiving {
                received: 5,
                size: Some(5)
            }]
        );
    }
}
