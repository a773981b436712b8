//! Public client surfaces.
//!
//! [`Client`] wraps any [`Transport`] and classifies what it reports.
//! Requests resolve once through a future; uploads run in the background and
//! call back with progress and the final result.

use jsonapi_remote_core::{
    Classified, Content, Decoder, Method, Progress, ProgressSink, RemoteData, Request,
    RequestBuilder, Transport, classify, classify_advance, classify_no_content,
};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::HyperTransport;

/// JSON:API client.
///
/// Every call resolves to a [`Classified`] result; transport failures, HTTP
/// errors and JSON:API error documents are all data, never panics or
/// `Err`s.
///
/// # Example
///
/// ```no_run
/// use jsonapi_remote::{Client, Document, JsonApi, RemoteData};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct Article {
///     title: String,
/// }
///
/// # async fn run() {
/// let client: Client = Client::default();
/// let request = client
///     .get("https://api.example.com/articles/1")
///     .extract_header("ETag")
///     .build();
///
/// match client.request(request, JsonApi::<Article>::new()).await {
///     RemoteData::Succeeded(found) => {
///         let document: Document<_> = found.value;
///         println!("{:?} (etag {:?})", document.data, found.headers.get("etag"));
///     }
///     RemoteData::Failed(failure) => eprintln!("{}", failure.value),
///     RemoteData::NotRequested | RemoteData::InFlight => unreachable!(),
/// }
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Client<T = HyperTransport> {
    transport: T,
}

impl<T> Client<T> {
    /// Wrap a transport.
    #[must_use]
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Get a reference to the inner transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Consume the wrapper and return the inner transport.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Start a `GET` request.
    #[must_use]
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        Request::builder(Method::Get, url)
    }

    /// Start a `POST` request.
    #[must_use]
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        Request::builder(Method::Post, url)
    }

    /// Start a `PUT` request.
    #[must_use]
    pub fn put(&self, url: impl Into<String>) -> RequestBuilder {
        Request::builder(Method::Put, url)
    }

    /// Start a `PATCH` request.
    #[must_use]
    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder {
        Request::builder(Method::Patch, url)
    }

    /// Start a `DELETE` request.
    #[must_use]
    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder {
        Request::builder(Method::Delete, url)
    }
}

impl<T: Transport> Client<T> {
    /// Send a request and decode the body with `decoder`.
    ///
    /// Use [`JsonApi`](crate::JsonApi) for documents, [`Json`](crate::Json)
    /// or any custom [`Decoder`] for other payloads.
    pub async fn request<D: Decoder>(&self, request: Request, decoder: D) -> Classified<D::Output> {
        let (method, url, extract) = describe(&request);
        let outcome = self.transport.send(request).await;
        let result = classify(outcome, decoder, &extract);
        log_result(method, &url, &result);
        result
    }

    /// Send a request whose success carries no body.
    ///
    /// 200, 202 and 204 succeed; a 422 is decoded as a list of error objects.
    pub async fn request_no_content(&self, request: Request) -> Classified<()> {
        let (method, url, extract) = describe(&request);
        let outcome = self.transport.send(request).await;
        let result = classify_no_content(outcome, &extract);
        log_result(method, &url, &result);
        result
    }

    /// Send a request that answers with either a document or a 204.
    pub async fn request_advance<D: Decoder>(
        &self,
        request: Request,
        decoder: D,
    ) -> Classified<Content<D::Output>> {
        let (method, url, extract) = describe(&request);
        let outcome = self.transport.send(request).await;
        let result = classify_advance(outcome, decoder, &extract);
        log_result(method, &url, &result);
        result
    }
}

impl<T> Client<T>
where
    T: Transport + Clone + 'static,
{
    /// Send a request in the background, typically a multipart upload.
    ///
    /// `on_progress` sees transfer progress as reported by the transport;
    /// `on_complete` is called once with the classified result, unless the
    /// returned [`Tracker`] cancels the call first.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a Tokio runtime.
    pub fn upload<D, P, C>(
        &self,
        mut request: Request,
        decoder: D,
        on_progress: P,
        on_complete: C,
    ) -> Tracker
    where
        D: Decoder + Send + 'static,
        D::Output: Send,
        P: Fn(Progress) + Send + Sync + 'static,
        C: FnOnce(Classified<D::Output>) + Send + 'static,
    {
        request
            .extensions_mut()
            .insert(ProgressSink::new(on_progress));

        let client = self.clone();
        let handle = tokio::spawn(async move {
            let result = client.request(request, decoder).await;
            on_complete(result);
        });

        Tracker { handle }
    }
}

/// Handle on a background upload.
#[derive(Debug)]
pub struct Tracker {
    handle: JoinHandle<()>,
}

impl Tracker {
    /// Abort the call. The completion callback will not run unless it
    /// already has.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Whether the call has completed or been cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the call to settle; `true` when the completion callback ran.
    pub async fn wait(self) -> bool {
        self.handle.await.is_ok()
    }
}

fn describe(request: &Request) -> (Method, String, Vec<String>) {
    (
        request.method(),
        request.url().to_string(),
        request.extract_headers().to_vec(),
    )
}

fn log_result<S>(method: Method, url: &str, result: &Classified<S>) {
    match result {
        RemoteData::Succeeded(success) => {
            debug!(%method, %url, headers = success.headers.len(), "call succeeded");
        }
        RemoteData::Failed(failure) => {
            debug!(%method, %url, error = %failure.value, "call failed");
        }
        RemoteData::NotRequested | RemoteData::InFlight => {}
    }
}
