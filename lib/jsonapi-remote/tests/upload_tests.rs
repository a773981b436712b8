//! Integration tests for background uploads with progress and cancellation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert2::{check, let_assert};
use jsonapi_remote::{
    Client, Form, HyperTransport, JsonApi, Progress, RemoteData, Resource, WithHeaders,
};
use serde::Deserialize;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header_regex, method, path},
};

#[derive(Debug, Deserialize)]
struct Attachment {
    filename: String,
}

fn attachment_body() -> serde_json::Value {
    serde_json::json!({
        "data": {"type": "attachments", "id": "9", "attributes": {"filename": "report.pdf"}}
    })
}

#[tokio::test]
async fn test_upload_reports_progress_and_completes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/attachments"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("Location", "/attachments/9")
                .set_body_json(attachment_body()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(HyperTransport::new());
    let form = Form::new()
        .text("description", "Q3")
        .file("file", "report.pdf", vec![0x25_u8; 40 * 1024]);
    let request = client
        .post(format!("{}/attachments", mock_server.uri()))
        .multipart(form)
        .extract_header("location")
        .build();
    let body_size = request
        .body()
        .map(|body| body.bytes().len() as u64)
        .expect("multipart body");

    let progress = Arc::new(Mutex::new(Vec::new()));
    let completed = Arc::new(Mutex::new(None));

    let tracker = {
        let progress = Arc::clone(&progress);
        let completed = Arc::clone(&completed);
        client.upload(
            request,
            JsonApi::<Resource<Attachment>>::new(),
            move |event| progress.lock().expect("lock").push(event),
            move |result| *completed.lock().expect("lock") = Some(result),
        )
    };

    check!(tracker.wait().await);

    let progress = progress.lock().expect("lock").clone();
    let sending: Vec<_> = progress
        .iter()
        .filter_map(|event| match event {
            Progress::Sending { sent, size } => Some((*sent, *size)),
            Progress::Receiving { .. } => None,
        })
        .collect();
    check!(sending.len() >= 2);
    check!(sending.windows(2).all(|pair| pair[0].0 < pair[1].0));
    check!(sending.last() == Some(&(body_size, body_size)));

    let_assert!(Some(Progress::Receiving { received, size }) = progress.last().copied());
    check!(Some(received) == size);

    let result = completed.lock().expect("lock").take();
    let_assert!(Some(RemoteData::Succeeded(WithHeaders { value, headers })) = result);
    check!(value.data.attributes.filename == "report.pdf");
    check!(headers.get("Location") == Some("/attachments/9"));
}

#[tokio::test]
async fn test_cancelled_upload_never_completes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/attachments"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(attachment_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(HyperTransport::new());
    let request = client
        .post(format!("{}/attachments", mock_server.uri()))
        .multipart(Form::new().file("file", "notes.txt", "hello"))
        .build();

    let completed = Arc::new(AtomicUsize::new(0));
    let tracker = {
        let completed = Arc::clone(&completed);
        client.upload(
            request,
            JsonApi::<Resource<Attachment>>::new(),
            |_| {},
            move |_| {
                completed.fetch_add(1, Ordering::SeqCst);
            },
        )
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    check!(!tracker.is_finished());
    tracker.cancel();

    check!(!tracker.wait().await);
    check!(completed.load(Ordering::SeqCst) == 0);
}

#[tokio::test]
async fn test_upload_failure_is_delivered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/attachments"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "errors": [{"detail": "is too large", "source": {"pointer": "/data/attributes/file"}}]
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(HyperTransport::new());
    let request = client
        .post(format!("{}/attachments", mock_server.uri()))
        .multipart(Form::new().file("file", "huge.bin", vec![0_u8; 1024]))
        .build();

    let (sender, receiver) = tokio::sync::oneshot::channel();
    let tracker = client.upload(
        request,
        JsonApi::<Resource<Attachment>>::new(),
        |_| {},
        move |result| {
            let _ = sender.send(result.without_headers());
        },
    );

    let result = receiver.await.expect("completion");
    check!(tracker.wait().await);

    let_assert!(RemoteData::Failed(error) = result);
    check!(error.field_errors() == [("file", "is too large".to_string())]);
}
