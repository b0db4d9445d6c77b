// Shared test harness: in-memory store, mock providers, request helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use meetscribe::{
    create_router, AnalysisKind, Analyzer, AppState, Segment, Store, Transcriber,
    TranscriptionResult,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Transcriber stub that records calls and checks the upload actually exists
/// on disk when the provider would read it.
pub struct MockTranscriber {
    pub result: TranscriptionResult,
    pub calls: AtomicUsize,
}

impl MockTranscriber {
    pub fn new() -> Self {
        Self {
            result: TranscriptionResult {
                text: "Hello from the mock transcription.".to_string(),
                duration: 10.0,
                segments: vec![Segment {
                    id: 0,
                    start: 0.0,
                    end: 10.0,
                    text: "Hello from the mock transcription.".to_string(),
                    tokens: vec![50364, 2425],
                    temperature: 0.0,
                    avg_logprob: -0.21,
                    compression_ratio: 1.1,
                    no_speech_prob: 0.01,
                }],
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, path: &Path) -> anyhow::Result<TranscriptionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        anyhow::ensure!(path.exists(), "audio file missing at transcription time");
        Ok(self.result.clone())
    }
}

/// Transcriber stub that always fails with a provider-style message.
pub struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(&self, _path: &Path) -> anyhow::Result<TranscriptionResult> {
        anyhow::bail!("provider quota exceeded")
    }
}

/// Analyzer stub that records calls and echoes the requested kind.
pub struct MockAnalyzer {
    pub calls: AtomicUsize,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, _transcript_text: &str, kind: AnalysisKind) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("mock {} result", kind.as_str()))
    }
}

/// Analyzer stub that always fails with a provider-style message.
pub struct FailingAnalyzer;

#[async_trait]
impl Analyzer for FailingAnalyzer {
    async fn analyze(&self, _transcript_text: &str, _kind: AnalysisKind) -> anyhow::Result<String> {
        anyhow::bail!("model overloaded")
    }
}

/// Fully wired app over an in-memory database and mock providers. The temp
/// uploads dir lives as long as the harness.
pub struct TestApp {
    pub state: AppState,
    pub transcriber: Arc<MockTranscriber>,
    pub analyzer: Arc<MockAnalyzer>,
    pub uploads: tempfile::TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_max_upload(100 * 1024 * 1024).await
    }

    pub async fn with_max_upload(max_upload_bytes: usize) -> Self {
        let store = Store::connect("sqlite::memory:")
            .await
            .expect("in-memory store");
        let transcriber = Arc::new(MockTranscriber::new());
        let analyzer = Arc::new(MockAnalyzer::new());
        let uploads = tempfile::tempdir().expect("temp uploads dir");

        let state = AppState::new(
            store,
            transcriber.clone(),
            analyzer.clone(),
            uploads.path().join("uploads"),
            max_upload_bytes,
        );

        Self {
            state,
            transcriber,
            analyzer,
            uploads,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Names of files currently sitting in the uploads scratch dir.
    pub fn upload_names(&self) -> Vec<String> {
        let dir = self.uploads.path().join("uploads");
        if !dir.exists() {
            return Vec::new();
        }
        std::fs::read_dir(dir)
            .expect("read uploads dir")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect()
    }
}

pub async fn send_json(
    router: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    dispatch(router, request).await
}

pub async fn send(router: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    dispatch(router, request).await
}

pub async fn dispatch(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

/// Build a multipart/form-data body with an optional meetingId text field and
/// an optional audio file part.
pub fn audio_form(
    meeting_id: Option<&str>,
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(id) = meeting_id {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"meetingId\"\r\n\r\n{id}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((file_name, mime, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"audio\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}
