//! Runs the router on an ephemeral port with a scripted storyteller.

use async_trait::async_trait;
use axum::Router;
use backend::{GenerationError, Storyteller, TextStream};
use futures::stream;
use shared::models::{FrameDecoder, ServiceInfo, StoryOutput, StoryRequest, StreamEvent};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

enum Script {
    Chunks(Vec<&'static str>),
    FailAfter(Vec<&'static str>),
    Refuse,
}

struct ScriptedStoryteller {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedStoryteller {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Storyteller for ScriptedStoryteller {
    async fn tell(&self, _request: &StoryRequest) -> Result<TextStream, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let items: Vec<Result<String, GenerationError>> = match &self.script {
            Script::Chunks(chunks) => chunks.iter().map(|c| Ok(c.to_string())).collect(),
            Script::FailAfter(chunks) => chunks
                .iter()
                .map(|c| Ok(c.to_string()))
                .chain(std::iter::once(Err(GenerationError::Build(
                    "connection reset".to_string(),
                ))))
                .collect(),
            Script::Refuse => {
                return Err(GenerationError::Build("quota exceeded".to_string()));
            }
        };
        Ok(Box::pin(stream::iter(items)))
    }

    fn model(&self) -> &str {
        "scripted-model"
    }
}

async fn serve(storyteller: Arc<ScriptedStoryteller>) -> String {
    let router = backend::with_storyteller(Router::new(), storyteller);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn read_events(response: reqwest::Response) -> Vec<StreamEvent> {
    let body = response.bytes().await.unwrap();
    let mut decoder = FrameDecoder::new();
    decoder.push(&body)
}

#[tokio::test]
async fn health_check() {
    let base = serve(ScriptedStoryteller::new(Script::Chunks(vec![]))).await;
    let body = reqwest::get(format!("{base}/api/health"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn info_reports_model() {
    let base = serve(ScriptedStoryteller::new(Script::Chunks(vec![]))).await;
    let info: ServiceInfo = reqwest::get(format!("{base}/api/info"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(info.model, "scripted-model");
}

#[tokio::test]
async fn streams_chunks_in_order_then_done() {
    let storyteller =
        ScriptedStoryteller::new(Script::Chunks(vec!["Elara ", "looked up.\n\n", "The end."]));
    let base = serve(storyteller.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/story"))
        .json(&StoryRequest::default())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );

    let events = read_events(response).await;
    assert_eq!(events.last(), Some(&StreamEvent::Done));

    let mut output = StoryOutput::default();
    for event in events {
        output.apply(event);
    }
    assert_eq!(output.text, "Elara looked up.\n\nThe end.");
    assert!(output.error.is_none());
    assert_eq!(storyteller.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_field_is_rejected_without_calling_the_model() {
    let storyteller = ScriptedStoryteller::new(Script::Chunks(vec!["never"]));
    let base = serve(storyteller.clone()).await;

    let request = StoryRequest {
        hobby: " ".to_string(),
        ..Default::default()
    };
    let response = reqwest::Client::new()
        .post(format!("{base}/api/story"))
        .json(&request)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().await.unwrap().contains("hobby"));
    assert_eq!(storyteller.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn missing_field_in_json_is_rejected() {
    let storyteller = ScriptedStoryteller::new(Script::Chunks(vec!["never"]));
    let base = serve(storyteller.clone()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/story"))
        .json(&serde_json::json!({ "name": "Elara" }))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(storyteller.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn refusal_becomes_inline_error() {
    let base = serve(ScriptedStoryteller::new(Script::Refuse)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/story"))
        .json(&StoryRequest::default())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let events = read_events(response).await;
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], StreamEvent::Error(m) if m.contains("quota exceeded")));
}

#[tokio::test]
async fn mid_stream_failure_keeps_partial_text() {
    let base = serve(ScriptedStoryteller::new(Script::FailAfter(vec!["Once ", "upon"]))).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/story"))
        .json(&StoryRequest::default())
        .send()
        .await
        .unwrap();

    let events = read_events(response).await;
    assert!(!events.contains(&StreamEvent::Done));

    let mut output = StoryOutput::default();
    for event in events {
        output.apply(event);
    }
    assert_eq!(output.text, "Once upon");
    assert!(output.error.unwrap().contains("connection reset"));
}
