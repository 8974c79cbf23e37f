use crate::AppState;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use shared::models::{ServiceInfo, StoryRequest, StreamEvent};
use std::io::Error;

pub async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        model: state.storyteller.model().to_string(),
    })
}

/// Streams a story for the submitted details as server-sent events.
pub async fn generate_story(
    State(state): State<AppState>,
    Json(payload): Json<StoryRequest>,
) -> Response {
    if let Err(e) = payload.validate() {
        tracing::warn!("Rejected story request: {}", e);
        return (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response();
    }

    tracing::info!(
        theme = %payload.theme,
        setting = %payload.setting,
        length = payload.length,
        "Generating story"
    );

    let body = Body::from_stream(async_stream::stream! {
        let mut stream = match state.storyteller.tell(&payload).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("Failed to start story generation: {}", e);
                yield Ok::<String, Error>(StreamEvent::Error(e.to_string()).to_frame());
                return;
            }
        };

        let mut chunks = 0usize;
        while let Some(result) = stream.next().await {
            match result {
                Ok(text) => {
                    chunks += 1;
                    yield Ok(StreamEvent::Chunk(text).to_frame());
                }
                Err(e) => {
                    tracing::error!("Story stream failed after {} chunks: {}", chunks, e);
                    yield Ok(StreamEvent::Error(e.to_string()).to_frame());
                    return;
                }
            }
        }

        tracing::debug!("Story finished after {} chunks", chunks);
        yield Ok(StreamEvent::Done.to_frame());
    });

    (
        [
            (header::CONTENT_TYPE, "text/event-stream"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        body,
    )
        .into_response()
}
