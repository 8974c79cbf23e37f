use crate::store::{Action, StoreContext};
use futures::StreamExt;
use gloo_net::http::Request;
use shared::models::*;

const API_BASE: &str = "/api";

pub async fn fetch_info() -> Result<ServiceInfo, gloo_net::Error> {
    Request::get(&format!("{}/info", API_BASE))
        .send()
        .await?
        .json()
        .await
}

/// Posts the story request and feeds every decoded frame to the store.
///
/// Always leaves the store finished, even when the connection drops before
/// the server sends its final frame.
pub async fn stream_story(store: StoreContext, request: StoryRequest) {
    let req = match Request::post(&format!("{}/story", API_BASE)).json(&request) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!("Failed to create request: {:?}", e);
            store.dispatch(Action::Receive(StreamEvent::Error(e.to_string())));
            return;
        }
    };

    let resp = match req.send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!("Failed to send request: {:?}", e);
            store.dispatch(Action::Receive(StreamEvent::Error(e.to_string())));
            return;
        }
    };

    if !resp.ok() {
        let reason = resp.text().await.unwrap_or_else(|_| resp.status_text());
        store.dispatch(Action::Receive(StreamEvent::Error(reason)));
        return;
    }

    let Some(body) = resp.body() else {
        store.dispatch(Action::Receive(StreamEvent::Error(
            "Empty response from server".to_string(),
        )));
        return;
    };

    let mut stream = wasm_streams::ReadableStream::from_raw(body).into_stream();
    let mut decoder = FrameDecoder::new();

    while let Some(result) = stream.next().await {
        let chunk = match result {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::error!("Stream error: {:?}", e);
                break;
            }
        };

        let bytes = js_sys::Uint8Array::new(&chunk).to_vec();
        for event in decoder.push(&bytes) {
            let finished = !matches!(event, StreamEvent::Chunk(_));
            store.dispatch(Action::Receive(event));
            if finished {
                return;
            }
        }
    }

    store.dispatch(Action::Receive(StreamEvent::Error(
        "The connection closed before the story finished".to_string(),
    )));
}
