pub mod config;
mod handlers;
mod openai;
pub mod prompt;
mod storyteller;

use crate::handlers::{generate_story, service_info};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use crate::config::{ConfigError, Settings};
pub use crate::openai::OpenAiStoryteller;
pub use crate::storyteller::{GenerationError, Storyteller, TextStream};

#[derive(Clone)]
pub struct AppState {
    pub storyteller: Arc<dyn Storyteller>,
}

pub fn init(router: Router<AppState>, settings: &Settings) -> Router<()> {
    tracing::info!("Using model {} at {}", settings.model, settings.api_base);
    with_storyteller(router, Arc::new(OpenAiStoryteller::new(settings)))
}

pub fn with_storyteller(router: Router<AppState>, storyteller: Arc<dyn Storyteller>) -> Router<()> {
    let state = AppState { storyteller };

    router
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/info", get(service_info))
        .route("/api/story", post(generate_story))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
