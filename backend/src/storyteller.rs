use async_openai::error::OpenAIError;
use async_trait::async_trait;
use futures::stream::BoxStream;
use shared::models::StoryRequest;
use thiserror::Error;

/// Story text as it arrives, in order.
pub type TextStream = BoxStream<'static, Result<String, GenerationError>>;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("API error: {0}")]
    Api(#[from] OpenAIError),
    #[error("Failed to build request: {0}")]
    Build(String),
}

#[async_trait]
pub trait Storyteller: Send + Sync {
    async fn tell(&self, request: &StoryRequest) -> Result<TextStream, GenerationError>;

    fn model(&self) -> &str;
}
