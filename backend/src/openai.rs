use crate::config::Settings;
use crate::prompt::build_conversation;
use crate::storyteller::{GenerationError, Storyteller, TextStream};
use async_openai::{Client, config::OpenAIConfig, types::chat::CreateChatCompletionRequestArgs};
use async_trait::async_trait;
use futures::StreamExt;
use shared::models::StoryRequest;

/// Streams stories from any OpenAI-compatible chat completions endpoint.
///
/// Gemini is reached through its OpenAI compatibility layer, so the system
/// instruction always travels as a regular system message.
pub struct OpenAiStoryteller {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiStoryteller {
    pub fn new(settings: &Settings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(settings.api_key.clone())
            .with_api_base(settings.api_base.clone());

        Self {
            client: Client::with_config(config),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

#[async_trait]
impl Storyteller for OpenAiStoryteller {
    async fn tell(&self, request: &StoryRequest) -> Result<TextStream, GenerationError> {
        let conversation =
            build_conversation(request).map_err(|e| GenerationError::Build(e.to_string()))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(conversation)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| GenerationError::Build(e.to_string()))?;

        let stream = self.client.chat().create_stream(request).await?;

        let text = stream.filter_map(|result| async move {
            match result {
                Ok(response) => response
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.delta.content)
                    .filter(|content| !content.is_empty())
                    .map(Ok),
                Err(e) => Some(Err(GenerationError::from(e))),
            }
        });

        Ok(text.boxed())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::SYSTEM_INSTRUCTION;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sse_body(data_lines: &[&str]) -> String {
        let mut body = String::new();
        for line in data_lines {
            body.push_str(&format!("data: {line}\n\n"));
        }
        body
    }

    fn chunk(content: &str) -> String {
        serde_json::json!({
            "id": "chatcmpl-story",
            "object": "chat.completion.chunk",
            "created": 1,
            "model": "gemini-2.5-flash",
            "choices": [{
                "index": 0,
                "delta": { "role": "assistant", "content": content },
                "finish_reason": null
            }]
        })
        .to_string()
    }

    fn storyteller(server: &MockServer) -> OpenAiStoryteller {
        let mut settings = Settings::new("test-key");
        settings.api_base = server.uri();
        OpenAiStoryteller::new(&settings)
    }

    async fn collect(
        storyteller: &OpenAiStoryteller,
    ) -> Vec<Result<String, GenerationError>> {
        match storyteller.tell(&StoryRequest::default()).await {
            Ok(stream) => stream.collect().await,
            Err(e) => vec![Err(e)],
        }
    }

    #[tokio::test]
    async fn forwards_deltas_in_order() {
        let server = MockServer::start().await;
        let chunks = [chunk("Once upon"), chunk(""), chunk(" a time"), chunk(", Elara.")];
        let mut lines: Vec<&str> = chunks.iter().map(String::as_str).collect();
        lines.push("[DONE]");

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "gemini-2.5-flash",
                "stream": true,
                "messages": [{ "role": "system", "content": SYSTEM_INSTRUCTION }]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(sse_body(&lines), "text/event-stream"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let results = collect(&storyteller(&server)).await;
        let text: Vec<String> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(text, vec!["Once upon", " a time", ", Elara."]);
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_as_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {
                    "message": "API key not valid",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": "401"
                }
            })))
            .mount(&server)
            .await;

        let results = collect(&storyteller(&server)).await;
        assert!(results.iter().any(|r| r.is_err()));
    }

    #[test]
    fn reports_configured_model() {
        let mut settings = Settings::new("key");
        settings.model = "gemini-2.5-pro".to_string();
        assert_eq!(OpenAiStoryteller::new(&settings).model(), "gemini-2.5-pro");
    }
}
