use super::client::GeminiHttpClient;
use super::types::Content;
use crate::ai::ChatService;
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ChatGenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatGenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

pub struct GeminiChatClient {
    http: GeminiHttpClient,
}

impl GeminiChatClient {
    pub fn new(api_key: String, model: String, timeout: Option<Duration>) -> Self {
        Self::new_with_client(api_key, model, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Option<Duration>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiChatClient);

#[async_trait]
impl ChatService for GeminiChatClient {
    async fn generate_structured(
        &self,
        instruction: &str,
        response_schema: &Value,
    ) -> Result<Option<String>> {
        let request = ChatRequest {
            contents: vec![Content::user_text(instruction.to_string())],
            generation_config: ChatGenerationConfig {
                response_mime_type: "application/json",
                response_schema,
            },
        };

        let response = self.http.generate_content(&request).await?;

        let text = response.first_text();
        if text.is_none() {
            tracing::debug!(
                "Gemini chat response carried no text (finish_reason: {:?})",
                response
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref())
            );
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::Mock;
    use wiremock::{MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-2.0-flash";

    fn make_client(server: &MockServer, api_key: &str, model: &str) -> GeminiChatClient {
        GeminiChatClient::new(api_key.to_string(), model.to_string(), None)
            .with_base_url(server.uri())
    }

    fn schema() -> Value {
        serde_json::json!({
            "type": "OBJECT",
            "properties": { "recommendations": { "type": "ARRAY" } }
        })
    }

    #[tokio::test]
    async fn test_generate_structured_returns_json_text() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "text": "{\"recommendations\":[]}" }]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", DEFAULT_MODEL);

        let text = client
            .generate_structured("recommend something", &schema())
            .await
            .unwrap();
        assert_eq!(text.as_deref(), Some("{\"recommendations\":[]}"));
    }

    #[tokio::test]
    async fn test_request_carries_json_mime_type_and_schema() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "recommend something" }] }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {
                        "type": "OBJECT",
                        "properties": { "recommendations": { "type": "ARRAY" } }
                    }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", DEFAULT_MODEL);

        client
            .generate_structured("recommend something", &schema())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = make_client(&server, "bad-key", DEFAULT_MODEL);

        let err = client
            .generate_structured("anything", &schema())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_empty_candidates_yield_no_text() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": []
            })))
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", DEFAULT_MODEL);
        let text = client
            .generate_structured("anything", &schema())
            .await
            .unwrap();
        assert_eq!(text, None);
    }

    #[tokio::test]
    async fn test_strips_models_prefix_from_model_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "{}" }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", "models/gemini-1.5-pro");
        assert_eq!(client.model(), "gemini-1.5-pro");

        client
            .generate_structured("anything", &schema())
            .await
            .unwrap();
    }
}
