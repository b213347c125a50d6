use super::client::GeminiHttpClient;
use super::types::{map_finish_reason, Content, GenerateContentResponse, Part};
use crate::ai::{mime, FinishReason, ImageGenerationOutput, ImageGenerationService, Media};
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// The only model this client talks to. Text-only models cannot return images.
pub const IMAGE_MODEL: &str = "gemini-2.0-flash-exp";

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: ImageGenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageGenerationConfig {
    response_modalities: Vec<String>,
}

pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, timeout: Option<Duration>) -> Self {
        Self::new_with_client(api_key, timeout, reqwest::Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        timeout: Option<Duration>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(
                api_key,
                IMAGE_MODEL.to_string(),
                timeout,
                client,
            ),
        }
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    fn to_output(response: GenerateContentResponse) -> ImageGenerationOutput {
        let Some(candidate) = response.candidates.into_iter().next() else {
            return Self::blocked_prompt_output(
                response
                    .prompt_feedback
                    .and_then(|feedback| feedback.block_reason),
            );
        };

        let parts = candidate.content.map(|c| c.parts).unwrap_or_default();

        let media = parts.iter().find_map(|p| match p {
            Part::InlineData { inline_data } if !inline_data.data.is_empty() => {
                let content_type = if inline_data.mime_type.is_empty() {
                    mime::detect_base64_image_mime(&inline_data.data).to_string()
                } else {
                    inline_data.mime_type.clone()
                };
                let url = mime::to_data_uri(&content_type, &inline_data.data);
                Some(Media { content_type, url })
            }
            _ => None,
        });

        let text: String = parts
            .iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        ImageGenerationOutput {
            finish_reason: candidate.finish_reason.as_deref().map(map_finish_reason),
            finish_message: candidate.finish_message.filter(|m| !m.trim().is_empty()),
            media,
            text: Some(text).filter(|t| !t.trim().is_empty()),
        }
    }

    fn blocked_prompt_output(block_reason: Option<String>) -> ImageGenerationOutput {
        let Some(reason) = block_reason else {
            return ImageGenerationOutput::default();
        };

        match map_finish_reason(&reason) {
            FinishReason::Safety => ImageGenerationOutput {
                finish_reason: Some(FinishReason::Safety),
                ..Default::default()
            },
            _ => ImageGenerationOutput {
                finish_reason: Some(FinishReason::Blocked),
                finish_message: Some(format!("prompt was blocked ({})", reason)),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<ImageGenerationOutput> {
        let request = ImageRequest {
            contents: vec![Content::user_text(prompt.to_string())],
            generation_config: ImageGenerationConfig {
                response_modalities: vec!["TEXT".to_string(), "IMAGE".to_string()],
            },
        };

        let gemini_response = self.http.generate_content(&request).await?;
        let output = Self::to_output(gemini_response);

        tracing::debug!(
            "Gemini image response: finish_reason={:?}, media={:?}, has_text={}",
            output.finish_reason,
            output.media.as_ref().map(Media::summary),
            output.text.is_some()
        );

        Ok(output)
    }
}
