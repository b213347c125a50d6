//! Hosted model integration
//!
//! Provider-neutral service traits for the two model calls the flows make,
//! with Gemini implementations and in-memory mocks.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::{GeminiChatClient, GeminiImageClient};
pub use mock::{MockChatClient, MockImageGenerationClient};

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Why the model stopped generating, normalized across providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    Length,
    Safety,
    Blocked,
    Other,
    Unknown,
}

impl FinishReason {
    /// `true` for reasons that count as a normal end of generation.
    pub fn is_complete(self) -> bool {
        matches!(self, FinishReason::Stop | FinishReason::Length)
    }
}

/// Generated media, already encoded as a data URI.
#[derive(Clone, PartialEq)]
pub struct Media {
    pub content_type: String,
    pub url: String,
}

impl Media {
    /// Short description for logs that never includes the payload.
    pub fn summary(&self) -> String {
        format!("{} ({} chars)", self.content_type, self.url.len())
    }
}

impl std::fmt::Debug for Media {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Media")
            .field("content_type", &self.content_type)
            .field("url_len", &self.url.len())
            .finish()
    }
}

/// Raw outcome of an image generation call, before any success/failure
/// classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageGenerationOutput {
    pub finish_reason: Option<FinishReason>,
    pub finish_message: Option<String>,
    pub media: Option<Media>,
    pub text: Option<String>,
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<ImageGenerationOutput>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Ask for JSON output constrained by `response_schema`.
    ///
    /// Returns the raw JSON text, or `None` when the model produced no text.
    async fn generate_structured(
        &self,
        instruction: &str,
        response_schema: &Value,
    ) -> Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reason_completion() {
        assert!(FinishReason::Stop.is_complete());
        assert!(FinishReason::Length.is_complete());
        assert!(!FinishReason::Safety.is_complete());
        assert!(!FinishReason::Blocked.is_complete());
        assert!(!FinishReason::Other.is_complete());
        assert!(!FinishReason::Unknown.is_complete());
    }

    #[test]
    fn test_media_debug_omits_payload() {
        let media = Media {
            content_type: "image/png".to_string(),
            url: "data:image/png;base64,SECRETPAYLOAD".to_string(),
        };

        let debug = format!("{:?}", media);
        assert!(!debug.contains("SECRETPAYLOAD"));
        assert!(media.summary().starts_with("image/png"));
    }
}
