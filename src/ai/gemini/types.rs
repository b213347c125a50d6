//! Shared Gemini payload types used by the chat and image clients.

use crate::ai::FinishReason;
use serde::{Deserialize, Serialize};

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user_text(text: String) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::Text { text }],
        }
    }
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    /// Anything else (function calls, thoughts, ...) is tolerated and ignored.
    Other(serde_json::Value),
}

/// Base64 inline payload returned for generated media.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub data: String,
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate, if any are non-empty.
    pub fn first_text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Candidate completion item returned by Gemini.
///
/// `content` is absent when the candidate was blocked before producing output.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub finish_message: Option<String>,
}

/// Present when the prompt itself was rejected.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses:
/// `{"error": {"code": 400, "message": "...", "status": "INVALID_ARGUMENT"}}`.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiErrorDetail {
    /// `STATUS: message`, or just the message when no status is given.
    pub fn describe(&self) -> String {
        match &self.status {
            Some(status) => format!("{}: {}", status, self.message),
            None => self.message.clone(),
        }
    }
}

/// Map a Gemini `finishReason` string onto [`FinishReason`].
pub fn map_finish_reason(raw: &str) -> FinishReason {
    match raw {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::Length,
        "SAFETY" | "IMAGE_SAFETY" | "PROHIBITED_CONTENT" | "SPII" | "BLOCKLIST" => {
            FinishReason::Safety
        }
        "RECITATION" | "IMAGE_RECITATION" | "LANGUAGE" | "OTHER" | "IMAGE_OTHER"
        | "NO_IMAGE" | "MALFORMED_FUNCTION_CALL" => FinishReason::Other,
        _ => FinishReason::Unknown,
    }
}
