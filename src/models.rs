//! Data models and structures
//!
//! Request/response types for the image and recommendation flows, plus the
//! environment-driven configuration.

use crate::error::ValidationError;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const PROMPT_MIN_CHARS: usize = 3;
pub const PROMPT_MAX_CHARS: usize = 200;
pub const MAX_RECOMMENDATIONS: usize = 5;
pub const CONTACT_NAME_MIN_CHARS: usize = 2;
pub const CONTACT_MESSAGE_MIN_CHARS: usize = 10;

pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }

    /// Length is counted in characters, not bytes.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let actual = self.prompt.chars().count();
        if actual < PROMPT_MIN_CHARS {
            return Err(ValidationError::PromptTooShort {
                min: PROMPT_MIN_CHARS,
                actual,
            });
        }
        if actual > PROMPT_MAX_CHARS {
            return Err(ValidationError::PromptTooLong {
                max: PROMPT_MAX_CHARS,
                actual,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    pub image_data_uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub interests: String,
    #[serde(default)]
    pub project_list: Vec<String>,
}

impl RecommendationRequest {
    pub fn new(interests: impl Into<String>, project_list: Vec<String>) -> Self {
        Self {
            interests: interests.into(),
            project_list,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Existing,
    NewIdea,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub recommendations: Vec<RecommendationItem>,
}

impl RecommendationResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}

/// A contact form submission. There is no delivery backend; callers only
/// validate it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    /// Checks fields in form order and reports the first failure.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let name_chars = self.name.chars().count();
        if name_chars < CONTACT_NAME_MIN_CHARS {
            return Err(ValidationError::NameTooShort {
                min: CONTACT_NAME_MIN_CHARS,
                actual: name_chars,
            });
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        let message_chars = self.message.chars().count();
        if message_chars < CONTACT_MESSAGE_MIN_CHARS {
            return Err(ValidationError::MessageTooShort {
                min: CONTACT_MESSAGE_MIN_CHARS,
                actual: message_chars,
            });
        }
        Ok(())
    }
}

/// Structural check: one `@`, a non-empty local part, and a dotted domain
/// whose labels are non-empty and do not start or end with `-`.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
        || domain.contains('@')
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    let tld_ok = labels
        .last()
        .map(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false);

    labels.len() >= 2
        && tld_ok
        && labels.iter().all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub chat_model: String,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e.into());
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = non_empty("GEMINI_API_KEY")
            .or_else(|| non_empty("GOOGLE_API_KEY"))
            .ok_or_else(|| Error::Config("GEMINI_API_KEY not set".to_string()))?;

        let chat_model = non_empty("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());

        let request_timeout = match non_empty("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!(
                        "REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                if secs == 0 {
                    return Err(Error::Config(
                        "REQUEST_TIMEOUT_SECS must be greater than zero; unset it for no timeout"
                            .to_string(),
                    ));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            gemini_api_key,
            chat_model,
            request_timeout,
        })
    }
}
