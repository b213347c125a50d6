//! Transport for Gemini's `generateContent` endpoint.

use super::types::{ApiErrorResponse, GenerateContentResponse};
use crate::{Error, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSION: &str = "v1beta";

/// Error bodies longer than this are cut when no structured message exists.
const MAX_RAW_ERROR_CHARS: usize = 500;

/// Gemini REST transport bound to one model. The image and chat clients each
/// own one, sharing the underlying connection pool through `reqwest::Client`.
pub struct GeminiHttpClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Option<Duration>,
}

impl GeminiHttpClient {
    /// `model` may be given bare (`gemini-2.0-flash`) or as a `models/...`
    /// resource name. Without a `timeout` the call waits on the service.
    pub fn new(api_key: String, model: String, timeout: Option<Duration>) -> Self {
        Self::new_with_client(api_key, model, timeout, Client::new())
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        timeout: Option<Duration>,
        client: Client,
    ) -> Self {
        let model = match model.strip_prefix("models/") {
            Some(bare) => bare.to_string(),
            None => model,
        };

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            API_VERSION,
            self.model
        )
    }

    /// Sends one `generateContent` call. No retries are attempted.
    ///
    /// Non-2xx statuses become [`Error::AiProvider`] carrying Gemini's own
    /// error message; connection failures and timeouts stay [`Error::Http`].
    pub async fn generate_content<Req: Serialize>(
        &self,
        request: &Req,
    ) -> Result<GenerateContentResponse> {
        let mut builder = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(model = %self.model, "Sending generateContent request");

        let response = builder.send().await.inspect_err(|e| {
            tracing::error!(model = %self.model, timed_out = e.is_timeout(), "Gemini request failed: {}", e);
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(status, &body);
            tracing::error!(model = %self.model, status = status.as_u16(), "{}", message);
            return Err(Error::AiProvider(message));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                model = %self.model,
                bytes = body.len(),
                "Unparseable generateContent response: {}",
                e
            );
            Error::AiProvider(format!("Unparseable Gemini response: {}", e))
        })
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    let detail = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) if !parsed.error.message.is_empty() => parsed.error.describe(),
        _ if body.trim().is_empty() => "empty response body".to_string(),
        _ => body.trim().chars().take(MAX_RAW_ERROR_CHARS).collect(),
    };
    format!("Gemini API error ({}): {}", status, detail)
}
