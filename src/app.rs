//! Application facade wiring the flows to concrete model services.

use crate::ai::{ChatService, GeminiChatClient, GeminiImageClient, ImageGenerationService};
use crate::flows;
use crate::models::{
    Config, ImageRequest, ImageResult, RecommendationRequest, RecommendationResult,
};
use crate::Result;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Entry point for callers: one method per flow.
///
/// Holds no per-call state, so a single `App` can serve any number of
/// concurrent invocations.
pub struct App {
    image_gen: Box<dyn ImageGenerationService>,
    chat: Box<dyn ChatService>,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub image_gen: Box<dyn ImageGenerationService>,
    pub chat: Box<dyn ChatService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            image_gen: services.image_gen,
            chat: services.chat,
        }
    }

    /// Construct Gemini-backed services from `config`.
    pub fn from_config(config: &Config) -> Self {
        // Reuse one HTTP connection pool across provider clients.
        let http_client = reqwest::Client::new();

        let image_gen = GeminiImageClient::new_with_client(
            config.gemini_api_key.clone(),
            config.request_timeout,
            http_client.clone(),
        );
        info!("Image provider: Gemini (model: {})", image_gen.model());

        let chat = GeminiChatClient::new_with_client(
            config.gemini_api_key.clone(),
            config.chat_model.clone(),
            config.request_timeout,
            http_client,
        );
        info!("Chat provider: Gemini (model: {})", chat.model());

        Self::with_services(AppServices {
            image_gen: Box::new(image_gen),
            chat: Box::new(chat),
        })
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        Ok(Self::from_config(&config))
    }

    pub async fn generate_image(&self, request: &ImageRequest) -> Result<ImageResult> {
        let span = info_span!("generate_image", invocation_id = %Uuid::new_v4());
        async {
            let result = flows::generate_image(self.image_gen.as_ref(), request).await;
            if result.is_ok() {
                info!("Image generated");
            }
            result
        }
        .instrument(span)
        .await
    }

    pub async fn recommend_projects(
        &self,
        request: &RecommendationRequest,
    ) -> Result<RecommendationResult> {
        let span = info_span!("recommend_projects", invocation_id = %Uuid::new_v4());
        async {
            let result = flows::recommend_projects(self.chat.as_ref(), request).await?;
            info!("Returning {} recommendations", result.recommendations.len());
            Ok(result)
        }
        .instrument(span)
        .await
    }
}
