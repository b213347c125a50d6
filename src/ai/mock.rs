use super::{ChatService, FinishReason, ImageGenerationOutput, ImageGenerationService, Media};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Data URI of a 1x1 PNG returned when no image response is queued.
pub const DEFAULT_MOCK_IMAGE_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAIAAACQd1PeAAAADElEQVR4nGP4z8AAAAMBAQDJ/pLvAAAAAElFTkSuQmCC";

#[derive(Clone)]
pub struct MockImageGenerationClient {
    responses: Arc<Mutex<Vec<ImageGenerationOutput>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_response(self, response: ImageGenerationOutput) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Queue a successful `STOP` response carrying `data_uri`.
    pub fn with_image_response(self, data_uri: &str) -> Self {
        self.with_response(ImageGenerationOutput {
            finish_reason: Some(FinishReason::Stop),
            media: Some(Media {
                content_type: "image/png".to_string(),
                url: data_uri.to_string(),
            }),
            ..Default::default()
        })
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn received_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(&self, prompt: &str) -> Result<ImageGenerationOutput> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.prompts.lock().unwrap().push(prompt.to_string());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(ImageGenerationOutput {
                finish_reason: Some(FinishReason::Stop),
                media: Some(Media {
                    content_type: "image/png".to_string(),
                    url: DEFAULT_MOCK_IMAGE_URI.to_string(),
                }),
                ..Default::default()
            })
        } else {
            let index = (*count - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}

/// Queued outcome for [`MockChatClient`]; `Err` holds a transport error message.
type ChatOutcome = std::result::Result<Option<String>, String>;

#[derive(Clone)]
pub struct MockChatClient {
    responses: Arc<Mutex<Vec<ChatOutcome>>>,
    instructions: Arc<Mutex<Vec<String>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            instructions: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_json_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(Ok(Some(response.into())));
        self
    }

    /// Queue a response where the model produced no text at all.
    pub fn with_empty_response(self) -> Self {
        self.responses.lock().unwrap().push(Ok(None));
        self
    }

    pub fn with_transport_error(self, message: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(Err(message.into()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn received_instructions(&self) -> Vec<String> {
        self.instructions.lock().unwrap().clone()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatService for MockChatClient {
    async fn generate_structured(
        &self,
        instruction: &str,
        _response_schema: &Value,
    ) -> Result<Option<String>> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;
        self.instructions
            .lock()
            .unwrap()
            .push(instruction.to_string());

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(Some(r#"{"recommendations":[]}"#.to_string()));
        }

        let index = (*count - 1) % responses.len();
        responses[index].clone().map_err(Error::AiProvider)
    }
}
