//! Image generation flow: validate the prompt, call the image model, and turn
//! its raw outcome into an [`ImageResult`] or a classified error.

use crate::ai::{FinishReason, ImageGenerationOutput, ImageGenerationService, Media};
use crate::models::{ImageRequest, ImageResult};
use crate::{Error, Result};

pub const SAFETY_BLOCKED_MESSAGE: &str =
    "Image generation blocked due to safety settings. Please try a different prompt.";

pub async fn generate_image(
    service: &dyn ImageGenerationService,
    request: &ImageRequest,
) -> Result<ImageResult> {
    request.validate()?;

    let output = service.generate_image(&request.prompt).await?;
    normalize(output)
}

/// Success needs a complete finish reason and non-empty media; anything else
/// is classified into an error.
pub(crate) fn normalize(output: ImageGenerationOutput) -> Result<ImageResult> {
    let complete = output
        .finish_reason
        .map(FinishReason::is_complete)
        .unwrap_or(false);

    match output.media {
        Some(Media { url, .. }) if complete && !url.is_empty() => Ok(ImageResult {
            image_data_uri: url,
            revised_prompt: output.text,
        }),
        media => {
            tracing::error!(
                finish_reason = ?output.finish_reason,
                media = ?media.as_ref().map(Media::summary),
                text = ?output.text,
                "Image generation failed or did not produce an image"
            );
            Err(classify_failure(
                output.finish_reason,
                output.finish_message,
                output.text,
            ))
        }
    }
}

fn classify_failure(
    finish_reason: Option<FinishReason>,
    finish_message: Option<String>,
    text: Option<String>,
) -> Error {
    if finish_reason == Some(FinishReason::Safety) {
        return Error::ContentBlocked(SAFETY_BLOCKED_MESSAGE.to_string());
    }
    if let Some(message) = finish_message {
        return Error::Model(format!("Image generation failed: {}", message));
    }
    if let Some(text) = text {
        return Error::Model(format!(
            "Image generation failed. Model response: {}",
            text
        ));
    }
    Error::GenerationFailed
}
