//! Project recommendation flow. Model-side failures degrade to an empty list;
//! only transport errors reach the caller.

use crate::ai::ChatService;
use crate::models::{
    RecommendationKind, RecommendationRequest, RecommendationResult, MAX_RECOMMENDATIONS,
};
use crate::{prompts, Result};
use serde_json::{json, Value};

pub async fn recommend_projects(
    service: &dyn ChatService,
    request: &RecommendationRequest,
) -> Result<RecommendationResult> {
    let instruction =
        prompts::recommendation_instruction(&request.interests, &request.project_list);

    let raw = service
        .generate_structured(&instruction, &response_schema())
        .await?;

    Ok(normalize(raw.as_deref(), &request.project_list))
}

/// Gemini `responseSchema` describing [`RecommendationResult`].
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "recommendations": {
                "type": "ARRAY",
                "maxItems": MAX_RECOMMENDATIONS,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "type": { "type": "STRING", "enum": ["existing", "new_idea"] },
                        "reason": { "type": "STRING" }
                    },
                    "required": ["name", "type"]
                }
            }
        },
        "required": ["recommendations"]
    })
}

pub(crate) fn normalize(raw: Option<&str>, project_list: &[String]) -> RecommendationResult {
    let Some(raw) = raw else {
        tracing::warn!("Recommendation model returned no structured output");
        return RecommendationResult::empty();
    };

    let mut result: RecommendationResult = match serde_json::from_str(strip_code_fence(raw)) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!("Recommendation output failed schema validation: {}", e);
            return RecommendationResult::empty();
        }
    };

    if result.recommendations.len() > MAX_RECOMMENDATIONS {
        tracing::warn!(
            "Recommendation output has {} items, more than the allowed {}",
            result.recommendations.len(),
            MAX_RECOMMENDATIONS
        );
        return RecommendationResult::empty();
    }

    // With no project list there is nothing an `existing` item could refer to.
    if project_list.is_empty() {
        let before = result.recommendations.len();
        result
            .recommendations
            .retain(|item| item.kind != RecommendationKind::Existing);
        if result.recommendations.len() < before {
            tracing::warn!(
                "Dropped {} existing-project recommendations for an empty project list",
                before - result.recommendations.len()
            );
        }
    }

    result
}

/// Models occasionally wrap JSON in a Markdown fence despite the mime type.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
