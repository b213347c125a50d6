use portfolio_ai_flows::{
    ai::{FinishReason, ImageGenerationOutput, MockChatClient, MockImageGenerationClient},
    app::{App, AppServices},
    catalog::Catalog,
    flows,
    models::{ContactMessage, ImageRequest, RecommendationKind, RecommendationRequest},
    Error, ValidationError,
};

fn build_app(image_gen: MockImageGenerationClient, chat: MockChatClient) -> App {
    App::with_services(AppServices {
        image_gen: Box::new(image_gen),
        chat: Box::new(chat),
    })
}

#[tokio::test]
async fn test_image_scenario_returns_media_unchanged() {
    let app = build_app(
        MockImageGenerationClient::new().with_image_response("data:image/png;base64,AAAA"),
        MockChatClient::new(),
    );

    let result = app
        .generate_image(&ImageRequest::new("a cat wearing a spacesuit on the moon"))
        .await
        .unwrap();

    assert_eq!(result.image_data_uri, "data:image/png;base64,AAAA");
    assert!(result.revised_prompt.is_none());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "imageDataUri": "data:image/png;base64,AAAA" })
    );
}

#[tokio::test]
async fn test_one_character_prompt_makes_no_call() {
    let image_gen = MockImageGenerationClient::new();
    let calls = image_gen.clone();
    let app = build_app(image_gen, MockChatClient::new());

    let err = app.generate_image(&ImageRequest::new("a")).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(err.to_string(), "Prompt must be at least 3 characters.");
    assert_eq!(calls.get_call_count(), 0);
}

#[tokio::test]
async fn test_blocked_image_surfaces_message() {
    let image_gen = MockImageGenerationClient::new().with_response(ImageGenerationOutput {
        finish_reason: Some(FinishReason::Safety),
        ..Default::default()
    });
    let app = build_app(image_gen, MockChatClient::new());

    let err = app
        .generate_image(&ImageRequest::new("something disallowed"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ContentBlocked(_)));
    assert!(err.to_string().contains("safety settings"));
}

#[tokio::test]
async fn test_recommendations_against_catalog() {
    let catalog = Catalog::embedded().unwrap();
    let chat = MockChatClient::new().with_json_response(
        serde_json::json!({
            "recommendations": [
                { "name": "RAG From PDF", "type": "existing",
                  "reason": "Retrieval over documents with language models fits machine learning interests." },
                { "name": "LLM From Scratch", "type": "existing",
                  "reason": "Builds transformer models end to end in PyTorch." },
                { "name": "Model drift dashboard", "type": "new_idea",
                  "reason": "Tracks production model quality over time with clear visualizations." }
            ]
        })
        .to_string(),
    );
    let calls = chat.clone();
    let app = build_app(MockImageGenerationClient::new(), chat);

    let request = RecommendationRequest::new("machine learning", catalog.project_names());
    let result = app.recommend_projects(&request).await.unwrap();

    assert!(result.recommendations.len() <= 5);
    assert_eq!(result.recommendations[0].name, "RAG From PDF");
    assert_eq!(
        result.recommendations[0].kind,
        RecommendationKind::Existing
    );
    assert_eq!(
        result
            .recommendations
            .iter()
            .filter(|item| item.kind == RecommendationKind::NewIdea)
            .count(),
        1
    );

    let instructions = calls.received_instructions();
    let instruction = &instructions[0];
    for name in catalog.project_names() {
        assert!(instruction.contains(&format!("- {}", name)));
    }
}

#[tokio::test]
async fn test_malformed_recommendations_degrade_to_empty() {
    let app = build_app(
        MockImageGenerationClient::new(),
        MockChatClient::new().with_json_response("{\"recommendations\": \"oops\"}"),
    );

    let result = app
        .recommend_projects(&RecommendationRequest::new("design", vec![]))
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"recommendations":[]}"#
    );
}

#[tokio::test]
async fn test_flow_functions_accept_trait_objects() {
    let image_gen = MockImageGenerationClient::new();
    let chat = MockChatClient::new();

    let image = flows::generate_image(&image_gen, &ImageRequest::new("origami birds"))
        .await
        .unwrap();
    assert!(image.image_data_uri.starts_with("data:image/png;base64,"));

    let recommendations =
        flows::recommend_projects(&chat, &RecommendationRequest::new("rust", vec![]))
            .await
            .unwrap();
    assert!(recommendations.is_empty());
}

#[test]
fn test_skill_cloud_order_from_embedded_catalog() {
    let catalog = Catalog::embedded().unwrap();
    let levels: Vec<u8> = catalog.skills_by_level().iter().map(|s| s.level).collect();

    assert_eq!(levels.first(), Some(&5));
    assert_eq!(levels.last(), Some(&3));
    assert_eq!(levels.len(), catalog.skills().len());
}

#[test]
fn test_contact_submission_from_json() {
    let contact: ContactMessage = serde_json::from_value(serde_json::json!({
        "name": "Ana",
        "email": "ana@example",
        "message": "Would love to collaborate on RAG tooling."
    }))
    .unwrap();

    assert_eq!(contact.validate(), Err(ValidationError::InvalidEmail));
    let err: Error = contact.validate().unwrap_err().into();
    assert_eq!(err.to_string(), "Please enter a valid email address.");
}
