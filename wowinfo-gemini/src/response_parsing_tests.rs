//! Response parsing tests for the Gemini API types.
//!
//! These tests validate that real-world JSON responses deserialize
//! correctly into our types, and that requests serialize with the field
//! names the API expects.

use crate::{
    BatchContentEmbeddingResponse, Content, ContentEmbeddingResponse, EmbedContentRequest,
    GenerateContentRequest, GenerationConfig, GenerationResponse, Model, SafetySetting,
};
use serde_json::json;

// ── Basic text response ─────────────────────────────────────────────

#[test]
fn parse_simple_text_response() {
    let json = json!({
        "candidates": [{
            "content": {
                "parts": [{"text": "Hello, world!"}],
                "role": "model"
            },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 5,
            "candidatesTokenCount": 4,
            "totalTokenCount": 9
        }
    });

    let resp: GenerationResponse = serde_json::from_value(json).unwrap();
    assert_eq!(resp.text(), "Hello, world!");
    assert_eq!(resp.candidates.len(), 1);
    assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));

    let usage = resp.usage_metadata.as_ref().unwrap();
    assert_eq!(usage.prompt_token_count, Some(5));
    assert_eq!(usage.total_token_count, Some(9));
}

// ── Multi-part and empty responses ──────────────────────────────────

#[test]
fn text_concatenates_parts_of_first_candidate() {
    let json = json!({
        "candidates": [
            {"content": {"parts": [{"text": "Answer "}, {"text": "A"}], "role": "model"}},
            {"content": {"parts": [{"text": "Answer B"}], "role": "model"}}
        ]
    });

    let resp: GenerationResponse = serde_json::from_value(json).unwrap();
    assert_eq!(resp.text(), "Answer A");
}

#[test]
fn empty_candidates_yield_empty_text() {
    let resp: GenerationResponse = serde_json::from_value(json!({})).unwrap();
    assert!(resp.candidates.is_empty());
    assert_eq!(resp.text(), "");
}

#[test]
fn candidate_without_content_yields_empty_text() {
    let json = json!({"candidates": [{"finishReason": "SAFETY"}]});
    let resp: GenerationResponse = serde_json::from_value(json).unwrap();
    assert_eq!(resp.text(), "");
}

// ── Request serialization ───────────────────────────────────────────

#[test]
fn generate_request_serializes_camel_case() {
    let request = GenerateContentRequest {
        contents: vec![Content::user("hi")],
        generation_config: Some(GenerationConfig {
            temperature: Some(0.5),
            max_output_tokens: Some(256),
            ..Default::default()
        }),
        safety_settings: Some(SafetySetting::block_none_for_all()),
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["contents"][0]["role"], "user");
    assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
    assert_eq!(value["generationConfig"]["temperature"], 0.5);
    assert_eq!(value["generationConfig"]["maxOutputTokens"], 256);
    // top_p was not set and must be omitted entirely
    assert!(value["generationConfig"].get("topP").is_none());

    let settings = value["safetySettings"].as_array().unwrap();
    assert_eq!(settings.len(), 4);
    assert_eq!(settings[0]["category"], "HARM_CATEGORY_HARASSMENT");
    assert_eq!(settings[0]["threshold"], "BLOCK_NONE");
}

#[test]
fn embed_request_serializes_task_type() {
    let request = EmbedContentRequest {
        model: Model::TextEmbedding004.to_string(),
        content: Content::text("hello"),
        task_type: Some(crate::TaskType::RetrievalQuery),
        output_dimensionality: None,
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["model"], "models/text-embedding-004");
    assert_eq!(value["taskType"], "RETRIEVAL_QUERY");
    assert!(value["content"].get("role").is_none());
}

// ── Embedding responses ─────────────────────────────────────────────

#[test]
fn parse_embedding_response() {
    let json = json!({"embedding": {"values": [0.1, -0.2, 0.3]}});
    let resp: ContentEmbeddingResponse = serde_json::from_value(json).unwrap();
    assert_eq!(resp.embedding.values, vec![0.1, -0.2, 0.3]);
}

#[test]
fn parse_batch_embedding_response() {
    let json = json!({
        "embeddings": [
            {"values": [1.0, 0.0]},
            {"values": [0.0, 1.0]}
        ]
    });
    let resp: BatchContentEmbeddingResponse = serde_json::from_value(json).unwrap();
    assert_eq!(resp.embeddings.len(), 2);
    assert_eq!(resp.embeddings[1].values, vec![0.0, 1.0]);
}

// ── Model naming ────────────────────────────────────────────────────

#[test]
fn model_round_trips_through_serde() {
    let model: Model = serde_json::from_value(json!("models/gemini-2.5-pro")).unwrap();
    assert_eq!(model, Model::Gemini25Pro);

    let custom: Model = serde_json::from_value(json!("models/my-tuned-model")).unwrap();
    assert_eq!(custom, Model::Custom("models/my-tuned-model".to_string()));
    assert_eq!(custom.as_str(), "models/my-tuned-model");
}
