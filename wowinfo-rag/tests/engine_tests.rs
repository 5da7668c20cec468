//! Behavioral tests for the RAG engine over an in-memory store and a
//! recording generator double.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wowinfo_rag::{
    AnswerOptions, Document, DocumentStore, EngineConfig, GenerateOptions, InMemoryStore,
    NO_MATCH_ANSWER, RagEngine, RagError, TextGenerator,
};

/// A generator double that records every prompt and returns a canned reply.
struct RecordingGenerator {
    reply: String,
    calls: Mutex<Vec<(String, GenerateOptions)>>,
}

impl RecordingGenerator {
    fn new(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { reply: reply.into(), calls: Mutex::new(Vec::new()) })
    }

    fn calls(&self) -> Vec<(String, GenerateOptions)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> wowinfo_rag::Result<String> {
        self.calls.lock().unwrap().push((prompt.to_string(), options.clone()));
        Ok(self.reply.clone())
    }
}

fn doc(id: &str, text: &str, class: &str, spec: &str) -> Document {
    Document {
        id: id.to_string(),
        text: text.to_string(),
        metadata: HashMap::from([
            ("class".to_string(), class.to_string()),
            ("spec".to_string(), spec.to_string()),
        ]),
    }
}

async fn seeded_store() -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    store
        .add_batch(
            "wowinfo",
            &[
                doc("Priest-Holy", "The holy priest heals allies with light magic", "Priest", "Holy"),
                doc("Warrior-Protection", "The protection warrior tanks enemies", "Warrior", "Protection"),
                doc("Mage-Frost", "The frost mage slows enemies with ice", "Mage", "Frost"),
            ],
        )
        .await
        .unwrap();
    store
}

fn engine_with(store: Arc<InMemoryStore>, generator: Arc<RecordingGenerator>) -> RagEngine {
    RagEngine::builder()
        .config(EngineConfig::default())
        .store(store)
        .generator(generator)
        .build()
        .unwrap()
}

#[tokio::test]
async fn zero_retrieval_returns_fixed_answer_without_generating() {
    let generator = RecordingGenerator::new("should never be used");
    let engine = engine_with(Arc::new(InMemoryStore::new()), generator.clone());

    let answer = engine
        .answer_question("wowinfo", "anything at all", &AnswerOptions::default())
        .await
        .unwrap();

    assert_eq!(answer.answer, NO_MATCH_ANSWER);
    assert!(answer.sources.is_empty());
    assert!(generator.calls().is_empty(), "generator must not be invoked");
}

#[tokio::test]
async fn answer_includes_retrieved_context_and_question() {
    let generator = RecordingGenerator::new("Holy priests heal.");
    let engine = engine_with(seeded_store().await, generator.clone());

    let answer = engine
        .answer_question("wowinfo", "which priest heals allies", &AnswerOptions::default())
        .await
        .unwrap();

    assert_eq!(answer.answer, "Holy priests heal.");
    assert!(!answer.sources.is_empty());

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    let prompt = &calls[0].0;
    assert!(prompt.starts_with("Answer the following question based on this context:"));
    assert!(prompt.contains("holy priest heals allies"));
    assert!(prompt.ends_with("Question: which priest heals allies"));
}

#[tokio::test]
async fn additional_context_is_placed_first() {
    let generator = RecordingGenerator::new("ok");
    let engine = engine_with(seeded_store().await, generator.clone());

    let options = AnswerOptions {
        additional_context: Some("Pandaren monks also heal".to_string()),
        ..Default::default()
    };
    let answer =
        engine.answer_question("wowinfo", "priest heals allies", &options).await.unwrap();

    let prompt = &generator.calls()[0].0;
    let context_start = "Answer the following question based on this context: ";
    assert!(prompt.starts_with(&format!("{context_start}Pandaren monks also heal ")));
    // caller-supplied context is not reported as a source
    assert!(answer.sources.iter().all(|s| s.document != "Pandaren monks also heal"));
}

#[tokio::test]
async fn response_format_appends_instruction() {
    let generator = RecordingGenerator::new("ok");
    let engine = engine_with(seeded_store().await, generator.clone());

    let options =
        AnswerOptions { response_format: Some("bullet points".to_string()), ..Default::default() };
    engine.answer_question("wowinfo", "priest heals allies", &options).await.unwrap();

    let prompt = &generator.calls()[0].0;
    assert!(
        prompt.ends_with(" Please provide the answer in the following format: bullet points.")
    );
}

#[tokio::test]
async fn creativity_maps_to_temperature() {
    let generator = RecordingGenerator::new("ok");
    let engine = engine_with(seeded_store().await, generator.clone());

    let options = AnswerOptions { creativity: 0.9, ..Default::default() };
    engine.answer_question("wowinfo", "priest heals allies", &options).await.unwrap();

    assert_eq!(generator.calls()[0].1.temperature, Some(0.9));
}

#[tokio::test]
async fn max_length_truncates_after_generation() {
    let generator = RecordingGenerator::new("a very long generated answer");
    let engine = engine_with(seeded_store().await, generator.clone());

    let options = AnswerOptions { max_length: Some(6), ..Default::default() };
    let answer =
        engine.answer_question("wowinfo", "priest heals allies", &options).await.unwrap();

    assert_eq!(answer.answer, "a very");
}

#[tokio::test]
async fn summarize_rejects_empty_text_before_generating() {
    let generator = RecordingGenerator::new("never");
    let engine = engine_with(Arc::new(InMemoryStore::new()), generator.clone());

    let err = engine.summarize("", "medium", "general").await.unwrap_err();
    assert!(matches!(err, RagError::InvalidInput(_)));
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn summarize_embeds_length_and_style_hints() {
    let generator = RecordingGenerator::new("a summary");
    let engine = engine_with(Arc::new(InMemoryStore::new()), generator.clone());

    let summary = engine.summarize("some text", "short", "technical").await.unwrap();
    assert_eq!(summary, "a summary");

    let prompt = &generator.calls()[0].0;
    assert!(prompt.contains("short length"));
    assert!(prompt.contains("technical style"));
    assert!(prompt.contains("some text"));
}

#[tokio::test]
async fn compare_requires_both_texts() {
    let generator = RecordingGenerator::new("never");
    let engine = engine_with(Arc::new(InMemoryStore::new()), generator.clone());

    let err = engine.compare("only one", "").await.unwrap_err();
    assert!(matches!(err, RagError::InvalidInput(_)));
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn translate_proceeds_with_empty_retrieval_context() {
    let generator = RecordingGenerator::new("translated");
    let engine = engine_with(Arc::new(InMemoryStore::new()), generator.clone());

    let translated = engine.translate("hello there", "Spanish").await.unwrap();
    assert_eq!(translated, "translated");

    let prompt = &generator.calls()[0].0;
    assert!(prompt.contains("Translate the following text to Spanish"));
    assert!(prompt.contains("Text to translate: hello there"));
}

#[tokio::test]
async fn multi_turn_accumulates_history_in_call_order() {
    let generator = RecordingGenerator::new("answer");
    let engine = engine_with(seeded_store().await, generator.clone());

    engine.multi_turn("what does the priest do", "session-1").await.unwrap();
    engine.multi_turn("and the warrior", "session-1").await.unwrap();

    let history = engine.sessions().history("session-1").await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].user, "what does the priest do");
    assert_eq!(history[1].user, "and the warrior");
    assert_eq!(history[1].ai, "answer");

    // the second retrieval query carries the full formatted history
    let second_prompt = &generator.calls()[1].0;
    assert!(second_prompt.contains("User: what does the priest do\nAI: answer\n"));
    assert!(second_prompt.contains("User: and the warrior"));
}

#[tokio::test]
async fn multi_turn_sessions_are_isolated() {
    let generator = RecordingGenerator::new("answer");
    let engine = engine_with(seeded_store().await, generator.clone());

    engine.multi_turn("priest question", "session-a").await.unwrap();

    assert_eq!(engine.sessions().history("session-a").await.len(), 1);
    assert!(engine.sessions().history("session-b").await.is_empty());
}

#[tokio::test]
async fn generate_questions_rejects_empty_text() {
    let generator = RecordingGenerator::new("never");
    let engine = engine_with(Arc::new(InMemoryStore::new()), generator.clone());

    let err = engine.generate_questions("", 5).await.unwrap_err();
    assert!(matches!(err, RagError::InvalidInput(_)));
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn extract_entities_drops_malformed_lines() {
    let generator =
        RecordingGenerator::new("Thrall: Person\nnot parseable\nOrgrimmar: Location\nx:y:z");
    let engine = engine_with(Arc::new(InMemoryStore::new()), generator);

    let entities = engine.extract_entities("Thrall rules Orgrimmar").await.unwrap();
    assert_eq!(entities.len(), 2);
    assert_eq!(entities[0].entity, "Thrall");
    assert_eq!(entities[0].entity_type, "Person");
    assert_eq!(entities[1].entity, "Orgrimmar");
}
