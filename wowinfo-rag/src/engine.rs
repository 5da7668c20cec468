//! Retrieval-augmented orchestration.
//!
//! The [`RagEngine`] coordinates every generation task of the service:
//! grounded question answering, summarization, comparison, translation,
//! multi-turn dialogue, question generation, paraphrasing, and entity
//! extraction. Each task follows the same shape: gather context, build a
//! prompt, invoke the generator, shape the response.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wowinfo_rag::{RagEngine, EngineConfig};
//!
//! let engine = RagEngine::builder()
//!     .config(EngineConfig::default())
//!     .store(Arc::new(store))
//!     .generator(Arc::new(generator))
//!     .build()?;
//!
//! let answer = engine.answer_question("wowinfo", "Who heals best?", &Default::default()).await?;
//! ```

use std::sync::Arc;

use tracing::info;

use crate::config::EngineConfig;
use crate::document::{Answer, Entity};
use crate::error::{RagError, Result};
use crate::generation::{GenerateOptions, TextGenerator};
use crate::session::{SessionStore, Turn};
use crate::store::DocumentStore;

/// The fixed answer returned when retrieval produces no passages.
pub const NO_MATCH_ANSWER: &str = "No relevant information was found.";

/// Parameters for a grounded question-answering call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOptions {
    /// Number of passages to retrieve.
    pub num_results: usize,
    /// Sampling temperature for the generated answer (0.0–1.0).
    pub creativity: f32,
    /// Hard truncation of the answer text, in characters, applied after
    /// generation.
    pub max_length: Option<usize>,
    /// Free-form format instruction appended to the prompt.
    pub response_format: Option<String>,
    /// Caller-supplied context, treated as the highest-priority passage.
    pub additional_context: Option<String>,
}

impl Default for AnswerOptions {
    fn default() -> Self {
        Self {
            num_results: 5,
            creativity: 0.5,
            max_length: None,
            response_format: None,
            additional_context: None,
        }
    }
}

/// Truncate a string to at most `max` chars, never splitting a character.
fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}

/// Parse a model response into entities, one per line.
///
/// Each line is split on `':'`; lines with exactly one separator become an
/// `(entity, type)` pair, everything else is silently dropped. The parser
/// is best-effort — a malformed line never fails the whole request.
fn parse_entities(response: &str) -> Vec<Entity> {
    response
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(':').collect();
            if parts.len() == 2 {
                Some(Entity {
                    entity: parts[0].trim().to_string(),
                    entity_type: parts[1].trim().to_string(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// The retrieval-and-generation orchestrator.
///
/// Composes a [`DocumentStore`], a [`TextGenerator`], and a
/// [`SessionStore`]. Construct one via [`RagEngine::builder()`].
pub struct RagEngine {
    config: EngineConfig,
    store: Arc<dyn DocumentStore>,
    generator: Arc<dyn TextGenerator>,
    sessions: SessionStore,
}

impl RagEngine {
    /// Create a new [`RagEngineBuilder`].
    pub fn builder() -> RagEngineBuilder {
        RagEngineBuilder::default()
    }

    /// Return a reference to the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Return a reference to the document store.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Return a reference to the conversation session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Answer a question grounded in passages retrieved from `collection`.
    ///
    /// When retrieval produces nothing, returns [`NO_MATCH_ANSWER`] with
    /// empty sources without ever invoking the generator — a terminal,
    /// non-error outcome. Caller-supplied `additional_context` is placed
    /// before the retrieved passages; all passages are joined into one
    /// space-separated context string, so passage boundaries are not
    /// preserved in the prompt.
    pub async fn answer_question(
        &self,
        collection: &str,
        query: &str,
        options: &AnswerOptions,
    ) -> Result<Answer> {
        let sources = self.store.query(collection, query, options.num_results).await?;

        if sources.is_empty() {
            info!(collection, "no passages retrieved for query");
            return Ok(Answer { answer: NO_MATCH_ANSWER.to_string(), sources: Vec::new() });
        }

        let mut context_parts: Vec<&str> = sources.iter().map(|s| s.document.as_str()).collect();
        if let Some(extra) = options.additional_context.as_deref() {
            context_parts.insert(0, extra);
        }
        let context = context_parts.join(" ");

        let mut prompt = format!(
            "Answer the following question based on this context: {context}. Question: {query}"
        );
        if let Some(format_hint) = &options.response_format {
            prompt.push_str(&format!(
                " Please provide the answer in the following format: {format_hint}."
            ));
        }

        let generate_options = GenerateOptions { temperature: Some(options.creativity) };
        let mut answer = self.generator.generate(&prompt, &generate_options).await?;

        if let Some(max_length) = options.max_length {
            answer = truncate_chars(answer, max_length);
        }

        info!(collection, source_count = sources.len(), "answered question");
        Ok(Answer { answer, sources })
    }

    /// Summarize a text with length and style hints. No retrieval step.
    pub async fn summarize(
        &self,
        document_text: &str,
        summary_length: &str,
        summary_style: &str,
    ) -> Result<String> {
        if document_text.is_empty() {
            return Err(RagError::InvalidInput("no document text provided".to_string()));
        }

        let prompt = format!(
            "Summarize the following text in a {summary_length} length, {summary_style} style: {document_text}"
        );
        self.generator.generate(&prompt, &GenerateOptions::default()).await
    }

    /// Compare and contrast two texts. No retrieval step.
    pub async fn compare(&self, doc1_text: &str, doc2_text: &str) -> Result<String> {
        if doc1_text.is_empty() || doc2_text.is_empty() {
            return Err(RagError::InvalidInput(
                "both document texts are required for comparison".to_string(),
            ));
        }

        let prompt = format!(
            "Compare and contrast the following two texts:\n\nText 1: {doc1_text}\n\nText 2: {doc2_text}"
        );
        self.generator.generate(&prompt, &GenerateOptions::default()).await
    }

    /// Translate a text, using passages similar to it from the default
    /// collection as disambiguation context.
    ///
    /// An empty retrieval result is not an error — translation proceeds
    /// with empty context.
    pub async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let sources = self
            .store
            .query(&self.config.default_collection, text, self.config.translate_num_results)
            .await?;
        let context =
            sources.iter().map(|s| s.document.as_str()).collect::<Vec<_>>().join(" ");

        let prompt = format!(
            "Translate the following text to {target_language}, also take into account this additional context for a more accurate translation:\nText to translate: {text}\nContext: {context}\n"
        );
        self.generator.generate(&prompt, &GenerateOptions::default()).await
    }

    /// Answer one exchange of a multi-turn conversation.
    ///
    /// Prior turns are formatted as alternating `User:`/`AI:` lines and
    /// the new query appended; the whole formatted string is used as the
    /// retrieval-and-generation query against the default collection, so
    /// retrieval quality degrades as a session grows. The session is
    /// created on first use and the new turn appended after answering.
    pub async fn multi_turn(&self, query: &str, session_id: &str) -> Result<Answer> {
        let history = self.sessions.history(session_id).await;

        let mut full_query = String::new();
        for turn in &history {
            full_query.push_str(&format!("User: {}\nAI: {}\n", turn.user, turn.ai));
        }
        full_query.push_str(&format!("User: {query}"));

        let options = AnswerOptions {
            num_results: self.config.multi_turn_num_results,
            ..Default::default()
        };
        let result =
            self.answer_question(&self.config.default_collection, &full_query, &options).await?;

        self.sessions
            .append(session_id, Turn { user: query.to_string(), ai: result.answer.clone() })
            .await;

        info!(session_id, turn_count = history.len() + 1, "answered multi-turn exchange");
        Ok(result)
    }

    /// Generate `num_questions` questions from a text. No retrieval step.
    pub async fn generate_questions(&self, text: &str, num_questions: usize) -> Result<String> {
        if text.is_empty() {
            return Err(RagError::InvalidInput("no document content provided".to_string()));
        }

        let prompt =
            format!("Generate {num_questions} questions based on the following text:\n{text}\n");
        self.generator.generate(&prompt, &GenerateOptions::default()).await
    }

    /// Paraphrase a text while keeping its meaning. No retrieval step.
    pub async fn paraphrase(&self, text: &str) -> Result<String> {
        let prompt = format!(
            "Please paraphrase the following text, while trying to maintain the original meaning: {text}"
        );
        self.generator.generate(&prompt, &GenerateOptions::default()).await
    }

    /// Identify and classify named entities in a text.
    ///
    /// The model's free-form response is parsed line by line; malformed
    /// lines are dropped rather than failing the request.
    pub async fn extract_entities(&self, text: &str) -> Result<Vec<Entity>> {
        let prompt = format!("Identify and classify the named entities in the following text: {text}");
        let response = self.generator.generate(&prompt, &GenerateOptions::default()).await?;
        Ok(parse_entities(&response))
    }
}

/// Builder for constructing a [`RagEngine`].
///
/// `store` and `generator` are required; `config` defaults to
/// [`EngineConfig::default()`].
#[derive(Default)]
pub struct RagEngineBuilder {
    config: Option<EngineConfig>,
    store: Option<Arc<dyn DocumentStore>>,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl RagEngineBuilder {
    /// Set the engine configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the document store backend.
    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the text generator backend.
    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`RagEngine`], validating that all required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a required field is missing.
    pub fn build(self) -> Result<RagEngine> {
        let config = self.config.unwrap_or_default();
        let store =
            self.store.ok_or_else(|| RagError::ConfigError("store is required".to_string()))?;
        let generator = self
            .generator
            .ok_or_else(|| RagError::ConfigError("generator is required".to_string()))?;
        let sessions = SessionStore::new(config.max_session_turns);

        Ok(RagEngine { config, store, generator, sessions })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo".to_string(), 3), "hél");
        assert_eq!(truncate_chars("abc".to_string(), 10), "abc");
    }

    #[test]
    fn parse_entities_keeps_two_part_lines_only() {
        let response = "Azeroth: Location\nnot an entity line\nThrall: Person\na:b:c\n";
        let entities = parse_entities(response);
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].entity, "Azeroth");
        assert_eq!(entities[0].entity_type, "Location");
        assert_eq!(entities[1].entity, "Thrall");
    }
}
