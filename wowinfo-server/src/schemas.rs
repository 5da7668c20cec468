//! Request and response schemas for every endpoint.

use serde::{Deserialize, Serialize};
use wowinfo_rag::Entity;

fn default_num_results() -> usize {
    5
}

fn default_creativity() -> f32 {
    0.5
}

fn default_summary_length() -> String {
    "medium".to_string()
}

fn default_summary_style() -> String {
    "general".to_string()
}

fn default_num_questions() -> usize {
    5
}

/// Query-string parameters for `GET /query`.
#[derive(Debug, Deserialize)]
pub struct QueryParams {
    /// The question to ask.
    pub query: String,
    /// Number of search results to retrieve.
    #[serde(default = "default_num_results")]
    pub num_results: usize,
    /// Creativity of the response (0.0–1.0).
    #[serde(default = "default_creativity")]
    pub creativity: f32,
    /// Maximum length of the answer, in characters.
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Desired format of the response.
    #[serde(default)]
    pub response_format: Option<String>,
    /// Additional context to include in the prompt.
    #[serde(default)]
    pub additional_context: Option<String>,
}

/// Body of `POST /feedback`.
#[derive(Debug, Deserialize)]
pub struct Feedback {
    pub query_id: String,
    pub feedback: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Body of `POST /context`.
#[derive(Debug, Deserialize)]
pub struct DocumentUpload {
    pub content: String,
}

/// Response of `POST /context`.
#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub message: String,
    pub cleaned_context: String,
}

/// Generic `{message}` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Body of `POST /summarize`. Exactly one of `document_id`,
/// `document_text`, or `urls` must resolve to non-empty text.
#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub document_text: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<String>>,
    #[serde(default = "default_summary_length")]
    pub summary_length: String,
    #[serde(default = "default_summary_style")]
    pub summary_style: String,
}

/// Body of `POST /compare`. Each document is given by id or by text.
#[derive(Debug, Deserialize)]
pub struct ComparisonRequest {
    #[serde(default)]
    pub document1_id: Option<String>,
    #[serde(default)]
    pub document1_text: Option<String>,
    #[serde(default)]
    pub document2_id: Option<String>,
    #[serde(default)]
    pub document2_text: Option<String>,
}

/// Body of `POST /translate`.
#[derive(Debug, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: String,
}

/// Body of `POST /multi_turn`.
#[derive(Debug, Deserialize)]
pub struct MultiTurnRequest {
    pub query: String,
    pub session_id: String,
}

/// Response of `GET /new_session`.
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
}

/// Body of `POST /generate_questions`.
#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub document_text: Option<String>,
    #[serde(default = "default_num_questions")]
    pub num_questions: usize,
}

/// Body of `POST /paraphrase`.
#[derive(Debug, Deserialize)]
pub struct ParaphraseRequest {
    pub text: String,
}

/// Form body of `POST /extract_entities`.
#[derive(Debug, Deserialize)]
pub struct ExtractEntitiesForm {
    pub text: String,
}

/// Response of `POST /extract_entities`.
#[derive(Debug, Serialize)]
pub struct EntitiesResponse {
    pub entities: Vec<Entity>,
}

/// Response of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Form body of `POST /admin/add_document`. `metadata` is a JSON object
/// of string keys to string values.
#[derive(Debug, Deserialize)]
pub struct AddDocumentForm {
    pub document: String,
    pub metadata: String,
    pub doc_id: String,
}

/// Form body of `POST /admin/update_document`.
#[derive(Debug, Deserialize)]
pub struct UpdateDocumentForm {
    pub doc_id: String,
    #[serde(default)]
    pub document: Option<String>,
    #[serde(default)]
    pub metadata: Option<String>,
}

/// Query-string parameters for `DELETE /admin/delete_document`.
#[derive(Debug, Deserialize)]
pub struct DeleteDocumentParams {
    pub doc_id: String,
}
