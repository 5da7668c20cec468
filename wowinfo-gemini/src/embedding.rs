//! Request and response types for the `embedContent` endpoints.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{Error, GeminiClient};
use crate::generation::Content;

/// The intended downstream use of an embedding, which conditions the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    RetrievalQuery,
    RetrievalDocument,
    SemanticSimilarity,
    Classification,
    Clustering,
}

/// A single embedding vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEmbedding {
    pub values: Vec<f32>,
}

/// The request body for `embedContent` (and each entry of a batch request).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedContentRequest {
    pub model: String,
    pub content: Content,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_type: Option<TaskType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dimensionality: Option<i32>,
}

/// The response body for `embedContent`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentEmbeddingResponse {
    pub embedding: ContentEmbedding,
}

/// The request body for `batchEmbedContents`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEmbedContentsRequest {
    pub requests: Vec<EmbedContentRequest>,
}

/// The response body for `batchEmbedContents`.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchContentEmbeddingResponse {
    pub embeddings: Vec<ContentEmbedding>,
}

/// Fluent builder for embedding requests.
///
/// Obtained from [`Gemini::embed_content`](crate::Gemini::embed_content).
/// Use [`with_text`](Self::with_text) + [`execute`](Self::execute) for a
/// single embedding, or [`with_chunks`](Self::with_chunks) +
/// [`execute_batch`](Self::execute_batch) for a batch.
pub struct EmbedBuilder {
    client: Arc<GeminiClient>,
    texts: Vec<String>,
    task_type: Option<TaskType>,
    output_dimensionality: Option<i32>,
}

impl EmbedBuilder {
    pub(crate) fn new(client: Arc<GeminiClient>) -> Self {
        Self { client, texts: Vec::new(), task_type: None, output_dimensionality: None }
    }

    /// Set the text to embed.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.texts = vec![text.into()];
        self
    }

    /// Set the texts to embed as a batch.
    pub fn with_chunks(mut self, chunks: Vec<String>) -> Self {
        self.texts = chunks;
        self
    }

    /// Set the task type for the request.
    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }

    /// Truncate output vectors to the given dimensionality.
    pub fn with_output_dimensionality(mut self, dims: i32) -> Self {
        self.output_dimensionality = Some(dims);
        self
    }

    fn request_for(&self, text: String) -> EmbedContentRequest {
        EmbedContentRequest {
            model: self.client.model.to_string(),
            content: Content::text(text),
            task_type: self.task_type,
            output_dimensionality: self.output_dimensionality,
        }
    }

    /// Execute a single-text embedding request.
    pub async fn execute(mut self) -> Result<ContentEmbeddingResponse, Error> {
        let text = self.texts.pop().unwrap_or_default();
        let request = self.request_for(text);
        self.client.embed_content(request).await
    }

    /// Execute a batch embedding request.
    pub async fn execute_batch(self) -> Result<BatchContentEmbeddingResponse, Error> {
        let requests = self.texts.iter().map(|t| self.request_for(t.clone())).collect();
        self.client.embed_content_batch(BatchEmbedContentsRequest { requests }).await
    }
}
