//! Gemini-backed implementations of the embedding and generation seams.

use async_trait::async_trait;
use tracing::{debug, error};

use wowinfo_gemini::{
    EmbedBuilder, Gemini, GenerationConfig, Model, SafetySetting, TaskType,
    client::Error as GeminiError,
};

use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::generation::{GenerateOptions, TextGenerator};

fn map_embed_err(e: GeminiError) -> RagError {
    match e {
        GeminiError::RequestTimeout { .. } => RagError::Timeout { service: "gemini".into() },
        other => RagError::EmbeddingError { provider: "Gemini".into(), message: format!("{other}") },
    }
}

fn map_generate_err(e: GeminiError) -> RagError {
    match e {
        GeminiError::RequestTimeout { .. } => RagError::Timeout { service: "gemini".into() },
        other => RagError::GenerationError(format!("{other}")),
    }
}

/// An [`EmbeddingProvider`] backed by the Gemini embedding API.
///
/// Wraps a [`wowinfo_gemini::Gemini`] client configured for
/// `text-embedding-004` and delegates to its [`EmbedBuilder`] for single
/// and batch embedding requests.
///
/// # Configuration
///
/// - `task_type` – defaults to [`TaskType::RetrievalDocument`]. Override
///   with [`GeminiEmbeddingProvider::with_task_type`].
/// - `output_dimensionality` – optional truncation of the output vector.
pub struct GeminiEmbeddingProvider {
    client: Gemini,
    task_type: TaskType,
    output_dimensionality: Option<i32>,
    dimensions: usize,
}

impl GeminiEmbeddingProvider {
    /// Default embedding dimensions for `text-embedding-004`.
    const DEFAULT_DIMENSIONS: usize = 768;

    /// Create a new provider using the given API key and the default
    /// `text-embedding-004` model.
    pub fn new(api_key: impl AsRef<str>) -> Result<Self> {
        let client = Gemini::with_model(api_key, Model::TextEmbedding004).map_err(|e| {
            RagError::EmbeddingError {
                provider: "Gemini".into(),
                message: format!("failed to create Gemini client: {e}"),
            }
        })?;
        Ok(Self::from_client(client))
    }

    /// Create a new provider from an existing [`Gemini`] client.
    ///
    /// Use this when you need full control over the client configuration
    /// (e.g. custom base URL, custom timeout).
    pub fn from_client(client: Gemini) -> Self {
        Self {
            client,
            task_type: TaskType::RetrievalDocument,
            output_dimensionality: None,
            dimensions: Self::DEFAULT_DIMENSIONS,
        }
    }

    /// Set the task type used for embedding requests.
    pub fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    /// Set the output dimensionality (truncates the embedding vector).
    pub fn with_output_dimensionality(mut self, dims: i32) -> Self {
        self.output_dimensionality = Some(dims);
        self.dimensions = dims as usize;
        self
    }

    /// Build an [`EmbedBuilder`] pre-configured with this provider's settings.
    fn embed_builder(&self) -> EmbedBuilder {
        let mut builder = self.client.embed_content().with_task_type(self.task_type);

        if let Some(dims) = self.output_dimensionality {
            builder = builder.with_output_dimensionality(dims);
        }

        builder
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!(provider = "Gemini", text_len = text.len(), "embedding single text");

        let response = self.embed_builder().with_text(text).execute().await.map_err(|e| {
            error!(provider = "Gemini", error = %e, "embedding request failed");
            map_embed_err(e)
        })?;

        Ok(response.embedding.values)
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(provider = "Gemini", batch_size = texts.len(), "embedding batch");

        let response = self
            .embed_builder()
            .with_chunks(texts.iter().map(|t| t.to_string()).collect())
            .execute_batch()
            .await
            .map_err(|e| {
                error!(provider = "Gemini", error = %e, "batch embedding request failed");
                map_embed_err(e)
            })?;

        Ok(response.embeddings.into_iter().map(|e| e.values).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// A [`TextGenerator`] backed by the Gemini generation API.
///
/// Every request is sent with safety filtering fully relaxed (all four
/// harm categories set to no blocking), matching the service's grounding
/// prompts which never leave the factual game-lore domain.
pub struct GeminiGenerator {
    client: Gemini,
}

impl GeminiGenerator {
    /// Create a new generator using the given API key and the default model.
    pub fn new(api_key: impl AsRef<str>) -> Result<Self> {
        let client = Gemini::new(api_key)
            .map_err(|e| RagError::GenerationError(format!("failed to create Gemini client: {e}")))?;
        Ok(Self { client })
    }

    /// Create a new generator from an existing [`Gemini`] client.
    pub fn from_client(client: Gemini) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String> {
        debug!(prompt_len = prompt.len(), "generating content");

        let config = GenerationConfig { temperature: options.temperature, ..Default::default() };

        let response = self
            .client
            .generate_content()
            .with_user_message(prompt)
            .with_generation_config(config)
            .with_safety_settings(SafetySetting::block_none_for_all())
            .execute()
            .await
            .map_err(|e| {
                error!(error = %e, "generation request failed");
                map_generate_err(e)
            })?;

        Ok(response.text())
    }
}
