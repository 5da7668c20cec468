//! Text generation trait — the seam between orchestration and the model API.

use async_trait::async_trait;

use crate::error::Result;

/// Per-call generation parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Sampling temperature handed to the model, when set.
    pub temperature: Option<f32>,
}

/// A backend that turns a prompt into generated text.
///
/// Implemented by [`GeminiGenerator`](crate::GeminiGenerator) for
/// production and by canned doubles in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for the given prompt.
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String>;
}
