//! Slim Rust client for the Google Gemini API.
//!
//! Covers the two operations the wowinfo service needs: content generation
//! (`generateContent`) and text embeddings (`embedContent` /
//! `batchEmbedContents`). Requests are built fluently and executed against
//! the Generative Language REST API with a bounded timeout.
//!
//! # Example
//!
//! ```rust,ignore
//! use wowinfo_gemini::{Gemini, Model};
//!
//! let gemini = Gemini::new("YOUR_API_KEY")?;
//! let response = gemini
//!     .generate_content()
//!     .with_user_message("Explain cosine similarity in one sentence.")
//!     .execute()
//!     .await?;
//! println!("{}", response.text());
//! ```

pub mod client;
pub mod embedding;
pub mod generation;

#[cfg(test)]
mod response_parsing_tests;

pub use client::{Error, Gemini, GeminiBuilder, Model};
pub use embedding::{
    BatchContentEmbeddingResponse, BatchEmbedContentsRequest, ContentEmbedding,
    ContentEmbeddingResponse, EmbedBuilder, EmbedContentRequest, TaskType,
};
pub use generation::{
    Candidate, Content, ContentBuilder, GenerateContentRequest, GenerationConfig,
    GenerationResponse, HarmBlockThreshold, HarmCategory, Part, Role, SafetySetting,
    UsageMetadata,
};
