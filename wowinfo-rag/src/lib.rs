//! Retrieval-augmented generation core for the wowinfo service.
//!
//! This crate holds everything between the HTTP surface and the external
//! services: the document-store seam with its Chroma and in-memory
//! backends, the embedding-provider seam with its Gemini implementation,
//! the conversation session store, text utilities, CSV bulk loading, and
//! the [`RagEngine`] that orchestrates retrieval and generation.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wowinfo_rag::{RagEngine, EngineConfig, InMemoryStore};
//!
//! let engine = RagEngine::builder()
//!     .config(EngineConfig::default())
//!     .store(Arc::new(InMemoryStore::new()))
//!     .generator(Arc::new(my_generator))
//!     .build()?;
//!
//! let answer = engine.answer_question("wowinfo", "What does a Holy Priest do?", &Default::default()).await?;
//! ```

pub mod chroma;
pub mod config;
pub mod document;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod gemini;
pub mod generation;
pub mod inmemory;
pub mod loader;
pub mod session;
pub mod store;
pub mod text;

pub use chroma::ChromaStore;
pub use config::{EngineConfig, EngineConfigBuilder};
pub use document::{Answer, Document, Entity, Source};
pub use embedding::EmbeddingProvider;
pub use engine::{AnswerOptions, RagEngine, RagEngineBuilder, NO_MATCH_ANSWER};
pub use error::{RagError, Result};
pub use gemini::{GeminiEmbeddingProvider, GeminiGenerator};
pub use generation::{GenerateOptions, TextGenerator};
pub use inmemory::InMemoryStore;
pub use session::{SessionStore, Turn};
pub use store::DocumentStore;
pub use text::{UrlFetcher, chunk_text, clean_text, is_valid_url};
