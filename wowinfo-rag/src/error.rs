//! Error types for the `wowinfo-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval and generation operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// An error occurred during embedding generation.
    #[error("Embedding error ({provider}): {message}")]
    EmbeddingError {
        /// The embedding provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the document store backend.
    #[error("Document store error ({backend}): {message}")]
    StoreError {
        /// The document store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred while generating text.
    #[error("Generation error: {0}")]
    GenerationError(String),

    /// The caller supplied input an operation cannot work with.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An external call exceeded its bounded timeout.
    #[error("Timed out calling {service}")]
    Timeout {
        /// The external service that did not answer in time.
        service: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A bulk data load failed (missing file, malformed rows, absent columns).
    #[error("Data load error: {0}")]
    DataLoadError(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
