//! Shared application state passed to every handler.

use std::sync::Arc;

use wowinfo_rag::{RagEngine, UrlFetcher};

use crate::config::ServerConfig;

/// Shared state behind Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The retrieval-and-generation orchestrator.
    pub engine: Arc<RagEngine>,
    /// Fetcher for URL-sourced summarization content.
    pub fetcher: Arc<UrlFetcher>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
