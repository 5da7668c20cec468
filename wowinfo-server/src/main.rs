use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wowinfo_rag::{
    ChromaStore, EngineConfig, GeminiEmbeddingProvider, GeminiGenerator, RagEngine, UrlFetcher,
};
use wowinfo_server::{AppState, ServerConfig, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    let embedder = Arc::new(GeminiEmbeddingProvider::new(&config.gemini_api_key)?);
    let store = Arc::new(ChromaStore::new(&config.chroma_host, config.chroma_port, embedder)?);
    let generator = Arc::new(GeminiGenerator::new(&config.gemini_api_key)?);

    let engine = Arc::new(
        RagEngine::builder()
            .config(EngineConfig::default())
            .store(store)
            .generator(generator)
            .build()?,
    );

    let state = AppState {
        engine,
        fetcher: Arc::new(UrlFetcher::new()),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&state.config.bind_addr).await?;
    info!(addr = %state.config.bind_addr, "wowinfo server listening");
    axum::serve(listener, router(state)).await?;

    Ok(())
}
