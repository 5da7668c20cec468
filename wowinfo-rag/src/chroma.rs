//! Chroma document store backend.
//!
//! Provides [`ChromaStore`] which implements [`DocumentStore`] over the
//! Chroma REST API. Documents and queries are vectorized through the
//! configured [`EmbeddingProvider`] before they reach the store; Chroma
//! itself only ever sees precomputed embeddings.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use wowinfo_rag::ChromaStore;
//!
//! let store = ChromaStore::new("localhost", 8000, embedder)?;
//! store.add("wowinfo", &document).await?;
//! let hits = store.query("wowinfo", "best healer for raids", 5).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use crate::document::{Document, Source};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::store::DocumentStore;

/// Default per-request timeout for calls to the Chroma API.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const INCLUDE: [&str; 2] = ["documents", "metadatas"];

#[derive(Debug, Serialize)]
struct GetOrCreateCollectionRequest<'a> {
    name: &'a str,
    get_or_create: bool,
}

#[derive(Debug, Deserialize)]
struct CollectionInfo {
    id: String,
}

#[derive(Debug, Serialize)]
struct AddRequest<'a> {
    ids: Vec<&'a str>,
    embeddings: Vec<Vec<f32>>,
    metadatas: Vec<&'a HashMap<String, String>>,
    documents: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    ids: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    embeddings: Option<Vec<Vec<f32>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadatas: Option<Vec<&'a HashMap<String, String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    documents: Option<Vec<&'a str>>,
}

#[derive(Debug, Serialize)]
struct DeleteRequest<'a> {
    ids: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
struct GetRequest<'a> {
    ids: Vec<&'a str>,
    include: [&'static str; 2],
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(default)]
    ids: Vec<String>,
    #[serde(default)]
    documents: Option<Vec<Option<String>>>,
    #[serde(default)]
    metadatas: Option<Vec<Option<HashMap<String, Value>>>>,
}

#[derive(Debug, Serialize)]
struct QueryRequest {
    query_embeddings: Vec<Vec<f32>>,
    n_results: usize,
    include: [&'static str; 2],
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    documents: Option<Vec<Vec<Option<String>>>>,
    #[serde(default)]
    metadatas: Option<Vec<Vec<Option<HashMap<String, Value>>>>>,
}

/// Chroma stores metadata values as JSON scalars; ours are string-typed.
fn metadata_from_json(map: HashMap<String, Value>) -> HashMap<String, String> {
    map.into_iter()
        .map(|(k, v)| {
            let s = match v {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (k, s)
        })
        .collect()
}

/// A [`DocumentStore`] backed by [Chroma](https://www.trychroma.com/).
///
/// Collections are resolved by name through Chroma's get-or-create
/// endpoint and their ids cached for the life of the store. All requests
/// carry a bounded timeout; a timeout surfaces as [`RagError::Timeout`],
/// every other failure as [`RagError::StoreError`].
pub struct ChromaStore {
    http: Client,
    base_url: Url,
    embedder: Arc<dyn EmbeddingProvider>,
    collection_ids: RwLock<HashMap<String, String>>,
}

impl ChromaStore {
    /// Create a new store talking to `http://{host}:{port}` with the
    /// default timeout.
    pub fn new(host: &str, port: u16, embedder: Arc<dyn EmbeddingProvider>) -> Result<Self> {
        Self::with_timeout(host, port, embedder, DEFAULT_TIMEOUT)
    }

    /// Create a new store with a custom per-request timeout.
    pub fn with_timeout(
        host: &str,
        port: u16,
        embedder: Arc<dyn EmbeddingProvider>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = Url::parse(&format!("http://{host}:{port}/api/v1/"))
            .map_err(|e| Self::store_err(format!("invalid Chroma address: {e}")))?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("all parameters must be valid");
        Ok(Self { http, base_url, embedder, collection_ids: RwLock::new(HashMap::new()) })
    }

    fn store_err(message: impl Into<String>) -> RagError {
        RagError::StoreError { backend: "chroma".to_string(), message: message.into() }
    }

    async fn post_json<Req: Serialize, Res: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &Req,
    ) -> Result<Res> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| Self::store_err(format!("failed to construct URL '{path}': {e}")))?;

        let response = self.http.post(url.clone()).json(body).send().await.map_err(|e| {
            if e.is_timeout() {
                RagError::Timeout { service: "chroma".to_string() }
            } else {
                Self::store_err(format!("request to '{url}' failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let description = response.text().await.unwrap_or_default();
            return Err(Self::store_err(format!(
                "bad response from '{url}'; code {}; description: {description}",
                status.as_u16()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Self::store_err(format!("failed to decode response from '{url}': {e}")))
    }

    /// Resolve a collection name to its Chroma id, creating the collection
    /// if it does not exist yet. Resolved ids are cached.
    async fn collection_id(&self, name: &str) -> Result<String> {
        if let Some(id) = self.collection_ids.read().await.get(name) {
            return Ok(id.clone());
        }

        let info: CollectionInfo = self
            .post_json("collections", &GetOrCreateCollectionRequest { name, get_or_create: true })
            .await?;

        debug!(collection = name, id = %info.id, "resolved chroma collection");
        self.collection_ids.write().await.insert(name.to_string(), info.id.clone());
        Ok(info.id)
    }
}

#[async_trait]
impl DocumentStore for ChromaStore {
    async fn add(&self, collection: &str, document: &Document) -> Result<()> {
        self.add_batch(collection, std::slice::from_ref(document)).await
    }

    async fn add_batch(&self, collection: &str, documents: &[Document]) -> Result<()> {
        if documents.is_empty() {
            return Ok(());
        }

        let id = self.collection_id(collection).await?;
        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let request = AddRequest {
            ids: documents.iter().map(|d| d.id.as_str()).collect(),
            embeddings,
            metadatas: documents.iter().map(|d| &d.metadata).collect(),
            documents: texts,
        };
        let _: Value = self.post_json(&format!("collections/{id}/add"), &request).await?;

        debug!(collection, count = documents.len(), "added documents to chroma");
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        doc_id: &str,
        text: Option<&str>,
        metadata: Option<&HashMap<String, String>>,
    ) -> Result<()> {
        let id = self.collection_id(collection).await?;

        // A changed body means a changed embedding; metadata-only updates
        // leave the stored vector untouched.
        let embeddings = match text {
            Some(text) => Some(vec![self.embedder.embed(text).await?]),
            None => None,
        };

        let request = UpdateRequest {
            ids: vec![doc_id],
            embeddings,
            metadatas: metadata.map(|m| vec![m]),
            documents: text.map(|t| vec![t]),
        };
        let _: Value = self.post_json(&format!("collections/{id}/update"), &request).await?;

        debug!(collection, doc_id, "updated document in chroma");
        Ok(())
    }

    async fn delete(&self, collection: &str, doc_id: &str) -> Result<()> {
        let id = self.collection_id(collection).await?;
        let request = DeleteRequest { ids: vec![doc_id] };
        let _: Value = self.post_json(&format!("collections/{id}/delete"), &request).await?;

        debug!(collection, doc_id, "deleted document from chroma");
        Ok(())
    }

    async fn get(&self, collection: &str, doc_id: &str) -> Result<Option<Document>> {
        let id = self.collection_id(collection).await?;
        let request = GetRequest { ids: vec![doc_id], include: INCLUDE };
        let response: GetResponse =
            self.post_json(&format!("collections/{id}/get"), &request).await?;

        if response.ids.is_empty() {
            return Ok(None);
        }

        let text = response
            .documents
            .and_then(|mut docs| docs.drain(..).next().flatten())
            .unwrap_or_default();
        let metadata = response
            .metadatas
            .and_then(|mut metas| metas.drain(..).next().flatten())
            .map(metadata_from_json)
            .unwrap_or_default();

        Ok(Some(Document { id: response.ids.into_iter().next().unwrap_or_default(), text, metadata }))
    }

    async fn query(&self, collection: &str, text: &str, n_results: usize) -> Result<Vec<Source>> {
        let id = self.collection_id(collection).await?;
        let query_embedding = self.embedder.embed(text).await?;

        let request = QueryRequest {
            query_embeddings: vec![query_embedding],
            n_results,
            include: INCLUDE,
        };
        let response: QueryResponse =
            self.post_json(&format!("collections/{id}/query"), &request).await?;

        // Chroma nests results per query embedding; we always send exactly one.
        let documents = response
            .documents
            .and_then(|mut d| (!d.is_empty()).then(|| d.remove(0)))
            .unwrap_or_default();
        let mut metadatas = response
            .metadatas
            .and_then(|mut m| (!m.is_empty()).then(|| m.remove(0)))
            .unwrap_or_default();
        metadatas.resize(documents.len(), None);

        let hits = documents
            .into_iter()
            .zip(metadatas)
            .filter_map(|(doc, meta)| {
                doc.map(|document| Source {
                    document,
                    metadata: meta.map(metadata_from_json).unwrap_or_default(),
                })
            })
            .collect();

        Ok(hits)
    }
}
