//! In-memory document store for development and tests.
//!
//! This backend runs without any network or embedding service: queries
//! are ranked by lexical token overlap instead of vector similarity.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Document, Source};
use crate::error::{RagError, Result};
use crate::store::DocumentStore;

/// An in-memory [`DocumentStore`] using token overlap for search.
///
/// Collections are stored as nested `HashMap`s: collection name →
/// document id → document, behind a `tokio::sync::RwLock`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, HashMap<String, Document>>>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.split_whitespace().map(|t| t.to_lowercase()).collect()
}

/// Number of query tokens appearing in the document text.
fn overlap_score(query_tokens: &HashSet<String>, text: &str) -> usize {
    let doc_tokens = tokenize(text);
    query_tokens.iter().filter(|t| doc_tokens.contains(*t)).count()
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn add(&self, collection: &str, document: &Document) -> Result<()> {
        let mut collections = self.collections.write().await;
        let store = collections.entry(collection.to_string()).or_default();
        if store.contains_key(&document.id) {
            return Err(RagError::StoreError {
                backend: "inmemory".to_string(),
                message: format!("document '{}' already exists", document.id),
            });
        }
        store.insert(document.id.clone(), document.clone());
        Ok(())
    }

    async fn add_batch(&self, collection: &str, documents: &[Document]) -> Result<()> {
        let mut collections = self.collections.write().await;
        let store = collections.entry(collection.to_string()).or_default();
        for document in documents {
            store.insert(document.id.clone(), document.clone());
        }
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        text: Option<&str>,
        metadata: Option<&HashMap<String, String>>,
    ) -> Result<()> {
        let mut collections = self.collections.write().await;
        if let Some(document) =
            collections.get_mut(collection).and_then(|store| store.get_mut(id))
        {
            if let Some(text) = text {
                document.text = text.to_string();
            }
            if let Some(metadata) = metadata {
                document.metadata = metadata.clone();
            }
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<()> {
        let mut collections = self.collections.write().await;
        if let Some(store) = collections.get_mut(collection) {
            store.remove(id);
        }
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|store| store.get(id)).cloned())
    }

    async fn query(&self, collection: &str, text: &str, n_results: usize) -> Result<Vec<Source>> {
        let collections = self.collections.read().await;
        let Some(store) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let query_tokens = tokenize(text);
        let mut scored: Vec<(usize, &Document)> = store
            .values()
            .map(|doc| (overlap_score(&query_tokens, &doc.text), doc))
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.truncate(n_results);

        Ok(scored
            .into_iter()
            .map(|(_, doc)| Source { document: doc.text.clone(), metadata: doc.metadata.clone() })
            .collect())
    }
}
