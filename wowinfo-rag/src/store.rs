//! Document store trait for CRUD and similarity queries over collections.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::document::{Document, Source};
use crate::error::Result;

/// A storage backend holding named collections of documents with
/// similarity search.
///
/// The store is the single source of truth: no local copy of a document
/// is retained anywhere else. Implementations manage vectorization of
/// inserted documents and queries internally.
///
/// # Example
///
/// ```rust,ignore
/// use wowinfo_rag::{DocumentStore, InMemoryStore};
///
/// let store = InMemoryStore::new();
/// store.add("docs", &document).await?;
/// let hits = store.query("docs", "tanky plate wearer", 5).await?;
/// ```
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document. Fails if the backend rejects the id as a
    /// duplicate.
    async fn add(&self, collection: &str, document: &Document) -> Result<()>;

    /// Insert many documents in one batch.
    async fn add_batch(&self, collection: &str, documents: &[Document]) -> Result<()>;

    /// Partially update a document: only supplied fields are changed;
    /// omitted fields are left untouched, never cleared.
    async fn update(
        &self,
        collection: &str,
        id: &str,
        text: Option<&str>,
        metadata: Option<&HashMap<String, String>>,
    ) -> Result<()>;

    /// Remove a document by id. Unknown ids are not an error.
    async fn delete(&self, collection: &str, id: &str) -> Result<()>;

    /// Fetch a document by id, or `None` if absent.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Return up to `n_results` passages ranked by similarity to `text`.
    ///
    /// Returns an empty list when the collection is empty or nothing
    /// matches.
    async fn query(&self, collection: &str, text: &str, n_results: usize) -> Result<Vec<Source>>;
}
