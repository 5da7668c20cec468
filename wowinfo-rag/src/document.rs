//! Data types for documents, retrieved passages, and answers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A factual document stored in the knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Unique identifier for the document.
    pub id: String,
    /// The text content of the document.
    pub text: String,
    /// Key-value metadata associated with the document (e.g. class/spec labels).
    pub metadata: HashMap<String, String>,
}

/// A retrieved passage: a document body paired with its metadata.
///
/// Ordering within a result list reflects similarity rank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Source {
    /// The retrieved document body.
    pub document: String,
    /// The metadata stored with the document.
    pub metadata: HashMap<String, String>,
}

/// A generated answer together with the passages it was grounded on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    /// The generated answer text.
    pub answer: String,
    /// The retrieved passages, in rank order.
    pub sources: Vec<Source>,
}

/// A named entity extracted from free text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entity {
    /// The entity text.
    pub entity: String,
    /// The entity's classification.
    #[serde(rename = "type")]
    pub entity_type: String,
}
