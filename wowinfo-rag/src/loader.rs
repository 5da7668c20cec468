//! Bulk CSV loading of documents into a store.
//!
//! Rows carry a `description` column (the document body) and `class` /
//! `spec` columns (metadata). Each row's id is synthesized as
//! `{class}-{spec}`.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::document::Document;
use crate::error::{RagError, Result};
use crate::store::DocumentStore;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    description: String,
    class: String,
    spec: String,
}

fn parse_documents<R: Read>(reader: R) -> Result<Vec<Document>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut documents = Vec::new();

    for record in csv_reader.deserialize() {
        let record: CsvRecord = record.map_err(|e| RagError::DataLoadError(e.to_string()))?;
        let id = format!("{}-{}", record.class, record.spec);
        let metadata = HashMap::from([
            ("class".to_string(), record.class),
            ("spec".to_string(), record.spec),
        ]);
        documents.push(Document { id, text: record.description, metadata });
    }

    Ok(documents)
}

/// Read documents from a CSV file with `description,class,spec` columns.
///
/// # Errors
///
/// Returns [`RagError::DataLoadError`] if the file is missing or a row
/// does not carry the expected columns.
pub fn read_documents(path: impl AsRef<Path>) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| RagError::DataLoadError(format!("failed to open '{}': {e}", path.display())))?;
    parse_documents(file)
}

/// Load all rows of a CSV file into a collection as one batch insert.
///
/// Returns the number of documents loaded.
pub async fn load_csv(
    store: &dyn DocumentStore,
    collection: &str,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let documents = read_documents(path)?;
    store.add_batch(collection, &documents).await?;
    info!(collection, count = documents.len(), "loaded documents from CSV");
    Ok(documents.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_into_documents() {
        let csv = "description,class,spec\n\
                   Heals the raid with holy magic.,Priest,Holy\n\
                   Tanks with shield and sword.,Warrior,Protection\n";

        let documents = parse_documents(csv.as_bytes()).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].id, "Priest-Holy");
        assert_eq!(documents[0].text, "Heals the raid with holy magic.");
        assert_eq!(documents[0].metadata.get("class").map(String::as_str), Some("Priest"));
        assert_eq!(documents[1].metadata.get("spec").map(String::as_str), Some("Protection"));
    }

    #[test]
    fn missing_columns_fail_the_load() {
        let csv = "description,class\nonly two columns,Priest\n";
        let err = parse_documents(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, RagError::DataLoadError(_)));
    }

    #[test]
    fn missing_file_fails_the_load() {
        let err = read_documents("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, RagError::DataLoadError(_)));
    }

    #[tokio::test]
    async fn load_csv_inserts_all_rows() {
        use crate::inmemory::InMemoryStore;

        let dir = std::env::temp_dir().join("wowinfo-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("data.csv");
        std::fs::write(&path, "description,class,spec\nFrosty caster.,Mage,Frost\n").unwrap();

        let store = InMemoryStore::new();
        let count = load_csv(&store, "wowinfo", &path).await.unwrap();
        assert_eq!(count, 1);
        assert!(store.get("wowinfo", "Mage-Frost").await.unwrap().is_some());
    }
}
