use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::super::domain::DocumentRecord;
use super::super::quality::OverallStatus;

/// Key-value persistence used for drafts and saved documents.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Index row describing a saved document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentIndexEntry {
    pub document_id: String,
    pub file_name: String,
    pub technical_field: String,
    pub saved_on: NaiveDate,
    pub score: u8,
    pub overall: OverallStatus,
}

/// A finalized document together with the record it was rendered from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDocument {
    pub entry: DocumentIndexEntry,
    pub record: DocumentRecord,
    pub markdown: String,
}
