use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::super::domain::{DocumentField, DocumentRecord};
use super::super::draft::{export_file_name, render_draft, DraftStatus};
use super::super::quality::{CheckReport, OverallStatus, QualityChecker, DEFAULT_ID_PREFIX};
use super::repository::{DocumentIndexEntry, KeyValueStore, SavedDocument, StoreError};

const DRAFT_KEY: &str = "draft:current";
const INDEX_KEY: &str = "documents";

fn document_key(document_id: &str) -> String {
    format!("document:{document_id}")
}

/// Service composing the quality checker with draft and document storage.
pub struct DisclosureArchive<S> {
    store: Arc<S>,
    checker: QualityChecker<'static>,
    id_prefix: String,
    // Held across read-modify-write of the document index.
    index_lock: Mutex<()>,
}

impl<S> DisclosureArchive<S>
where
    S: KeyValueStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_checker(store, QualityChecker::default())
    }

    pub fn with_checker(store: Arc<S>, checker: QualityChecker<'static>) -> Self {
        Self {
            store,
            checker,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            index_lock: Mutex::new(()),
        }
    }

    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    pub fn id_prefix(&self) -> &str {
        &self.id_prefix
    }

    pub fn checker(&self) -> &QualityChecker<'static> {
        &self.checker
    }

    pub fn check(&self, record: &DocumentRecord) -> CheckReport {
        let report = self.checker.check_document(record);
        debug!(
            overall = ?report.overall,
            score = report.score,
            errors = report.errors.len(),
            warnings = report.warnings.len(),
            "checked disclosure record"
        );
        report
    }

    pub fn save_draft(&self, record: &DocumentRecord) -> Result<(), ArchiveError> {
        self.put(DRAFT_KEY, record)
    }

    pub fn load_draft(&self) -> Result<Option<DocumentRecord>, ArchiveError> {
        self.fetch(DRAFT_KEY)
    }

    /// Finalize and store a document; records that still fail an
    /// error-severity rule are refused.
    pub fn save_document(
        &self,
        mut record: DocumentRecord,
        saved_on: NaiveDate,
    ) -> Result<SavedDocument, ArchiveError> {
        let report = self.check(&record);
        if report.overall == OverallStatus::Fail {
            return Err(ArchiveError::NotReady {
                failed: report.errors.iter().map(|error| error.id.clone()).collect(),
            });
        }

        let _guard = self
            .index_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut index = self.list_documents()?;
        let document_id = match record.trimmed(DocumentField::DocumentId) {
            Some(id) => id.to_string(),
            None => self.next_document_id(&index, saved_on.year()),
        };
        record.document_id = Some(document_id.clone());

        let entry = DocumentIndexEntry {
            document_id: document_id.clone(),
            file_name: export_file_name(&record, saved_on),
            technical_field: record.text(DocumentField::TechnicalField).trim().to_string(),
            saved_on,
            score: report.score,
            overall: report.overall,
        };
        let document = SavedDocument {
            entry: entry.clone(),
            markdown: render_draft(&record, DraftStatus::Final, saved_on),
            record,
        };

        self.put(&document_key(&document_id), &document)?;
        match index
            .iter_mut()
            .find(|existing| existing.document_id == document_id)
        {
            Some(existing) => *existing = entry,
            None => index.push(entry),
        }
        self.put(INDEX_KEY, &index)?;

        info!(%document_id, score = report.score, "saved disclosure document");
        Ok(document)
    }

    /// Smallest `<prefix>-<year>-NNN` not yet present in the index.
    fn next_document_id(&self, index: &[DocumentIndexEntry], year: i32) -> String {
        let taken: HashSet<&str> = index
            .iter()
            .map(|entry| entry.document_id.as_str())
            .collect();
        (1u32..)
            .map(|sequence| format!("{}-{year}-{sequence:03}", self.id_prefix))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or_else(|| format!("{}-{year}-{}", self.id_prefix, index.len() + 1))
    }

    pub fn list_documents(&self) -> Result<Vec<DocumentIndexEntry>, ArchiveError> {
        Ok(self.fetch(INDEX_KEY)?.unwrap_or_default())
    }

    pub fn load_document(&self, document_id: &str) -> Result<Option<SavedDocument>, ArchiveError> {
        self.fetch(&document_key(document_id))
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ArchiveError> {
        let payload = serde_json::to_string(value)?;
        self.store.set(key, payload)?;
        Ok(())
    }

    fn fetch<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ArchiveError> {
        match self.store.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }
}

/// Error raised by the archive service.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("document is not ready to save; failing rules: {}", failed.join(", "))]
    NotReady { failed: Vec<String> },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored value could not be encoded or decoded: {0}")]
    Serialization(#[from] serde_json::Error),
}
