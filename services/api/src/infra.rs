use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use patent_disclosure::error::AppError;
use patent_disclosure::workflows::disclosure::archive::{KeyValueStore, StoreError};
use patent_disclosure::workflows::disclosure::DocumentRecord;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store backing drafts and archived documents.
#[derive(Default, Clone)]
pub(crate) struct InMemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory store mutex poisoned".to_string()))
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn read_record(path: &Path) -> Result<DocumentRecord, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(DocumentRecord::from_json(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_round_trips_values() {
        let store = InMemoryStore::default();
        assert_eq!(store.get("draft:current").expect("get"), None);
        store
            .set("draft:current", "{}".to_string())
            .expect("set");
        assert_eq!(
            store.get("draft:current").expect("get").as_deref(),
            Some("{}")
        );
    }

    #[test]
    fn parse_date_accepts_iso_dates() {
        let date = parse_date(" 2025-03-07 ").expect("valid date");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid"));
        assert!(parse_date("2025/03/07").is_err());
    }

    #[test]
    fn read_record_reports_missing_file() {
        let err = read_record(Path::new("/nonexistent/disclosure.json")).expect_err("missing");
        assert!(matches!(err, AppError::Io(_)));
    }
}
