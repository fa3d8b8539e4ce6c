use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::disclosure::archive::repository::{KeyValueStore, StoreError};
use crate::workflows::disclosure::archive::{disclosure_router, DisclosureArchive};
use crate::workflows::disclosure::domain::{DocumentRecord, KeyFeatures};

pub(super) fn saved_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date")
}

pub(super) fn complete_record() -> DocumentRecord {
    DocumentRecord {
        title: Some("Adaptive sensor batching".to_string()),
        technical_field: Some("Industrial sensor networks".to_string()),
        inventor: Some("Jane Doe".to_string()),
        background_technology: Some(
            "Field sensors report every reading over low-power radio links as soon as it is taken."
                .to_string(),
        ),
        current_problems: Some(
            "Per-reading transmissions drain batteries within months.".to_string(),
        ),
        technical_problem: Some("Reduce radio energy spent per reading.".to_string()),
        technical_solution: Some(
            "A hub buffers readings, compresses the batch with a delta encoder and transmits \
             when the buffer fills or a deadline expires, whichever comes first."
                .to_string(),
        ),
        key_features: Some(KeyFeatures::List(vec![
            "deadline-bounded batching".to_string(),
            "delta compression".to_string(),
            "adaptive buffer sizing".to_string(),
        ])),
        beneficial_effects: Some(
            "Battery life increases roughly fourfold in field trials.".to_string(),
        ),
        performance_data: Some("Average transmit energy fell from 9 mJ to 2.1 mJ.".to_string()),
        embodiment_description: Some(
            "A pilot deployment used 40 vibration sensors on a conveyor line with one hub."
                .to_string(),
        ),
        ..DocumentRecord::default()
    }
}

/// Record that satisfies every error rule but leaves warnings open.
pub(super) fn warning_record() -> DocumentRecord {
    DocumentRecord {
        technical_field: None,
        background_technology: None,
        key_features: None,
        performance_data: None,
        embodiment_description: None,
        ..complete_record()
    }
}

pub(super) fn build_service() -> (Arc<DisclosureArchive<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(DisclosureArchive::new(store.clone()));
    (service, store)
}

pub(super) fn router_with_service(service: Arc<DisclosureArchive<MemoryStore>>) -> axum::Router {
    disclosure_router(service)
}

#[derive(Default)]
pub(super) struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub(super) fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self
            .values
            .lock()
            .expect("store mutex poisoned")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.values.lock().expect("store mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut guard = self.values.lock().expect("store mutex poisoned");
        guard.insert(key.to_string(), value);
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn set(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

pub(super) async fn read_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = read_body(response).await;
    serde_json::from_str(&body).expect("json body")
}
