//! The results store.
//!
//! Append-mostly collection of `TestResult` records with JSON persistence.
//! Every mutation rewrites the whole document through the backend; failures
//! to persist are surfaced and the in-memory collection is rolled back, so
//! memory and storage never drift apart.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::backend::StorageBackend;
use crate::error::StoreError;
use crate::result::{NewResult, TestResult};

/// Export document wrapper.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument<'a> {
    export_date: DateTime<Utc>,
    total_results: usize,
    results: &'a [TestResult],
}

/// Persistent log of completed test attempts.
pub struct ResultStore {
    backend: Arc<dyn StorageBackend>,
    results: Vec<TestResult>,
}

impl ResultStore {
    /// Create an empty store over the given backend. Call [`load`] before
    /// first use.
    ///
    /// [`load`]: ResultStore::load
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            results: Vec::new(),
        }
    }

    /// Populate the in-memory collection from storage.
    ///
    /// Idempotent. A read failure or corrupt document resets to an empty
    /// collection and logs the condition; it never fails the caller.
    pub async fn load(&mut self) {
        self.results = match self.backend.read().await {
            Ok(Some(contents)) => match serde_json::from_str::<Vec<TestResult>>(&contents) {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!("corrupt results document, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("failed to read results, starting empty: {e}");
                Vec::new()
            }
        };
        tracing::debug!("loaded {} results", self.results.len());
    }

    /// Append a completed attempt and persist.
    ///
    /// Assigns id, timestamp, derived display strings, schema version, and
    /// the next test number. On a persist failure the record is rolled back
    /// and the error returned; nothing is silently lost.
    pub async fn add_result(&mut self, new: NewResult) -> Result<TestResult, StoreError> {
        let test_number = self
            .results
            .iter()
            .map(|r| r.test_number)
            .max()
            .unwrap_or(0)
            + 1;
        let result = new.into_result(test_number, Utc::now());

        self.results.push(result.clone());
        if let Err(e) = self.persist().await {
            self.results.pop();
            return Err(e);
        }
        tracing::info!(
            test_id = %result.test_id,
            user_id = %result.user_id,
            percentage = result.percentage,
            "stored result #{test_number}"
        );
        Ok(result)
    }

    /// All results, newest first.
    pub fn all(&self) -> Vec<TestResult> {
        let mut out = self.results.clone();
        out.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then(b.test_number.cmp(&a.test_number))
        });
        out
    }

    /// Results for one test, newest first.
    pub fn by_test(&self, test_id: &str) -> Vec<TestResult> {
        self.all()
            .into_iter()
            .filter(|r| r.test_id == test_id)
            .collect()
    }

    /// Results for one user, newest first.
    pub fn by_user(&self, user_id: &str) -> Vec<TestResult> {
        self.all()
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect()
    }

    pub fn by_id(&self, id: Uuid) -> Option<&TestResult> {
        self.results.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Delete one result by id. Returns whether anything was deleted.
    pub async fn delete(&mut self, id: Uuid) -> Result<bool, StoreError> {
        let Some(pos) = self.results.iter().position(|r| r.id == id) else {
            return Ok(false);
        };
        let removed = self.results.remove(pos);
        if let Err(e) = self.persist().await {
            self.results.insert(pos, removed);
            return Err(e);
        }
        Ok(true)
    }

    /// Delete everything.
    pub async fn clear_all(&mut self) -> Result<(), StoreError> {
        let previous = std::mem::take(&mut self.results);
        if let Err(e) = self.persist().await {
            self.results = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Export the collection wrapped as `{exportDate, totalResults, results}`.
    pub fn export_json(&self) -> Result<String, StoreError> {
        let results = self.all();
        let doc = ExportDocument {
            export_date: Utc::now(),
            total_results: results.len(),
            results: &results,
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }

    /// Replace the collection from an export document or a bare array.
    ///
    /// The payload is fully validated before any state changes; on success
    /// the new collection is persisted and its size returned.
    pub async fn import_json(&mut self, payload: &str) -> Result<usize, StoreError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;

        let results_value = if value.is_array() {
            value
        } else if let Some(results) = value.get("results").filter(|r| r.is_array()) {
            results.clone()
        } else {
            return Err(StoreError::InvalidImport(
                "expected a results array or an export document containing one".into(),
            ));
        };

        let imported: Vec<TestResult> = serde_json::from_value(results_value)?;

        let previous = std::mem::replace(&mut self.results, imported);
        if let Err(e) = self.persist().await {
            self.results = previous;
            return Err(e);
        }
        tracing::info!("imported {} results", self.results.len());
        Ok(self.results.len())
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.results)?;
        self.backend.write(&json).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryStorage;
    use cogscreen_core::model::Severity;

    fn new_result(test_id: &str, user_id: &str, percentage: u32) -> NewResult {
        NewResult {
            test_id: test_id.into(),
            test_name: test_id.to_uppercase(),
            user_id: user_id.into(),
            score: percentage * 30 / 100,
            max_score: 30,
            percentage,
            severity: Severity::Normal,
            duration: 8.0,
            answers: None,
            metadata: None,
        }
    }

    async fn store_with(backend: Arc<MemoryStorage>) -> ResultStore {
        let mut store = ResultStore::new(backend);
        store.load().await;
        store
    }

    #[tokio::test]
    async fn load_missing_and_corrupt_documents() {
        let store = store_with(Arc::new(MemoryStorage::new())).await;
        assert!(store.is_empty());

        let corrupt = Arc::new(MemoryStorage::with_contents("{not json"));
        let store = store_with(corrupt).await;
        assert!(store.is_empty());

        let failing = Arc::new(MemoryStorage::new());
        failing.set_fail_reads(true);
        let store = store_with(failing).await;
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn sequential_adds_get_adjacent_numbers_newest_first() {
        let mut store = store_with(Arc::new(MemoryStorage::new())).await;

        let first = store.add_result(new_result("mmse", "user-1", 70)).await.unwrap();
        let second = store.add_result(new_result("mmse", "user-1", 80)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(second.test_number, first.test_number + 1);

        let all = store.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id, "newest first");
    }

    #[tokio::test]
    async fn queries_filter_and_keep_order() {
        let mut store = store_with(Arc::new(MemoryStorage::new())).await;
        store.add_result(new_result("mmse", "alice", 70)).await.unwrap();
        store.add_result(new_result("moca", "bob", 60)).await.unwrap();
        let latest = store.add_result(new_result("mmse", "alice", 90)).await.unwrap();

        let mmse = store.by_test("mmse");
        assert_eq!(mmse.len(), 2);
        assert_eq!(mmse[0].id, latest.id);

        assert_eq!(store.by_user("bob").len(), 1);
        assert_eq!(store.by_id(latest.id).unwrap().percentage, 90);
        assert!(store.by_id(Uuid::new_v4()).is_none());
    }

    #[tokio::test]
    async fn delete_and_clear() {
        let backend = Arc::new(MemoryStorage::new());
        let mut store = store_with(Arc::clone(&backend)).await;
        let kept = store.add_result(new_result("mmse", "alice", 70)).await.unwrap();
        let gone = store.add_result(new_result("moca", "alice", 60)).await.unwrap();

        assert!(store.delete(gone.id).await.unwrap());
        assert!(!store.delete(gone.id).await.unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.by_id(kept.id).is_some());

        store.clear_all().await.unwrap();
        assert!(store.is_empty());
        // every mutation rewrote the document
        assert_eq!(backend.write_count(), 4);
    }

    #[tokio::test]
    async fn failed_persist_rolls_back_and_surfaces() {
        let backend = Arc::new(MemoryStorage::new());
        let mut store = store_with(Arc::clone(&backend)).await;
        let kept = store.add_result(new_result("mmse", "alice", 70)).await.unwrap();

        backend.set_fail_writes(true);
        assert!(store.add_result(new_result("moca", "alice", 60)).await.is_err());
        assert_eq!(store.len(), 1, "failed add rolled back");

        assert!(store.delete(kept.id).await.is_err());
        assert_eq!(store.len(), 1, "failed delete rolled back");

        assert!(store.clear_all().await.is_err());
        assert_eq!(store.len(), 1, "failed clear rolled back");
    }

    #[tokio::test]
    async fn export_import_round_trip() {
        let mut store = store_with(Arc::new(MemoryStorage::new())).await;
        store.add_result(new_result("mmse", "alice", 70)).await.unwrap();
        store.add_result(new_result("moca", "bob", 85)).await.unwrap();
        let exported_collection = store.all();

        let exported = store.export_json().unwrap();
        let doc: serde_json::Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(doc["totalResults"], 2);
        assert!(doc["exportDate"].is_string());

        let mut other = store_with(Arc::new(MemoryStorage::new())).await;
        let count = other.import_json(&exported).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(other.all(), exported_collection);
    }

    #[tokio::test]
    async fn import_accepts_bare_array() {
        let mut store = store_with(Arc::new(MemoryStorage::new())).await;
        store.add_result(new_result("mmse", "alice", 70)).await.unwrap();
        let bare = serde_json::to_string(&store.all()).unwrap();

        let mut other = store_with(Arc::new(MemoryStorage::new())).await;
        assert_eq!(other.import_json(&bare).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn bad_import_leaves_state_untouched() {
        let mut store = store_with(Arc::new(MemoryStorage::new())).await;
        let existing = store.add_result(new_result("mmse", "alice", 70)).await.unwrap();

        assert!(matches!(
            store.import_json(r#"{"noResults": true}"#).await,
            Err(StoreError::InvalidImport(_))
        ));
        assert!(store.import_json("{not json").await.is_err());
        assert!(store
            .import_json(r#"{"results": [{"bogus": 1}]}"#)
            .await
            .is_err());

        assert_eq!(store.len(), 1);
        assert!(store.by_id(existing.id).is_some());
    }

    #[tokio::test]
    async fn file_backed_reload() {
        use crate::backend::JsonFileStorage;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        let mut store = ResultStore::new(Arc::new(JsonFileStorage::new(&path)));
        store.load().await;
        let added = store.add_result(new_result("mmse", "alice", 70)).await.unwrap();

        let mut reopened = ResultStore::new(Arc::new(JsonFileStorage::new(&path)));
        reopened.load().await;
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.by_id(added.id).unwrap().percentage, 70);
    }
}
