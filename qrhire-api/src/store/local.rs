use async_trait::async_trait;
use shared_types::{ApplicantRecord, CreateApplicantRequest};
use std::path::PathBuf;
use std::sync::Mutex;

use super::{mint_record, require_fields, sort_newest_first, RecordStore, StoreError};

/// Device-local backend: the whole record set lives as one JSON array in a
/// file, the on-disk equivalent of the historical `"applicants"` key-value
/// entry. The historical variant neither sorted nor errored on unknown
/// deletes; both are normalized here to match the other backends.
pub struct LocalStore {
    path: PathBuf,
    // One writer at a time; the file is rewritten whole on every mutation.
    lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(path: PathBuf) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::info!("Local record store at {:?}", path);
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    fn load(&self) -> Result<Vec<ApplicantRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::Internal(format!("Failed to read record file: {e}")))?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Internal(format!("Corrupt record file: {e}")))
    }

    fn save(&self, records: &[ApplicantRecord]) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(records)
            .map_err(|e| StoreError::Internal(format!("Failed to encode records: {e}")))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| StoreError::Internal(format!("Failed to write record file: {e}")))
    }

    fn locked(&self) -> std::sync::MutexGuard<'_, ()> {
        // A poisoned lock only means another thread panicked mid-write; the
        // guarded state is the file itself, so continue.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl RecordStore for LocalStore {
    async fn create(
        &self,
        candidate: CreateApplicantRequest,
    ) -> Result<ApplicantRecord, StoreError> {
        let preference = require_fields(&candidate)?;
        let record = mint_record(candidate, preference);

        let _guard = self.locked();
        let mut records = self.load()?;
        records.push(record.clone());
        self.save(&records)?;
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ApplicantRecord>, StoreError> {
        let _guard = self.locked();
        let mut records = self.load()?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn get(&self, id: &str) -> Result<ApplicantRecord, StoreError> {
        let _guard = self.locked();
        self.load()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)
    }

    async fn delete_one(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.locked();
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound);
        }
        self.save(&records)
    }

    async fn clear_all(&self) -> Result<usize, StoreError> {
        let _guard = self.locked();
        let count = self.load()?.len();
        self.save(&[])?;
        Ok(count)
    }
}
