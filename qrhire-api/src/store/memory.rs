use async_trait::async_trait;
use shared_types::{ApplicantRecord, CreateApplicantRequest};
use tokio::sync::RwLock;

use super::{mint_record, require_fields, sort_newest_first, RecordStore, StoreError};

/// Process-lifetime store backed by a plain vector. The write lock serializes
/// creates, so concurrent submissions within one process cannot lose updates;
/// nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<ApplicantRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn create(
        &self,
        candidate: CreateApplicantRequest,
    ) -> Result<ApplicantRecord, StoreError> {
        let preference = require_fields(&candidate)?;
        let record = mint_record(candidate, preference);

        let mut records = self.records.write().await;
        records.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ApplicantRecord>, StoreError> {
        let mut records = self.records.read().await.clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn get(&self, id: &str) -> Result<ApplicantRecord, StoreError> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn delete_one(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn clear_all(&self) -> Result<usize, StoreError> {
        let mut records = self.records.write().await;
        let count = records.len();
        records.clear();
        Ok(count)
    }
}
