use async_trait::async_trait;
use shared_types::{ApplicantRecord, CreateApplicantRequest};
use std::time::Duration;

use super::{mint_record, require_fields, sort_newest_first, RecordStore, StoreError};

/// Document-remote backend: a single endpoint holds the entire record set as
/// one JSON array. Every mutation is a read-modify-write of the whole
/// document, so concurrent writers can lose updates; that race is inherited
/// from the document model and documented rather than papered over.
pub struct RemoteStore {
    http: reqwest::Client,
    url: String,
}

impl RemoteStore {
    pub fn new(url: String, request_timeout_secs: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()?;
        tracing::info!("Remote record store at {}", url);
        Ok(Self { http, url })
    }

    fn unreachable(&self, e: reqwest::Error) -> StoreError {
        StoreError::Unavailable(format!("Cannot reach record store at {}: {e}", self.url))
    }

    async fn fetch(&self) -> Result<Vec<ApplicantRecord>, StoreError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        // A document nobody has written yet reads back 404. That is an empty
        // store, not an outage; the first push creates it.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let response = response.error_for_status().map_err(|e| self.unreachable(e))?;

        response
            .json::<Vec<ApplicantRecord>>()
            .await
            .map_err(|e| StoreError::Internal(format!("Bad record document: {e}")))
    }

    async fn push(&self, records: &[ApplicantRecord]) -> Result<(), StoreError> {
        self.http
            .put(&self.url)
            .json(records)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?
            .error_for_status()
            .map_err(|e| self.unreachable(e))?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for RemoteStore {
    async fn create(
        &self,
        candidate: CreateApplicantRequest,
    ) -> Result<ApplicantRecord, StoreError> {
        let preference = require_fields(&candidate)?;
        let record = mint_record(candidate, preference);

        let mut records = self.fetch().await?;
        records.push(record.clone());
        self.push(&records).await?;
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ApplicantRecord>, StoreError> {
        let mut records = self.fetch().await?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn get(&self, id: &str) -> Result<ApplicantRecord, StoreError> {
        self.fetch()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)
    }

    async fn delete_one(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.fetch().await?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(StoreError::NotFound);
        }
        self.push(&records).await
    }

    async fn clear_all(&self) -> Result<usize, StoreError> {
        let count = self.fetch().await?.len();
        self.push(&[]).await?;
        Ok(count)
    }
}
