pub mod local;
pub mod memory;
pub mod remote;
pub mod sqlite;

use async_trait::async_trait;
use chrono::Utc;
use shared_types::{ApplicantRecord, ContactPreference, CreateApplicantRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{StorageConfig, StoreBackend};
use crate::helpers::paths;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("Applicant not found")]
    NotFound,
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Internal(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for StoreError {
    fn from(e: r2d2::Error) -> Self {
        StoreError::Unavailable(format!("Record store unavailable: {e}"))
    }
}

/// The canonical four-operation contract every backend implements.
///
/// `id` and `applied_at` are minted here, store-side; callers never supply
/// them. `list` is always sorted newest first and an empty store is an empty
/// list, never an error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create(&self, candidate: CreateApplicantRequest)
        -> Result<ApplicantRecord, StoreError>;

    async fn list(&self) -> Result<Vec<ApplicantRecord>, StoreError>;

    async fn get(&self, id: &str) -> Result<ApplicantRecord, StoreError>;

    /// Removes one record. Unknown ids are `NotFound` in every backend; a
    /// repeat delete of the same id therefore errors rather than no-ops.
    async fn delete_one(&self, id: &str) -> Result<(), StoreError>;

    /// Removes everything and reports how many records were dropped.
    async fn clear_all(&self) -> Result<usize, StoreError>;
}

/// Presence check for the four required fields, applied by every backend
/// before a record is minted. Format validation (email/phone shape) is the
/// caller's job; the store only refuses blank submissions.
pub(crate) fn require_fields(
    candidate: &CreateApplicantRequest,
) -> Result<ContactPreference, StoreError> {
    match candidate.contact_preference {
        Some(preference)
            if !candidate.job_id.trim().is_empty()
                && !candidate.name.trim().is_empty()
                && !candidate.contact_info.trim().is_empty() =>
        {
            Ok(preference)
        }
        _ => Err(StoreError::Validation("Missing required fields".to_string())),
    }
}

/// Builds the stored record: random id (same-instant submissions must not
/// collide, so no wall-clock tokens) and the creation timestamp.
pub(crate) fn mint_record(
    candidate: CreateApplicantRequest,
    preference: ContactPreference,
) -> ApplicantRecord {
    ApplicantRecord {
        id: Uuid::new_v4().to_string(),
        job_id: candidate.job_id,
        name: candidate.name,
        contact_preference: preference,
        contact_info: candidate.contact_info,
        experience: candidate.experience,
        speaks_spanish: candidate.speaks_spanish,
        applied_at: Utc::now(),
    }
}

pub(crate) fn sort_newest_first(records: &mut [ApplicantRecord]) {
    records.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
}

/// Opens the backend named by the configuration. A failure here is fatal to
/// startup; there is nothing to serve without a store.
pub fn from_config(cfg: &StorageConfig) -> anyhow::Result<Arc<dyn RecordStore>> {
    match cfg.backend {
        StoreBackend::Memory => Ok(Arc::new(memory::MemoryStore::new())),
        StoreBackend::Sqlite => {
            let db_path = match &cfg.db_path {
                Some(path) => path.clone(),
                None => paths::default_db_path()?,
            };
            let store = sqlite::SqliteStore::new(&db_path)?;
            tracing::info!("SQLite record store at {:?}", db_path);
            Ok(Arc::new(store))
        }
        StoreBackend::Remote => {
            let url = cfg
                .remote_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage.remote_url is required for the remote backend"))?;
            let store = remote::RemoteStore::new(url, cfg.request_timeout_secs)?;
            Ok(Arc::new(store))
        }
        StoreBackend::Local => {
            let data_path = match &cfg.data_path {
                Some(path) => path.clone(),
                None => paths::default_local_store_path()?,
            };
            Ok(Arc::new(local::LocalStore::new(data_path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared_types::SpeaksSpanish;

    fn record(id: &str, at: chrono::DateTime<Utc>) -> ApplicantRecord {
        ApplicantRecord {
            id: id.to_string(),
            job_id: "JOB-1".to_string(),
            name: "Jane".to_string(),
            contact_preference: ContactPreference::Email,
            contact_info: "jane@x.com".to_string(),
            experience: String::new(),
            speaks_spanish: SpeaksSpanish::Unspecified,
            applied_at: at,
        }
    }

    #[test]
    fn require_fields_rejects_each_missing_field() {
        let full = CreateApplicantRequest {
            job_id: "JOB-1".to_string(),
            name: "Jane".to_string(),
            contact_preference: Some(ContactPreference::Email),
            contact_info: "jane@x.com".to_string(),
            ..Default::default()
        };
        assert!(require_fields(&full).is_ok());

        for wreck in [
            CreateApplicantRequest { job_id: "  ".to_string(), ..full.clone() },
            CreateApplicantRequest { name: String::new(), ..full.clone() },
            CreateApplicantRequest { contact_preference: None, ..full.clone() },
            CreateApplicantRequest { contact_info: String::new(), ..full.clone() },
        ] {
            assert!(matches!(require_fields(&wreck), Err(StoreError::Validation(_))));
        }
    }

    #[test]
    fn minted_ids_are_distinct() {
        let candidate = CreateApplicantRequest {
            job_id: "JOB-1".to_string(),
            name: "Jane".to_string(),
            contact_preference: Some(ContactPreference::Email),
            contact_info: "jane@x.com".to_string(),
            ..Default::default()
        };
        let a = mint_record(candidate.clone(), ContactPreference::Email);
        let b = mint_record(candidate, ContactPreference::Email);
        assert_ne!(a.id, b.id);
        assert!(!a.id.is_empty());
    }

    #[test]
    fn sort_puts_newest_first() {
        let t0 = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        let mut records = vec![record("old", t0), record("new", t1)];
        sort_newest_first(&mut records);
        assert_eq!(records[0].id, "new");
        assert_eq!(records[1].id, "old");
    }
}
