use async_trait::async_trait;
use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use shared_types::{ApplicantRecord, ContactPreference, CreateApplicantRequest, SpeaksSpanish};
use std::path::Path;
use std::time::Duration;

use super::{mint_record, require_fields, RecordStore, StoreError};

const SELECT_COLUMNS: &str =
    "id, jobId, name, contactPreference, contactInfo, experience, speaksSpanish, appliedAt";

/// Relational backend: one `applicants` table, all text columns, single-statement
/// inserts and deletes. Ordering rides on the lexicographic sort of the stored
/// RFC 3339 timestamps.
pub struct SqliteStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn new(db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });

        let pool = Pool::builder().max_size(8).build(manager)?;

        let conn = pool.get()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS applicants (
                id TEXT PRIMARY KEY,
                jobId TEXT NOT NULL,
                name TEXT NOT NULL,
                contactPreference TEXT NOT NULL,
                contactInfo TEXT NOT NULL,
                experience TEXT,
                speaksSpanish TEXT,
                appliedAt TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.pool.get()?)
    }
}

struct ApplicantRow {
    id: String,
    job_id: String,
    name: String,
    contact_preference: String,
    contact_info: String,
    experience: Option<String>,
    speaks_spanish: Option<String>,
    applied_at: String,
}

impl ApplicantRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            job_id: row.get(1)?,
            name: row.get(2)?,
            contact_preference: row.get(3)?,
            contact_info: row.get(4)?,
            experience: row.get(5)?,
            speaks_spanish: row.get(6)?,
            applied_at: row.get(7)?,
        })
    }

    fn into_record(self) -> Result<ApplicantRecord, StoreError> {
        let contact_preference = ContactPreference::parse(&self.contact_preference)
            .ok_or_else(|| {
                StoreError::Internal(format!(
                    "Unrecognized contactPreference column value: {}",
                    self.contact_preference
                ))
            })?;
        let applied_at = DateTime::parse_from_rfc3339(&self.applied_at)
            .map_err(|e| StoreError::Internal(format!("Bad appliedAt column value: {e}")))?
            .with_timezone(&Utc);

        Ok(ApplicantRecord {
            id: self.id,
            job_id: self.job_id,
            name: self.name,
            contact_preference,
            contact_info: self.contact_info,
            experience: self.experience.unwrap_or_default(),
            speaks_spanish: SpeaksSpanish::parse(self.speaks_spanish.as_deref().unwrap_or("")),
            applied_at,
        })
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn create(
        &self,
        candidate: CreateApplicantRequest,
    ) -> Result<ApplicantRecord, StoreError> {
        let preference = require_fields(&candidate)?;
        let record = mint_record(candidate, preference);

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO applicants (id, jobId, name, contactPreference, contactInfo, experience, speaksSpanish, appliedAt)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.id,
                record.job_id,
                record.name,
                record.contact_preference.as_str(),
                record.contact_info,
                record.experience,
                record.speaks_spanish.as_str(),
                record.applied_at.to_rfc3339(),
            ],
        )?;

        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ApplicantRecord>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM applicants ORDER BY appliedAt DESC"
        ))?;

        let rows: Vec<ApplicantRow> = stmt
            .query_map([], ApplicantRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(ApplicantRow::into_record).collect()
    }

    async fn get(&self, id: &str) -> Result<ApplicantRecord, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM applicants WHERE id = ?1"
        ))?;

        let row = stmt
            .query_row([id], ApplicantRow::from_row)
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => other.into(),
            })?;

        row.into_record()
    }

    async fn delete_one(&self, id: &str) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM applicants WHERE id = ?1", [id])?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn clear_all(&self) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let count = conn.execute("DELETE FROM applicants", [])?;
        Ok(count)
    }
}
