use async_trait::async_trait;
use chrono::Utc;
use shared_types::{ApplicantRecord, ContactPreference, CreateApplicantRequest, SpeaksSpanish};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use crate::transport::{ApiTransport, TransportError};

pub fn record(id: &str, name: &str) -> ApplicantRecord {
    ApplicantRecord {
        id: id.to_string(),
        job_id: "JOB-1".to_string(),
        name: name.to_string(),
        contact_preference: ContactPreference::Email,
        contact_info: format!("{}@example.com", name.to_lowercase()),
        experience: String::new(),
        speaks_spanish: SpeaksSpanish::Unspecified,
        applied_at: Utc::now(),
    }
}

pub fn candidate(name: &str) -> CreateApplicantRequest {
    CreateApplicantRequest {
        job_id: "JOB-1".to_string(),
        name: name.to_string(),
        contact_preference: Some(ContactPreference::Email),
        contact_info: format!("{}@example.com", name.to_lowercase()),
        ..Default::default()
    }
}

/// In-memory stand-in for the applicant API with a switchable "server down"
/// mode, mimicking the server-side contract (presence validation, NotFound
/// on unknown deletes).
pub struct StubTransport {
    records: Mutex<Vec<ApplicantRecord>>,
    offline: AtomicBool,
    next_id: AtomicU64,
    pub creates: AtomicU64,
}

impl StubTransport {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
            next_id: AtomicU64::new(1),
            creates: AtomicU64::new(0),
        }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), TransportError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(TransportError::Unreachable(
                "Cannot connect to server. Please make sure the backend server is running."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ApiTransport for StubTransport {
    async fn create(
        &self,
        candidate: &CreateApplicantRequest,
    ) -> Result<ApplicantRecord, TransportError> {
        self.check_online()?;
        self.creates.fetch_add(1, Ordering::SeqCst);

        let preference = match candidate.contact_preference {
            Some(p) if !candidate.job_id.trim().is_empty()
                && !candidate.name.trim().is_empty()
                && !candidate.contact_info.trim().is_empty() =>
            {
                p
            }
            _ => {
                return Err(TransportError::Rejected {
                    status: 400,
                    message: "Missing required fields".to_string(),
                })
            }
        };

        let stored = ApplicantRecord {
            id: format!("stub-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
            job_id: candidate.job_id.clone(),
            name: candidate.name.clone(),
            contact_preference: preference,
            contact_info: candidate.contact_info.clone(),
            experience: candidate.experience.clone(),
            speaks_spanish: candidate.speaks_spanish,
            applied_at: Utc::now(),
        };
        self.records.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<ApplicantRecord>, TransportError> {
        self.check_online()?;
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
        Ok(records)
    }

    async fn delete_one(&self, id: &str) -> Result<(), TransportError> {
        self.check_online()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(TransportError::Rejected {
                status: 404,
                message: "Applicant not found".to_string(),
            });
        }
        Ok(())
    }

    async fn clear_all(&self) -> Result<usize, TransportError> {
        self.check_online()?;
        let mut records = self.records.lock().unwrap();
        let count = records.len();
        records.clear();
        Ok(count)
    }
}
