use shared_types::{ApplicantRecord, CreateApplicantRequest};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::mirror::Mirror;
use crate::transport::{ApiTransport, TransportError};

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// In-process data-change signal. Same-process listeners (the admin view)
/// refresh on these instead of waiting for their poll tick; there is no
/// cross-process delivery, which is why polling stays on as a fallback.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    Created(ApplicantRecord),
    Deleted(String),
    Cleared,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Unreachable(String),
    #[error("{0}")]
    Rejected(String),
}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Unreachable(msg) => ClientError::Unreachable(msg),
            TransportError::Rejected { message, .. } => ClientError::Rejected(message),
        }
    }
}

/// Uniform async Create/List/Delete/ClearAll adapter over the applicant API.
///
/// Failure policy, applied consistently: reads fall back to the on-device
/// mirror (stale beats broken), mutations surface a descriptive error so a
/// submission is never acknowledged without the server having stored it.
pub struct StorageClient {
    transport: Arc<dyn ApiTransport>,
    mirror: Mirror,
    events: broadcast::Sender<StoreEvent>,
}

impl StorageClient {
    pub fn new(transport: Arc<dyn ApiTransport>, mirror: Mirror) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            transport,
            mirror,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub async fn create(
        &self,
        candidate: &CreateApplicantRequest,
    ) -> Result<ApplicantRecord, ClientError> {
        let record = self.transport.create(candidate).await?;
        self.mirror.append(&record);
        self.notify(StoreEvent::Created(record.clone()));
        Ok(record)
    }

    /// Never fails: a transport error is logged and answered from the mirror.
    pub async fn list(&self) -> Vec<ApplicantRecord> {
        match self.transport.list().await {
            Ok(records) => {
                self.mirror.replace(&records);
                records
            }
            Err(e) => {
                tracing::warn!("List failed, serving mirror: {}", e);
                let mut records = self.mirror.load();
                records.sort_by(|a, b| b.applied_at.cmp(&a.applied_at));
                records
            }
        }
    }

    pub async fn delete_one(&self, id: &str) -> Result<(), ClientError> {
        self.transport.delete_one(id).await?;
        self.mirror.remove(id);
        self.notify(StoreEvent::Deleted(id.to_string()));
        Ok(())
    }

    pub async fn clear_all(&self) -> Result<usize, ClientError> {
        let count = self.transport.clear_all().await?;
        self.mirror.clear();
        self.notify(StoreEvent::Cleared);
        Ok(count)
    }

    fn notify(&self, event: StoreEvent) {
        // Err only means nobody is subscribed right now
        let _ = self.events.send(event);
    }
}
