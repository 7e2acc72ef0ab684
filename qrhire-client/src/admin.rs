use shared_types::ApplicantRecord;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::client::{ClientError, StorageClient, StoreEvent};

/// Proof that the destructive action was explicitly confirmed. Constructing
/// one is the confirmation step; the view methods will not touch the store
/// without it.
#[derive(Debug)]
pub struct Confirmation(());

impl Confirmation {
    pub fn confirmed() -> Self {
        Confirmation(())
    }
}

/// Why a reload was requested. The three sources are deliberately redundant:
/// the in-process signal is fastest but same-process only, focus catches
/// changes made elsewhere while the window was backgrounded, and the interval
/// tick covers everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    Interval,
    DataChanged,
    Focus,
}

/// Handed to the embedding UI so window-focus (or visibility) events can
/// request a reload.
#[derive(Clone)]
pub struct FocusHandle {
    tx: mpsc::Sender<RefreshReason>,
}

impl FocusHandle {
    pub async fn focused(&self) {
        let _ = self.tx.send(RefreshReason::Focus).await;
    }
}

/// Read-model behind the admin table: holds the last fetched records, filters
/// client-side, and funnels deletes through the confirmation gate.
pub struct AdminView {
    client: Arc<StorageClient>,
    records: Vec<ApplicantRecord>,
}

impl AdminView {
    pub fn new(client: Arc<StorageClient>) -> Self {
        Self {
            client,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[ApplicantRecord] {
        &self.records
    }

    pub async fn refresh(&mut self) {
        self.records = self.client.list().await;
    }

    /// Case-insensitive substring filter over the displayed fields; purely a
    /// view concern, the store is untouched.
    pub fn visible(&self, filter: &str) -> Vec<&ApplicantRecord> {
        filter_records(&self.records, filter)
    }

    pub async fn delete_one(
        &mut self,
        id: &str,
        _confirmed: Confirmation,
    ) -> Result<(), ClientError> {
        self.client.delete_one(id).await?;
        self.refresh().await;
        Ok(())
    }

    pub async fn clear_all(&mut self, _confirmed: Confirmation) -> Result<usize, ClientError> {
        let count = self.client.clear_all().await?;
        self.refresh().await;
        Ok(count)
    }

    /// Spawns the redundant refresh sources and returns the merged trigger
    /// stream plus the focus handle. Receiving a reason means "call
    /// [`refresh`](Self::refresh) now"; the tasks stop when the receiver is
    /// dropped.
    pub fn refresh_triggers(&self, every: Duration) -> (mpsc::Receiver<RefreshReason>, FocusHandle) {
        let (tx, rx) = mpsc::channel(8);

        let interval_tx = tx.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await; // the first tick fires immediately
            loop {
                ticker.tick().await;
                if interval_tx.send(RefreshReason::Interval).await.is_err() {
                    break;
                }
            }
        });

        let mut events = self.client.subscribe();
        let event_tx = tx.clone();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(StoreEvent::Created(_) | StoreEvent::Deleted(_) | StoreEvent::Cleared) => {
                        if event_tx.send(RefreshReason::DataChanged).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        (rx, FocusHandle { tx })
    }
}

pub fn matches_filter(record: &ApplicantRecord, filter: &str) -> bool {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return true;
    }
    [
        record.name.as_str(),
        record.contact_info.as_str(),
        record.job_id.as_str(),
        record.experience.as_str(),
        record.speaks_spanish.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&filter))
}

pub fn filter_records<'a>(
    records: &'a [ApplicantRecord],
    filter: &str,
) -> Vec<&'a ApplicantRecord> {
    records.iter().filter(|r| matches_filter(r, filter)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::Mirror;
    use crate::test_support::{candidate, record, StubTransport};
    use shared_types::SpeaksSpanish;

    fn client(dir: &tempfile::TempDir) -> (Arc<StubTransport>, Arc<StorageClient>) {
        let stub = Arc::new(StubTransport::new());
        let client = Arc::new(StorageClient::new(
            stub.clone(),
            Mirror::new(dir.path().join("mirror.json")),
        ));
        (stub, client)
    }

    #[test]
    fn filter_is_case_insensitive_across_fields() {
        let mut jane = record("a", "Jane Doe");
        jane.experience = "Warehouse shifts".to_string();
        jane.speaks_spanish = SpeaksSpanish::Yes;
        let john = record("b", "John Smith");

        let records = vec![jane, john];
        assert_eq!(filter_records(&records, "JANE").len(), 1);
        assert_eq!(filter_records(&records, "warehouse").len(), 1);
        assert_eq!(filter_records(&records, "JOB-1").len(), 2);
        assert_eq!(filter_records(&records, "yes").len(), 1);
        assert_eq!(filter_records(&records, "").len(), 2);
        assert_eq!(filter_records(&records, "zz").len(), 0);
    }

    #[tokio::test]
    async fn refresh_loads_and_deletes_require_confirmation_token() {
        let dir = tempfile::tempdir().unwrap();
        let (_stub, client) = client(&dir);

        let a = client.create(&candidate("Jane")).await.unwrap();
        client.create(&candidate("John")).await.unwrap();

        let mut view = AdminView::new(client);
        view.refresh().await;
        assert_eq!(view.records().len(), 2);

        view.delete_one(&a.id, Confirmation::confirmed())
            .await
            .unwrap();
        assert_eq!(view.records().len(), 1);

        let count = view.clear_all(Confirmation::confirmed()).await.unwrap();
        assert_eq!(count, 1);
        assert!(view.records().is_empty());
    }

    #[tokio::test]
    async fn triggers_report_focus_and_data_changes() {
        let dir = tempfile::tempdir().unwrap();
        let (_stub, client) = client(&dir);

        let view = AdminView::new(client.clone());
        let (mut triggers, focus) = view.refresh_triggers(Duration::from_secs(3600));

        focus.focused().await;
        assert_eq!(triggers.recv().await, Some(RefreshReason::Focus));

        client.create(&candidate("Jane")).await.unwrap();
        assert_eq!(triggers.recv().await, Some(RefreshReason::DataChanged));
    }

    #[tokio::test]
    async fn interval_trigger_fires() {
        let dir = tempfile::tempdir().unwrap();
        let (_stub, client) = client(&dir);

        let view = AdminView::new(client);
        let (mut triggers, _focus) = view.refresh_triggers(Duration::from_millis(10));

        assert_eq!(triggers.recv().await, Some(RefreshReason::Interval));
    }
}
