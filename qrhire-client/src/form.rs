use shared_types::{
    validate_submission, ApplicantRecord, ContactPreference, CreateApplicantRequest,
    SpeaksSpanish,
};

use crate::client::{ClientError, StorageClient};

/// The application form flow: edit, validate, submit once.
///
/// Validation failure sets a single user-visible error string and leaves the
/// entered values untouched. A successful submit is terminal; the form cannot
/// be reused for a second submission.
pub struct ApplicationForm {
    job_id: String,
    pub name: String,
    pub contact_preference: ContactPreference,
    pub contact_info: String,
    pub experience: String,
    pub speaks_spanish: SpeaksSpanish,
    error: Option<String>,
    state: FormState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Editing,
    Submitted(ApplicantRecord),
}

impl ApplicationForm {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            name: String::new(),
            contact_preference: ContactPreference::Email,
            contact_info: String::new(),
            experience: String::new(),
            speaks_spanish: SpeaksSpanish::Unspecified,
            error: None,
            state: FormState::Editing,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.state, FormState::Submitted(_))
    }

    /// Validates and, if clean, creates the applicant record. Returns the
    /// stored record on success. Validation problems land in [`error`] and
    /// never reach the server; transport problems land in [`error`] too and
    /// are also returned so embedders can react.
    ///
    /// [`error`]: Self::error
    pub async fn submit(
        &mut self,
        client: &StorageClient,
    ) -> Result<Option<ApplicantRecord>, ClientError> {
        if self.is_submitted() {
            return Ok(None);
        }
        self.error = None;

        if let Err(e) = validate_submission(&self.name, self.contact_preference, &self.contact_info)
        {
            self.error = Some(e.to_string());
            return Ok(None);
        }

        let candidate = CreateApplicantRequest {
            job_id: self.job_id.clone(),
            name: self.name.trim().to_string(),
            contact_preference: Some(self.contact_preference),
            contact_info: self.contact_info.trim().to_string(),
            experience: self.experience.trim().to_string(),
            speaks_spanish: self.speaks_spanish,
        };

        match client.create(&candidate).await {
            Ok(record) => {
                self.state = FormState::Submitted(record.clone());
                Ok(Some(record))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::Mirror;
    use crate::test_support::StubTransport;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn client(dir: &tempfile::TempDir) -> (Arc<StubTransport>, StorageClient) {
        let stub = Arc::new(StubTransport::new());
        let client = StorageClient::new(stub.clone(), Mirror::new(dir.path().join("mirror.json")));
        (stub, client)
    }

    #[tokio::test]
    async fn invalid_submission_sets_error_and_skips_create() {
        let dir = tempfile::tempdir().unwrap();
        let (stub, client) = client(&dir);

        let mut form = ApplicationForm::new("JOB-1");
        form.name = "Jane Doe".to_string();
        form.contact_info = "a@b".to_string();

        let result = form.submit(&client).await.unwrap();
        assert!(result.is_none());
        assert_eq!(form.error(), Some("Please enter a valid email address"));
        assert!(!form.is_submitted());
        assert_eq!(stub.creates.load(Ordering::SeqCst), 0);
        // Entered values survive the failed attempt
        assert_eq!(form.contact_info, "a@b");
    }

    #[tokio::test]
    async fn valid_submission_creates_once_and_is_terminal() {
        let dir = tempfile::tempdir().unwrap();
        let (stub, client) = client(&dir);

        let mut form = ApplicationForm::new("JOB-1");
        form.name = " Jane Doe ".to_string();
        form.contact_info = "jane@x.com".to_string();

        let record = form.submit(&client).await.unwrap().unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.job_id, "JOB-1");
        assert!(form.is_submitted());

        // A second submit is a no-op, not a second application
        let again = form.submit(&client).await.unwrap();
        assert!(again.is_none());
        assert_eq!(stub.creates.load(Ordering::SeqCst), 1);

        // The admin read path sees the submission
        let listed = client.list().await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, record.id);
    }

    #[tokio::test]
    async fn phone_preference_validates_phone_format() {
        let dir = tempfile::tempdir().unwrap();
        let (_stub, client) = client(&dir);

        let mut form = ApplicationForm::new("JOB-1");
        form.name = "Jane".to_string();
        form.contact_preference = ContactPreference::Phone;
        form.contact_info = "12345".to_string();

        form.submit(&client).await.unwrap();
        assert_eq!(form.error(), Some("Please enter a valid phone number"));

        form.contact_info = "+1 (555) 123-4567".to_string();
        let record = form.submit(&client).await.unwrap().unwrap();
        assert_eq!(record.contact_info, "+1 (555) 123-4567");
    }

    #[tokio::test]
    async fn unreachable_server_reports_error_and_allows_retry() {
        let dir = tempfile::tempdir().unwrap();
        let (stub, client) = client(&dir);
        stub.set_offline(true);

        let mut form = ApplicationForm::new("JOB-1");
        form.name = "Jane".to_string();
        form.contact_info = "jane@x.com".to_string();

        assert!(form.submit(&client).await.is_err());
        assert!(form.error().unwrap().contains("Cannot connect to server"));
        assert!(!form.is_submitted());

        stub.set_offline(false);
        assert!(form.submit(&client).await.unwrap().is_some());
    }
}
