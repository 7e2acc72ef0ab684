use serde::{Deserialize, Serialize};

pub mod applicant;
pub mod validate;

pub use applicant::{
    AdminSessionRequest, AdminSessionResponse, ApplicantRecord, ClearAllResponse,
    ContactPreference, CreateApplicantRequest, DeleteResponse, HealthResponse, SpeaksSpanish,
};
pub use validate::{is_valid_email, is_valid_phone, validate_submission, SubmissionError};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
