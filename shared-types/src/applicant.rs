use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One job-application submission, as stored and as sent over the wire.
///
/// `id` and `applied_at` are assigned by the record store at creation and are
/// never accepted from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ApplicantRecord {
    pub id: String,
    pub job_id: String,
    pub name: String,
    pub contact_preference: ContactPreference,
    pub contact_info: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub speaks_spanish: SpeaksSpanish,
    #[ts(type = "string")]
    pub applied_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ContactPreference {
    Email,
    Phone,
}

impl ContactPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactPreference::Email => "email",
            ContactPreference::Phone => "phone",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "email" => Some(ContactPreference::Email),
            "phone" => Some(ContactPreference::Phone),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContactPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional yes/no answer; the unspecified case travels as an empty string,
/// matching the historical wire and column format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SpeaksSpanish {
    #[serde(rename = "yes")]
    Yes,
    #[serde(rename = "no")]
    No,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl SpeaksSpanish {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeaksSpanish::Yes => "yes",
            SpeaksSpanish::No => "no",
            SpeaksSpanish::Unspecified => "",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "yes" => SpeaksSpanish::Yes,
            "no" => SpeaksSpanish::No,
            _ => SpeaksSpanish::Unspecified,
        }
    }
}

/// Body of `POST /api/applicants`.
///
/// Required fields are plain strings defaulting to empty so that an absent
/// field and an empty field produce the same validation error instead of a
/// deserializer rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CreateApplicantRequest {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact_preference: Option<ContactPreference>,
    #[serde(default)]
    pub contact_info: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub speaks_spanish: SpeaksSpanish,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClearAllResponse {
    pub message: String,
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdminSessionRequest {
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdminSessionResponse {
    pub token: String,
    pub expires_in_secs: u64,
}
