pub mod admin;
pub mod applicants;

use actix_web::{web, HttpResponse};

use crate::store::StoreError;

/// Route table for the applicant API; shared between the server binary and
/// the handler tests. Malformed or undeserializable JSON bodies get the same
/// `{"error": ...}` shape as every other failure.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(format!("Invalid request body: {err}")).into()
    }))
    .route("/api/applicants", web::get().to(applicants::list_applicants))
        .route("/api/applicants", web::post().to(applicants::create_applicant))
        .route("/api/applicants", web::delete().to(applicants::clear_applicants))
        .route("/api/applicants/{id}", web::get().to(applicants::get_applicant))
        .route(
            "/api/applicants/{id}",
            web::delete().to(applicants::delete_applicant),
        )
        .route("/api/admin/session", web::post().to(admin::create_session));
}

/// HTTP-facing error taxonomy. Every branch answers with a single JSON
/// `{"error": ...}` body; stack traces and store internals never reach the
/// client.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound,
    Unauthorized,
    Unavailable(String),
    Internal(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::NotFound => write!(f, "Applicant not found"),
            ApiError::Unauthorized => write!(f, "Admin session required"),
            ApiError::Unavailable(msg) => write!(f, "{}", msg),
            ApiError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl actix_web::error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Validation(msg) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "error": msg }))
            }
            ApiError::NotFound => HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "Applicant not found" })),
            ApiError::Unauthorized => HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Admin session required" })),
            ApiError::Unavailable(msg) => {
                HttpResponse::ServiceUnavailable().json(serde_json::json!({ "error": msg }))
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Internal server error" }))
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(msg) => ApiError::Validation(msg),
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Unavailable(msg) => ApiError::Unavailable(msg),
            StoreError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}
