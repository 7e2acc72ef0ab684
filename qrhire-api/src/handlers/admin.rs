use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use shared_types::{AdminSessionRequest, AdminSessionResponse};
use std::sync::Arc;

use super::ApiError;
use crate::helpers::session::{SessionError, SessionManager};

pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// Exchanges the configured admin password for a short-lived bearer token.
/// The password never leaves the server configuration; the old scheme of
/// comparing a hard-coded string in the browser is intentionally gone.
pub async fn create_session(
    sessions: web::Data<Arc<SessionManager>>,
    request: web::Json<AdminSessionRequest>,
) -> ActixResult<HttpResponse> {
    let session = sessions
        .login(&request.password)
        .await
        .map_err(|e| match e {
            SessionError::Disabled => ApiError::Unavailable(e.to_string()),
            SessionError::BadPassword => ApiError::Unauthorized,
        })?;

    tracing::info!("Admin session issued");
    Ok(HttpResponse::Ok().json(AdminSessionResponse {
        token: session.token,
        expires_in_secs: session.expires_in_secs,
    }))
}

/// Gate for the destructive endpoints. A no-op when no admin password is
/// configured, which keeps the open surface of deployments that never opted
/// into sessions.
pub async fn require_admin(
    req: &HttpRequest,
    sessions: &SessionManager,
) -> Result<(), ApiError> {
    if !sessions.enabled() {
        return Ok(());
    }

    let token = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    if !sessions.validate(token).await {
        return Err(ApiError::Unauthorized);
    }
    Ok(())
}
