use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};
use shared_types::{ClearAllResponse, CreateApplicantRequest, DeleteResponse};
use std::sync::Arc;

use super::admin::require_admin;
use super::ApiError;
use crate::helpers::session::SessionManager;
use crate::store::RecordStore;

pub async fn list_applicants(
    store: web::Data<Arc<dyn RecordStore>>,
) -> ActixResult<HttpResponse> {
    let records = store.list().await.map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(records))
}

pub async fn get_applicant(
    store: web::Data<Arc<dyn RecordStore>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let record = store.get(&id).await.map_err(ApiError::from)?;
    Ok(HttpResponse::Ok().json(record))
}

pub async fn create_applicant(
    store: web::Data<Arc<dyn RecordStore>>,
    request: web::Json<CreateApplicantRequest>,
) -> ActixResult<HttpResponse> {
    let record = store
        .create(request.into_inner())
        .await
        .map_err(ApiError::from)?;

    tracing::info!(id = %record.id, job_id = %record.job_id, "Applicant recorded");
    Ok(HttpResponse::Created().json(record))
}

pub async fn delete_applicant(
    req: HttpRequest,
    store: web::Data<Arc<dyn RecordStore>>,
    sessions: web::Data<Arc<SessionManager>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    require_admin(&req, &sessions).await?;

    let id = path.into_inner();
    store.delete_one(&id).await.map_err(ApiError::from)?;

    tracing::info!(%id, "Applicant deleted");
    Ok(HttpResponse::Ok().json(DeleteResponse {
        message: "Applicant deleted successfully".to_string(),
    }))
}

pub async fn clear_applicants(
    req: HttpRequest,
    store: web::Data<Arc<dyn RecordStore>>,
    sessions: web::Data<Arc<SessionManager>>,
) -> ActixResult<HttpResponse> {
    require_admin(&req, &sessions).await?;

    let count = store.clear_all().await.map_err(ApiError::from)?;

    tracing::info!(count, "All applicants deleted");
    Ok(HttpResponse::Ok().json(ClearAllResponse {
        message: "All applicants deleted successfully".to_string(),
        count,
    }))
}
