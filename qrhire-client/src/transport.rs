use async_trait::async_trait;
use shared_types::{
    AdminSessionRequest, AdminSessionResponse, ApplicantRecord, ClearAllResponse,
    CreateApplicantRequest, ErrorResponse,
};
use std::time::Duration;

pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Network-level failure; the server never saw the request.
    #[error("{0}")]
    Unreachable(String),
    /// The server answered with an error status and (usually) a message.
    #[error("{message}")]
    Rejected { status: u16, message: String },
}

/// Wire seam between the storage client and the applicant API. The real
/// implementation is [`HttpTransport`]; tests substitute an in-memory stub.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn create(
        &self,
        candidate: &CreateApplicantRequest,
    ) -> Result<ApplicantRecord, TransportError>;

    async fn list(&self) -> Result<Vec<ApplicantRecord>, TransportError>;

    async fn delete_one(&self, id: &str) -> Result<(), TransportError>;

    async fn clear_all(&self) -> Result<usize, TransportError>;
}

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    admin_token: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            admin_token: None,
        })
    }

    /// Attaches the admin session token sent on destructive requests.
    pub fn with_admin_token(mut self, token: impl Into<String>) -> Self {
        self.admin_token = Some(token.into());
        self
    }

    /// Exchanges the admin password for a session token via
    /// `POST /api/admin/session`.
    pub async fn admin_login(&self, password: &str) -> Result<String, TransportError> {
        let response = self
            .http
            .post(format!("{}/api/admin/session", self.base_url))
            .json(&AdminSessionRequest {
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        let session: AdminSessionResponse = Self::accept(response).await?;
        Ok(session.token)
    }

    fn unreachable(&self, e: reqwest::Error) -> TransportError {
        tracing::warn!("Request to {} failed: {}", self.base_url, e);
        TransportError::Unreachable(format!(
            "Cannot connect to server. Please make sure the backend server is running at {}.",
            self.base_url
        ))
    }

    fn delete_request(&self, url: String) -> reqwest::RequestBuilder {
        let request = self.http.delete(url);
        match &self.admin_token {
            Some(token) => request.header(ADMIN_TOKEN_HEADER, token),
            None => request,
        }
    }

    /// Turns an HTTP response into a value or a `Rejected` carrying the
    /// server's `{"error": ...}` message.
    async fn accept<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|e| TransportError::Rejected {
                status: status.as_u16(),
                message: format!("Unexpected response body: {e}"),
            });
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => "Server error".to_string(),
        };
        Err(TransportError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn create(
        &self,
        candidate: &CreateApplicantRequest,
    ) -> Result<ApplicantRecord, TransportError> {
        let response = self
            .http
            .post(format!("{}/api/applicants", self.base_url))
            .json(candidate)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        Self::accept(response).await
    }

    async fn list(&self) -> Result<Vec<ApplicantRecord>, TransportError> {
        let response = self
            .http
            .get(format!("{}/api/applicants", self.base_url))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        Self::accept(response).await
    }

    async fn delete_one(&self, id: &str) -> Result<(), TransportError> {
        let response = self
            .delete_request(format!("{}/api/applicants/{id}", self.base_url))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        // Body is a bare confirmation message
        let _: serde_json::Value = Self::accept(response).await?;
        Ok(())
    }

    async fn clear_all(&self) -> Result<usize, TransportError> {
        let response = self
            .delete_request(format!("{}/api/applicants", self.base_url))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        let cleared: ClearAllResponse = Self::accept(response).await?;
        Ok(cleared.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let transport = HttpTransport::new("http://localhost:3001/").unwrap();
        assert_eq!(transport.base_url, "http://localhost:3001");
    }

    #[test]
    fn rejected_error_displays_server_message() {
        let e = TransportError::Rejected {
            status: 400,
            message: "Missing required fields".to_string(),
        };
        assert_eq!(e.to_string(), "Missing required fields");
    }
}
