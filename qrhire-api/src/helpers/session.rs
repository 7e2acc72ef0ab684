use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Server-side admin credential check. The configured password is compared
/// here, never shipped to a browser; a successful login hands out a random
/// bearer token that expires after the configured TTL. Tokens live only in
/// process memory, so a restart logs every admin out.
pub struct SessionManager {
    password: Option<String>,
    ttl: Duration,
    tokens: Mutex<HashMap<String, DateTime<Utc>>>,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Admin sessions are not configured on this server")]
    Disabled,
    #[error("Invalid password")]
    BadPassword,
}

#[derive(Debug)]
pub struct AdminSession {
    pub token: String,
    pub expires_in_secs: u64,
}

impl SessionManager {
    pub fn new(password: Option<String>, ttl_secs: u64) -> Self {
        Self {
            password,
            ttl: Duration::seconds(ttl_secs as i64),
            tokens: Mutex::new(HashMap::new()),
        }
    }

    /// Whether the delete endpoints are gated at all.
    pub fn enabled(&self) -> bool {
        self.password.is_some()
    }

    pub async fn login(&self, password: &str) -> Result<AdminSession, SessionError> {
        let expected = self.password.as_deref().ok_or(SessionError::Disabled)?;
        if password != expected {
            return Err(SessionError::BadPassword);
        }

        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + self.ttl;

        let mut tokens = self.tokens.lock().await;
        tokens.retain(|_, expiry| *expiry > Utc::now());
        tokens.insert(token.clone(), expires_at);

        Ok(AdminSession {
            token,
            expires_in_secs: self.ttl.num_seconds().max(0) as u64,
        })
    }

    pub async fn validate(&self, token: &str) -> bool {
        let mut tokens = self.tokens.lock().await;
        match tokens.get(token) {
            Some(expiry) if *expiry > Utc::now() => true,
            Some(_) => {
                tokens.remove(token);
                false
            }
            None => false,
        }
    }
}
