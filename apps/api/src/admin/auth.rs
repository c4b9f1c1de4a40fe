//! Admin sign-in. Credentials are checked by an external service; this
//! module only relays the check and tracks which bearer tokens are live.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;

/// Seam to the opaque credential-check service. Swappable so tests can
/// sign in without a network.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Ok means the subject is valid; `InvalidCredentials` is the inline,
    /// recoverable rejection shown on the login surface.
    async fn verify(&self, email: &str, password: &str) -> Result<(), AppError>;
}

/// Production verifier: POSTs the credentials to `AUTH_VERIFY_URL`.
pub struct HttpCredentialVerifier {
    client: reqwest::Client,
    verify_url: String,
}

impl HttpCredentialVerifier {
    pub fn new(verify_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            verify_url,
        }
    }
}

#[async_trait]
impl CredentialVerifier for HttpCredentialVerifier {
    async fn verify(&self, email: &str, password: &str) -> Result<(), AppError> {
        let resp = self
            .client
            .post(&self.verify_url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| AppError::AuthService(format!("Credential check failed: {e}")))?;

        if resp.status().is_success() {
            Ok(())
        } else if resp.status().is_client_error() {
            Err(AppError::InvalidCredentials)
        } else {
            Err(AppError::AuthService(format!(
                "Credential service returned {}",
                resp.status()
            )))
        }
    }
}

/// A signed-in reviewer. The expand selection lives here so each signed-in
/// session keeps its own dashboard state; sessions never share it.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub email: String,
    /// At most one record is expanded at a time.
    pub expanded: Option<Uuid>,
}

/// Live admin bearer tokens.
#[derive(Clone, Default)]
pub struct AdminSessions {
    sessions: Arc<RwLock<HashMap<Uuid, AdminSession>>>,
}

impl AdminSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a bearer token for a verified subject.
    pub async fn issue(&self, email: &str) -> Uuid {
        let token = Uuid::new_v4();
        self.sessions.write().await.insert(
            token,
            AdminSession {
                email: email.to_string(),
                expanded: None,
            },
        );
        token
    }

    /// Presence check: unknown or absent tokens are unauthorized.
    pub async fn require(&self, token: Uuid) -> Result<AdminSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&token)
            .cloned()
            .ok_or(AppError::Unauthorized)
    }

    /// Applies the single-selection toggle to this session's expand state
    /// and returns the new selection.
    pub async fn toggle_expand(
        &self,
        token: Uuid,
        application_id: Uuid,
    ) -> Result<Option<Uuid>, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&token).ok_or(AppError::Unauthorized)?;
        session.expanded = crate::admin::aggregation::toggle_expand(session.expanded, application_id);
        Ok(session.expanded)
    }

    pub async fn sign_out(&self, token: Uuid) {
        self.sessions.write().await.remove(&token);
    }
}

/// Extracts the bearer token from the Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Result<Uuid, AppError> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(|v| v.parse::<Uuid>().ok())
        .ok_or(AppError::Unauthorized)
}
