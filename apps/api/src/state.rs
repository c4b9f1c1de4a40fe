use std::sync::Arc;

use sqlx::PgPool;

use crate::admin::auth::{AdminSessions, CredentialVerifier};
use crate::config::Config;
use crate::intake::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Startup configuration, retained for handlers that need runtime settings.
    #[allow(dead_code)]
    pub config: Config,
    /// Live public form sessions (one draft each).
    pub sessions: SessionStore,
    /// Signed-in admin tokens and their per-session dashboard state.
    pub admin: AdminSessions,
    /// Pluggable credential check. Production: HTTP call to the external
    /// auth service; tests swap in a mock.
    pub verifier: Arc<dyn CredentialVerifier>,
}
