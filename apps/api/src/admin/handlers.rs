//! HTTP handlers for the authenticated review surface.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::admin::aggregation::{ApplicationDetail, ApplicationSummary, Dashboard};
use crate::admin::auth::bearer_token;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: Uuid,
    pub email: String,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub total: usize,
    pub applications: Vec<ApplicationSummary>,
    pub expanded: Option<Uuid>,
}

#[derive(Serialize)]
pub struct ExpandResponse {
    pub expanded: Option<Uuid>,
    /// Present only when the toggle left a record expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ApplicationDetail>,
}

/// POST /api/v1/admin/login
///
/// Relays the credentials to the external verifier and issues a bearer
/// token. A rejection is reported inline and grants no access.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    state.verifier.verify(&req.email, &req.password).await?;
    let token = state.admin.issue(&req.email).await;
    info!("Admin signed in: {}", req.email);
    Ok(Json(LoginResponse {
        token,
        email: req.email,
    }))
}

/// POST /api/v1/admin/logout
pub async fn handle_logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = bearer_token(&headers)?;
    state.admin.sign_out(token).await;
    Ok(Json(serde_json::json!({ "signed_out": true })))
}

/// GET /api/v1/admin/applications
///
/// Loads the dashboard: all applications newest-first, joined against the
/// full reference sets, projected to summary cards with status badges.
pub async fn handle_list_applications(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<DashboardResponse>, AppError> {
    let token = bearer_token(&headers)?;
    let session = state.admin.require(token).await?;

    let dashboard = Dashboard::load(&state.db).await;
    let applications = dashboard.summaries();
    Ok(Json(DashboardResponse {
        total: applications.len(),
        applications,
        expanded: session.expanded,
    }))
}

/// POST /api/v1/admin/applications/:id/expand
///
/// Single-selection expand toggle: expanding a record collapses any other;
/// expanding the already-expanded record collapses it. Returns the detail
/// view when a record ends up expanded.
pub async fn handle_toggle_expand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ExpandResponse>, AppError> {
    let token = bearer_token(&headers)?;
    state.admin.require(token).await?;

    let expanded = state.admin.toggle_expand(token, id).await?;
    let detail = match expanded {
        Some(app_id) => {
            let dashboard = Dashboard::load(&state.db).await;
            let detail = dashboard
                .detail(app_id)
                .ok_or_else(|| AppError::NotFound(format!("Application {app_id} not found")))?;
            Some(detail)
        }
        None => None,
    };

    Ok(Json(ExpandResponse { expanded, detail }))
}
