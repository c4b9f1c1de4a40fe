//! HTTP handlers for the public form surface.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::draft::{ApplicationDraft, ScalarField, SetField};
use crate::intake::submit::{build_record, insert_application};
use crate::reference::{load_form_reference, ReferenceData};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
    /// Option lists for the form: stores, positions, store hours.
    pub reference: ReferenceData,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub draft: ApplicationDraft,
    pub submitted: bool,
}

#[derive(Deserialize)]
pub struct SetFieldRequest {
    pub field: ScalarField,
    pub value: Value,
}

#[derive(Deserialize)]
pub struct ToggleRequest {
    pub field: SetField,
    pub token: String,
}

#[derive(Serialize)]
pub struct ToggleResponse {
    pub field: SetField,
    pub tokens: Vec<String>,
}

#[derive(Serialize)]
pub struct SubmitResponse {
    pub application_id: Uuid,
    pub submitted: bool,
}

/// POST /api/v1/sessions
///
/// Opens a form session: captures the reference snapshot (loaded once for
/// the whole session) and an empty draft.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<SessionCreatedResponse>, AppError> {
    let reference = load_form_reference(&state.db).await;
    let session_id = state.sessions.create(reference.clone()).await;
    info!("Opened form session {session_id}");
    Ok(Json(SessionCreatedResponse {
        session_id,
        reference,
    }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    Ok(Json(SessionResponse {
        draft: session.draft,
        submitted: session.submitted,
    }))
}

/// PATCH /api/v1/sessions/:id/fields
pub async fn handle_set_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetFieldRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let draft = state
        .sessions
        .update(id, |draft| {
            draft.set_scalar(req.field, &req.value)?;
            Ok(draft.clone())
        })
        .await?;
    Ok(Json(SessionResponse {
        draft,
        submitted: false,
    }))
}

/// POST /api/v1/sessions/:id/toggles
///
/// Generic multi-select toggle shared by all seven set-valued fields.
pub async fn handle_toggle_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let tokens = state
        .sessions
        .update(id, |draft| {
            draft.toggle(req.field, &req.token);
            Ok(draft.set_tokens(req.field).to_vec())
        })
        .await?;
    Ok(Json(ToggleResponse {
        field: req.field,
        tokens,
    }))
}

/// POST /api/v1/sessions/:id/submit
///
/// Gates on the required fields, builds the write record (sentinel store
/// choice mapped to an absent reference), and issues the single insert. On a
/// database failure the session and draft survive unchanged so the visitor
/// can retry; on success the session is frozen in its terminal state.
pub async fn handle_submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let session = state.sessions.get(id).await?;
    if session.submitted {
        return Err(AppError::Conflict(
            "This application has already been submitted".to_string(),
        ));
    }

    let missing = session.draft.missing_required();
    if !missing.is_empty() {
        return Err(AppError::MissingRequired(missing.join(", ")));
    }

    let record = build_record(&session.draft)?;
    let application_id = insert_application(&state.db, &record).await?;
    state.sessions.mark_submitted(id).await?;

    info!("Session {id} submitted as application {application_id}");
    Ok(Json(SubmitResponse {
        application_id,
        submitted: true,
    }))
}
