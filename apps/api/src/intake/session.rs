//! In-memory form sessions. Each public visitor gets one session owning one
//! mutable draft and a reference-data snapshot captured at creation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::draft::ApplicationDraft;
use crate::reference::ReferenceData;

/// A form session. Once `submitted` flips, the draft is frozen: every further
/// mutation or submit attempt is rejected.
#[derive(Debug, Clone)]
pub struct DraftSession {
    pub draft: ApplicationDraft,
    pub reference: ReferenceData,
    pub submitted: bool,
    pub created_at: DateTime<Utc>,
}

/// Shared map of live form sessions, keyed by session id.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, DraftSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty draft session around a reference snapshot and
    /// returns its id.
    pub async fn create(&self, reference: ReferenceData) -> Uuid {
        let id = Uuid::new_v4();
        let session = DraftSession {
            draft: ApplicationDraft::default(),
            reference,
            submitted: false,
            created_at: Utc::now(),
        };
        self.sessions.write().await.insert(id, session);
        id
    }

    pub async fn get(&self, id: Uuid) -> Result<DraftSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Applies a mutation to a live (unsubmitted) session's draft.
    pub async fn update<F, T>(&self, id: Uuid, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut ApplicationDraft) -> Result<T, AppError>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        if session.submitted {
            return Err(AppError::Conflict(
                "This application has already been submitted".to_string(),
            ));
        }
        f(&mut session.draft)
    }

    /// Transitions a session to its terminal submitted state. Fails if the
    /// session is unknown or already submitted, leaving it unchanged.
    pub async fn mark_submitted(&self, id: Uuid) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        if session.submitted {
            return Err(AppError::Conflict(
                "This application has already been submitted".to_string(),
            ));
        }
        session.submitted = true;
        Ok(())
    }
}
