pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::intake::handlers as intake;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public form surface
        .route("/api/v1/sessions", post(intake::handle_create_session))
        .route("/api/v1/sessions/:id", get(intake::handle_get_session))
        .route(
            "/api/v1/sessions/:id/fields",
            patch(intake::handle_set_field),
        )
        .route(
            "/api/v1/sessions/:id/toggles",
            post(intake::handle_toggle_field),
        )
        .route("/api/v1/sessions/:id/submit", post(intake::handle_submit))
        // Admin review surface
        .route("/api/v1/admin/login", post(admin::handle_login))
        .route("/api/v1/admin/logout", post(admin::handle_logout))
        .route(
            "/api/v1/admin/applications",
            get(admin::handle_list_applications),
        )
        .route(
            "/api/v1/admin/applications/:id/expand",
            post(admin::handle_toggle_expand),
        )
        .with_state(state)
}
