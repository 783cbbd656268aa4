//! Route definitions for automation rules.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::automation_rules;
use crate::state::AppState;

/// Routes mounted at `/automation-rules`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// PATCH  /{id}/active     -> set_active (pause/resume without the full body)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(automation_rules::list).post(automation_rules::create),
        )
        .route(
            "/{id}",
            get(automation_rules::get_by_id)
                .put(automation_rules::update)
                .delete(automation_rules::delete),
        )
        .route("/{id}/active", patch(automation_rules::set_active))
}
