//! Route definitions for custom field definitions and per-ticket values.

use axum::routing::get;
use axum::Router;

use crate::handlers::{custom_fields, field_values};
use crate::state::AppState;

/// Routes mounted at `/custom-fields`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> deactivate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(custom_fields::list).post(custom_fields::create))
        .route(
            "/{id}",
            get(custom_fields::get_by_id)
                .patch(custom_fields::update)
                .delete(custom_fields::deactivate),
        )
}

/// Routes mounted at `/tickets` for per-ticket field values.
///
/// ```text
/// GET    /{ticket_id}/custom-fields    -> get_for_ticket
/// POST   /{ticket_id}/custom-fields    -> save_for_ticket
/// ```
pub fn ticket_values_router() -> Router<AppState> {
    Router::new().route(
        "/{ticket_id}/custom-fields",
        get(field_values::get_for_ticket).post(field_values::save_for_ticket),
    )
}
