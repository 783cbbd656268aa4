pub mod automation_rules;
pub mod custom_fields;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /custom-fields                          list, create
/// /custom-fields/{id}                     get, update (PATCH), deactivate (DELETE)
///
/// /tickets/{ticket_id}/custom-fields      hydrated definitions (GET), batch save (POST)
///
/// /automation-rules                       list, create
/// /automation-rules/{id}                  get, replace (PUT), delete
/// /automation-rules/{id}/active           pause/resume toggle (PATCH)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/custom-fields", custom_fields::router())
        .nest("/tickets", custom_fields::ticket_values_router())
        .nest("/automation-rules", automation_rules::router())
}
