//! Handlers for per-ticket custom field values.
//!
//! The GET side loads the definitions applicable to the ticket's scope,
//! hydrates them with stored values, and (optionally) renders them for a
//! requested mode. The POST side applies the save batch, preserving the
//! historical contract that cleared fields are omitted rather than nulled.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use helpdesk_core::fields::render::{render, RenderMode, RenderedField};
use helpdesk_core::fields::set::{
    applicable_fields, build_save_batch, hydrate, HydratedField, Scope, StoredValue,
};
use helpdesk_core::types::DbId;
use helpdesk_db::models::custom_field_value::FieldValueBatch;
use helpdesk_db::repositories::{CustomFieldRepo, CustomFieldValueRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for loading a ticket's field set.
///
/// The scope axes come from the ticket's category/department/branch; the
/// optional `mode` asks for a rendered presentation alongside the raw
/// definition+value pairs.
#[derive(Debug, Deserialize)]
pub struct TicketFieldsParams {
    pub category: Option<String>,
    pub department_id: Option<DbId>,
    pub branch_id: Option<DbId>,
    pub mode: Option<FieldsMode>,
}

/// Requested rendering mode.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldsMode {
    Edit,
    ReadOnly,
}

/// A hydrated field, optionally paired with its rendered presentation.
///
/// `rendered` is absent for fields not visible to the user: visibility
/// gates rendering entirely.
#[derive(Debug, Serialize)]
pub struct TicketField {
    #[serde(flatten)]
    pub field: HydratedField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<RenderedField>,
}

/// GET /tickets/{ticket_id}/custom-fields
///
/// Return the active definitions applicable to the ticket's scope,
/// hydrated with the ticket's stored values (falling back to defaults).
pub async fn get_for_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Query(params): Query<TicketFieldsParams>,
) -> AppResult<impl IntoResponse> {
    let scope = Scope {
        category: params.category,
        department_id: params.department_id,
        branch_id: params.branch_id,
    };

    let definitions: Vec<_> = CustomFieldRepo::list_active(&state.pool)
        .await?
        .iter()
        .map(|row| row.to_definition())
        .collect();
    let applicable = applicable_fields(definitions, &scope);

    let stored: HashMap<DbId, StoredValue> = CustomFieldValueRepo::list_for_ticket(&state.pool, ticket_id)
        .await?
        .into_iter()
        .map(|row| {
            (
                row.custom_field_id,
                StoredValue {
                    value_id: row.id,
                    value: row.value,
                },
            )
        })
        .collect();

    let mode = params.mode.map(|m| match m {
        FieldsMode::Edit => RenderMode::Edit,
        FieldsMode::ReadOnly => RenderMode::ReadOnly,
    });

    let fields: Vec<TicketField> = hydrate(applicable, &stored)
        .into_iter()
        .map(|field| {
            let rendered =
                mode.and_then(|m| render(&field.definition, field.value.as_deref(), m));
            TicketField { field, rendered }
        })
        .collect();

    tracing::debug!(ticket_id, count = fields.len(), "Loaded ticket custom fields");
    Ok(Json(DataResponse { data: fields }))
}

/// Result of a batch save.
#[derive(Debug, Serialize)]
pub struct SaveResult {
    pub saved: u64,
}

/// POST /tickets/{ticket_id}/custom-fields
///
/// Apply a batch overwrite for the submitted values. Entries whose value
/// is null or empty are dropped from the batch, so a field cleared in the
/// form keeps its previous stored value.
pub async fn save_for_ticket(
    State(state): State<AppState>,
    Path(ticket_id): Path<DbId>,
    Json(body): Json<FieldValueBatch>,
) -> AppResult<impl IntoResponse> {
    let entries: Vec<(DbId, Option<String>)> = body
        .values
        .into_iter()
        .map(|entry| (entry.custom_field_id, entry.value))
        .collect();
    let batch = build_save_batch(&entries);

    let saved = CustomFieldValueRepo::upsert_batch(&state.pool, ticket_id, &batch).await?;
    tracing::info!(ticket_id, saved, "Saved ticket custom field values");
    Ok(Json(DataResponse {
        data: SaveResult { saved },
    }))
}
