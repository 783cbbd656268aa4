//! Handlers for custom field definition CRUD.
//!
//! Definition-level validation (mandatory name/label, options for choice
//! types) runs synchronously before any database statement, so a bad
//! definition never reaches storage.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use helpdesk_core::error::CoreError;
use helpdesk_core::fields::definition::{normalized_config, validate_definition};
use helpdesk_core::types::DbId;
use helpdesk_db::models::custom_field::{CreateCustomField, CustomField, UpdateCustomField};
use helpdesk_db::repositories::custom_field_repo::CustomFieldFilter;
use helpdesk_db::repositories::CustomFieldRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing definitions.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub department_id: Option<DbId>,
    pub branch_id: Option<DbId>,
    #[serde(default)]
    pub include_inactive: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Verify that a definition exists, returning the full row.
async fn ensure_field_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<CustomField> {
    CustomFieldRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "CustomField",
            id,
        })
    })
}

/// GET /custom-fields
///
/// List definitions matching the admin filters, ordered by display_order
/// then id.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = CustomFieldFilter {
        category: params.category,
        department_id: params.department_id,
        branch_id: params.branch_id,
        include_inactive: params.include_inactive,
        limit: params.limit,
        offset: params.offset,
    };
    let items = CustomFieldRepo::list(&state.pool, &filter).await?;
    tracing::debug!(count = items.len(), "Listed custom fields");
    Ok(Json(DataResponse { data: items }))
}

/// POST /custom-fields
///
/// Create a definition. Validation failures surface before any insert.
pub async fn create(
    State(state): State<AppState>,
    Json(mut input): Json<CreateCustomField>,
) -> AppResult<impl IntoResponse> {
    validate_definition(
        &input.name,
        &input.label,
        input.field_type,
        input.config.as_ref(),
    )?;
    input.config = normalized_config(input.field_type, input.config.take());

    let created = CustomFieldRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, name = %created.name, "Custom field created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /custom-fields/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let field = ensure_field_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: field }))
}

/// PATCH /custom-fields/{id}
///
/// Partial update. `name` and `field_type` are write-once: editing them
/// would orphan stored values, so the update path never touches them.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateCustomField>,
) -> AppResult<impl IntoResponse> {
    let existing = ensure_field_exists(&state.pool, id).await?;
    let field_type = existing.to_definition().field_type;

    if let Some(label) = &input.label {
        if label.trim().is_empty() {
            return Err(CoreError::Validation("Field label is required".into()).into());
        }
    }
    if let Some(config) = input.config.take() {
        validate_definition(&existing.name, &existing.label, field_type, Some(&config))?;
        input.config = normalized_config(field_type, Some(config));
    }

    let updated = CustomFieldRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CustomField",
            id,
        }))?;
    tracing::info!(id, "Custom field updated");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /custom-fields/{id}
///
/// Soft-deactivate: the definition disappears from rendering but keeps
/// its historical values.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deactivated = CustomFieldRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CustomField",
            id,
        }));
    }
    tracing::info!(id, "Custom field deactivated");
    Ok(StatusCode::NO_CONTENT)
}
