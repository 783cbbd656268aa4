//! Handlers for automation rule CRUD and the pause/resume toggle.
//!
//! Full bodies (POST/PUT) are validated through the core rule contract
//! before any write: legal action keys for the rule type, mutual
//! exclusion, and the per-type submission requirements.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use helpdesk_core::error::CoreError;
use helpdesk_core::rules::{normalize_list_actions, validate_rule, AutomationRule as RuleDraft};
use helpdesk_core::types::DbId;
use helpdesk_db::models::automation_rule::{
    CreateAutomationRule, SetRuleActive, UpdateAutomationRule,
};
use helpdesk_db::repositories::AutomationRuleRepo;

use crate::error::{AppError, AppResult};
use crate::query::{IncludeInactiveParams, PaginationParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /automation-rules
///
/// List rules in evaluation order (priority ascending, then id).
pub async fn list(
    State(state): State<AppState>,
    Query(flags): Query<IncludeInactiveParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let items = AutomationRuleRepo::list(
        &state.pool,
        flags.include_inactive,
        page.limit,
        page.offset,
    )
    .await?;
    tracing::debug!(count = items.len(), "Listed automation rules");
    Ok(Json(DataResponse { data: items }))
}

/// POST /automation-rules
pub async fn create(
    State(state): State<AppState>,
    Json(mut input): Json<CreateAutomationRule>,
) -> AppResult<impl IntoResponse> {
    normalize_list_actions(input.rule_type, &mut input.actions);
    let draft = RuleDraft {
        id: 0,
        name: input.name.clone(),
        description: input.description.clone(),
        priority: input.priority,
        is_active: input.is_active,
        rule_type: input.rule_type,
        conditions: input.conditions.clone(),
        actions: input.actions.clone(),
    };
    validate_rule(&draft)?;

    let created = AutomationRuleRepo::create(&state.pool, &input).await?;
    tracing::info!(id = created.id, name = %created.name, rule_type = %created.rule_type, "Automation rule created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /automation-rules/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rule = AutomationRuleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AutomationRule",
            id,
        }))?;
    Ok(Json(DataResponse { data: rule }))
}

/// PUT /automation-rules/{id}
///
/// Full-body replace. Validation runs before the row is touched.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateAutomationRule>,
) -> AppResult<impl IntoResponse> {
    normalize_list_actions(input.rule_type, &mut input.actions);
    let draft = RuleDraft {
        id,
        name: input.name.clone(),
        description: input.description.clone(),
        priority: input.priority,
        is_active: input.is_active,
        rule_type: input.rule_type,
        conditions: input.conditions.clone(),
        actions: input.actions.clone(),
    };
    validate_rule(&draft)?;

    let updated = AutomationRuleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AutomationRule",
            id,
        }))?;
    tracing::info!(id, "Automation rule updated");
    Ok(Json(DataResponse { data: updated }))
}

/// PATCH /automation-rules/{id}/active
///
/// Pause/resume without re-submitting the rule body.
pub async fn set_active(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<SetRuleActive>,
) -> AppResult<impl IntoResponse> {
    let updated = AutomationRuleRepo::set_active(&state.pool, id, body.is_active)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "AutomationRule",
            id,
        }))?;
    tracing::info!(id, is_active = body.is_active, "Automation rule toggled");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /automation-rules/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = AutomationRuleRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "AutomationRule",
            id,
        }));
    }
    tracing::info!(id, "Automation rule deleted");
    Ok(StatusCode::NO_CONTENT)
}
