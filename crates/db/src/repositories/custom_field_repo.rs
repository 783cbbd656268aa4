//! Repository for the `custom_fields` table.

use helpdesk_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use helpdesk_core::types::DbId;
use sqlx::PgPool;

use crate::models::custom_field::{CreateCustomField, CustomField, UpdateCustomField};

const COLUMNS: &str = "id, name, label, label_en, field_type, config, \
     is_required, is_visible_to_user, is_editable_by_user, default_value, \
     display_order, category, department_id, branch_id, is_active, \
     created_at, updated_at";

/// Filters for listing field definitions.
#[derive(Debug, Clone, Default)]
pub struct CustomFieldFilter {
    pub category: Option<String>,
    pub department_id: Option<DbId>,
    pub branch_id: Option<DbId>,
    pub include_inactive: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Provides CRUD operations for custom field definitions.
pub struct CustomFieldRepo;

impl CustomFieldRepo {
    /// Insert a new definition, returning the created row.
    ///
    /// The caller is expected to have validated and normalized the config
    /// (`helpdesk_core::fields::definition`) beforehand.
    pub async fn create(pool: &PgPool, input: &CreateCustomField) -> Result<CustomField, sqlx::Error> {
        let query = format!(
            "INSERT INTO custom_fields \
                (name, label, label_en, field_type, config, is_required, \
                 is_visible_to_user, is_editable_by_user, default_value, \
                 display_order, category, department_id, branch_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomField>(&query)
            .bind(&input.name)
            .bind(&input.label)
            .bind(&input.label_en)
            .bind(input.field_type.as_str())
            .bind(input.config.as_ref().and_then(|c| serde_json::to_value(c).ok()))
            .bind(input.is_required)
            .bind(input.is_visible_to_user)
            .bind(input.is_editable_by_user)
            .bind(&input.default_value)
            .bind(input.display_order)
            .bind(&input.category)
            .bind(input.department_id)
            .bind(input.branch_id)
            .fetch_one(pool)
            .await
    }

    /// Find a definition by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CustomField>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM custom_fields WHERE id = $1");
        sqlx::query_as::<_, CustomField>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List definitions matching the admin-side filters, ordered by
    /// `display_order` then id.
    pub async fn list(
        pool: &PgPool,
        filter: &CustomFieldFilter,
    ) -> Result<Vec<CustomField>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
        let offset = clamp_offset(filter.offset);

        let query = format!(
            "SELECT {COLUMNS} FROM custom_fields \
             WHERE ($1::text IS NULL OR category = $1) \
               AND ($2::bigint IS NULL OR department_id = $2) \
               AND ($3::bigint IS NULL OR branch_id = $3) \
               AND (is_active OR $4) \
             ORDER BY display_order ASC, id ASC \
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, CustomField>(&query)
            .bind(&filter.category)
            .bind(filter.department_id)
            .bind(filter.branch_id)
            .bind(filter.include_inactive)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List every active definition, ordered by `display_order` then id.
    ///
    /// Scope filtering for a concrete ticket happens in memory via
    /// `helpdesk_core::fields::set::applicable_fields`.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<CustomField>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM custom_fields \
             WHERE is_active = true \
             ORDER BY display_order ASC, id ASC"
        );
        sqlx::query_as::<_, CustomField>(&query).fetch_all(pool).await
    }

    /// Update a definition. Only non-`None` fields are applied; `name` and
    /// `field_type` are write-once and never part of the statement.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCustomField,
    ) -> Result<Option<CustomField>, sqlx::Error> {
        let query = format!(
            "UPDATE custom_fields SET \
                label = COALESCE($2, label), \
                label_en = COALESCE($3, label_en), \
                config = COALESCE($4, config), \
                is_required = COALESCE($5, is_required), \
                is_visible_to_user = COALESCE($6, is_visible_to_user), \
                is_editable_by_user = COALESCE($7, is_editable_by_user), \
                default_value = COALESCE($8, default_value), \
                display_order = COALESCE($9, display_order), \
                category = COALESCE($10, category), \
                department_id = COALESCE($11, department_id), \
                branch_id = COALESCE($12, branch_id), \
                is_active = COALESCE($13, is_active), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CustomField>(&query)
            .bind(id)
            .bind(&input.label)
            .bind(&input.label_en)
            .bind(input.config.as_ref().and_then(|c| serde_json::to_value(c).ok()))
            .bind(input.is_required)
            .bind(input.is_visible_to_user)
            .bind(input.is_editable_by_user)
            .bind(&input.default_value)
            .bind(input.display_order)
            .bind(&input.category)
            .bind(input.department_id)
            .bind(input.branch_id)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft-deactivate a definition (set is_active = false). Historical
    /// values stay in place.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE custom_fields SET is_active = false, updated_at = now() \
             WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
