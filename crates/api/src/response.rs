//! Shared response envelope types for API handlers.
//!
//! Every API payload goes out wrapped as `{ "data": ... }`. Using
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! keeps the envelope type-checked and serialized consistently.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
