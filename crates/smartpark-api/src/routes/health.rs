use axum::{extract::State, Json};
use serde_json::{json, Value};
use smartpark_core::db::{self, DbPool};

use crate::error::{ApiError, ApiResult};

pub async fn health(State(pool): State<DbPool>) -> ApiResult<Json<Value>> {
    db::ping(&pool)
        .await
        .map_err(|err| ApiError::internal("Database unavailable.", err))?;
    Ok(Json(json!({ "status": "ok" })))
}
