use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use smartpark_core::repository::Repository;
use tracing::debug;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Rejects id-scoped requests whose row does not exist before the handler
/// runs. An id that is not a UUID cannot name a row and is treated the same.
pub async fn require_existing<R: Repository>(
    State(repo): State<Arc<R>>,
    Path(raw_id): Path<String>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let Ok(id) = Uuid::parse_str(&raw_id) else {
        debug!(entity = R::ENTITY, id = %raw_id, "rejecting malformed id");
        return Err(ApiError::NotFound(R::NOT_FOUND));
    };

    match repo.get_by_id(id).await {
        Ok(Some(_)) => Ok(next.run(request).await),
        Ok(None) => Err(ApiError::NotFound(R::NOT_FOUND)),
        Err(err) => Err(ApiError::from_core(R::ENTITY, R::NOT_FOUND, "fetch", err)),
    }
}
