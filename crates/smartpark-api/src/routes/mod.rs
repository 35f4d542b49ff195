//! Route tables for the seven resources.
//!
//! Every resource shares the same CRUD handlers, instantiated per repository.
//! Id-scoped routes sit behind [`require_existing`], so the handlers only run
//! once the row is known to exist.

pub mod contact_messages;
pub mod health;
pub mod parking_sensor_data;
pub mod parking_sensors;
pub mod parking_slots;
pub mod parkings;
pub mod sensor_data;
pub mod sensors;

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use smartpark_core::error::CoreError;
use smartpark_core::pagination::{Listing, PageRequest};
use smartpark_core::repository::Repository;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::extract::{JsonBody, PageParams};
use crate::guard::require_existing;
use crate::state::AppState;

/// `POST /` and `GET /`.
pub(crate) fn collection_routes<R>() -> Router<AppState>
where
    R: Repository,
    Arc<R>: FromRef<AppState>,
{
    Router::new().route("/", post(create::<R>).get(list::<R>))
}

/// `GET`, `PUT` and `DELETE` on `/{id}`, guarded by an existence check.
pub(crate) fn item_routes<R>(state: &AppState) -> Router<AppState>
where
    R: Repository,
    Arc<R>: FromRef<AppState>,
{
    Router::new()
        .route(
            "/{id}",
            get(get_by_id::<R>).put(update::<R>).delete(delete::<R>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_existing::<R>,
        ))
}

fn failure<R: Repository>(action: &str, err: CoreError) -> ApiError {
    ApiError::from_core(R::ENTITY, R::NOT_FOUND, action, err)
}

pub(crate) async fn create<R: Repository>(
    State(repo): State<Arc<R>>,
    JsonBody(payload): JsonBody<R::Create>,
) -> ApiResult<(StatusCode, Json<R::Record>)> {
    let record = repo
        .create(payload)
        .await
        .map_err(|err| failure::<R>("create", err))?;
    info!(entity = R::ENTITY, "created");
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn list<R: Repository>(
    State(repo): State<Arc<R>>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<R::Record>>> {
    list_by(repo.as_ref(), R::Filter::default(), page).await
}

pub(crate) async fn get_by_id<R: Repository>(
    State(repo): State<Arc<R>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<R::Record>> {
    repo.get_by_id(id)
        .await
        .map_err(|err| failure::<R>("fetch", err))?
        .map(Json)
        .ok_or(ApiError::NotFound(R::NOT_FOUND))
}

pub(crate) async fn update<R: Repository>(
    State(repo): State<Arc<R>>,
    Path(id): Path<Uuid>,
    JsonBody(changes): JsonBody<R::Update>,
) -> ApiResult<Json<R::Record>> {
    let record = repo
        .update(id, changes)
        .await
        .map_err(|err| failure::<R>("update", err))?;
    Ok(Json(record))
}

pub(crate) async fn delete<R: Repository>(
    State(repo): State<Arc<R>>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    repo.delete(id)
        .await
        .map_err(|err| failure::<R>("delete", err))?;
    info!(entity = R::ENTITY, %id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn list_by<R: Repository>(
    repo: &R,
    filter: R::Filter,
    page: PageRequest,
) -> ApiResult<Json<Listing<R::Record>>> {
    let listing = repo
        .list_filtered(filter, page)
        .await
        .map_err(|err| failure::<R>("list", err))?;
    Ok(Json(listing))
}

/// Lists the rows matching a key taken from the path, such as a parent id or
/// a sensor type. A key that does not parse cannot match any row.
pub(crate) async fn list_matching<R, K>(
    repo: &R,
    raw: &str,
    to_filter: fn(K) -> R::Filter,
    page: PageRequest,
) -> ApiResult<Json<Listing<R::Record>>>
where
    R: Repository,
    K: FromStr,
{
    let Ok(key) = raw.parse::<K>() else {
        return Ok(Json(Listing::empty(page)));
    };
    list_by(repo, to_filter(key), page).await
}
