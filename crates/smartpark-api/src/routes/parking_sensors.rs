use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use smartpark_core::pagination::Listing;
use smartpark_core::repository::{ParkingSensorFilter, ParkingSensorRepository};
use smartpark_core::types::ParkingSensor;

use super::{collection_routes, item_routes, list_by, list_matching};
use crate::error::ApiResult;
use crate::extract::PageParams;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    collection_routes::<ParkingSensorRepository>()
        .route("/active", get(active))
        .route("/type/{type}", get(by_type))
        .route("/parking/{parking_id}", get(by_parking))
        .merge(item_routes::<ParkingSensorRepository>(state))
}

async fn active(
    State(repo): State<Arc<ParkingSensorRepository>>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<ParkingSensor>>> {
    list_by(repo.as_ref(), ParkingSensorFilter::Active, page).await
}

async fn by_type(
    State(repo): State<Arc<ParkingSensorRepository>>,
    Path(sensor_type): Path<String>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<ParkingSensor>>> {
    list_matching(repo.as_ref(), &sensor_type, ParkingSensorFilter::Type, page).await
}

async fn by_parking(
    State(repo): State<Arc<ParkingSensorRepository>>,
    Path(parking_id): Path<String>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<ParkingSensor>>> {
    list_matching(repo.as_ref(), &parking_id, ParkingSensorFilter::Parking, page).await
}
