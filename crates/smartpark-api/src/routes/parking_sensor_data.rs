use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use smartpark_core::pagination::Listing;
use smartpark_core::repository::{ParkingSensorDataFilter, ParkingSensorDataRepository};
use smartpark_core::types::ParkingSensorData;

use super::{collection_routes, item_routes, list_matching};
use crate::error::ApiResult;
use crate::extract::PageParams;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    collection_routes::<ParkingSensorDataRepository>()
        .route("/parking-sensor/{parking_sensor_id}", get(by_parking_sensor))
        .route("/parking/{parking_id}", get(by_parking))
        .merge(item_routes::<ParkingSensorDataRepository>(state))
}

async fn by_parking_sensor(
    State(repo): State<Arc<ParkingSensorDataRepository>>,
    Path(parking_sensor_id): Path<String>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<ParkingSensorData>>> {
    list_matching(
        repo.as_ref(),
        &parking_sensor_id,
        ParkingSensorDataFilter::ParkingSensor,
        page,
    )
    .await
}

async fn by_parking(
    State(repo): State<Arc<ParkingSensorDataRepository>>,
    Path(parking_id): Path<String>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<ParkingSensorData>>> {
    list_matching(
        repo.as_ref(),
        &parking_id,
        ParkingSensorDataFilter::Parking,
        page,
    )
    .await
}
