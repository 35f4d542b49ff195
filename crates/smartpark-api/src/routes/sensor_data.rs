use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use smartpark_core::pagination::Listing;
use smartpark_core::repository::{SensorDataFilter, SensorDataRepository};
use smartpark_core::types::SensorData;

use super::{collection_routes, item_routes, list_by, list_matching};
use crate::error::ApiResult;
use crate::extract::PageParams;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    collection_routes::<SensorDataRepository>()
        .route("/active", get(active))
        .route("/sensor/{sensor_id}", get(by_sensor))
        .route("/parking-slot/{parking_slot_id}", get(by_parking_slot))
        .merge(item_routes::<SensorDataRepository>(state))
}

async fn active(
    State(repo): State<Arc<SensorDataRepository>>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<SensorData>>> {
    list_by(repo.as_ref(), SensorDataFilter::Active, page).await
}

async fn by_sensor(
    State(repo): State<Arc<SensorDataRepository>>,
    Path(sensor_id): Path<String>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<SensorData>>> {
    list_matching(repo.as_ref(), &sensor_id, SensorDataFilter::Sensor, page).await
}

async fn by_parking_slot(
    State(repo): State<Arc<SensorDataRepository>>,
    Path(parking_slot_id): Path<String>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<SensorData>>> {
    list_matching(
        repo.as_ref(),
        &parking_slot_id,
        SensorDataFilter::ParkingSlot,
        page,
    )
    .await
}
