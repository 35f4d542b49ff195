use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use smartpark_core::pagination::Listing;
use smartpark_core::repository::{SensorFilter, SensorRepository};
use smartpark_core::types::Sensor;

use super::{collection_routes, item_routes, list_by, list_matching};
use crate::error::ApiResult;
use crate::extract::PageParams;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    collection_routes::<SensorRepository>()
        .route("/active", get(active))
        .route("/type/{type}", get(by_type))
        .route("/parking-slot/{parking_slot_id}", get(by_parking_slot))
        .merge(item_routes::<SensorRepository>(state))
}

async fn active(
    State(repo): State<Arc<SensorRepository>>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<Sensor>>> {
    list_by(repo.as_ref(), SensorFilter::Active, page).await
}

async fn by_type(
    State(repo): State<Arc<SensorRepository>>,
    Path(sensor_type): Path<String>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<Sensor>>> {
    list_matching(repo.as_ref(), &sensor_type, SensorFilter::Type, page).await
}

async fn by_parking_slot(
    State(repo): State<Arc<SensorRepository>>,
    Path(parking_slot_id): Path<String>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<Sensor>>> {
    list_matching(
        repo.as_ref(),
        &parking_slot_id,
        SensorFilter::ParkingSlot,
        page,
    )
    .await
}
