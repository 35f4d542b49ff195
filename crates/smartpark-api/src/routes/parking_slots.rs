use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use smartpark_core::pagination::Listing;
use smartpark_core::repository::{ParkingSlotFilter, ParkingSlotRepository};
use smartpark_core::types::ParkingSlot;
use uuid::Uuid;

use super::{collection_routes, item_routes, list_by, list_matching};
use crate::error::ApiResult;
use crate::extract::PageParams;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    collection_routes::<ParkingSlotRepository>()
        .route("/available", get(available))
        .route("/parking/{parking_id}", get(by_parking))
        .merge(item_routes::<ParkingSlotRepository>(state))
}

#[derive(Debug, Default, Deserialize)]
struct AvailableQuery {
    #[serde(rename = "parkingId")]
    parking_id: Option<String>,
}

async fn available(
    State(repo): State<Arc<ParkingSlotRepository>>,
    Query(query): Query<AvailableQuery>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<ParkingSlot>>> {
    // An empty `parkingId` means no scoping; one that is not a UUID matches nothing.
    let parking_id = match query.parking_id.as_deref() {
        None | Some("") => None,
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => return Ok(Json(Listing::empty(page))),
        },
    };
    list_by(
        repo.as_ref(),
        ParkingSlotFilter::Available { parking_id },
        page,
    )
    .await
}

async fn by_parking(
    State(repo): State<Arc<ParkingSlotRepository>>,
    Path(parking_id): Path<String>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<ParkingSlot>>> {
    list_matching(repo.as_ref(), &parking_id, ParkingSlotFilter::Parking, page).await
}
