use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use smartpark_core::pagination::Listing;
use smartpark_core::repository::{ParkingFilter, ParkingRepository};
use smartpark_core::types::Parking;

use super::{collection_routes, item_routes, list_by};
use crate::error::ApiResult;
use crate::extract::PageParams;
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    collection_routes::<ParkingRepository>()
        .route("/active", get(active))
        .merge(item_routes::<ParkingRepository>(state))
}

async fn active(
    State(repo): State<Arc<ParkingRepository>>,
    PageParams(page): PageParams,
) -> ApiResult<Json<Listing<Parking>>> {
    list_by(repo.as_ref(), ParkingFilter::Active, page).await
}
