use axum::Router;
use smartpark_core::repository::ContactMessageRepository;

use super::{collection_routes, item_routes};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    collection_routes::<ContactMessageRepository>()
        .merge(item_routes::<ContactMessageRepository>(state))
}
