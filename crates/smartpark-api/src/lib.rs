//! HTTP surface of the smart-parking backend.

pub mod error;
pub mod extract;
pub mod guard;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Builds the full application router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .nest("/parkings", routes::parkings::routes(&state))
        .nest("/parking-slots", routes::parking_slots::routes(&state))
        .nest("/sensors", routes::sensors::routes(&state))
        .nest("/sensors-data", routes::sensor_data::routes(&state))
        .nest("/parking-sensors", routes::parking_sensors::routes(&state))
        .nest(
            "/parking-sensor-data",
            routes::parking_sensor_data::routes(&state),
        )
        .nest("/contact-messages", routes::contact_messages::routes(&state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
