use std::sync::Arc;

use axum::extract::FromRef;
use smartpark_core::db::DbPool;
use smartpark_core::repository::{
    ContactMessageRepository, ParkingRepository, ParkingSensorDataRepository,
    ParkingSensorRepository, ParkingSlotRepository, Repositories, SensorDataRepository,
    SensorRepository,
};

/// Shared handler state. Handlers pull the one repository they need through
/// `State<Arc<...>>`.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: DbPool,
    pub parkings: Arc<ParkingRepository>,
    pub parking_slots: Arc<ParkingSlotRepository>,
    pub sensors: Arc<SensorRepository>,
    pub sensor_data: Arc<SensorDataRepository>,
    pub parking_sensors: Arc<ParkingSensorRepository>,
    pub parking_sensor_data: Arc<ParkingSensorDataRepository>,
    pub contact_messages: Arc<ContactMessageRepository>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        let repos = Repositories::new(pool.clone());
        Self {
            pool,
            parkings: Arc::new(repos.parkings),
            parking_slots: Arc::new(repos.parking_slots),
            sensors: Arc::new(repos.sensors),
            sensor_data: Arc::new(repos.sensor_data),
            parking_sensors: Arc::new(repos.parking_sensors),
            parking_sensor_data: Arc::new(repos.parking_sensor_data),
            contact_messages: Arc::new(repos.contact_messages),
        }
    }
}
