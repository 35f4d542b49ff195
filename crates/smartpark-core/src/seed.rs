use anyhow::Result;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::db::DbPool;
use crate::repository::{Repositories, Repository};
use crate::types::{
    NewContactMessage, NewParking, NewParkingSensor, NewParkingSensorData, NewParkingSlot,
    NewSensor, NewSensorData, ParkingSensorType, SensorType,
};

/// Every table, children before parents, so rows can be deleted in order
/// without tripping a foreign key.
pub const TABLES_CHILD_FIRST: [&str; 7] = [
    "parking_sensor_data",
    "sensors_data",
    "parking_sensors",
    "sensors",
    "parking_slots",
    "parkings",
    "contact_messages",
];

#[derive(Debug)]
struct ParkingSeed {
    name: &'static str,
    address: &'static str,
    city: &'static str,
    number: &'static str,
    phone: &'static str,
    description: &'static str,
    slots: i32,
    /// Probability that a seeded slot starts out available.
    availability: f64,
    slot_sensors: usize,
    environment_sensors: usize,
    sensor_label: &'static str,
}

static PARKING_SEEDS: &[ParkingSeed] = &[
    ParkingSeed {
        name: "Shopping Center Parking",
        address: "Rua das Flores, 123",
        city: "São Paulo",
        number: "123",
        phone: "(11) 99999-9999",
        description: "Shopping center parking with 200 spaces",
        slots: 50,
        availability: 0.7,
        slot_sensors: 20,
        environment_sensors: 5,
        sensor_label: "Mall",
    },
    ParkingSeed {
        name: "Downtown Parking",
        address: "Av. Paulista, 1000",
        city: "São Paulo",
        number: "1000",
        phone: "(11) 88888-8888",
        description: "Parking in the city centre",
        slots: 30,
        availability: 0.6,
        slot_sensors: 15,
        environment_sensors: 3,
        sensor_label: "Downtown",
    },
    ParkingSeed {
        name: "Airport Parking",
        address: "Rodovia dos Bandeirantes, 500",
        city: "Guarulhos",
        number: "500",
        phone: "(11) 77777-7777",
        description: "International airport parking",
        slots: 100,
        availability: 0.8,
        slot_sensors: 40,
        environment_sensors: 8,
        sensor_label: "Airport",
    },
];

static CONTACT_MESSAGES: &[(&str, &str, &str)] = &[
    (
        "João Silva",
        "joao.silva@email.com",
        "I would like to know the parking opening hours.",
    ),
    (
        "Maria Santos",
        "maria.santos@email.com",
        "I need information about prices and payment methods.",
    ),
    (
        "Pedro Costa",
        "pedro.costa@email.com",
        "Are there spaces available for motorcycles?",
    ),
    (
        "Ana Oliveira",
        "ana.oliveira@email.com",
        "I would like to book a space for next weekend.",
    ),
    (
        "Carlos Ferreira",
        "carlos.ferreira@email.com",
        "Does the parking have 24h security?",
    ),
];

/// Row counts produced by one [`run`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub parkings: usize,
    pub parking_slots: usize,
    pub sensors: usize,
    pub parking_sensors: usize,
    pub sensor_data: usize,
    pub parking_sensor_data: usize,
    pub contact_messages: usize,
}

/// Replaces the contents of every table with a demonstration data set.
pub async fn run(pool: &DbPool) -> Result<SeedSummary> {
    reset(pool).await?;

    let repos = Repositories::new(pool.clone());
    let mut rng = StdRng::from_entropy();
    let mut summary = SeedSummary::default();
    let mut slot_sensors: Vec<Uuid> = Vec::new();
    let mut environment_sensors: Vec<(Uuid, ParkingSensorType)> = Vec::new();

    for seed in PARKING_SEEDS {
        let parking = repos
            .parkings
            .create(NewParking {
                name: seed.name.to_string(),
                address: seed.address.to_string(),
                country: "Brasil".to_string(),
                state: "SP".to_string(),
                city: seed.city.to_string(),
                number: seed.number.to_string(),
                phone: seed.phone.to_string(),
                description: Some(seed.description.to_string()),
                is_active: Some(true),
            })
            .await?;
        info!(name = seed.name, id = %parking.id, "Seeded parking");
        summary.parkings += 1;

        let mut slots = Vec::with_capacity(seed.slots as usize);
        for number in 1..=seed.slots {
            let slot = repos
                .parking_slots
                .create(NewParkingSlot {
                    parking_id: parking.id.to_string(),
                    number,
                    is_available: Some(rng.gen_bool(seed.availability)),
                    is_active: Some(true),
                })
                .await?;
            slots.push(slot);
        }
        info!(parking = seed.name, count = slots.len(), "Seeded parking slots");
        summary.parking_slots += slots.len();

        for slot in slots.iter().take(seed.slot_sensors) {
            let sensor_type = SensorType::ALL[rng.gen_range(0..SensorType::ALL.len())];
            let sensor = repos
                .sensors
                .create(NewSensor {
                    parking_slot_id: slot.id.to_string(),
                    is_active: Some(true),
                    name: format!("{} Slot Sensor {}", seed.sensor_label, slot.number),
                    description: Some(format!("Occupancy sensor for slot {}", slot.number)),
                    sensor_type,
                })
                .await?;
            slot_sensors.push(sensor.id);
        }

        for (index, sensor_type) in ParkingSensorType::ALL
            .into_iter()
            .take(seed.environment_sensors)
            .enumerate()
        {
            let sensor = repos
                .parking_sensors
                .create(NewParkingSensor {
                    parking_id: parking.id.to_string(),
                    is_active: Some(true),
                    name: format!("{} Environment Sensor {}", seed.sensor_label, index + 1),
                    description: Some(format!("{sensor_type} sensor for {}", seed.name)),
                    sensor_type,
                })
                .await?;
            environment_sensors.push((sensor.id, sensor_type));
        }
    }
    summary.sensors = slot_sensors.len();
    summary.parking_sensors = environment_sensors.len();

    for sensor_id in &slot_sensors {
        for _ in 0..rng.gen_range(5..=10) {
            repos
                .sensor_data
                .create(NewSensorData {
                    sensor_id: sensor_id.to_string(),
                    is_active: Some(true),
                    data: slot_reading(&mut rng),
                })
                .await?;
            summary.sensor_data += 1;
        }
    }
    info!(count = summary.sensor_data, "Seeded slot sensor readings");

    for (sensor_id, sensor_type) in &environment_sensors {
        for _ in 0..rng.gen_range(10..=20) {
            repos
                .parking_sensor_data
                .create(NewParkingSensorData {
                    parking_sensor_id: sensor_id.to_string(),
                    data: environment_reading(&mut rng, *sensor_type),
                })
                .await?;
            summary.parking_sensor_data += 1;
        }
    }
    info!(
        count = summary.parking_sensor_data,
        "Seeded environment sensor readings"
    );

    for (name, email, message) in CONTACT_MESSAGES {
        repos
            .contact_messages
            .create(NewContactMessage {
                name: name.to_string(),
                email: email.to_string(),
                message: message.to_string(),
            })
            .await?;
        summary.contact_messages += 1;
    }

    info!(?summary, "Seed complete");
    Ok(summary)
}

/// Deletes every row, children first.
pub async fn reset(pool: &DbPool) -> Result<()> {
    for table in TABLES_CHILD_FIRST {
        let statement = format!("DELETE FROM {table}");
        let result = sqlx::query(&statement).execute(pool).await?;
        info!(table, rows = result.rows_affected(), "Cleared table");
    }
    Ok(())
}

// Readings land somewhere in the last 24 hours.
fn recent_timestamp(rng: &mut StdRng) -> String {
    let age = Duration::milliseconds(rng.gen_range(0..86_400_000));
    (Utc::now() - age).to_rfc3339()
}

fn slot_reading(rng: &mut StdRng) -> String {
    json!({
        "timestamp": recent_timestamp(rng),
        "value": rng.gen_range(0.0..100.0),
        "status": if rng.gen_bool(0.9) { "active" } else { "error" },
        "battery": rng.gen_range(0.0..100.0),
    })
    .to_string()
}

fn environment_reading(rng: &mut StdRng, sensor_type: ParkingSensorType) -> String {
    json!({
        "timestamp": recent_timestamp(rng),
        "value": rng.gen_range(0.0..100.0),
        "unit": sensor_type.unit(),
        "status": if rng.gen_bool(0.95) { "normal" } else { "warning" },
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn seed_plan_covers_every_parking() {
        let slots: i32 = PARKING_SEEDS.iter().map(|seed| seed.slots).sum();
        let sensors: usize = PARKING_SEEDS.iter().map(|seed| seed.slot_sensors).sum();
        let environment: usize = PARKING_SEEDS
            .iter()
            .map(|seed| seed.environment_sensors)
            .sum();
        assert_eq!(slots, 180);
        assert_eq!(sensors, 75);
        assert_eq!(environment, 16);
        for seed in PARKING_SEEDS {
            assert!(seed.slot_sensors <= seed.slots as usize);
            assert!(seed.environment_sensors <= ParkingSensorType::ALL.len());
        }
    }

    #[test]
    fn environment_readings_carry_the_unit_of_their_sensor() {
        let mut rng = StdRng::seed_from_u64(7);
        let reading: Value =
            serde_json::from_str(&environment_reading(&mut rng, ParkingSensorType::Humidity))
                .unwrap();
        assert_eq!(reading["unit"], "%");
        assert!(reading["value"].as_f64().unwrap() < 100.0);
        assert!(matches!(reading["status"].as_str(), Some("normal" | "warning")));
    }

    #[test]
    fn slot_readings_are_json_objects() {
        let mut rng = StdRng::seed_from_u64(11);
        let reading: Value = serde_json::from_str(&slot_reading(&mut rng)).unwrap();
        assert!(reading["timestamp"].is_string());
        assert!(reading["battery"].is_number());
    }

    #[test]
    fn tables_are_cleared_children_first() {
        let position = |table: &str| {
            TABLES_CHILD_FIRST
                .iter()
                .position(|candidate| *candidate == table)
                .unwrap()
        };
        assert!(position("sensors_data") < position("sensors"));
        assert!(position("sensors") < position("parking_slots"));
        assert!(position("parking_sensor_data") < position("parking_sensors"));
        assert!(position("parking_slots") < position("parkings"));
    }
}
