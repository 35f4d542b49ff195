// crates/smartpark-core/src/types.rs

use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{
    decode::Decode,
    encode::{Encode, IsNull},
    postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef},
    types::Type,
    FromRow, Postgres,
};
use uuid::Uuid;

use crate::validation::{FieldKind, FieldRule, Payload, Schema};

/// Stores a string enumeration in a plain `TEXT` column.
macro_rules! text_column {
    ($ty:ty) => {
        impl Type<Postgres> for $ty {
            fn type_info() -> PgTypeInfo {
                PgTypeInfo::with_name("TEXT")
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<Postgres>>::compatible(ty)
            }
        }

        impl Encode<'_, Postgres> for $ty {
            fn encode_by_ref(
                &self,
                buf: &mut PgArgumentBuffer,
            ) -> Result<IsNull, Box<dyn StdError + Send + Sync + 'static>> {
                <&str as Encode<Postgres>>::encode(self.as_str(), buf)
            }
        }

        impl Decode<'_, Postgres> for $ty {
            fn decode(
                value: PgValueRef<'_>,
            ) -> Result<Self, Box<dyn StdError + Send + Sync + 'static>> {
                let s = <&str as Decode<Postgres>>::decode(value)?;
                Ok(s.parse::<$ty>()?)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} '{}'", self.kind, self.value)
    }
}

impl StdError for UnknownVariant {}

/// Occupancy detection technology of a slot sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorType {
    Ir,
    Ultrasonic,
    Rfid,
    Camera,
}

impl SensorType {
    pub const ALL: [SensorType; 4] = [
        SensorType::Ir,
        SensorType::Ultrasonic,
        SensorType::Rfid,
        SensorType::Camera,
    ];

    pub const NAMES: &'static [&'static str] = &["IR", "ULTRASONIC", "RFID", "CAMERA"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorType::Ir => "IR",
            SensorType::Ultrasonic => "ULTRASONIC",
            SensorType::Rfid => "RFID",
            SensorType::Camera => "CAMERA",
        }
    }
}

impl FromStr for SensorType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorType::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "sensor type",
                value: s.to_string(),
            })
    }
}

text_column!(SensorType);

/// Quantity measured by an environmental sensor installed in a parking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParkingSensorType {
    Temperature,
    Humidity,
    Light,
    Pressure,
    Sound,
    Vibration,
    Motion,
    Gas,
}

impl ParkingSensorType {
    pub const ALL: [ParkingSensorType; 8] = [
        ParkingSensorType::Temperature,
        ParkingSensorType::Humidity,
        ParkingSensorType::Light,
        ParkingSensorType::Pressure,
        ParkingSensorType::Sound,
        ParkingSensorType::Vibration,
        ParkingSensorType::Motion,
        ParkingSensorType::Gas,
    ];

    pub const NAMES: &'static [&'static str] = &[
        "TEMPERATURE",
        "HUMIDITY",
        "LIGHT",
        "PRESSURE",
        "SOUND",
        "VIBRATION",
        "MOTION",
        "GAS",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParkingSensorType::Temperature => "TEMPERATURE",
            ParkingSensorType::Humidity => "HUMIDITY",
            ParkingSensorType::Light => "LIGHT",
            ParkingSensorType::Pressure => "PRESSURE",
            ParkingSensorType::Sound => "SOUND",
            ParkingSensorType::Vibration => "VIBRATION",
            ParkingSensorType::Motion => "MOTION",
            ParkingSensorType::Gas => "GAS",
        }
    }

    /// Unit reported in readings of this sensor type.
    pub fn unit(&self) -> &'static str {
        match self {
            ParkingSensorType::Temperature => "°C",
            ParkingSensorType::Humidity => "%",
            ParkingSensorType::Light => "lux",
            ParkingSensorType::Pressure => "hPa",
            ParkingSensorType::Sound => "dB",
            ParkingSensorType::Vibration => "m/s²",
            ParkingSensorType::Motion => "detected",
            ParkingSensorType::Gas => "ppm",
        }
    }
}

impl FromStr for ParkingSensorType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParkingSensorType::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "parking sensor type",
                value: s.to_string(),
            })
    }
}

text_column!(ParkingSensorType);

// --- Parent projections -----------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSummary {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSlotSummary {
    pub id: Uuid,
    pub number: i32,
    pub parking: ParkingSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    pub parking_slot: ParkingSlotSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSensorSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub sensor_type: ParkingSensorType,
    pub parking: ParkingSummary,
}

// --- Records ----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parking {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub number: String,
    pub phone: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSlot {
    pub id: Uuid,
    pub parking_id: Uuid,
    pub number: i32,
    pub is_available: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(json)]
    pub parking: ParkingSummary,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub id: Uuid,
    pub parking_slot_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(json)]
    pub parking_slot: ParkingSlotSummary,
}

/// One reading reported by a slot sensor.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorData {
    pub id: Uuid,
    pub sensor_id: Uuid,
    pub data: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[sqlx(json)]
    pub sensor: SensorSummary,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSensor {
    pub id: Uuid,
    pub parking_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub sensor_type: ParkingSensorType,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(json)]
    pub parking: ParkingSummary,
}

/// One reading reported by an environmental parking sensor.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkingSensorData {
    pub id: Uuid,
    pub parking_sensor_id: Uuid,
    pub data: String,
    pub created_at: DateTime<Utc>,
    #[sqlx(json)]
    pub parking_sensor: ParkingSensorSummary,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

// --- Payloads ---------------------------------------------------------------
//
// Parent references stay strings on the wire. The repositories resolve them,
// and a reference that cannot name an existing row fails as a foreign-key
// violation.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParking {
    pub name: String,
    pub address: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub number: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Payload for NewParking {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::required("name", FieldKind::String),
        FieldRule::required("address", FieldKind::String),
        FieldRule::required("country", FieldKind::String),
        FieldRule::required("state", FieldKind::String),
        FieldRule::required("city", FieldKind::String),
        FieldRule::required("number", FieldKind::String),
        FieldRule::required("phone", FieldKind::String),
        FieldRule::optional("description", FieldKind::String),
        FieldRule::optional("isActive", FieldKind::Boolean),
    ]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkingChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Payload for ParkingChanges {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::optional("name", FieldKind::String),
        FieldRule::optional("address", FieldKind::String),
        FieldRule::optional("country", FieldKind::String),
        FieldRule::optional("state", FieldKind::String),
        FieldRule::optional("city", FieldKind::String),
        FieldRule::optional("number", FieldKind::String),
        FieldRule::optional("phone", FieldKind::String),
        FieldRule::optional("description", FieldKind::String),
        FieldRule::optional("isActive", FieldKind::Boolean),
    ]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParkingSlot {
    pub parking_id: String,
    pub number: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Payload for NewParkingSlot {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::required("parkingId", FieldKind::String),
        FieldRule::optional("isAvailable", FieldKind::Boolean),
        FieldRule::optional("isActive", FieldKind::Boolean),
        FieldRule::required("number", FieldKind::PositiveInteger),
    ]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkingSlotChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
}

impl Payload for ParkingSlotChanges {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::optional("parkingId", FieldKind::String),
        FieldRule::optional("isAvailable", FieldKind::Boolean),
        FieldRule::optional("isActive", FieldKind::Boolean),
        FieldRule::optional("number", FieldKind::PositiveInteger),
    ]);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSensor {
    pub parking_slot_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
}

impl Payload for NewSensor {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::required("parkingSlotId", FieldKind::String),
        FieldRule::optional("isActive", FieldKind::Boolean),
        FieldRule::required("name", FieldKind::String),
        FieldRule::optional("description", FieldKind::String),
        FieldRule::required("type", FieldKind::OneOf(SensorType::NAMES)),
    ]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SensorChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_slot_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sensor_type: Option<SensorType>,
}

impl Payload for SensorChanges {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::optional("parkingSlotId", FieldKind::String),
        FieldRule::optional("isActive", FieldKind::Boolean),
        FieldRule::optional("name", FieldKind::String),
        FieldRule::optional("description", FieldKind::String),
        FieldRule::optional("type", FieldKind::OneOf(SensorType::NAMES)),
    ]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSensorData {
    pub sensor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub data: String,
}

impl Payload for NewSensorData {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::required("sensorId", FieldKind::String),
        FieldRule::optional("isActive", FieldKind::Boolean),
        FieldRule::required("data", FieldKind::String),
    ]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SensorDataChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Payload for SensorDataChanges {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::optional("sensorId", FieldKind::String),
        FieldRule::optional("isActive", FieldKind::Boolean),
        FieldRule::optional("data", FieldKind::String),
    ]);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParkingSensor {
    pub parking_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub sensor_type: ParkingSensorType,
}

impl Payload for NewParkingSensor {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::required("parkingId", FieldKind::String),
        FieldRule::optional("isActive", FieldKind::Boolean),
        FieldRule::required("name", FieldKind::String),
        FieldRule::optional("description", FieldKind::String),
        FieldRule::required("type", FieldKind::OneOf(ParkingSensorType::NAMES)),
    ]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkingSensorChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub sensor_type: Option<ParkingSensorType>,
}

impl Payload for ParkingSensorChanges {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::optional("parkingId", FieldKind::String),
        FieldRule::optional("isActive", FieldKind::Boolean),
        FieldRule::optional("name", FieldKind::String),
        FieldRule::optional("description", FieldKind::String),
        FieldRule::optional("type", FieldKind::OneOf(ParkingSensorType::NAMES)),
    ]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParkingSensorData {
    pub parking_sensor_id: String,
    pub data: String,
}

impl Payload for NewParkingSensorData {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::required("parkingSensorId", FieldKind::String),
        FieldRule::required("data", FieldKind::String),
    ]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParkingSensorDataChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parking_sensor_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Payload for ParkingSensorDataChanges {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::optional("parkingSensorId", FieldKind::String),
        FieldRule::optional("data", FieldKind::String),
    ]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Payload for NewContactMessage {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::required("name", FieldKind::String),
        FieldRule::required("email", FieldKind::Email),
        FieldRule::required("message", FieldKind::String),
    ]);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactMessageChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Payload for ContactMessageChanges {
    const SCHEMA: Schema = Schema::new(&[
        FieldRule::optional("name", FieldKind::String),
        FieldRule::optional("email", FieldKind::Email),
        FieldRule::optional("message", FieldKind::String),
    ]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sensor_types_round_trip_through_their_names() {
        for (variant, name) in SensorType::ALL.iter().zip(SensorType::NAMES) {
            assert_eq!(variant.as_str(), *name);
            assert_eq!(name.parse::<SensorType>().unwrap(), *variant);
            assert_eq!(serde_json::to_value(variant).unwrap(), json!(name));
        }
        assert!("LASER".parse::<SensorType>().is_err());
        assert!("ir".parse::<SensorType>().is_err());
    }

    #[test]
    fn parking_sensor_types_round_trip_through_their_names() {
        for (variant, name) in ParkingSensorType::ALL.iter().zip(ParkingSensorType::NAMES) {
            assert_eq!(name.parse::<ParkingSensorType>().unwrap(), *variant);
            assert_eq!(serde_json::to_value(variant).unwrap(), json!(name));
        }
        let err = "WIND".parse::<ParkingSensorType>().unwrap_err();
        assert_eq!(err.to_string(), "invalid parking sensor type 'WIND'");
    }

    #[test]
    fn new_sensor_payload_reads_camel_case() {
        let payload = NewSensor::from_json(json!({
            "parkingSlotId": "6f1c1c5e-4f7e-4b7a-9a53-0b7ad0f8a001",
            "name": "Sensor IR 001",
            "type": "IR"
        }))
        .unwrap();
        assert_eq!(payload.sensor_type, SensorType::Ir);
        assert_eq!(payload.is_active, None);
        assert_eq!(payload.description, None);
    }

    #[test]
    fn new_sensor_payload_rejects_unknown_type() {
        let err = NewSensor::from_json(json!({
            "parkingSlotId": "abc",
            "name": "Sensor",
            "type": "LASER"
        }))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: \"type\" must be one of [IR, ULTRASONIC, RFID, CAMERA]"
        );
    }

    #[test]
    fn slot_payload_requires_positive_number() {
        let err = NewParkingSlot::from_json(json!({"parkingId": "abc", "number": 0})).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: \"number\" must be a positive number"
        );
    }

    #[test]
    fn slot_number_accepts_whole_number_floats() {
        let slot = NewParkingSlot::from_json(json!({"parkingId": "abc", "number": 1.0})).unwrap();
        assert_eq!(slot.number, 1);

        let changes = ParkingSlotChanges::from_json(json!({"number": 12.0})).unwrap();
        assert_eq!(changes.number, Some(12));
    }

    #[test]
    fn update_payloads_accept_empty_bodies() {
        assert_eq!(
            ParkingChanges::from_json(json!({})).unwrap(),
            ParkingChanges::default()
        );
        assert_eq!(
            SensorChanges::from_json(json!({"isActive": false})).unwrap().is_active,
            Some(false)
        );
    }

    #[test]
    fn records_serialize_with_camel_case_keys() {
        let record = ContactMessage {
            id: Uuid::nil(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            message: "Hello".into(),
            created_at: "2025-01-01T00:00:00Z".parse().unwrap(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["createdAt"], json!("2025-01-01T00:00:00Z"));
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn projections_nest_parent_summaries() {
        let summary = SensorSummary {
            id: Uuid::nil(),
            name: "Sensor".into(),
            sensor_type: SensorType::Camera,
            parking_slot: ParkingSlotSummary {
                id: Uuid::nil(),
                number: 4,
                parking: ParkingSummary {
                    id: Uuid::nil(),
                    name: "Lot A".into(),
                    address: "1 Main St".into(),
                    city: "Z".into(),
                },
            },
        };
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["type"], json!("CAMERA"));
        assert_eq!(value["parkingSlot"]["number"], json!(4));
        assert_eq!(value["parkingSlot"]["parking"]["name"], json!("Lot A"));
    }
}
