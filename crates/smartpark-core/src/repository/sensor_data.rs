use async_trait::async_trait;
use uuid::Uuid;

use super::{
    delete_row, fetch_by_id, fetch_listing, optional_parent_reference, parent_reference, reload,
    Predicate, Repository, Source,
};
use crate::db::DbPool;
use crate::error::{CoreError, Result};
use crate::pagination::{Listing, PageRequest};
use crate::types::{NewSensorData, SensorData, SensorDataChanges};

const SOURCE: Source = Source {
    entity: "sensor data",
    table: "sensors_data",
    columns: concat!("sd.*, ", sensor_summary!("s", "ps", "p"), " AS sensor"),
    from: "sensors_data sd \
           JOIN sensors s ON s.id = sd.sensor_id \
           JOIN parking_slots ps ON ps.id = s.parking_slot_id \
           JOIN parkings p ON p.id = ps.parking_id",
    id_column: "sd.id",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SensorDataFilter {
    #[default]
    All,
    Active,
    Sensor(Uuid),
    /// Readings of every sensor installed in one slot.
    ParkingSlot(Uuid),
}

impl SensorDataFilter {
    fn predicates(self) -> Vec<Predicate> {
        match self {
            SensorDataFilter::All => Vec::new(),
            SensorDataFilter::Active => vec![Predicate::flag("sd.is_active", true)],
            SensorDataFilter::Sensor(sensor_id) => vec![Predicate::uuid("sd.sensor_id", sensor_id)],
            SensorDataFilter::ParkingSlot(slot_id) => {
                vec![Predicate::uuid("s.parking_slot_id", slot_id)]
            }
        }
    }
}

#[derive(Clone)]
pub struct SensorDataRepository {
    pool: DbPool,
}

impl SensorDataRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for SensorDataRepository {
    type Record = SensorData;
    type Create = NewSensorData;
    type Update = SensorDataChanges;
    type Filter = SensorDataFilter;

    const ENTITY: &'static str = "sensor data";
    const NOT_FOUND: &'static str = "Sensor data not found.";

    async fn create(&self, payload: NewSensorData) -> Result<SensorData> {
        let sensor_id = parent_reference("sensor", &payload.sensor_id)?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO sensors_data (id, sensor_id, data, is_active)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(sensor_id)
        .bind(&payload.data)
        .bind(payload.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        reload(&self.pool, &SOURCE, id).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<SensorData>> {
        fetch_by_id(&self.pool, &SOURCE, id).await
    }

    async fn list_filtered(
        &self,
        filter: SensorDataFilter,
        page: PageRequest,
    ) -> Result<Listing<SensorData>> {
        fetch_listing(
            &self.pool,
            &SOURCE,
            &filter.predicates(),
            "sd.created_at DESC, sd.id",
            page,
        )
        .await
    }

    async fn update(&self, id: Uuid, changes: SensorDataChanges) -> Result<SensorData> {
        let sensor_id = optional_parent_reference("sensor", changes.sensor_id.as_deref())?;

        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE sensors_data
            SET sensor_id = COALESCE($2, sensor_id),
                data = COALESCE($3, data),
                is_active = COALESCE($4, is_active)
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(sensor_id)
        .bind(changes.data)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(id) => reload(&self.pool, &SOURCE, id).await,
            None => Err(CoreError::not_found(SOURCE.entity, id)),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        delete_row(&self.pool, &SOURCE, id).await
    }
}
