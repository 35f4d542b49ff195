use async_trait::async_trait;
use uuid::Uuid;

use super::{
    delete_row, fetch_by_id, fetch_listing, optional_parent_reference, parent_reference, reload,
    Predicate, Repository, Source,
};
use crate::db::DbPool;
use crate::error::{CoreError, Result};
use crate::pagination::{Listing, PageRequest};
use crate::types::{NewSensor, Sensor, SensorChanges, SensorType};

const SOURCE: Source = Source {
    entity: "sensor",
    table: "sensors",
    columns: concat!("s.*, ", parking_slot_summary!("ps", "p"), " AS parking_slot"),
    from: "sensors s \
           JOIN parking_slots ps ON ps.id = s.parking_slot_id \
           JOIN parkings p ON p.id = ps.parking_id",
    id_column: "s.id",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SensorFilter {
    #[default]
    All,
    Active,
    Type(SensorType),
    ParkingSlot(Uuid),
}

impl SensorFilter {
    fn predicates(self) -> Vec<Predicate> {
        match self {
            SensorFilter::All => Vec::new(),
            SensorFilter::Active => vec![Predicate::flag("s.is_active", true)],
            SensorFilter::Type(sensor_type) => vec![Predicate::text("s.type", sensor_type.as_str())],
            SensorFilter::ParkingSlot(slot_id) => vec![Predicate::uuid("s.parking_slot_id", slot_id)],
        }
    }
}

#[derive(Clone)]
pub struct SensorRepository {
    pool: DbPool,
}

impl SensorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for SensorRepository {
    type Record = Sensor;
    type Create = NewSensor;
    type Update = SensorChanges;
    type Filter = SensorFilter;

    const ENTITY: &'static str = "sensor";
    const NOT_FOUND: &'static str = "Sensor not found.";

    async fn create(&self, payload: NewSensor) -> Result<Sensor> {
        let parking_slot_id = parent_reference("parking slot", &payload.parking_slot_id)?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO sensors (id, parking_slot_id, name, description, type, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(parking_slot_id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.sensor_type)
        .bind(payload.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        reload(&self.pool, &SOURCE, id).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Sensor>> {
        fetch_by_id(&self.pool, &SOURCE, id).await
    }

    async fn list_filtered(
        &self,
        filter: SensorFilter,
        page: PageRequest,
    ) -> Result<Listing<Sensor>> {
        fetch_listing(
            &self.pool,
            &SOURCE,
            &filter.predicates(),
            "s.created_at DESC, s.id",
            page,
        )
        .await
    }

    async fn update(&self, id: Uuid, changes: SensorChanges) -> Result<Sensor> {
        let parking_slot_id =
            optional_parent_reference("parking slot", changes.parking_slot_id.as_deref())?;

        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE sensors
            SET parking_slot_id = COALESCE($2, parking_slot_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                type = COALESCE($5, type),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(parking_slot_id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.sensor_type)
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
