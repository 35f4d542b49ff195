use async_trait::async_trait;
use uuid::Uuid;

use super::{
    delete_row, fetch_by_id, fetch_listing, optional_parent_reference, parent_reference, reload,
    Predicate, Repository, Source,
};
use crate::db::DbPool;
use crate::error::{CoreError, Result};
use crate::pagination::{Listing, PageRequest};
use crate::types::{NewParkingSensor, ParkingSensor, ParkingSensorChanges, ParkingSensorType};

const SOURCE: Source = Source {
    entity: "parking sensor",
    table: "parking_sensors",
    columns: concat!("pse.*, ", parking_summary!("p"), " AS parking"),
    from: "parking_sensors pse JOIN parkings p ON p.id = pse.parking_id",
    id_column: "pse.id",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParkingSensorFilter {
    #[default]
    All,
    Active,
    Type(ParkingSensorType),
    Parking(Uuid),
}

impl ParkingSensorFilter {
    fn predicates(self) -> Vec<Predicate> {
        match self {
            ParkingSensorFilter::All => Vec::new(),
            ParkingSensorFilter::Active => vec![Predicate::flag("pse.is_active", true)],
            ParkingSensorFilter::Type(sensor_type) => {
                vec![Predicate::text("pse.type", sensor_type.as_str())]
            }
            ParkingSensorFilter::Parking(parking_id) => {
                vec![Predicate::uuid("pse.parking_id", parking_id)]
            }
        }
    }
}

#[derive(Clone)]
pub struct ParkingSensorRepository {
    pool: DbPool,
}

impl ParkingSensorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for ParkingSensorRepository {
    type Record = ParkingSensor;
    type Create = NewParkingSensor;
    type Update = ParkingSensorChanges;
    type Filter = ParkingSensorFilter;

    const ENTITY: &'static str = "parking sensor";
    const NOT_FOUND: &'static str = "Parking sensor not found.";

    async fn create(&self, payload: NewParkingSensor) -> Result<ParkingSensor> {
        let parking_id = parent_reference("parking", &payload.parking_id)?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO parking_sensors (id, parking_id, name, description, type, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(parking_id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.sensor_type)
        .bind(payload.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        reload(&self.pool, &SOURCE, id).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ParkingSensor>> {
        fetch_by_id(&self.pool, &SOURCE, id).await
    }

    async fn list_filtered(
        &self,
        filter: ParkingSensorFilter,
        page: PageRequest,
    ) -> Result<Listing<ParkingSensor>> {
        fetch_listing(
            &self.pool,
            &SOURCE,
            &filter.predicates(),
            "pse.created_at DESC, pse.id",
            page,
        )
        .await
    }

    async fn update(&self, id: Uuid, changes: ParkingSensorChanges) -> Result<ParkingSensor> {
        let parking_id = optional_parent_reference("parking", changes.parking_id.as_deref())?;

        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE parking_sensors
            SET parking_id = COALESCE($2, parking_id),
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
        .bind(parking_id)
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
