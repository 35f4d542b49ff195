use async_trait::async_trait;
use uuid::Uuid;

use super::{
    delete_row, fetch_by_id, fetch_listing, optional_parent_reference, parent_reference, reload,
    Predicate, Repository, Source,
};
use crate::db::DbPool;
use crate::error::{CoreError, Result};
use crate::pagination::{Listing, PageRequest};
use crate::types::{NewParkingSlot, ParkingSlot, ParkingSlotChanges};

const SOURCE: Source = Source {
    entity: "parking slot",
    table: "parking_slots",
    columns: concat!("ps.*, ", parking_summary!("p"), " AS parking"),
    from: "parking_slots ps JOIN parkings p ON p.id = ps.parking_id",
    id_column: "ps.id",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParkingSlotFilter {
    #[default]
    All,
    Parking(Uuid),
    /// Slots that are both available and active, optionally within one parking.
    Available { parking_id: Option<Uuid> },
}

impl ParkingSlotFilter {
    fn predicates(self) -> Vec<Predicate> {
        match self {
            ParkingSlotFilter::All => Vec::new(),
            ParkingSlotFilter::Parking(parking_id) => {
                vec![Predicate::uuid("ps.parking_id", parking_id)]
            }
            ParkingSlotFilter::Available { parking_id } => {
                let mut predicates = Vec::with_capacity(3);
                if let Some(parking_id) = parking_id {
                    predicates.push(Predicate::uuid("ps.parking_id", parking_id));
                }
                predicates.push(Predicate::flag("ps.is_available", true));
                predicates.push(Predicate::flag("ps.is_active", true));
                predicates
            }
        }
    }

    // Listings scoped to a parking read like a floor plan, by slot number.
    fn order_by(self) -> &'static str {
        match self {
            ParkingSlotFilter::All => "ps.created_at DESC, ps.id",
            ParkingSlotFilter::Parking(_) | ParkingSlotFilter::Available { .. } => {
                "ps.number ASC, ps.id"
            }
        }
    }
}

#[derive(Clone)]
pub struct ParkingSlotRepository {
    pool: DbPool,
}

impl ParkingSlotRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for ParkingSlotRepository {
    type Record = ParkingSlot;
    type Create = NewParkingSlot;
    type Update = ParkingSlotChanges;
    type Filter = ParkingSlotFilter;

    const ENTITY: &'static str = "parking slot";
    const NOT_FOUND: &'static str = "Parking slot not found.";

    async fn create(&self, payload: NewParkingSlot) -> Result<ParkingSlot> {
        let parking_id = parent_reference("parking", &payload.parking_id)?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO parking_slots (id, parking_id, number, is_available, is_active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(parking_id)
        .bind(payload.number)
        .bind(payload.is_available.unwrap_or(true))
        .bind(payload.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        reload(&self.pool, &SOURCE, id).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ParkingSlot>> {
        fetch_by_id(&self.pool, &SOURCE, id).await
    }

    async fn list_filtered(
        &self,
        filter: ParkingSlotFilter,
        page: PageRequest,
    ) -> Result<Listing<ParkingSlot>> {
        fetch_listing(
            &self.pool,
            &SOURCE,
            &filter.predicates(),
            filter.order_by(),
            page,
        )
        .await
    }

    async fn update(&self, id: Uuid, changes: ParkingSlotChanges) -> Result<ParkingSlot> {
        let parking_id = optional_parent_reference("parking", changes.parking_id.as_deref())?;

        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE parking_slots
            SET parking_id = COALESCE($2, parking_id),
                number = COALESCE($3, number),
                is_available = COALESCE($4, is_available),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(parking_id)
        .bind(changes.number)
        .bind(changes.is_available)
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
