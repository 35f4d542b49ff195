use async_trait::async_trait;
use uuid::Uuid;

use super::{delete_row, fetch_by_id, fetch_listing, reload, Predicate, Repository, Source};
use crate::db::DbPool;
use crate::error::{CoreError, Result};
use crate::pagination::{Listing, PageRequest};
use crate::types::{NewParking, Parking, ParkingChanges};

const SOURCE: Source = Source {
    entity: "parking",
    table: "parkings",
    columns: "p.*",
    from: "parkings p",
    id_column: "p.id",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParkingFilter {
    #[default]
    All,
    Active,
}

impl ParkingFilter {
    fn predicates(self) -> Vec<Predicate> {
        match self {
            ParkingFilter::All => Vec::new(),
            ParkingFilter::Active => vec![Predicate::flag("p.is_active", true)],
        }
    }
}

#[derive(Clone)]
pub struct ParkingRepository {
    pool: DbPool,
}

impl ParkingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for ParkingRepository {
    type Record = Parking;
    type Create = NewParking;
    type Update = ParkingChanges;
    type Filter = ParkingFilter;

    const ENTITY: &'static str = "parking";
    const NOT_FOUND: &'static str = "Parking not found.";

    async fn create(&self, payload: NewParking) -> Result<Parking> {
        let id = Uuid::new_v4();
        let row = sqlx::query_as::<_, Parking>(
            r#"
            INSERT INTO parkings (
                id,
                name,
                address,
                country,
                state,
                city,
                number,
                phone,
                description,
                is_active
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.address)
        .bind(&payload.country)
        .bind(&payload.state)
        .bind(&payload.city)
        .bind(&payload.number)
        .bind(&payload.phone)
        .bind(&payload.description)
        .bind(payload.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Parking>> {
        fetch_by_id(&self.pool, &SOURCE, id).await
    }

    async fn list_filtered(
        &self,
        filter: ParkingFilter,
        page: PageRequest,
    ) -> Result<Listing<Parking>> {
        fetch_listing(
            &self.pool,
            &SOURCE,
            &filter.predicates(),
            "p.created_at DESC, p.id",
            page,
        )
        .await
    }

    async fn update(&self, id: Uuid, changes: ParkingChanges) -> Result<Parking> {
        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE parkings
            SET name = COALESCE($2, name),
                address = COALESCE($3, address),
                country = COALESCE($4, country),
                state = COALESCE($5, state),
                city = COALESCE($6, city),
                number = COALESCE($7, number),
                phone = COALESCE($8, phone),
                description = COALESCE($9, description),
                is_active = COALESCE($10, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.address)
        .bind(changes.country)
        .bind(changes.state)
        .bind(changes.city)
        .bind(changes.number)
        .bind(changes.phone)
        .bind(changes.description)
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
