use async_trait::async_trait;
use uuid::Uuid;

use super::{
    delete_row, fetch_by_id, fetch_listing, optional_parent_reference, parent_reference, reload,
    Predicate, Repository, Source,
};
use crate::db::DbPool;
use crate::error::{CoreError, Result};
use crate::pagination::{Listing, PageRequest};
use crate::types::{NewParkingSensorData, ParkingSensorData, ParkingSensorDataChanges};

const SOURCE: Source = Source {
    entity: "parking sensor data",
    table: "parking_sensor_data",
    columns: concat!(
        "psd.*, ",
        parking_sensor_summary!("pse", "p"),
        " AS parking_sensor"
    ),
    from: "parking_sensor_data psd \
           JOIN parking_sensors pse ON pse.id = psd.parking_sensor_id \
           JOIN parkings p ON p.id = pse.parking_id",
    id_column: "psd.id",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParkingSensorDataFilter {
    #[default]
    All,
    ParkingSensor(Uuid),
    /// Readings of every environment sensor installed in one parking.
    Parking(Uuid),
}

impl ParkingSensorDataFilter {
    fn predicates(self) -> Vec<Predicate> {
        match self {
            ParkingSensorDataFilter::All => Vec::new(),
            ParkingSensorDataFilter::ParkingSensor(sensor_id) => {
                vec![Predicate::uuid("psd.parking_sensor_id", sensor_id)]
            }
            ParkingSensorDataFilter::Parking(parking_id) => {
                vec![Predicate::uuid("pse.parking_id", parking_id)]
            }
        }
    }
}

#[derive(Clone)]
pub struct ParkingSensorDataRepository {
    pool: DbPool,
}

impl ParkingSensorDataRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for ParkingSensorDataRepository {
    type Record = ParkingSensorData;
    type Create = NewParkingSensorData;
    type Update = ParkingSensorDataChanges;
    type Filter = ParkingSensorDataFilter;

    const ENTITY: &'static str = "parking sensor data";
    const NOT_FOUND: &'static str = "Parking sensor data not found.";

    async fn create(&self, payload: NewParkingSensorData) -> Result<ParkingSensorData> {
        let parking_sensor_id = parent_reference("parking sensor", &payload.parking_sensor_id)?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO parking_sensor_data (id, parking_sensor_id, data)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(parking_sensor_id)
        .bind(&payload.data)
        .fetch_one(&self.pool)
        .await?;

        reload(&self.pool, &SOURCE, id).await
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<ParkingSensorData>> {
        fetch_by_id(&self.pool, &SOURCE, id).await
    }

    async fn list_filtered(
        &self,
        filter: ParkingSensorDataFilter,
        page: PageRequest,
    ) -> Result<Listing<ParkingSensorData>> {
        fetch_listing(
            &self.pool,
            &SOURCE,
            &filter.predicates(),
            "psd.created_at DESC, psd.id",
            page,
        )
        .await
    }

    async fn update(
        &self,
        id: Uuid,
        changes: ParkingSensorDataChanges,
    ) -> Result<ParkingSensorData> {
        let parking_sensor_id =
            optional_parent_reference("parking sensor", changes.parking_sensor_id.as_deref())?;

        let updated = sqlx::query_scalar::<_, Uuid>(
            r#"
            UPDATE parking_sensor_data
            SET parking_sensor_id = COALESCE($2, parking_sensor_id),
                data = COALESCE($3, data)
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(parking_sensor_id)
        .bind(changes.data)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parking_filter_goes_through_the_parking_sensor() {
        let parking_id = Uuid::new_v4();
        assert_eq!(
            ParkingSensorDataFilter::Parking(parking_id).predicates(),
            vec![Predicate::uuid("pse.parking_id", parking_id)]
        );
    }
}
