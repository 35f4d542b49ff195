//! Postgres repositories for the seven resources.
//!
//! Every repository implements [`Repository`], so the HTTP layer can drive
//! create/read/update/delete generically. Filtered listings go through
//! [`Repository::list_filtered`] with a resource-specific filter type.

#[macro_use]
mod projection;

pub mod contact_message;
pub mod parking;
pub mod parking_sensor;
pub mod parking_sensor_data;
pub mod parking_slot;
pub mod sensor;
pub mod sensor_data;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{CoreError, Result};
use crate::pagination::{Listing, PageRequest};
use crate::validation::Payload;

pub use contact_message::ContactMessageRepository;
pub use parking::{ParkingFilter, ParkingRepository};
pub use parking_sensor::{ParkingSensorFilter, ParkingSensorRepository};
pub use parking_sensor_data::{ParkingSensorDataFilter, ParkingSensorDataRepository};
pub use parking_slot::{ParkingSlotFilter, ParkingSlotRepository};
pub use sensor::{SensorFilter, SensorRepository};
pub use sensor_data::{SensorDataFilter, SensorDataRepository};

#[async_trait]
pub trait Repository: Send + Sync + 'static {
    type Record: Serialize + Send + Sync + 'static;
    type Create: Payload + Send + 'static;
    type Update: Payload + Send + 'static;
    type Filter: Default + Send + 'static;

    /// Singular, lower-case name used in log events and error descriptions.
    const ENTITY: &'static str;
    /// Fixed message returned to clients when a row cannot be found.
    const NOT_FOUND: &'static str;

    /// Inserts a new row and returns it with its parent projection.
    async fn create(&self, payload: Self::Create) -> Result<Self::Record>;

    /// Absence is `Ok(None)`, not an error.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Self::Record>>;

    async fn list_filtered(
        &self,
        filter: Self::Filter,
        page: PageRequest,
    ) -> Result<Listing<Self::Record>>;

    async fn list(&self, page: PageRequest) -> Result<Listing<Self::Record>> {
        self.list_filtered(Self::Filter::default(), page).await
    }

    /// Applies only the supplied fields.
    async fn update(&self, id: Uuid, changes: Self::Update) -> Result<Self::Record>;

    /// Hard delete. Rows still referenced by children fail with
    /// [`CoreError::ForeignKeyViolation`].
    async fn delete(&self, id: Uuid) -> Result<()>;
}

/// All repositories over one shared pool.
#[derive(Clone)]
pub struct Repositories {
    pub parkings: ParkingRepository,
    pub parking_slots: ParkingSlotRepository,
    pub sensors: SensorRepository,
    pub sensor_data: SensorDataRepository,
    pub parking_sensors: ParkingSensorRepository,
    pub parking_sensor_data: ParkingSensorDataRepository,
    pub contact_messages: ContactMessageRepository,
}

impl Repositories {
    pub fn new(pool: DbPool) -> Self {
        Self {
            parkings: ParkingRepository::new(pool.clone()),
            parking_slots: ParkingSlotRepository::new(pool.clone()),
            sensors: SensorRepository::new(pool.clone()),
            sensor_data: SensorDataRepository::new(pool.clone()),
            parking_sensors: ParkingSensorRepository::new(pool.clone()),
            parking_sensor_data: ParkingSensorDataRepository::new(pool.clone()),
            contact_messages: ContactMessageRepository::new(pool),
        }
    }
}

/// How a resource is read back: its select list (row columns plus parent
/// projections) and the joined relations feeding it.
pub(crate) struct Source {
    pub entity: &'static str,
    pub table: &'static str,
    pub columns: &'static str,
    pub from: &'static str,
    pub id_column: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Bound {
    Uuid(Uuid),
    Bool(bool),
    Text(&'static str),
}

/// An equality test against one column of a [`Source`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Predicate {
    pub column: &'static str,
    pub value: Bound,
}

impl Predicate {
    pub fn uuid(column: &'static str, value: Uuid) -> Self {
        Self {
            column,
            value: Bound::Uuid(value),
        }
    }

    pub fn flag(column: &'static str, value: bool) -> Self {
        Self {
            column,
            value: Bound::Bool(value),
        }
    }

    pub fn text(column: &'static str, value: &'static str) -> Self {
        Self {
            column,
            value: Bound::Text(value),
        }
    }
}

impl Source {
    fn select(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(self.columns).push(" FROM ").push(self.from);
        builder
    }

    fn count(&self) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM ");
        builder.push(self.from);
        builder
    }
}

fn push_predicates(builder: &mut QueryBuilder<'static, Postgres>, predicates: &[Predicate]) {
    for (index, predicate) in predicates.iter().enumerate() {
        builder
            .push(if index == 0 { " WHERE " } else { " AND " })
            .push(predicate.column)
            .push(" = ");
        match predicate.value {
            Bound::Uuid(value) => builder.push_bind(value),
            Bound::Bool(value) => builder.push_bind(value),
            Bound::Text(value) => builder.push_bind(value),
        };
    }
}

pub(crate) async fn fetch_by_id<T>(pool: &DbPool, source: &Source, id: Uuid) -> Result<Option<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut query = source.select();
    push_predicates(&mut query, &[Predicate::uuid(source.id_column, id)]);

    debug!(entity = source.entity, %id, "fetching row by id");
    let row = query.build_query_as::<T>().fetch_optional(pool).await?;
    Ok(row)
}

/// Runs the shared list contract for `source`.
///
/// Without a full page window the whole ordered set is returned. With one,
/// the slice is fetched together with a count over the same predicates.
pub(crate) async fn fetch_listing<T>(
    pool: &DbPool,
    source: &Source,
    predicates: &[Predicate],
    order_by: &'static str,
    request: PageRequest,
) -> Result<Listing<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut query = source.select();
    push_predicates(&mut query, predicates);
    query.push(" ORDER BY ").push(order_by);

    let Some(window) = request.window() else {
        let rows = query.build_query_as::<T>().fetch_all(pool).await?;
        debug!(entity = source.entity, rows = rows.len(), "listed rows");
        return Ok(Listing::All(rows));
    };

    query
        .push(" LIMIT ")
        .push_bind(window.limit())
        .push(" OFFSET ")
        .push_bind(window.offset());
    let rows = query.build_query_as::<T>().fetch_all(pool).await?;

    let mut count = source.count();
    push_predicates(&mut count, predicates);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    debug!(
        entity = source.entity,
        page = window.page,
        page_size = window.page_size,
        total,
        "listed page"
    );
    Ok(Listing::from_parts(
        request,
        rows,
        u64::try_from(total).unwrap_or_default(),
    ))
}

/// Re-reads a row just written, failing with `NotFound` if it vanished.
pub(crate) async fn reload<T>(pool: &DbPool, source: &Source, id: Uuid) -> Result<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    fetch_by_id(pool, source, id)
        .await?
        .ok_or_else(|| CoreError::not_found(source.entity, id))
}

pub(crate) async fn delete_row(pool: &DbPool, source: &Source, id: Uuid) -> Result<()> {
    let statement = format!("DELETE FROM {} WHERE id = $1", source.table);
    let result = sqlx::query(&statement).bind(id).execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::not_found(source.entity, id));
    }

    debug!(entity = source.entity, %id, "deleted row");
    Ok(())
}

/// Resolves a parent reference given as a string on the wire.
///
/// No row can carry an id that is not a UUID, so such references fail the
/// same way a dangling one does.
pub(crate) fn parent_reference(parent: &'static str, raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        CoreError::ForeignKeyViolation(format!("{parent} '{raw}' does not exist"))
    })
}

pub(crate) fn optional_parent_reference(
    parent: &'static str,
    raw: Option<&str>,
) -> Result<Option<Uuid>> {
    raw.map(|value| parent_reference(parent, value)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: Source = Source {
        entity: "parking slot",
        table: "parking_slots",
        columns: "ps.*",
        from: "parking_slots ps JOIN parkings p ON p.id = ps.parking_id",
        id_column: "ps.id",
    };

    #[test]
    fn predicates_become_a_where_clause() {
        let mut query = SOURCE.select();
        push_predicates(
            &mut query,
            &[
                Predicate::uuid("ps.parking_id", Uuid::nil()),
                Predicate::flag("ps.is_available", true),
            ],
        );
        assert_eq!(
            query.sql(),
            "SELECT ps.* FROM parking_slots ps JOIN parkings p ON p.id = ps.parking_id \
             WHERE ps.parking_id = $1 AND ps.is_available = $2"
        );
    }

    #[test]
    fn count_shares_the_joined_relations() {
        let mut query = SOURCE.count();
        push_predicates(&mut query, &[Predicate::text("p.city", "Z")]);
        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM parking_slots ps JOIN parkings p ON p.id = ps.parking_id \
             WHERE p.city = $1"
        );
    }

    #[test]
    fn malformed_parent_reference_is_a_foreign_key_violation() {
        let err = parent_reference("parking", "not-a-uuid").unwrap_err();
        assert!(matches!(err, CoreError::ForeignKeyViolation(_)));
        assert_eq!(
            optional_parent_reference("parking", None).unwrap(),
            None
        );
    }
}
