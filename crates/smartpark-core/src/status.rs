use serde::Serialize;
use tracing::debug;

use crate::db::DbPool;
use crate::error::Result;

/// Tables in the order operators expect to read them, parents first.
const STATUS_TABLES: [&str; 7] = [
    "parkings",
    "parking_slots",
    "sensors",
    "sensors_data",
    "parking_sensors",
    "parking_sensor_data",
    "contact_messages",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: i64,
}

/// Counts the rows of every table. Fails on the first table that cannot be
/// read, which usually means migrations have not been applied.
pub async fn table_counts(pool: &DbPool) -> Result<Vec<TableCount>> {
    let mut counts = Vec::with_capacity(STATUS_TABLES.len());
    for table in STATUS_TABLES {
        let statement = format!("SELECT COUNT(*) FROM {table}");
        let rows: i64 = sqlx::query_scalar(&statement).fetch_one(pool).await?;
        debug!(table, rows, "counted rows");
        counts.push(TableCount { table, rows });
    }
    Ok(counts)
}
