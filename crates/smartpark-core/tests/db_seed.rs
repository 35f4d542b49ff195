use std::env;

use anyhow::Result;
use smartpark_core::{db, seed, status};

#[tokio::test]
async fn db_seed_replaces_previous_contents_when_database_available() -> Result<()> {
    let database_url = match env::var("SMARTPARK_TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping db_seed test because SMARTPARK_TEST_DATABASE_URL is not set");
            return Ok(());
        }
    };

    let pool = db::connect(&database_url).await?;
    db::run_migrations(&pool).await?;

    seed::run(&pool).await?;
    let summary = seed::run(&pool).await?; // second run starts from a clean slate

    assert_eq!(summary.parkings, 3);
    assert_eq!(summary.parking_slots, 180);
    assert_eq!(summary.sensors, 75);
    assert_eq!(summary.parking_sensors, 16);
    assert!((75 * 5..=75 * 10).contains(&summary.sensor_data));
    assert!((16 * 10..=16 * 20).contains(&summary.parking_sensor_data));

    let counts = status::table_counts(&pool).await?;
    let parkings = counts
        .iter()
        .find(|count| count.table == "parkings")
        .map(|count| count.rows);
    assert_eq!(parkings, Some(3));

    seed::reset(&pool).await?;
    let counts = status::table_counts(&pool).await?;
    assert!(counts.iter().all(|count| count.rows == 0));

    Ok(())
}
