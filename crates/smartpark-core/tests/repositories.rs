use std::env;

use anyhow::Result;
use smartpark_core::db::{self, DbPool};
use smartpark_core::error::CoreError;
use smartpark_core::pagination::{Listing, PageRequest};
use smartpark_core::repository::{
    ParkingSensorDataFilter, ParkingSlotFilter, Repositories, Repository, SensorDataFilter,
    SensorFilter,
};
use smartpark_core::types::{
    NewParking, NewParkingSensor, NewParkingSensorData, NewParkingSlot, NewSensor,
    NewSensorData, Parking, ParkingChanges, ParkingSensorType, ParkingSlot, ParkingSlotChanges,
    SensorType,
};
use uuid::Uuid;

// Tests share one database and run concurrently, so each one builds its own
// parking and only asserts on rows scoped to it.
async fn test_pool() -> Result<Option<DbPool>> {
    let database_url = match env::var("SMARTPARK_TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping repository test because SMARTPARK_TEST_DATABASE_URL is not set"
            );
            return Ok(None);
        }
    };

    let pool = db::connect(&database_url).await?;
    db::run_migrations(&pool).await?;
    Ok(Some(pool))
}

fn lot_a() -> NewParking {
    NewParking {
        name: "Lot A".into(),
        address: "1 Main St".into(),
        country: "X".into(),
        state: "Y".into(),
        city: "Z".into(),
        number: "1".into(),
        phone: "555".into(),
        ..NewParking::default()
    }
}

async fn create_slot(repos: &Repositories, parking: &Parking, number: i32) -> Result<ParkingSlot> {
    Ok(repos
        .parking_slots
        .create(NewParkingSlot {
            parking_id: parking.id.to_string(),
            number,
            ..NewParkingSlot::default()
        })
        .await?)
}

#[tokio::test]
async fn created_parking_round_trips_through_get_by_id() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let repos = Repositories::new(pool);

    let created = repos.parkings.create(lot_a()).await?;
    assert!(created.is_active);
    assert_eq!(created.description, None);

    let fetched = repos.parkings.get_by_id(created.id).await?;
    assert_eq!(fetched, Some(created));

    assert_eq!(repos.parkings.get_by_id(Uuid::new_v4()).await?, None);
    Ok(())
}

#[tokio::test]
async fn slot_carries_its_parking_projection() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let repos = Repositories::new(pool);

    let parking = repos.parkings.create(lot_a()).await?;
    let slot = create_slot(&repos, &parking, 1).await?;

    assert_eq!(slot.parking_id, parking.id);
    assert!(slot.is_available);
    assert_eq!(slot.parking.id, parking.id);
    assert_eq!(slot.parking.name, "Lot A");
    assert_eq!(slot.parking.city, "Z");

    assert_eq!(repos.parking_slots.get_by_id(slot.id).await?, Some(slot));
    Ok(())
}

#[tokio::test]
async fn slots_by_parking_are_ordered_by_number() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let repos = Repositories::new(pool);

    let parking = repos.parkings.create(lot_a()).await?;
    for number in [3, 1, 2] {
        create_slot(&repos, &parking, number).await?;
    }

    let listing = repos
        .parking_slots
        .list_filtered(
            ParkingSlotFilter::Parking(parking.id),
            PageRequest::unpaginated(),
        )
        .await?;
    let numbers: Vec<i32> = listing.rows().iter().map(|slot| slot.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn available_slots_exclude_taken_and_inactive_ones() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let repos = Repositories::new(pool);

    let parking = repos.parkings.create(lot_a()).await?;
    let free = create_slot(&repos, &parking, 1).await?;
    let taken = create_slot(&repos, &parking, 2).await?;
    let disabled = create_slot(&repos, &parking, 3).await?;

    repos
        .parking_slots
        .update(
            taken.id,
            ParkingSlotChanges {
                is_available: Some(false),
                ..ParkingSlotChanges::default()
            },
        )
        .await?;
    repos
        .parking_slots
        .update(
            disabled.id,
            ParkingSlotChanges {
                is_active: Some(false),
                ..ParkingSlotChanges::default()
            },
        )
        .await?;

    let listing = repos
        .parking_slots
        .list_filtered(
            ParkingSlotFilter::Available {
                parking_id: Some(parking.id),
            },
            PageRequest::unpaginated(),
        )
        .await?;
    let ids: Vec<Uuid> = listing.rows().iter().map(|slot| slot.id).collect();
    assert_eq!(ids, vec![free.id]);
    Ok(())
}

#[tokio::test]
async fn pagination_needs_both_parameters() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let repos = Repositories::new(pool);

    let parking = repos.parkings.create(lot_a()).await?;
    let slot = create_slot(&repos, &parking, 1).await?;
    for index in 0..12 {
        repos
            .sensors
            .create(NewSensor {
                parking_slot_id: slot.id.to_string(),
                is_active: None,
                name: format!("Sensor {index}"),
                description: None,
                sensor_type: SensorType::Ir,
            })
            .await?;
    }

    let filter = SensorFilter::ParkingSlot(slot.id);

    match repos
        .sensors
        .list_filtered(filter, PageRequest::paged(2, 5))
        .await?
    {
        Listing::Paged(page) => {
            assert_eq!(page.data.len(), 5);
            assert_eq!(page.current_page, 2);
            assert_eq!(page.total_pages, 3);
            assert_eq!(page.total_items, 12);
        }
        Listing::All(_) => panic!("expected a paginated envelope"),
    }

    match repos
        .sensors
        .list_filtered(filter, PageRequest::paged(3, 5))
        .await?
    {
        Listing::Paged(page) => assert_eq!(page.data.len(), 2),
        Listing::All(_) => panic!("expected a paginated envelope"),
    }

    let half = PageRequest::new(Some(2), None);
    match repos.sensors.list_filtered(filter, half).await? {
        Listing::All(rows) => assert_eq!(rows.len(), 12),
        Listing::Paged(_) => panic!("one parameter must not paginate"),
    }
    Ok(())
}

#[tokio::test]
async fn sensor_projection_reaches_the_parking() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let repos = Repositories::new(pool);

    let parking = repos.parkings.create(lot_a()).await?;
    let slot = create_slot(&repos, &parking, 7).await?;
    let sensor = repos
        .sensors
        .create(NewSensor {
            parking_slot_id: slot.id.to_string(),
            is_active: Some(true),
            name: "Camera 7".into(),
            description: Some("Entrance".into()),
            sensor_type: SensorType::Camera,
        })
        .await?;

    assert_eq!(sensor.parking_slot.number, 7);
    assert_eq!(sensor.parking_slot.parking.id, parking.id);

    let reading = repos
        .sensor_data
        .create(NewSensorData {
            sensor_id: sensor.id.to_string(),
            is_active: None,
            data: r#"{"value":1}"#.into(),
        })
        .await?;
    assert_eq!(reading.sensor.sensor_type, SensorType::Camera);
    assert_eq!(reading.sensor.parking_slot.parking.name, "Lot A");

    let by_slot = repos
        .sensor_data
        .list_filtered(
            SensorDataFilter::ParkingSlot(slot.id),
            PageRequest::unpaginated(),
        )
        .await?;
    assert_eq!(by_slot.into_rows(), vec![reading]);
    Ok(())
}

#[tokio::test]
async fn environment_readings_filter_through_the_parking() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let repos = Repositories::new(pool);

    let parking = repos.parkings.create(lot_a()).await?;
    let sensor = repos
        .parking_sensors
        .create(NewParkingSensor {
            parking_id: parking.id.to_string(),
            is_active: None,
            name: "Thermo".into(),
            description: None,
            sensor_type: ParkingSensorType::Temperature,
        })
        .await?;
    assert_eq!(sensor.parking.address, "1 Main St");

    for value in ["20.5", "21.0"] {
        repos
            .parking_sensor_data
            .create(NewParkingSensorData {
                parking_sensor_id: sensor.id.to_string(),
                data: value.into(),
            })
            .await?;
    }

    let listing = repos
        .parking_sensor_data
        .list_filtered(
            ParkingSensorDataFilter::Parking(parking.id),
            PageRequest::paged(1, 1),
        )
        .await?;
    match listing {
        Listing::Paged(page) => {
            assert_eq!(page.total_items, 2);
            assert_eq!(page.total_pages, 2);
            assert_eq!(page.data[0].parking_sensor.id, sensor.id);
        }
        Listing::All(_) => panic!("expected a paginated envelope"),
    }
    Ok(())
}

#[tokio::test]
async fn update_applies_only_supplied_fields() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let repos = Repositories::new(pool);

    let parking = repos.parkings.create(lot_a()).await?;
    let updated = repos
        .parkings
        .update(
            parking.id,
            ParkingChanges {
                city: Some("Springfield".into()),
                ..ParkingChanges::default()
            },
        )
        .await?;

    assert_eq!(updated.city, "Springfield");
    assert_eq!(updated.name, parking.name);
    assert!(updated.updated_at >= parking.updated_at);

    let missing = repos
        .parkings
        .update(Uuid::new_v4(), ParkingChanges::default())
        .await
        .unwrap_err();
    assert!(missing.is_not_found());
    Ok(())
}

#[tokio::test]
async fn deleting_a_referenced_parking_fails() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let repos = Repositories::new(pool);

    let parking = repos.parkings.create(lot_a()).await?;
    let slot = create_slot(&repos, &parking, 1).await?;

    let err = repos.parkings.delete(parking.id).await.unwrap_err();
    assert!(matches!(err, CoreError::ForeignKeyViolation(_)));
    assert!(repos.parkings.get_by_id(parking.id).await?.is_some());

    repos.parking_slots.delete(slot.id).await?;
    repos.parkings.delete(parking.id).await?;
    assert_eq!(repos.parkings.get_by_id(parking.id).await?, None);

    let again = repos.parkings.delete(parking.id).await.unwrap_err();
    assert!(again.is_not_found());
    Ok(())
}

#[tokio::test]
async fn dangling_parent_reference_is_rejected() -> Result<()> {
    let Some(pool) = test_pool().await? else {
        return Ok(());
    };
    let repos = Repositories::new(pool);

    for parking_id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let err = repos
            .parking_slots
            .create(NewParkingSlot {
                parking_id,
                number: 1,
                ..NewParkingSlot::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ForeignKeyViolation(_)));
    }
    Ok(())
}
