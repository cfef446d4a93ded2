#![allow(dead_code)]

use neo_tracker::entity::{asteroids, close_approach};
use neo_tracker::schema::create_tables;
use sea_orm::{Database, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel};
use sea_orm::prelude::Date;

pub struct TestContext {
    pub db: DatabaseConnection,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();

        let db = Database::connect("sqlite::memory:").await.unwrap();
        create_tables(&db).await.unwrap();

        Self { db }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

pub fn asteroid(
    id: i64,
    name: &str,
    magnitude: f64,
    diameter_km: (f64, f64),
    hazardous: bool,
) -> asteroids::Model {
    asteroids::Model {
        id,
        name: name.to_owned(),
        absolute_magnitude_h: magnitude,
        estimated_diameter_min_km: diameter_km.0,
        estimated_diameter_max_km: diameter_km.1,
        is_potentially_hazardous_asteroid: hazardous,
    }
}

/// An approach well inside the default filter bounds, varied by velocity and date.
pub fn approach(neo_reference_id: i64, on: Date, velocity_kmph: f64) -> close_approach::Model {
    close_approach::Model {
        neo_reference_id,
        close_approach_date: on,
        relative_velocity_kmph: velocity_kmph,
        astronomical: 0.2,
        miss_distance_km: 30_000_000.0,
        miss_distance_lunar: 77.8,
    }
}

pub async fn insert_asteroids(
    db: &DatabaseConnection,
    models: impl IntoIterator<Item = asteroids::Model>,
) -> Result<(), DbErr> {
    for model in models {
        asteroids::Entity::insert(model.into_active_model())
            .exec(db)
            .await?;
    }
    Ok(())
}

pub async fn insert_approaches(
    db: &DatabaseConnection,
    models: impl IntoIterator<Item = close_approach::Model>,
) -> Result<(), DbErr> {
    for model in models {
        close_approach::Entity::insert(model.into_active_model())
            .exec(db)
            .await?;
    }
    Ok(())
}

/// The round-trip fixture: one small hazardous asteroid seen twice in June 2025.
pub async fn seed_single_hazardous(db: &DatabaseConnection) -> Result<(), DbErr> {
    insert_asteroids(db, [asteroid(3542519, "(2010 PK9)", 20.0, (0.1, 0.2), true)]).await?;
    insert_approaches(
        db,
        [
            approach(3542519, date(2025, 6, 1), 1000.0),
            approach(3542519, date(2025, 6, 15), 2000.0),
        ],
    )
    .await
}

/// A mixed catalog exercising every report.
///
/// | id | name      | hazardous | approaches                         |
/// |----|-----------|-----------|------------------------------------|
/// | 1  | Apophis   | yes       | 5, Jan..May 2025                    |
/// | 2  | Bennu     | yes       | 2, Jun 2025 and Jun 2026            |
/// | 3  | Eros      | no        | 4, Jun 2025, Jun/Jul/Dec 2026       |
/// | 4  | Ganymed   | no        | 1, Jun 2027                         |
/// | 5  | Toutatis  | yes       | 1, Mar 2026                         |
/// | 6  | Icarus    | no        | none                                |
pub async fn seed_catalog(db: &DatabaseConnection) -> Result<(), DbErr> {
    insert_asteroids(
        db,
        [
            asteroid(1, "Apophis", 19.7, (0.31, 0.68), true),
            asteroid(2, "Bennu", 20.2, (0.24, 0.54), true),
            asteroid(3, "Eros", 10.4, (16.8, 37.5), false),
            asteroid(4, "Ganymed", 9.3, (20.0, 49.0), false),
            asteroid(5, "Toutatis", 15.3, (2.4, 5.4), true),
            asteroid(6, "Icarus", 16.9, (1.0, 1.4), false),
        ],
    )
    .await?;

    let mut approaches = vec![
        approach(1, date(2025, 1, 10), 21_000.0),
        approach(1, date(2025, 2, 10), 62_500.5),
        approach(1, date(2025, 3, 10), 23_000.0),
        approach(1, date(2025, 4, 10), 24_000.0),
        approach(1, date(2025, 5, 10), 25_000.0),
        approach(2, date(2025, 6, 3), 45_000.0),
        approach(2, date(2026, 6, 3), 55_000.0),
        approach(3, date(2025, 6, 20), 18_000.0),
        approach(3, date(2026, 6, 20), 19_000.0),
        approach(3, date(2026, 7, 20), 17_500.0),
        approach(3, date(2026, 12, 20), 16_000.0),
        approach(4, date(2027, 6, 1), 80_100.0),
        approach(5, date(2026, 3, 15), 35_000.0),
    ];

    // distances: Apophis passes inside the Moon's orbit once, Bennu comes within 0.05 AU
    approaches[3].miss_distance_km = 38_000.0;
    approaches[3].miss_distance_lunar = 0.099;
    approaches[3].astronomical = 0.000254;
    approaches[6].miss_distance_km = 7_000_000.0;
    approaches[6].miss_distance_lunar = 18.2;
    approaches[6].astronomical = 0.0468;
    approaches[9].miss_distance_km = 20_000_000.0;
    approaches[12].miss_distance_km = 9_000_000.0;

    insert_approaches(db, approaches).await
}
