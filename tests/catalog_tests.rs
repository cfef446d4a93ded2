pub mod common;

use common::*;
use neo_tracker::{catalog, CatalogQuery, Cell, NeoErr, ResultTable};
use pretty_assertions::assert_eq;
use sea_orm::{DatabaseConnection, DbBackend, DbErr, MockDatabase};
use strum::IntoEnumIterator;

async fn seeded() -> TestContext {
    let ctx = TestContext::new().await;
    seed_catalog(&ctx.db).await.unwrap();
    ctx
}

async fn report(db: &DatabaseConnection, query: CatalogQuery) -> ResultTable {
    catalog::run(db, query).await.unwrap()
}

fn texts(table: &ResultTable, label: &str) -> Vec<String> {
    table
        .column(label)
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

fn floats(table: &ResultTable, label: &str) -> Vec<f64> {
    table
        .column(label)
        .into_iter()
        .filter_map(Cell::as_f64)
        .collect()
}

fn integers(table: &ResultTable, label: &str) -> Vec<i64> {
    table
        .column(label)
        .into_iter()
        .filter_map(Cell::as_i64)
        .collect()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-6, "{actual:?} vs {expected:?}");
    }
}

#[tokio::test]
async fn every_report_runs_and_keeps_its_labels() {
    let ctx = seeded().await;

    for query in CatalogQuery::iter() {
        let table = catalog::run(&ctx.db, query)
            .await
            .unwrap_or_else(|err| panic!("{query}: {err}"));
        assert_eq!(table.title, query.name());
        assert_eq!(
            table.columns,
            query.columns().iter().map(|c| c.label).collect::<Vec<_>>()
        );
        assert!(!table.is_empty(), "{query} returned nothing");
    }
}

#[tokio::test]
async fn reports_on_an_empty_catalog_are_empty_not_errors() {
    let ctx = TestContext::new().await;

    for query in CatalogQuery::iter() {
        let table = report(&ctx.db, query).await;
        assert!(table.is_empty(), "{query}: {table:?}");
    }
}

#[tokio::test]
async fn approach_count() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::ApproachCount).await;

    assert_eq!(
        texts(&table, "Asteroid Name"),
        ["Apophis", "Eros", "Bennu", "Ganymed", "Toutatis"]
    );
    assert_eq!(integers(&table, "Approach Count"), [5, 4, 2, 1, 1]);
}

#[tokio::test]
async fn average_velocity_rounds_to_cents() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::AverageVelocity).await;

    assert_eq!(
        texts(&table, "Asteroid Name"),
        ["Ganymed", "Bennu", "Toutatis", "Apophis", "Eros"]
    );
    assert_close(
        &floats(&table, "Avg Velocity (km/h)"),
        &[80_100.0, 50_000.0, 35_000.0, 31_100.1, 17_625.0],
    );
}

#[tokio::test]
async fn top_10_fastest_is_bounded_and_descending() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::Top10Fastest).await;

    assert!(table.len() <= 10);
    let velocities = floats(&table, "Max Velocity (km/h)");
    assert!(velocities.windows(2).all(|w| w[0] >= w[1]), "{velocities:?}");
    assert_close(&velocities, &[80_100.0, 62_500.5, 55_000.0, 35_000.0, 19_000.0]);
}

#[tokio::test]
async fn top_10_fastest_caps_at_ten() {
    let ctx = TestContext::new().await;
    insert_asteroids(
        &ctx.db,
        (1..=12).map(|i| asteroid(i, &format!("NEO {i:02}"), 20.0, (0.1, 0.2), false)),
    )
    .await
    .unwrap();
    insert_approaches(
        &ctx.db,
        (1..=12).map(|i| approach(i, date(2025, 6, 1), 10_000.0 + i as f64)),
    )
    .await
    .unwrap();

    let table = report(&ctx.db, CatalogQuery::Top10Fastest).await;
    assert_eq!(table.len(), 10);
    assert_eq!(texts(&table, "Asteroid Name")[0], "NEO 12");

    let slowest = report(&ctx.db, CatalogQuery::Slowest10Asteroid).await;
    assert_eq!(slowest.len(), 10);
    assert_eq!(texts(&slowest, "Asteroid Name")[0], "NEO 01");
}

#[tokio::test]
async fn hazardous_more_than_three_times() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::HazardousMoreThan3Times).await;

    // Eros has 4 approaches but is not hazardous
    assert_eq!(texts(&table, "Asteroid Name"), ["Apophis"]);
    assert!(integers(&table, "Approach Count").iter().all(|&n| n > 3));
}

#[tokio::test]
async fn busiest_month_agrees_with_monthly_counts() {
    let ctx = seeded().await;
    let busiest = report(&ctx.db, CatalogQuery::BusiestMonth).await;
    let monthly = report(&ctx.db, CatalogQuery::MonthlyApproachCount).await;

    assert_eq!(busiest.len(), 1);
    assert_eq!(texts(&busiest, "Month"), ["June"]);
    assert_eq!(integers(&busiest, "Approach Count"), [5]);

    assert_eq!(
        texts(&monthly, "Month"),
        ["January", "February", "March", "April", "May", "June", "July", "December"]
    );
    assert_eq!(integers(&monthly, "Approach Count"), [1, 1, 2, 1, 1, 5, 1, 1]);

    let max = integers(&monthly, "Approach Count").into_iter().max();
    assert_eq!(max, integers(&busiest, "Approach Count").first().copied());
}

#[tokio::test]
async fn fastest_ever_is_a_single_approach() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::FastestEver).await;

    assert_eq!(
        table.rows,
        vec![vec![
            Cell::Text("Ganymed".to_owned()),
            Cell::Float(80_100.0),
            Cell::Date(date(2027, 6, 1)),
        ]]
    );
}

#[tokio::test]
async fn largest_and_brightest() {
    let ctx = seeded().await;

    let largest = report(&ctx.db, CatalogQuery::MaxDiameter).await;
    assert_eq!(
        largest.rows,
        vec![vec![Cell::Text("Ganymed".to_owned()), Cell::Float(49.0)]]
    );

    let brightest = report(&ctx.db, CatalogQuery::HighestBrightness).await;
    assert_eq!(
        brightest.rows,
        vec![vec![Cell::Text("Ganymed".to_owned()), Cell::Float(9.3)]]
    );
}

#[tokio::test]
async fn getting_closer_lists_every_approach_in_order() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::GettingCloser).await;

    assert_eq!(table.len(), 13);
    let keys: Vec<_> = table
        .rows
        .iter()
        .map(|row| (row[0].to_string(), row[1].as_date()))
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[tokio::test]
async fn closest_approach_per_asteroid() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::ClosestApproach).await;

    assert_eq!(
        texts(&table, "Asteroid Name"),
        ["Apophis", "Bennu", "Toutatis", "Eros", "Ganymed"]
    );
    assert_eq!(
        texts(&table, "Date"),
        ["2025-04-10", "2026-06-03", "2026-03-15", "2026-07-20", "2027-06-01"]
    );
    assert_close(
        &floats(&table, "Closest Distance (km)"),
        &[38_000.0, 7_000_000.0, 9_000_000.0, 20_000_000.0, 30_000_000.0],
    );
}

#[tokio::test]
async fn velocity_over_50000() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::VelocityOver50000).await;

    assert_eq!(texts(&table, "Asteroid Name"), ["Ganymed", "Apophis", "Bennu"]);
    assert!(floats(&table, "Velocity (km/h)").iter().all(|&v| v > 50_000.0));
}

#[tokio::test]
async fn hazard_groups_render_yes_no() {
    let ctx = seeded().await;

    let counts = report(&ctx.db, CatalogQuery::HazardousVsNonHazardous).await;
    assert_eq!(texts(&counts, "Hazardous"), ["No", "Yes"]);
    assert_eq!(integers(&counts, "Count"), [3, 3]);

    let diameters = report(&ctx.db, CatalogQuery::AverageDiameterByHazard).await;
    assert_eq!(
        texts(&diameters, "Average Diameter of Hazardous/Non-Hazardous Asteroid"),
        ["No", "Yes"]
    );
    assert_close(&floats(&diameters, "Avg_Diameter_Km"), &[29.3, 2.21]);
}

#[tokio::test]
async fn near_passes() {
    let ctx = seeded().await;

    let moon = report(&ctx.db, CatalogQuery::CloserThanMoon).await;
    assert_eq!(texts(&moon, "Asteroid Name"), ["Apophis"]);
    assert!(floats(&moon, "Distance (LD)").iter().all(|&d| d < 1.0));

    let au = report(&ctx.db, CatalogQuery::Within005Au).await;
    assert_eq!(texts(&au, "Asteroid Name"), ["Apophis", "Bennu"]);
    assert_close(&floats(&au, "Distance (AU)"), &[0.000254, 0.0468]);
}

#[tokio::test]
async fn slowest_ascending() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::Slowest10Asteroid).await;

    assert_eq!(
        texts(&table, "Asteroid Name"),
        ["Eros", "Apophis", "Toutatis", "Bennu", "Ganymed"]
    );
    let velocities = floats(&table, "min_velocity");
    assert!(velocities.windows(2).all(|w| w[0] <= w[1]), "{velocities:?}");
}

#[tokio::test]
async fn year_wise_count() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::YearWiseAsteroidCount).await;

    assert_eq!(integers(&table, "Year"), [2025, 2026, 2027]);
    assert_eq!(integers(&table, "Asteroid Count"), [7, 5, 1]);
}

#[tokio::test]
async fn seen_only_once() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::AsteroidsSeenOnlyOnce).await;

    // Icarus has no approaches at all, so it is not listed
    assert_eq!(texts(&table, "Asteroid Name"), ["Ganymed", "Toutatis"]);
    assert!(integers(&table, "Asteroid_Count").iter().all(|&n| n == 1));
}

#[tokio::test]
async fn top_5_closest_hazardous() {
    let ctx = seeded().await;
    let table = report(&ctx.db, CatalogQuery::Top5ClosestHazardous).await;

    assert_eq!(table.len(), 5);
    assert_eq!(
        texts(&table, "Asteroid Name")[..3],
        ["Apophis", "Bennu", "Toutatis"]
    );
    assert!(texts(&table, "Asteroid Name")
        .iter()
        .all(|name| ["Apophis", "Bennu", "Toutatis"].contains(&name.as_str())));
    let distances = floats(&table, "Distance(Km)");
    assert!(distances.windows(2).all(|w| w[0] <= w[1]), "{distances:?}");
}

#[tokio::test]
async fn lookup_by_name() {
    let ctx = seeded().await;

    let table = catalog::run_by_name(&ctx.db, "busiest month").await.unwrap();
    assert_eq!(table.title, "Busiest Month");

    let err = catalog::run_by_name(&ctx.db, "Slowest Ever").await.unwrap_err();
    assert!(matches!(err, NeoErr::UnknownQuery(_)), "{err:?}");
}

#[tokio::test]
async fn execution_failure_is_reported_per_query() {
    let db = MockDatabase::new(DbBackend::Postgres)
        .append_query_errors([DbErr::Custom("relation \"asteroids\" does not exist".to_owned())])
        .into_connection();

    let err = catalog::run(&db, CatalogQuery::ApproachCount).await.unwrap_err();
    match err {
        NeoErr::QueryExecution { query, .. } => assert_eq!(query, "Approach Count"),
        other => panic!("unexpected {other:?}"),
    }
}
