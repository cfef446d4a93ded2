//! Filter Query Builder: one bounded join of asteroids with their approaches.
//!
//! Every bound is bound as a statement parameter; nothing from
//! [`FilterCriteria`] is ever spliced into SQL text.

use crate::entity::{asteroids, close_approach, prelude::Asteroids};
use crate::table::{Cell, CellKind, ColumnSpec, ResultTable};
use crate::NeoErr;
use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, RelationTrait, Select, Statement,
};
use tracing::{debug, instrument};

pub const TITLE: &str = "Filtered Asteroids";

pub const COLUMNS: [ColumnSpec; 8] = [
    ColumnSpec::new("Name", CellKind::Text),
    ColumnSpec::new("Magnitude", CellKind::Float),
    ColumnSpec::new("Min Diameter (km)", CellKind::Float),
    ColumnSpec::new("Max Diameter (km)", CellKind::Float),
    ColumnSpec::new("Hazardous", CellKind::Hazard),
    ColumnSpec::new("Date", CellKind::Date),
    ColumnSpec::new("Velocity (km/h)", CellKind::Float),
    ColumnSpec::new("Astronomical Unit", CellKind::Float),
];

/// Bounds for the filter query. All ranges are inclusive.
///
/// Bounds are not checked against each other: an inverted range simply
/// matches no rows.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCriteria {
    /// Lower bound on absolute magnitude
    pub min_magnitude: f64,
    /// Lower bound on the minimum estimated diameter, km
    pub min_diameter: f64,
    /// Upper bound on the maximum estimated diameter, km
    pub max_diameter: f64,
    /// Relative velocity, km/h
    pub velocity_range: (f64, f64),
    /// Upper bound on miss distance, AU
    pub astronomical_max: f64,
    /// Miss distance, lunar distances
    pub lunar_distance_range: (f64, f64),
    pub hazardous_only: bool,
    /// Approach date
    pub date_range: (NaiveDate, NaiveDate),
}

impl Default for FilterCriteria {
    /// The widest bounds the dataset spans.
    fn default() -> Self {
        Self {
            min_magnitude: 10.41,
            min_diameter: 0.0,
            max_diameter: 49.21,
            velocity_range: (1054.26, 186136.00),
            astronomical_max: 0.5,
            lunar_distance_range: (0.26, 194.46),
            hazardous_only: false,
            date_range: (
                NaiveDate::from_ymd_opt(2025, 5, 1).unwrap_or_default(),
                NaiveDate::from_ymd_opt(2027, 7, 29).unwrap_or_default(),
            ),
        }
    }
}

/// One matching approach, joined with its asteroid.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct FilteredApproach {
    pub name: String,
    pub absolute_magnitude_h: f64,
    pub estimated_diameter_min_km: f64,
    pub estimated_diameter_max_km: f64,
    pub is_potentially_hazardous_asteroid: bool,
    pub close_approach_date: NaiveDate,
    pub relative_velocity_kmph: f64,
    pub astronomical: f64,
}

impl FilteredApproach {
    pub fn into_cells(self) -> Vec<Cell> {
        vec![
            Cell::Text(self.name),
            Cell::Float(self.absolute_magnitude_h),
            Cell::Float(self.estimated_diameter_min_km),
            Cell::Float(self.estimated_diameter_max_km),
            Cell::Hazard(self.is_potentially_hazardous_asteroid),
            Cell::Date(self.close_approach_date),
            Cell::Float(self.relative_velocity_kmph),
            Cell::Float(self.astronomical),
        ]
    }
}

impl FilterCriteria {
    pub fn select(&self) -> Select<Asteroids> {
        let (start, end) = self.date_range;
        let (velocity_low, velocity_high) = self.velocity_range;
        let (lunar_low, lunar_high) = self.lunar_distance_range;

        Asteroids::find()
            .select_only()
            .column_as(asteroids::Column::Name, "name")
            .column_as(asteroids::Column::AbsoluteMagnitudeH, "absolute_magnitude_h")
            .column_as(
                asteroids::Column::EstimatedDiameterMinKm,
                "estimated_diameter_min_km",
            )
            .column_as(
                asteroids::Column::EstimatedDiameterMaxKm,
                "estimated_diameter_max_km",
            )
            .column_as(
                asteroids::Column::IsPotentiallyHazardousAsteroid,
                "is_potentially_hazardous_asteroid",
            )
            .column_as(
                close_approach::Column::CloseApproachDate,
                "close_approach_date",
            )
            .column_as(
                close_approach::Column::RelativeVelocityKmph,
                "relative_velocity_kmph",
            )
            .column_as(close_approach::Column::Astronomical, "astronomical")
            .join(
                JoinType::InnerJoin,
                asteroids::Relation::CloseApproach.def(),
            )
            .filter(close_approach::Column::CloseApproachDate.between(start, end))
            .filter(asteroids::Column::AbsoluteMagnitudeH.gte(self.min_magnitude))
            .filter(asteroids::Column::EstimatedDiameterMinKm.gte(self.min_diameter))
            .filter(asteroids::Column::EstimatedDiameterMaxKm.lte(self.max_diameter))
            .filter(close_approach::Column::RelativeVelocityKmph.between(velocity_low, velocity_high))
            .filter(close_approach::Column::Astronomical.lte(self.astronomical_max))
            .filter(close_approach::Column::MissDistanceLunar.between(lunar_low, lunar_high))
            .apply_if(self.hazardous_only.then_some(true), |query, hazardous| {
                query.filter(asteroids::Column::IsPotentiallyHazardousAsteroid.eq(hazardous))
            })
            .order_by_asc(close_approach::Column::CloseApproachDate)
            .order_by_asc(asteroids::Column::Name)
    }

    pub fn statement(&self, backend: DbBackend) -> Statement {
        self.select().build(backend)
    }
}

/// All approaches matching `criteria`, as typed rows.
#[instrument(level = "debug", skip(db))]
pub async fn find<C>(db: &C, criteria: &FilterCriteria) -> Result<Vec<FilteredApproach>, NeoErr>
where
    C: ConnectionTrait,
{
    debug!("{}", criteria.statement(db.get_database_backend()));
    criteria
        .select()
        .into_model::<FilteredApproach>()
        .all(db)
        .await
        .map_err(|err| NeoErr::query(TITLE, err))
}

/// All approaches matching `criteria`, as a labelled table.
pub async fn run<C>(db: &C, criteria: &FilterCriteria) -> Result<ResultTable, NeoErr>
where
    C: ConnectionTrait,
{
    let approaches = find(db, criteria).await?;
    let mut table = ResultTable::new(TITLE, &COLUMNS);
    table.rows = approaches
        .into_iter()
        .map(FilteredApproach::into_cells)
        .collect();
    Ok(table)
}
