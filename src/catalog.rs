//! Catalog Query Registry: canned analytical reports selected by name.
//!
//! Each [`CatalogQuery`] maps to a [`QueryDef`] in a static registry: the
//! report's display name, its column labels, and a pure function rendering
//! its SQL for a database backend. None of the reports take parameters and
//! none of them write.

use crate::table::{CellKind, ColumnSpec, ResultTable};
use crate::NeoErr;
use sea_orm::{ConnectionTrait, DbBackend, Statement};
use std::fmt;
use std::str::FromStr;
use strum::{EnumCount, EnumIter, IntoEnumIterator};
use tracing::{debug, instrument};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum CatalogQuery {
    ApproachCount,
    AverageVelocity,
    Top10Fastest,
    HazardousMoreThan3Times,
    BusiestMonth,
    FastestEver,
    MaxDiameter,
    GettingCloser,
    ClosestApproach,
    VelocityOver50000,
    MonthlyApproachCount,
    HighestBrightness,
    HazardousVsNonHazardous,
    CloserThanMoon,
    Within005Au,
    Slowest10Asteroid,
    YearWiseAsteroidCount,
    AsteroidsSeenOnlyOnce,
    AverageDiameterByHazard,
    Top5ClosestHazardous,
}

pub struct QueryDef {
    pub query: CatalogQuery,
    pub name: &'static str,
    pub columns: &'static [ColumnSpec],
    sql: fn(&Dialect) -> String,
}

impl fmt::Debug for QueryDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryDef")
            .field("query", &self.query)
            .field("name", &self.name)
            .field("columns", &self.columns)
            .finish()
    }
}

impl QueryDef {
    pub fn sql(&self, backend: DbBackend) -> String {
        (self.sql)(&Dialect(backend))
    }
}

const fn text(label: &'static str) -> ColumnSpec {
    ColumnSpec::new(label, CellKind::Text)
}

const fn integer(label: &'static str) -> ColumnSpec {
    ColumnSpec::new(label, CellKind::Integer)
}

const fn float(label: &'static str) -> ColumnSpec {
    ColumnSpec::new(label, CellKind::Float)
}

const fn date(label: &'static str) -> ColumnSpec {
    ColumnSpec::new(label, CellKind::Date)
}

const fn hazard(label: &'static str) -> ColumnSpec {
    ColumnSpec::new(label, CellKind::Hazard)
}

/// Indexed by `CatalogQuery as usize`.
static REGISTRY: [QueryDef; CatalogQuery::COUNT] = [
    QueryDef {
        query: CatalogQuery::ApproachCount,
        name: "Approach Count",
        columns: &[text("Asteroid Name"), integer("Approach Count")],
        sql: sql::approach_count,
    },
    QueryDef {
        query: CatalogQuery::AverageVelocity,
        name: "Average Velocity",
        columns: &[text("Asteroid Name"), float("Avg Velocity (km/h)")],
        sql: sql::average_velocity,
    },
    QueryDef {
        query: CatalogQuery::Top10Fastest,
        name: "Top 10 Fastest",
        columns: &[text("Asteroid Name"), float("Max Velocity (km/h)")],
        sql: sql::top_10_fastest,
    },
    QueryDef {
        query: CatalogQuery::HazardousMoreThan3Times,
        name: "Hazardous >3 Times",
        columns: &[text("Asteroid Name"), integer("Approach Count")],
        sql: sql::hazardous_more_than_3_times,
    },
    QueryDef {
        query: CatalogQuery::BusiestMonth,
        name: "Busiest Month",
        columns: &[text("Month"), integer("Approach Count")],
        sql: sql::busiest_month,
    },
    QueryDef {
        query: CatalogQuery::FastestEver,
        name: "Fastest Ever",
        columns: &[text("Asteroid Name"), float("Velocity (km/h)"), date("Date")],
        sql: sql::fastest_ever,
    },
    QueryDef {
        query: CatalogQuery::MaxDiameter,
        name: "Max Diameter",
        columns: &[text("Asteroid Name"), float("Max Diameter (km)")],
        sql: sql::max_diameter,
    },
    QueryDef {
        query: CatalogQuery::GettingCloser,
        name: "Getting Closer",
        columns: &[text("Asteroid Name"), date("Date"), float("Miss Distance (km)")],
        sql: sql::getting_closer,
    },
    QueryDef {
        query: CatalogQuery::ClosestApproach,
        name: "Closest Approach",
        columns: &[
            text("Asteroid Name"),
            date("Date"),
            float("Closest Distance (km)"),
        ],
        sql: sql::closest_approach,
    },
    QueryDef {
        query: CatalogQuery::VelocityOver50000,
        name: "Velocity > 50,000",
        columns: &[text("Asteroid Name"), float("Velocity (km/h)")],
        sql: sql::velocity_over_50000,
    },
    QueryDef {
        query: CatalogQuery::MonthlyApproachCount,
        name: "Monthly Approach Count",
        columns: &[text("Month"), integer("Approach Count")],
        sql: sql::monthly_approach_count,
    },
    QueryDef {
        query: CatalogQuery::HighestBrightness,
        name: "Highest Brightness",
        columns: &[text("Asteroid Name"), float("Brightness (mag)")],
        sql: sql::highest_brightness,
    },
    QueryDef {
        query: CatalogQuery::HazardousVsNonHazardous,
        name: "Hazardous vs Non-Hazardous",
        columns: &[hazard("Hazardous"), integer("Count")],
        sql: sql::hazardous_vs_non_hazardous,
    },
    QueryDef {
        query: CatalogQuery::CloserThanMoon,
        name: "Closer than Moon",
        columns: &[text("Asteroid Name"), date("Date"), float("Distance (LD)")],
        sql: sql::closer_than_moon,
    },
    QueryDef {
        query: CatalogQuery::Within005Au,
        name: "Within 0.05 AU",
        columns: &[text("Asteroid Name"), date("Date"), float("Distance (AU)")],
        sql: sql::within_0_05_au,
    },
    QueryDef {
        query: CatalogQuery::Slowest10Asteroid,
        name: "Slowest 10 Asteroid",
        columns: &[text("Asteroid Name"), float("min_velocity")],
        sql: sql::slowest_10_asteroid,
    },
    QueryDef {
        query: CatalogQuery::YearWiseAsteroidCount,
        name: "Year-wise Asteroid Count",
        columns: &[integer("Year"), integer("Asteroid Count")],
        sql: sql::year_wise_asteroid_count,
    },
    QueryDef {
        query: CatalogQuery::AsteroidsSeenOnlyOnce,
        name: "Asteroids Seen Only Once",
        columns: &[text("Asteroid Name"), integer("Asteroid_Count")],
        sql: sql::asteroids_seen_only_once,
    },
    QueryDef {
        query: CatalogQuery::AverageDiameterByHazard,
        name: "Average Diameter of Hazardous vs Non-Hazardous",
        columns: &[
            hazard("Average Diameter of Hazardous/Non-Hazardous Asteroid"),
            float("Avg_Diameter_Km"),
        ],
        sql: sql::average_diameter_by_hazard,
    },
    QueryDef {
        query: CatalogQuery::Top5ClosestHazardous,
        name: "Top 5 Closest Hazardous Asteroids",
        columns: &[text("Asteroid Name"), date("Approach Date"), float("Distance(Km)")],
        sql: sql::top_5_closest_hazardous,
    },
];

impl CatalogQuery {
    /// Every report, in menu order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }

    pub fn def(self) -> &'static QueryDef {
        &REGISTRY[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn columns(self) -> &'static [ColumnSpec] {
        self.def().columns
    }

    pub fn sql(self, backend: DbBackend) -> String {
        self.def().sql(backend)
    }

    pub fn statement(self, backend: DbBackend) -> Statement {
        Statement::from_string(backend, self.sql(backend))
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::iter().find(|query| query.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogQuery {
    type Err = NeoErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| NeoErr::UnknownQuery(s.to_owned()))
    }
}

/// Run one canned report; its rows come back unmodified.
#[instrument(level = "debug", skip(db))]
pub async fn run<C>(db: &C, query: CatalogQuery) -> Result<ResultTable, NeoErr>
where
    C: ConnectionTrait,
{
    let stmt = query.statement(db.get_database_backend());
    debug!("{}", stmt.sql);

    let results = db
        .query_all(stmt)
        .await
        .map_err(|err| NeoErr::query(query.name(), err))?;
    ResultTable::from_query_results(query.name(), query.columns(), &results)
        .map_err(|err| NeoErr::query(query.name(), err))
}

/// Run a report by display name.
pub async fn run_by_name<C>(db: &C, name: &str) -> Result<ResultTable, NeoErr>
where
    C: ConnectionTrait,
{
    run(db, name.parse()?).await
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Backend-specific spellings of the date and rounding functions the reports use.
#[derive(Copy, Clone, Debug)]
pub struct Dialect(pub DbBackend);

impl Dialect {
    pub fn month_number(&self, col: &str) -> String {
        match self.0 {
            DbBackend::MySql => format!("MONTH({col})"),
            DbBackend::Postgres => format!("CAST(EXTRACT(MONTH FROM {col}) AS INTEGER)"),
            _ => format!("CAST(strftime('%m', {col}) AS INTEGER)"),
        }
    }

    pub fn month_name(&self, col: &str) -> String {
        match self.0 {
            DbBackend::MySql => format!("MONTHNAME({col})"),
            DbBackend::Postgres => format!("TO_CHAR({col}, 'FMMonth')"),
            _ => {
                let arms: String = MONTH_NAMES
                    .iter()
                    .enumerate()
                    .map(|(i, name)| format!(" WHEN {} THEN '{name}'", i + 1))
                    .collect();
                format!("CASE {}{arms} END", self.month_number(col))
            }
        }
    }

    pub fn year(&self, col: &str) -> String {
        match self.0 {
            DbBackend::MySql => format!("YEAR({col})"),
            DbBackend::Postgres => format!("CAST(EXTRACT(YEAR FROM {col}) AS BIGINT)"),
            _ => format!("CAST(strftime('%Y', {col}) AS INTEGER)"),
        }
    }

    /// `expr` rounded to two decimal places, as a double.
    pub fn round2(&self, expr: &str) -> String {
        match self.0 {
            DbBackend::Postgres => {
                format!("CAST(ROUND(CAST({expr} AS NUMERIC), 2) AS DOUBLE PRECISION)")
            }
            _ => format!("ROUND({expr}, 2)"),
        }
    }
}

mod sql {
    use super::Dialect;

    const JOINED: &str = "FROM asteroids a JOIN close_approach c ON a.id = c.neo_reference_id";

    pub fn approach_count(_: &Dialect) -> String {
        format!(
            "SELECT a.name, COUNT(*) AS approach_count {JOINED} \
             GROUP BY a.name ORDER BY approach_count DESC, a.name"
        )
    }

    pub fn average_velocity(d: &Dialect) -> String {
        format!(
            "SELECT a.name, {} AS avg_velocity {JOINED} \
             GROUP BY a.name ORDER BY avg_velocity DESC, a.name",
            d.round2("AVG(c.relative_velocity_kmph)")
        )
    }

    pub fn top_10_fastest(_: &Dialect) -> String {
        format!(
            "SELECT a.name, MAX(c.relative_velocity_kmph) AS max_velocity {JOINED} \
             GROUP BY a.name ORDER BY max_velocity DESC, a.name LIMIT 10"
        )
    }

    pub fn hazardous_more_than_3_times(_: &Dialect) -> String {
        format!(
            "SELECT a.name, COUNT(*) AS approach_count {JOINED} \
             WHERE a.is_potentially_hazardous_asteroid = TRUE \
             GROUP BY a.name HAVING COUNT(*) > 3 \
             ORDER BY approach_count DESC, a.name"
        )
    }

    pub fn busiest_month(d: &Dialect) -> String {
        let number = d.month_number("close_approach_date");
        format!(
            "SELECT {} AS month_name, COUNT(*) AS approach_count FROM close_approach \
             GROUP BY {number}, {} ORDER BY approach_count DESC, {number} LIMIT 1",
            d.month_name("close_approach_date"),
            d.month_name("close_approach_date"),
        )
    }

    pub fn fastest_ever(_: &Dialect) -> String {
        format!(
            "SELECT a.name, c.relative_velocity_kmph, c.close_approach_date {JOINED} \
             ORDER BY c.relative_velocity_kmph DESC LIMIT 1"
        )
    }

    pub fn max_diameter(_: &Dialect) -> String {
        "SELECT name, estimated_diameter_max_km FROM asteroids \
         ORDER BY estimated_diameter_max_km DESC LIMIT 1"
            .to_owned()
    }

    pub fn getting_closer(_: &Dialect) -> String {
        format!(
            "SELECT a.name, c.close_approach_date, c.miss_distance_km {JOINED} \
             ORDER BY a.name, c.close_approach_date"
        )
    }

    pub fn closest_approach(_: &Dialect) -> String {
        format!(
            "SELECT a.name, c.close_approach_date, c.miss_distance_km {JOINED} \
             WHERE (a.id, c.miss_distance_km) IN (\
             SELECT neo_reference_id, MIN(miss_distance_km) FROM close_approach \
             GROUP BY neo_reference_id) \
             ORDER BY c.miss_distance_km ASC"
        )
    }

    pub fn velocity_over_50000(_: &Dialect) -> String {
        format!(
            "SELECT DISTINCT a.name, c.relative_velocity_kmph {JOINED} \
             WHERE c.relative_velocity_kmph > 50000 \
             ORDER BY c.relative_velocity_kmph DESC, a.name"
        )
    }

    pub fn monthly_approach_count(d: &Dialect) -> String {
        let number = d.month_number("close_approach_date");
        format!(
            "SELECT {} AS month_name, COUNT(*) AS approach_count FROM close_approach \
             GROUP BY {number}, {} ORDER BY {number}",
            d.month_name("close_approach_date"),
            d.month_name("close_approach_date"),
        )
    }

    pub fn highest_brightness(_: &Dialect) -> String {
        "SELECT name, absolute_magnitude_h FROM asteroids \
         ORDER BY absolute_magnitude_h ASC LIMIT 1"
            .to_owned()
    }

    pub fn hazardous_vs_non_hazardous(_: &Dialect) -> String {
        "SELECT is_potentially_hazardous_asteroid, COUNT(*) AS asteroid_count FROM asteroids \
         GROUP BY is_potentially_hazardous_asteroid \
         ORDER BY is_potentially_hazardous_asteroid"
            .to_owned()
    }

    pub fn closer_than_moon(_: &Dialect) -> String {
        format!(
            "SELECT a.name, c.close_approach_date, c.miss_distance_lunar {JOINED} \
             WHERE c.miss_distance_lunar < 1 ORDER BY c.miss_distance_lunar"
        )
    }

    pub fn within_0_05_au(_: &Dialect) -> String {
        format!(
            "SELECT a.name, c.close_approach_date, c.astronomical {JOINED} \
             WHERE c.astronomical < 0.05 ORDER BY c.astronomical"
        )
    }

    pub fn slowest_10_asteroid(_: &Dialect) -> String {
        format!(
            "SELECT a.name, MIN(c.relative_velocity_kmph) AS min_velocity {JOINED} \
             GROUP BY a.name ORDER BY min_velocity ASC, a.name LIMIT 10"
        )
    }

    pub fn year_wise_asteroid_count(d: &Dialect) -> String {
        let year = d.year("close_approach_date");
        format!(
            "SELECT {year} AS approach_year, COUNT(*) AS approach_count FROM close_approach \
             GROUP BY {year} ORDER BY {year}"
        )
    }

    pub fn asteroids_seen_only_once(_: &Dialect) -> String {
        format!(
            "SELECT a.name, COUNT(*) AS approach_count {JOINED} \
             GROUP BY a.name HAVING COUNT(*) = 1 ORDER BY a.name"
        )
    }

    pub fn average_diameter_by_hazard(d: &Dialect) -> String {
        format!(
            "SELECT is_potentially_hazardous_asteroid, {} AS avg_diameter FROM asteroids \
             GROUP BY is_potentially_hazardous_asteroid \
             ORDER BY is_potentially_hazardous_asteroid",
            d.round2("AVG(estimated_diameter_max_km)")
        )
    }

    pub fn top_5_closest_hazardous(_: &Dialect) -> String {
        format!(
            "SELECT a.name, c.close_approach_date, c.miss_distance_km {JOINED} \
             WHERE a.is_potentially_hazardous_asteroid = TRUE \
             ORDER BY c.miss_distance_km ASC LIMIT 5"
        )
    }
}
