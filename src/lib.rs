//! Query a catalog of near-Earth asteroid close approaches.
//!
//! The catalog lives in two relational tables, `asteroids` and
//! `close_approach`, read through [SeaORM](https://www.sea-ql.org/SeaORM).
//! Two kinds of operation are offered:
//!
//! * [`filter`]: one join of both tables, bounded by a [`FilterCriteria`];
//! * [`catalog`]: a fixed menu of canned reports, picked by [`CatalogQuery`].
//!
//! Both return a [`ResultTable`] of labelled columns and typed rows. An empty
//! table means nothing matched; failures are [`NeoErr`]s.
//!
//! ```no_run
//! use neo_tracker::{CatalogQuery, DatabaseConfig, FilterCriteria, NeoErr, Session};
//!
//! # async fn run() -> Result<(), NeoErr> {
//! let session = Session::open(&DatabaseConfig::from_url("mysql://root@localhost/nasa_asteroids")).await?;
//!
//! let approaches = session
//!     .filter(&FilterCriteria {
//!         hazardous_only: true,
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{approaches}");
//!
//! let fastest = session.catalog(CatalogQuery::Top10Fastest).await?;
//! println!("{fastest}");
//!
//! session.close().await
//! # }
//! ```

#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod config;
pub mod entity;
pub mod error;
pub mod filter;
pub mod schema;
mod session;
pub mod table;

pub use catalog::{CatalogQuery, Dialect, QueryDef};
pub use config::{Config, DatabaseConfig, DatabaseUrl};
pub use error::NeoErr;
pub use filter::{FilterCriteria, FilteredApproach};
pub use session::Session;
pub use table::{Cell, CellKind, ColumnSpec, ResultTable};

pub use sea_orm;
