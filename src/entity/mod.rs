//! SeaORM entities for the NEO catalog tables.

pub mod asteroids;
pub mod close_approach;
pub mod prelude;
