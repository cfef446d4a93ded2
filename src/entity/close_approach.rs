//! The `close_approach` table: many approaches per asteroid.
//!
//! `(neo_reference_id, close_approach_date)` is the logical identity of a row.
//! The database does not enforce it as unique.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "close_approach")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub neo_reference_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub close_approach_date: Date,
    pub relative_velocity_kmph: f64,
    /// Miss distance in astronomical units.
    pub astronomical: f64,
    pub miss_distance_km: f64,
    /// Miss distance in lunar distances.
    pub miss_distance_lunar: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asteroids::Entity",
        from = "Column::NeoReferenceId",
        to = "super::asteroids::Column::Id"
    )]
    Asteroid,
}

impl Related<super::asteroids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asteroid.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
