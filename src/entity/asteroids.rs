//! The `asteroids` table: one row per near-Earth object.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "asteroids")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    /// Lower is brighter.
    pub absolute_magnitude_h: f64,
    pub estimated_diameter_min_km: f64,
    pub estimated_diameter_max_km: f64,
    pub is_potentially_hazardous_asteroid: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::close_approach::Entity")]
    CloseApproach,
}

impl Related<super::close_approach::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CloseApproach.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
