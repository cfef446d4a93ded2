//! Table definitions for bootstrapping an empty database.
//!
//! Loading data is out of scope; this only creates the two tables so that an
//! external loader (or a test) has somewhere to write.

use crate::entity::{asteroids, close_approach};
use sea_orm::sea_query::{
    ColumnDef, ForeignKey, ForeignKeyAction, Index, IndexCreateStatement, Table,
    TableCreateStatement,
};
use sea_orm::{ConnectionTrait, DbErr, ExecResult, StatementBuilder};
use tracing::info;

pub async fn create_tables<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    execute(db, &asteroids_table()).await?;
    execute(db, &close_approach_table()).await?;
    execute(db, &close_approach_index()).await?;
    info!("Tables `asteroids` and `close_approach` are ready");

    Ok(())
}

async fn execute<C, S>(db: &C, stmt: &S) -> Result<ExecResult, DbErr>
where
    C: ConnectionTrait,
    S: StatementBuilder,
{
    let builder = db.get_database_backend();
    db.execute(builder.build(stmt)).await
}

fn asteroids_table() -> TableCreateStatement {
    Table::create()
        .table(asteroids::Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(asteroids::Column::Id)
                .big_integer()
                .not_null()
                .primary_key(),
        )
        .col(ColumnDef::new(asteroids::Column::Name).string().not_null())
        .col(
            ColumnDef::new(asteroids::Column::AbsoluteMagnitudeH)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(asteroids::Column::EstimatedDiameterMinKm)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(asteroids::Column::EstimatedDiameterMaxKm)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(asteroids::Column::IsPotentiallyHazardousAsteroid)
                .boolean()
                .not_null(),
        )
        .to_owned()
}

// No primary key: the same asteroid/date pair may legitimately appear twice in a feed.
fn close_approach_table() -> TableCreateStatement {
    Table::create()
        .table(close_approach::Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(close_approach::Column::NeoReferenceId)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(close_approach::Column::CloseApproachDate)
                .date()
                .not_null(),
        )
        .col(
            ColumnDef::new(close_approach::Column::RelativeVelocityKmph)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(close_approach::Column::Astronomical)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(close_approach::Column::MissDistanceKm)
                .double()
                .not_null(),
        )
        .col(
            ColumnDef::new(close_approach::Column::MissDistanceLunar)
                .double()
                .not_null(),
        )
        .foreign_key(
            ForeignKey::create()
                .name("fk_close_approach_asteroids")
                .from(close_approach::Entity, close_approach::Column::NeoReferenceId)
                .to(asteroids::Entity, asteroids::Column::Id)
                .on_delete(ForeignKeyAction::Restrict),
        )
        .to_owned()
}

fn close_approach_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_close_approach_neo_reference_id")
        .table(close_approach::Entity)
        .col(close_approach::Column::NeoReferenceId)
        .if_not_exists()
        .to_owned()
}
