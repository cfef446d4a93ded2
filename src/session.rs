use crate::catalog::{self, CatalogQuery};
use crate::filter::{self, FilterCriteria};
use crate::{DatabaseConfig, NeoErr, ResultTable};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

/// One interactive session: a single database connection opened up front and
/// released when the session is closed or dropped.
#[derive(Debug)]
pub struct Session {
    db: DatabaseConnection,
}

impl Session {
    /// Connect and verify the database answers.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, NeoErr> {
        let options = config.connect_options()?;
        let db = Database::connect(options)
            .await
            .map_err(NeoErr::Connection)?;
        db.ping().await.map_err(NeoErr::Connection)?;
        info!(backend = ?db.get_database_backend(), "Session opened");

        Ok(Self { db })
    }

    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn filter(&self, criteria: &FilterCriteria) -> Result<ResultTable, NeoErr> {
        filter::run(&self.db, criteria).await
    }

    pub async fn catalog(&self, query: CatalogQuery) -> Result<ResultTable, NeoErr> {
        catalog::run(&self.db, query).await
    }

    pub async fn close(self) -> Result<(), NeoErr> {
        self.db.close().await.map_err(NeoErr::Connection)?;
        info!("Session closed");

        Ok(())
    }
}
