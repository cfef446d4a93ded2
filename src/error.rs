use sea_orm::DbErr;
use std::path::PathBuf;
use thiserror::Error;

/// An error from a tracker operation.
///
/// An empty result set is never an error: operations return `Ok` with an
/// empty [`ResultTable`](crate::ResultTable) instead.
#[derive(Error, Debug)]
pub enum NeoErr {
    /// The database could not be reached or refused the credentials
    #[error("Connection Error: {0}")]
    Connection(#[source] DbErr),
    /// A statement failed at the database layer, including decoding its rows
    #[error("Query Error: `{query}` failed: {source}")]
    QueryExecution {
        query: String,
        #[source]
        source: DbErr,
    },
    /// No catalog query is registered under this name
    #[error("Unknown query `{0}`")]
    UnknownQuery(String),
    /// The config file could not be read
    #[error("Config Error: cannot read `{}`: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML for [`Config`](crate::Config)
    #[error("Config Error: cannot parse `{}`: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// The config refers to an environment variable that is not set
    #[error("Config Error: environment variable `{0}` not set")]
    MissingEnv(String),
    /// The assembled database URL is malformed
    #[error("Config Error: invalid database URL: {0}")]
    InvalidUrl(String),
    /// Neither the command line, the environment nor a config file named a database
    #[error("Config Error: no database URL given; set DATABASE_URL or create neo-tracker.toml")]
    MissingDatabaseUrl,
}

impl NeoErr {
    pub(crate) fn query(query: impl Into<String>, source: DbErr) -> Self {
        Self::QueryExecution {
            query: query.into(),
            source,
        }
    }

    /// Whether the session cannot continue after this error.
    ///
    /// Connection and configuration failures end the session; a failed query
    /// or an unknown query name only fails the operation that raised it.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::QueryExecution { .. } | Self::UnknownQuery(_))
    }
}
