//! Connection configuration.
//!
//! Settings come from a `neo-tracker.toml` file in the current directory or a
//! parent directory:
//!
//! ```toml
//! [database]
//! url = { env = "DATABASE_URL" }
//! max_connections = 1
//! ```
//!
//! `url` may also be a literal string, or the parts of a URL with the
//! password read from the environment:
//!
//! ```toml
//! [database.url]
//! host = "localhost"
//! user = "root"
//! password_env = "NEO_DB_PASSWORD"
//! database = "nasa_asteroids"
//! ```

use crate::NeoErr;
use sea_orm::ConnectOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};
use url::Url;

pub const CONFIG_FILE_NAME: &str = "neo-tracker.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DatabaseConfig {
    pub url: DatabaseUrl,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 {
    1
}

fn default_connect_timeout_secs() -> u64 {
    8
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DatabaseUrl {
    Direct(String),
    FromEnv { env: String },
    Parts(UrlParts),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UrlParts {
    #[serde(default = "default_scheme")]
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    pub password_env: Option<String>,
    pub database: String,
}

fn default_scheme() -> String {
    "mysql".to_owned()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, NeoErr> {
        let content = fs::read_to_string(path).map_err(|source| NeoErr::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, NeoErr> {
        toml::from_str(content).map_err(|source| NeoErr::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    /// Load the nearest config file, searching from `start` up to the root.
    pub fn discover(start: &Path) -> Result<Option<(PathBuf, Self)>, NeoErr> {
        match find_config_file(start) {
            Some(path) => {
                let config = Self::load(&path)?;
                Ok(Some((path, config)))
            }
            None => Ok(None),
        }
    }
}

fn find_config_file(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

impl DatabaseConfig {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: DatabaseUrl::Direct(url.into()),
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            sqlx_logging: false,
        }
    }

    pub fn connect_options(&self) -> Result<ConnectOptions, NeoErr> {
        let mut opt = ConnectOptions::new(self.url.resolve()?);
        opt.max_connections(self.max_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(log::LevelFilter::Debug);
        Ok(opt)
    }
}

impl DatabaseUrl {
    pub fn resolve(&self) -> Result<String, NeoErr> {
        match self {
            Self::Direct(url) => Ok(url.clone()),
            Self::FromEnv { env } => read_env(env),
            Self::Parts(parts) => parts.to_url(),
        }
    }
}

impl UrlParts {
    pub fn to_url(&self) -> Result<String, NeoErr> {
        let invalid = |what: &str| NeoErr::InvalidUrl(format!("{what} rejected for `{}`", self.host));

        let mut url = Url::parse(&format!("{}://{}", self.scheme, self.host))
            .map_err(|e| NeoErr::InvalidUrl(e.to_string()))?;
        url.set_port(self.port).map_err(|_| invalid("port"))?;
        url.set_username(&self.user).map_err(|_| invalid("user"))?;
        if let Some(var) = &self.password_env {
            let password = read_env(var)?;
            url.set_password(Some(&password))
                .map_err(|_| invalid("password"))?;
        }
        url.set_path(&self.database);
        Ok(url.to_string())
    }
}

fn read_env(var: &str) -> Result<String, NeoErr> {
    env::var(var).map_err(|_| NeoErr::MissingEnv(var.to_owned()))
}
