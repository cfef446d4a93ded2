use neo_tracker::{Config, DatabaseConfig, NeoErr, ResultTable, Session};
use std::fmt::Display;
use std::path::Path;
use std::{env, process::exit};
use tracing::debug;
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::{Cli, Commands, OutputFormat};

pub mod filter;
pub mod list;
pub mod query;
pub mod setup;

pub use filter::*;
pub use list::*;
pub use query::*;
pub use setup::*;

pub async fn run_command(cli: Cli) -> Result<(), NeoErr> {
    let Cli {
        database_url,
        config,
        format,
        command,
        ..
    } = cli;

    if let Commands::List = command {
        run_list_command(format);
        return Ok(());
    }

    let config = database_config(database_url, config.as_deref())?;
    let session = Session::open(&config).await?;

    let result = match command {
        Commands::Filter(args) => run_filter_command(&session, &args.criteria(), format).await,
        Commands::Query { names, all } => run_query_command(&session, &names, all, format).await,
        Commands::Setup => run_setup_command(&session).await,
        Commands::List => Ok(()),
    };

    // release the connection even when the command failed
    let closed = session.close().await;
    result.and(closed)
}

/// The database to use: an explicit URL wins, then an explicit config file,
/// then the nearest `neo-tracker.toml` above the working directory.
pub fn database_config(
    database_url: Option<String>,
    config_path: Option<&Path>,
) -> Result<DatabaseConfig, NeoErr> {
    if let Some(url) = database_url {
        return Ok(DatabaseConfig::from_url(url));
    }
    if let Some(path) = config_path {
        return Ok(Config::load(path)?.database);
    }

    let cwd = env::current_dir().map_err(|source| NeoErr::ConfigRead {
        path: ".".into(),
        source,
    })?;
    match Config::discover(&cwd)? {
        Some((path, config)) => {
            debug!(path = %path.display(), "Using config file");
            Ok(config.database)
        }
        None => Err(NeoErr::MissingDatabaseUrl),
    }
}

pub fn init_tracing(verbose: bool) {
    let filter = match verbose {
        true => "debug",
        false => "neo_tracker=info,neo_tracker_cli=info",
    };

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if verbose {
        let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(false)
            .without_time();
        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init()
    };
}

pub(crate) fn print_table(table: &ResultTable, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            println!("{}", table.title);
            println!();
            print!("{table}");
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "title": table.title,
                "columns": table.columns,
                "rows": table.to_json(),
            });
            println!("{output:#}");
        }
    }
}

pub fn handle_error<E>(error: E)
where
    E: Display,
{
    eprintln!("{error}");
    exit(1);
}
