use neo_tracker::{CatalogQuery, NeoErr, Session};
use tracing::warn;

use super::print_table;
use crate::OutputFormat;

/// Run each named report in turn. A report that fails is reported and
/// skipped; only a fatal error ends the run early.
pub async fn run_query_command(
    session: &Session,
    names: &[String],
    all: bool,
    format: OutputFormat,
) -> Result<(), NeoErr> {
    let selected: Vec<Result<CatalogQuery, NeoErr>> = if all {
        CatalogQuery::all().map(Ok).collect()
    } else {
        names.iter().map(|name| name.parse()).collect()
    };

    let mut failed = 0;
    for query in selected {
        let result = match query {
            Ok(query) => session.catalog(query).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(table) => {
                print_table(&table, format);
                if format == OutputFormat::Table {
                    println!();
                }
            }
            Err(err) if !err.is_fatal() => {
                eprintln!("{err}");
                failed += 1;
            }
            Err(err) => return Err(err),
        }
    }

    if failed > 0 {
        warn!("{failed} report(s) failed");
    }

    Ok(())
}
