use neo_tracker::{FilterCriteria, NeoErr, Session};

use super::print_table;
use crate::OutputFormat;

pub const NO_MATCHES: &str = "No asteroids found matching the criteria.";

pub async fn run_filter_command(
    session: &Session,
    criteria: &FilterCriteria,
    format: OutputFormat,
) -> Result<(), NeoErr> {
    let table = session.filter(criteria).await?;
    if table.is_empty() && format == OutputFormat::Table {
        eprintln!("{NO_MATCHES}");
    } else {
        print_table(&table, format);
    }

    Ok(())
}
