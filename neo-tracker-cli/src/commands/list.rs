use neo_tracker::CatalogQuery;

use crate::OutputFormat;

pub fn run_list_command(format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            for query in CatalogQuery::all() {
                let labels: Vec<_> = query.columns().iter().map(|c| c.label).collect();
                println!("{query}: {}", labels.join(", "));
            }
        }
        OutputFormat::Json => {
            let reports: Vec<_> = CatalogQuery::all()
                .map(|query| {
                    let labels: Vec<_> = query.columns().iter().map(|c| c.label).collect();
                    serde_json::json!({ "name": query.name(), "columns": labels })
                })
                .collect();
            println!("{:#}", serde_json::Value::Array(reports));
        }
    }
}
