use clap::Parser;
use dotenvy::dotenv;
use neo_tracker_cli::{handle_error, init_tracing, run_command, Cli};

#[tokio::main]
async fn main() {
    dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    run_command(cli).await.unwrap_or_else(handle_error);
}
