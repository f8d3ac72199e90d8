//! Binary for the results bot.

use anyhow::Result;
use clap::Parser;
use results_bot::{load_config, run_bot, run_check, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, no_health } => {
            let config = load_config(token)?;
            run_bot(config, !no_health).await
        }
        Commands::Check {
            admission_no,
            first_name,
            attempts,
        } => run_check(&admission_no, &first_name, attempts).await,
    }
}
