//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::BotConfig;

#[derive(Parser, Debug)]
#[command(name = "results-bot")]
#[command(about = "Grade 12 exam results bot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Do not start the HTTP health endpoint.
        #[arg(long)]
        no_health: bool,
    },
    /// Look up one result from the terminal, with the batch retry policy.
    Check {
        admission_no: String,
        first_name: String,
        /// Overrides the attempt budget (default 5).
        #[arg(short, long)]
        attempts: Option<u32>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from(["results-bot", "run", "--token", "t", "--no-health"]).unwrap();
        match cli.command {
            Commands::Run { token, no_health } => {
                assert_eq!(token.as_deref(), Some("t"));
                assert!(no_health);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_check() {
        let cli =
            Cli::try_parse_from(["results-bot", "check", "1234567890", "Abebe", "-a", "2"]).unwrap();
        match cli.command {
            Commands::Check {
                admission_no,
                first_name,
                attempts,
            } => {
                assert_eq!(admission_no, "1234567890");
                assert_eq!(first_name, "Abebe");
                assert_eq!(attempts, Some(2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_check_requires_both_arguments() {
        assert!(Cli::try_parse_from(["results-bot", "check", "1234567890"]).is_err());
    }
}
