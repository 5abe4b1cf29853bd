//! Command-line interface for number_guessing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Number Guessing - guess the computer's number, or let it guess yours
#[derive(Parser, Debug)]
#[command(name = "number_guessing")]
#[command(about = "Terminal number-guessing game", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the database file (created if it doesn't exist)
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Seed for the computer's secret numbers
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play interactively
    Play,

    /// List the built-in difficulties and an account's custom ones
    Difficulties {
        /// Account email
        #[arg(long)]
        email: String,
    },

    /// Show an account's game statistics
    Stats {
        /// Account email
        #[arg(long)]
        email: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_is_default() {
        let cli = Cli::try_parse_from(["number_guessing"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "number_guessing",
            "stats",
            "--email",
            "a@b.co",
            "--db-path",
            "x.db",
            "--seed",
            "3",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Stats {
                email: "a@b.co".to_string()
            })
        );
        assert_eq!(cli.db_path.as_deref(), Some("x.db"));
        assert_eq!(cli.seed, Some(3));
    }

    #[test]
    fn test_difficulties_requires_email() {
        assert!(Cli::try_parse_from(["number_guessing", "difficulties"]).is_err());
    }
}
