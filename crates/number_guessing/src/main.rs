//! Number Guessing - command-line entry point.

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Parser;
use number_guessing::{
    AppConfig, Cli, Command, Console, DifficultyService, GameRepository, MenuController,
    ProfileService,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_guessing::DifficultyRegistry;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,number_guessing=info";
const RECENT_GAMES: usize = 10;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    }
    .with_overrides(cli.db_path.clone(), cli.seed);
    config.validate()?;

    initialize_tracing(&config)?;

    let repository = GameRepository::new(config.db_path().clone())?;
    repository.migrate()?;

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_play(&config, repository),
        Command::Difficulties { email } => list_difficulties(repository, &email),
        Command::Stats { email } => show_stats(repository, &email),
    }
}

/// Logs to the configured file, or to stderr.
fn initialize_tracing(config: &AppConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    match config.log_file() {
        Some(path) => {
            let log_file = std::fs::File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(log_file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    info!("Tracing initialized");
    Ok(())
}

/// Runs the interactive menus on stdin/stdout.
#[instrument(skip_all)]
fn run_play(config: &AppConfig, repository: GameRepository) -> Result<()> {
    let rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };

    let console = Console::new(std::io::stdin().lock(), std::io::stdout());
    let mut controller = MenuController::new(
        ProfileService::new(repository.clone()),
        DifficultyService::new(repository),
        console,
        rng,
        config.default_difficulty().clone(),
    );
    controller.run()
}

/// Prints built-in difficulties followed by the account's custom ones.
#[instrument(skip(repository))]
fn list_difficulties(repository: GameRepository, email: &str) -> Result<()> {
    let profiles = ProfileService::new(repository.clone());
    let Some(user) = profiles.find_user(email)? else {
        bail!("No account registered for {}", email);
    };

    let registry = DifficultyService::new(repository);
    println!("Built-in difficulties:");
    for difficulty in registry.list_builtins() {
        println!("  {}", difficulty);
    }

    let customs = registry.list_custom(*user.id())?;
    println!("Custom difficulties of {}:", user.username());
    if customs.is_empty() {
        println!("  (none)");
    }
    for difficulty in customs {
        println!("  {}", difficulty);
    }
    Ok(())
}

/// Prints aggregated statistics and the most recent games.
#[instrument(skip(repository))]
fn show_stats(repository: GameRepository, email: &str) -> Result<()> {
    let profiles = ProfileService::new(repository);
    let Some(user) = profiles.find_user(email)? else {
        bail!("No account registered for {}", email);
    };

    println!("Statistics for {}", user.username());
    println!("{}", profiles.get_stats(*user.id())?);

    let history = profiles.get_history(*user.id())?;
    if !history.is_empty() {
        println!("Recent games:");
    }
    for stat in history.iter().take(RECENT_GAMES) {
        println!(
            "  {} - {} - {} - {} after {} rounds",
            stat.played_at().format("%Y-%m-%d %H:%M"),
            stat.mode(),
            stat.difficulty_name(),
            stat.outcome(),
            stat.rounds_played()
        );
    }
    Ok(())
}
