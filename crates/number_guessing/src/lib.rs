//! Number Guessing - terminal number-guessing game.
//!
//! Accounts, custom difficulties and game statistics live in SQLite; the
//! game logic comes from [`strictly_guessing`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod console;
mod db;
mod difficulty_service;
pub mod input;
mod menus;
mod profile_service;
mod session;

pub use cli::{Cli, Command};
pub use config::{AppConfig, ConfigError};
pub use console::Console;
pub use db::{
    AggregatedStats, CustomDifficultyRow, DbError, DbErrorKind, GameRepository, GameStat,
    NewCustomDifficulty, NewGameStat, NewUser, User,
};
pub use difficulty_service::{DifficultyService, RegistryError};
pub use menus::{MenuController, Screen, ScreenTransition};
pub use profile_service::ProfileService;
pub use session::Session;
