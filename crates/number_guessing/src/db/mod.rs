//! Database persistence layer for accounts, custom difficulties and game results.

mod error;
mod models;
mod repository;
mod schema;

pub use error::{DbError, DbErrorKind};
pub use models::{
    AggregatedStats, CustomDifficultyRow, GameStat, NewCustomDifficulty, NewGameStat, NewUser,
    User,
};
pub use repository::GameRepository;
