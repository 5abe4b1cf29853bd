//! Account management business logic layer.

use strictly_guessing::{Difficulty, GameMode, GameOutcome, OutcomeKind};
use tracing::{debug, info, instrument};

use crate::{AggregatedStats, DbError, GameRepository, GameStat, NewGameStat, NewUser, User};

/// Service layer for account operations.
///
/// Wraps [`GameRepository`] with login, profile changes and game result
/// recording.
#[derive(Debug, Clone)]
pub struct ProfileService {
    repository: GameRepository,
}

impl ProfileService {
    /// Creates a new profile service backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        info!("Creating ProfileService");
        Self { repository }
    }

    /// Looks up an account by its login email.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn find_user(&self, email: &str) -> Result<Option<User>, DbError> {
        self.repository.get_user_by_email(email)
    }

    /// Registers a new account starting on `difficulty`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the email is already registered or a database error occurs.
    #[instrument(skip(self))]
    pub fn register(&self, email: String, username: String, difficulty: &str) -> Result<User, DbError> {
        info!(email = %email, "Registering new account");
        self.repository
            .create_user(NewUser::new(email, username, Some(difficulty.to_string())))
    }

    /// Changes an account's username.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the account does not exist or a database error occurs.
    #[instrument(skip(self))]
    pub fn change_username(&self, user_id: i32, username: &str) -> Result<User, DbError> {
        self.repository.update_username(user_id, username)
    }

    /// Makes `difficulty` the account's current difficulty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the account does not exist or a database error occurs.
    #[instrument(skip(self, difficulty), fields(difficulty = %difficulty.name()))]
    pub fn select_difficulty(&self, user_id: i32, difficulty: &Difficulty) -> Result<User, DbError> {
        self.repository
            .set_current_difficulty(user_id, difficulty.name())
    }

    /// Records a finished game for an account.
    ///
    /// Aborted games leave no trace and return `None`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn record_game_result(
        &self,
        user_id: i32,
        mode: GameMode,
        difficulty_name: &str,
        outcome: &GameOutcome,
    ) -> Result<Option<GameStat>, DbError> {
        if outcome.kind() == OutcomeKind::Aborted {
            debug!("Aborted game not recorded");
            return Ok(None);
        }
        debug!(kind = %outcome.kind(), "Recording game result");

        let rounds_played = i32::try_from(outcome.rounds_played())
            .map_err(|_| DbError::data("Rounds played does not fit the column"))?;
        let stat = NewGameStat::new(
            user_id,
            mode.to_string(),
            difficulty_name.to_string(),
            outcome.kind().to_string(),
            rounds_played,
        );

        self.repository.record_game(stat).map(Some)
    }

    /// Returns aggregated statistics for an account.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_stats(&self, user_id: i32) -> Result<AggregatedStats, DbError> {
        self.repository.get_aggregated_stats(user_id)
    }

    /// Returns every finished game for an account, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_history(&self, user_id: i32) -> Result<Vec<GameStat>, DbError> {
        self.repository.get_user_stats(user_id)
    }
}
