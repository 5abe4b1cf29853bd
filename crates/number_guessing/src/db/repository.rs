//! Database repository for accounts, custom difficulties and game statistics.

use chrono::Utc;
use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use strictly_guessing::OutcomeKind;
use tracing::{debug, info, instrument, warn};

use crate::db::{
    AggregatedStats, CustomDifficultyRow, DbError, DbErrorKind, GameStat, NewCustomDifficulty,
    NewGameStat, NewUser, User, schema,
};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Database repository for account and game operations.
///
/// Opens one connection per call.
#[derive(Debug, Clone)]
pub struct GameRepository {
    db_path: String,
}

impl GameRepository {
    /// Creates a new repository for the database at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new(DbErrorKind::Connection, "Database path is empty"));
        }
        info!(path = %db_path, "Creating GameRepository");
        Ok(Self { db_path })
    }

    /// Establishes a database connection with foreign keys enforced.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        let mut conn = SqliteConnection::establish(&self.db_path).map_err(|e| {
            DbError::new(
                DbErrorKind::Connection,
                format!("Failed to connect to '{}': {}", self.db_path, e),
            )
        })?;
        diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;
        Ok(conn)
    }

    /// Applies any pending embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a migration fails.
    #[instrument(skip(self))]
    pub fn migrate(&self) -> Result<(), DbError> {
        let mut conn = self.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| {
                DbError::new(DbErrorKind::Migration, format!("Migrations failed: {}", e))
            })?;
        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Accounts
    // ─────────────────────────────────────────────────────────────

    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the email is already registered or a database error occurs.
    #[instrument(skip(self, new_user))]
    pub fn create_user(&self, new_user: NewUser) -> Result<User, DbError> {
        let mut conn = self.connection()?;

        let user = diesel::insert_into(schema::users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        info!(user_id = user.id(), username = %user.username(), "User created");
        Ok(user)
    }

    /// Gets an account by email. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let mut conn = self.connection()?;

        let user = schema::users::table
            .filter(schema::users::email.eq(email))
            .select(User::as_select())
            .first(&mut conn)
            .optional()?;

        debug!(found = user.is_some(), "User lookup by email");
        Ok(user)
    }

    /// Gets an account by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user(&self, user_id: i32) -> Result<Option<User>, DbError> {
        let mut conn = self.connection()?;

        let user = schema::users::table
            .find(user_id)
            .select(User::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(user)
    }

    /// Changes an account's username.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the account does not exist or a database error occurs.
    #[instrument(skip(self))]
    pub fn update_username(&self, user_id: i32, username: &str) -> Result<User, DbError> {
        let mut conn = self.connection()?;

        let user = diesel::update(schema::users::table.find(user_id))
            .set((
                schema::users::username.eq(username),
                schema::users::updated_at.eq(Utc::now().naive_utc()),
            ))
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        info!(user_id, "Username updated");
        Ok(user)
    }

    /// Stores the name of an account's selected difficulty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the account does not exist or a database error occurs.
    #[instrument(skip(self))]
    pub fn set_current_difficulty(&self, user_id: i32, name: &str) -> Result<User, DbError> {
        let mut conn = self.connection()?;

        let user = diesel::update(schema::users::table.find(user_id))
            .set((
                schema::users::current_difficulty.eq(Some(name)),
                schema::users::updated_at.eq(Utc::now().naive_utc()),
            ))
            .returning(User::as_returning())
            .get_result(&mut conn)?;

        info!(user_id, difficulty = %name, "Current difficulty updated");
        Ok(user)
    }

    // ─────────────────────────────────────────────────────────────
    //  Custom difficulties
    // ─────────────────────────────────────────────────────────────

    /// Lists an account's custom difficulties in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list_custom_difficulties(&self, user_id: i32) -> Result<Vec<CustomDifficultyRow>, DbError> {
        let mut conn = self.connection()?;

        let rows = schema::custom_difficulties::table
            .filter(schema::custom_difficulties::user_id.eq(user_id))
            .order(schema::custom_difficulties::id.asc())
            .select(CustomDifficultyRow::as_select())
            .load(&mut conn)?;

        debug!(user_id, count = rows.len(), "Custom difficulties loaded");
        Ok(rows)
    }

    /// Stores a custom difficulty.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the name is taken for the account or a database error occurs.
    #[instrument(skip(self, row), fields(user_id = row.user_id(), name = %row.name()))]
    pub fn insert_custom_difficulty(
        &self,
        row: NewCustomDifficulty,
    ) -> Result<CustomDifficultyRow, DbError> {
        let mut conn = self.connection()?;

        let stored = diesel::insert_into(schema::custom_difficulties::table)
            .values(&row)
            .returning(CustomDifficultyRow::as_returning())
            .get_result(&mut conn)?;

        info!(id = stored.id(), "Custom difficulty stored");
        Ok(stored)
    }

    /// Deletes one of an account's custom difficulties, returning the rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_custom_difficulty(&self, user_id: i32, id: i32) -> Result<usize, DbError> {
        let mut conn = self.connection()?;

        let deleted = diesel::delete(
            schema::custom_difficulties::table
                .filter(schema::custom_difficulties::id.eq(id))
                .filter(schema::custom_difficulties::user_id.eq(user_id)),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            warn!(user_id, id, "No custom difficulty deleted");
        } else {
            info!(user_id, id, "Custom difficulty deleted");
        }
        Ok(deleted)
    }

    // ─────────────────────────────────────────────────────────────
    //  Game statistics
    // ─────────────────────────────────────────────────────────────

    /// Records a finished game.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self, stat), fields(user_id = stat.user_id(), mode = %stat.mode(), outcome = %stat.outcome()))]
    pub fn record_game(&self, stat: NewGameStat) -> Result<GameStat, DbError> {
        let mut conn = self.connection()?;

        let game_stat = diesel::insert_into(schema::game_stats::table)
            .values(&stat)
            .returning(GameStat::as_returning())
            .get_result(&mut conn)?;

        info!(
            stat_id = game_stat.id(),
            user_id = game_stat.user_id(),
            outcome = %game_stat.outcome(),
            "Game result recorded"
        );
        Ok(game_stat)
    }

    /// Gets all finished games for an account, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_user_stats(&self, user_id: i32) -> Result<Vec<GameStat>, DbError> {
        let mut conn = self.connection()?;

        let stats = schema::game_stats::table
            .filter(schema::game_stats::user_id.eq(user_id))
            .order((
                schema::game_stats::played_at.desc(),
                schema::game_stats::id.desc(),
            ))
            .select(GameStat::as_select())
            .load(&mut conn)?;

        debug!(user_id, count = stats.len(), "User stats loaded");
        Ok(stats)
    }

    /// Counts wins, losses and contradictions for an account.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_aggregated_stats(&self, user_id: i32) -> Result<AggregatedStats, DbError> {
        let stats = self.get_user_stats(user_id)?;

        let mut wins = 0;
        let mut losses = 0;
        let mut contradictions = 0;

        for stat in &stats {
            let (mode, kind) = match (stat.parse_mode(), stat.parse_outcome()) {
                (Ok(mode), Ok(kind)) => (mode, kind),
                _ => {
                    warn!(stat_id = stat.id(), mode = %stat.mode(), outcome = %stat.outcome(), "Unreadable game stat skipped");
                    continue;
                }
            };
            match kind {
                OutcomeKind::Contradiction => contradictions += 1,
                _ if kind.person_won(mode) => wins += 1,
                _ if kind.person_lost(mode) => losses += 1,
                _ => {}
            }
        }

        let aggregated =
            AggregatedStats::new(stats.len() as i32, wins, losses, contradictions);

        info!(
            user_id,
            total = stats.len(),
            wins,
            losses,
            contradictions,
            win_rate = %format!("{:.1}%", aggregated.win_rate()),
            "Aggregated stats computed"
        );
        Ok(aggregated)
    }
}
