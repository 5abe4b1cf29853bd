//! Database models and domain conversions.

use std::str::FromStr;

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use strictly_guessing::{Difficulty, DifficultyDraft, GameMode, OutcomeKind};
use tracing::instrument;

use crate::db::{DbError, schema};

/// Account database model.
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Selectable, Getters)]
#[diesel(table_name = schema::users)]
pub struct User {
    id: i32,
    email: String,
    username: String,
    current_difficulty: Option<String>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// Insertable account model.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::users)]
pub struct NewUser {
    email: String,
    username: String,
    current_difficulty: Option<String>,
}

/// Stored custom difficulty.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::custom_difficulties)]
#[diesel(belongs_to(User))]
pub struct CustomDifficultyRow {
    id: i32,
    user_id: i32,
    name: String,
    rounds: i32,
    min_value: i32,
    max_value: i32,
    created_at: NaiveDateTime,
}

impl CustomDifficultyRow {
    /// Rebuilds the difficulty, re-checking the field rules.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the stored row breaks a difficulty rule.
    #[instrument(skip(self), fields(id = self.id, name = %self.name))]
    pub fn to_difficulty(&self) -> Result<Difficulty, DbError> {
        let rounds = to_u32("rounds", self.rounds)?;
        let min_value = to_u32("min_value", self.min_value)?;
        let max_value = to_u32("max_value", self.max_value)?;
        Ok(Difficulty::restore(
            self.id,
            self.name.clone(),
            rounds,
            min_value,
            max_value,
        )?)
    }
}

#[track_caller]
fn to_u32(column: &str, value: i32) -> Result<u32, DbError> {
    u32::try_from(value).map_err(|_| DbError::data(format!("Negative {}: {}", column, value)))
}

#[track_caller]
fn to_i32(column: &str, value: u32) -> Result<i32, DbError> {
    i32::try_from(value).map_err(|_| DbError::data(format!("{} too large: {}", column, value)))
}

/// Insertable custom difficulty.
#[derive(Debug, Clone, Insertable, Getters)]
#[diesel(table_name = schema::custom_difficulties)]
pub struct NewCustomDifficulty {
    user_id: i32,
    name: String,
    rounds: i32,
    min_value: i32,
    max_value: i32,
}

impl NewCustomDifficulty {
    /// Converts a validated draft into a row for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a value does not fit the column type.
    #[instrument(skip(draft), fields(name = %draft.name))]
    pub fn from_draft(user_id: i32, draft: &DifficultyDraft) -> Result<Self, DbError> {
        Ok(Self {
            user_id,
            name: draft.name.clone(),
            rounds: to_i32("rounds", draft.rounds)?,
            min_value: to_i32("min_value", draft.min_value)?,
            max_value: to_i32("max_value", draft.max_value)?,
        })
    }
}

/// Finished game database model.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Selectable, Getters)]
#[diesel(table_name = schema::game_stats)]
#[diesel(belongs_to(User))]
pub struct GameStat {
    id: i32,
    user_id: i32,
    mode: String,
    difficulty_name: String,
    outcome: String,
    rounds_played: i32,
    played_at: NaiveDateTime,
}

impl GameStat {
    /// Parses the stored outcome string.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a known outcome.
    #[instrument(skip(self), fields(outcome = %self.outcome))]
    pub fn parse_outcome(&self) -> Result<OutcomeKind, DbError> {
        OutcomeKind::from_str(&self.outcome)
            .map_err(|_| DbError::data(format!("Invalid outcome: '{}'", self.outcome)))
    }

    /// Parses the stored mode string.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the string is not a known mode.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn parse_mode(&self) -> Result<GameMode, DbError> {
        GameMode::from_str(&self.mode)
            .map_err(|_| DbError::data(format!("Invalid mode: '{}'", self.mode)))
    }
}

/// Insertable finished game.
#[derive(Debug, Clone, Insertable, new, Getters)]
#[diesel(table_name = schema::game_stats)]
pub struct NewGameStat {
    user_id: i32,
    mode: String,
    difficulty_name: String,
    outcome: String,
    rounds_played: i32,
}

/// Aggregated statistics for an account, seen from the person's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, new)]
pub struct AggregatedStats {
    total_games: i32,
    wins: i32,
    losses: i32,
    contradictions: i32,
}

impl AggregatedStats {
    /// Win rate as a percentage (0.0–100.0).
    #[instrument(skip(self))]
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total_games as f64) * 100.0
        }
    }
}

impl std::fmt::Display for AggregatedStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Games: {} - Wins: {} - Losses: {} - Contradictions: {} - Win rate: {:.1}%",
            self.total_games,
            self.wins,
            self.losses,
            self.contradictions,
            self.win_rate()
        )
    }
}
