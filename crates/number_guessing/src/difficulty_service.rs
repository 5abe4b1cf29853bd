//! Persistent difficulty registry backed by the game database.

use derive_more::{Display, Error, From};
use strictly_guessing::{
    AccountId, Difficulty, DifficultyDraft, DifficultyId, DifficultyRegistry, ValidationError,
};
use tracing::{debug, info, instrument, warn};

use crate::{DbError, GameRepository, NewCustomDifficulty};

/// Failure of a registry operation.
#[derive(Debug, Clone, Display, Error, From)]
pub enum RegistryError {
    /// A custom difficulty broke a creation rule.
    #[display("{}", _0)]
    Validation(ValidationError),

    /// The account has no custom difficulty with this id.
    #[display("Custom difficulty {} not found", id)]
    #[from(ignore)]
    NotFound {
        /// Requested id.
        id: DifficultyId,
    },

    /// No built-in or custom difficulty has this name.
    #[display("Difficulty '{}' not found", name)]
    #[from(ignore)]
    UnknownName {
        /// Requested name.
        name: String,
    },

    /// Storage failed.
    #[display("{}", _0)]
    Db(DbError),
}

/// Built-ins plus per-account custom difficulties stored in SQLite.
#[derive(Debug, Clone)]
pub struct DifficultyService {
    repository: GameRepository,
}

impl DifficultyService {
    /// Creates a registry backed by the given repository.
    #[instrument(skip(repository))]
    pub fn new(repository: GameRepository) -> Self {
        info!("Creating DifficultyService");
        Self { repository }
    }

    /// Resolves a stored difficulty name, falling back to `fallback`.
    ///
    /// Stale names (for example a deleted custom difficulty) resolve to the
    /// fallback.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownName`] if the fallback is not a
    /// built-in, or a storage error.
    #[instrument(skip(self))]
    pub fn resolve(
        &self,
        account: AccountId,
        name: Option<&str>,
        fallback: &str,
    ) -> Result<Difficulty, RegistryError> {
        if let Some(name) = name {
            if let Some(difficulty) = self.find(account, name)? {
                return Ok(difficulty);
            }
            warn!(name = %name, fallback = %fallback, "Stored difficulty no longer exists");
        }
        Difficulty::builtin(fallback).ok_or_else(|| RegistryError::UnknownName {
            name: fallback.to_string(),
        })
    }
}

impl DifficultyRegistry for DifficultyService {
    type Error = RegistryError;

    #[instrument(skip(self))]
    fn list_custom(&self, account: AccountId) -> Result<Vec<Difficulty>, RegistryError> {
        let rows = self.repository.list_custom_difficulties(account)?;
        let difficulties = rows
            .iter()
            .map(|row| row.to_difficulty())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(difficulties)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    fn create_custom(
        &self,
        account: AccountId,
        draft: DifficultyDraft,
    ) -> Result<Difficulty, RegistryError> {
        let taken = self.list_all(account)?;
        draft.validate(&taken)?;

        let row = NewCustomDifficulty::from_draft(account, &draft)?;
        let stored = self.repository.insert_custom_difficulty(row)?;
        let difficulty = stored.to_difficulty()?;

        info!(id = stored.id(), name = %difficulty.name(), "Custom difficulty created");
        Ok(difficulty)
    }

    #[instrument(skip(self))]
    fn delete_custom(&self, account: AccountId, id: DifficultyId) -> Result<(), RegistryError> {
        match self.repository.delete_custom_difficulty(account, id)? {
            0 => Err(RegistryError::NotFound { id }),
            count => {
                debug!(count, "Custom difficulty removed");
                Ok(())
            }
        }
    }
}
