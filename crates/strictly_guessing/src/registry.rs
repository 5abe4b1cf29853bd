//! The boundary between the game and wherever custom difficulties are stored.

use tracing::instrument;

use crate::{Difficulty, DifficultyDraft, DifficultyId, ValidationError};

/// Identifier of the account that owns custom difficulties.
pub type AccountId = i32;

/// Lists, creates and deletes difficulties for an account.
///
/// Implementations validate drafts with [`DifficultyDraft::validate`] against
/// [`DifficultyRegistry::list_all`] before writing anything.
pub trait DifficultyRegistry {
    /// Storage or lookup failure, also carrying validation failures.
    type Error: std::error::Error + From<ValidationError>;

    /// Built-in difficulties in display order.
    fn list_builtins(&self) -> Vec<Difficulty> {
        Difficulty::builtins()
    }

    /// The account's custom difficulties in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    fn list_custom(&self, account: AccountId) -> Result<Vec<Difficulty>, Self::Error>;

    /// Validates and stores a new custom difficulty.
    ///
    /// # Errors
    ///
    /// Returns the validation failure, or a storage error. Nothing is written
    /// on failure.
    fn create_custom(
        &self,
        account: AccountId,
        draft: DifficultyDraft,
    ) -> Result<Difficulty, Self::Error>;

    /// Removes one of the account's custom difficulties.
    ///
    /// # Errors
    ///
    /// Returns an error if the difficulty does not exist for the account.
    fn delete_custom(&self, account: AccountId, id: DifficultyId) -> Result<(), Self::Error>;

    /// Built-ins followed by the account's customs.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    #[instrument(skip(self))]
    fn list_all(&self, account: AccountId) -> Result<Vec<Difficulty>, Self::Error> {
        let mut all = self.list_builtins();
        all.extend(self.list_custom(account)?);
        Ok(all)
    }

    /// Looks up a difficulty by exact name among built-ins and the account's customs.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    #[instrument(skip(self))]
    fn find(&self, account: AccountId, name: &str) -> Result<Option<Difficulty>, Self::Error> {
        Ok(self
            .list_all(account)?
            .into_iter()
            .find(|difficulty| difficulty.name() == name))
    }
}
