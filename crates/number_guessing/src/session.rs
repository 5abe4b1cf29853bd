//! The logged-in account and its selected difficulty.

use derive_getters::Getters;
use derive_new::new;
use strictly_guessing::{AccountId, Difficulty};
use tracing::{debug, instrument};

use crate::User;

/// One player's session, passed explicitly to everything that needs it.
#[derive(Debug, Clone, PartialEq, Getters, new)]
pub struct Session {
    user: User,
    difficulty: Difficulty,
}

impl Session {
    /// The account's storage id.
    pub fn account_id(&self) -> AccountId {
        *self.user.id()
    }

    /// Replaces the account record after a profile change.
    #[instrument(skip(self, user), fields(user_id = user.id()))]
    pub fn set_user(&mut self, user: User) {
        debug!(username = %user.username(), "Session account refreshed");
        self.user = user;
    }

    /// Switches the difficulty used for the next game.
    #[instrument(skip(self, difficulty), fields(difficulty = %difficulty.name()))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        debug!("Session difficulty changed");
        self.difficulty = difficulty;
    }
}
