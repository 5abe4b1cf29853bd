//! The hint vocabulary exchanged between guesser and oracle.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Relation of a guess to the secret, as reported by the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Hint {
    /// The secret is lower than the guess.
    Lower,
    /// The secret is higher than the guess.
    Higher,
    /// The guess is the secret.
    Correct,
}

impl Hint {
    /// Computes the hint an honest oracle gives for `guess` when it knows `secret`.
    #[instrument]
    pub fn compare(guess: u32, secret: u32) -> Self {
        match secret.cmp(&guess) {
            std::cmp::Ordering::Less => Self::Lower,
            std::cmp::Ordering::Greater => Self::Higher,
            std::cmp::Ordering::Equal => Self::Correct,
        }
    }

    /// Returns true if this hint ends the search.
    pub fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}
