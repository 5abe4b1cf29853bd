//! Game modes and terminal outcomes.

use serde::{Deserialize, Serialize};

/// Which side guesses.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum GameMode {
    /// The computer guesses the person's secret.
    ComputerGuesses,
    /// The person guesses the computer's secret.
    UserGuesses,
}

impl GameMode {
    /// Menu label for this mode.
    pub fn label(self) -> &'static str {
        match self {
            Self::ComputerGuesses => "Computer guesses",
            Self::UserGuesses => "User guesses",
        }
    }
}

/// How a game ended, seen from the guesser's side.
///
/// Produced once by an engine and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The guesser found the secret.
    Won {
        /// Rounds used, including the winning guess.
        rounds_played: u32,
        /// The secret that was found.
        secret: u32,
    },
    /// The budget ran out before the secret was found.
    LostRounds {
        /// Rounds used (equal to the budget).
        rounds_played: u32,
        /// The secret, revealed when the computer held it.
        secret: Option<u32>,
    },
    /// The person's hints ruled out every possible secret.
    Contradiction {
        /// Rounds used before the contradiction surfaced.
        rounds_played: u32,
    },
    /// The person left the game.
    Aborted {
        /// Rounds completed before leaving.
        rounds_played: u32,
    },
}

impl GameOutcome {
    /// Returns the outcome category.
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Won { .. } => OutcomeKind::Won,
            Self::LostRounds { .. } => OutcomeKind::LostRounds,
            Self::Contradiction { .. } => OutcomeKind::Contradiction,
            Self::Aborted { .. } => OutcomeKind::Aborted,
        }
    }

    /// Rounds played before the game ended.
    pub fn rounds_played(&self) -> u32 {
        match *self {
            Self::Won { rounds_played, .. }
            | Self::LostRounds { rounds_played, .. }
            | Self::Contradiction { rounds_played }
            | Self::Aborted { rounds_played } => rounds_played,
        }
    }

    /// The secret, if the outcome discloses it.
    pub fn secret(&self) -> Option<u32> {
        match *self {
            Self::Won { secret, .. } => Some(secret),
            Self::LostRounds { secret, .. } => secret,
            Self::Contradiction { .. } | Self::Aborted { .. } => None,
        }
    }
}

/// Outcome category without the payload.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum OutcomeKind {
    /// Guesser found the secret.
    Won,
    /// Budget exhausted.
    LostRounds,
    /// Inconsistent hints.
    Contradiction,
    /// Person left.
    Aborted,
}

impl OutcomeKind {
    /// Returns true if the person beat the computer in `mode`.
    ///
    /// The person wins by finding the secret when guessing, and by outlasting
    /// the budget when the computer guesses.
    pub fn person_won(self, mode: GameMode) -> bool {
        matches!(
            (mode, self),
            (GameMode::UserGuesses, Self::Won) | (GameMode::ComputerGuesses, Self::LostRounds)
        )
    }

    /// Returns true if the person lost to the computer in `mode`.
    pub fn person_lost(self, mode: GameMode) -> bool {
        matches!(
            (mode, self),
            (GameMode::UserGuesses, Self::LostRounds) | (GameMode::ComputerGuesses, Self::Won)
        )
    }
}
