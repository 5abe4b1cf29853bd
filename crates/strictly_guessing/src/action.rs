//! Turn inputs, per-round reports and engine errors.
//!
//! Turns are what the input layer hands an engine: either a canonical value
//! (a hint or a guess) or the person's request to leave.

use serde::{Deserialize, Serialize};

use crate::{GameOutcome, Hint};

/// One input for an engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn<T> {
    /// Play this value.
    Play(T),
    /// End the game now.
    Abort,
}

/// A completed guess/hint exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    /// Round number (1-based).
    pub round: u32,
    /// The guess made this round.
    pub guess: u32,
    /// The oracle's answer.
    pub hint: Hint,
}

impl std::fmt::Display for RoundReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Round {}: {} -> {}", self.round, self.guess, self.hint)
    }
}

/// Result of one engine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The game goes on.
    Continue(RoundReport),
    /// The game is over.
    Finished {
        /// The round that ended it, absent when the game was aborted.
        last_round: Option<RoundReport>,
        /// Terminal outcome.
        outcome: GameOutcome,
    },
}

impl Step {
    /// Returns the round played in this step, if any.
    pub fn round(&self) -> Option<&RoundReport> {
        match self {
            Step::Continue(report) => Some(report),
            Step::Finished { last_round, .. } => last_round.as_ref(),
        }
    }

    /// Returns the outcome if the game ended.
    pub fn outcome(&self) -> Option<GameOutcome> {
        match self {
            Step::Continue(_) => None,
            Step::Finished { outcome, .. } => Some(*outcome),
        }
    }
}

/// What the person sees before answering the computer's guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessPrompt {
    /// Round about to be played (1-based).
    pub round: u32,
    /// Rounds allowed.
    pub budget: u32,
    /// The computer's guess.
    pub guess: u32,
}

/// What the person sees before making a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundPrompt {
    /// Round about to be played (1-based).
    pub round: u32,
    /// Rounds allowed.
    pub budget: u32,
    /// Smallest allowed guess.
    pub min: u32,
    /// Largest allowed guess.
    pub max: u32,
}

/// Error raised when an engine is driven outside its contract.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum EngineError {
    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// A guess fell outside the difficulty's range.
    #[display("Guess {} is outside {}..={}", guess, min, max)]
    GuessOutOfRange {
        /// Rejected guess.
        guess: u32,
        /// Smallest allowed guess.
        min: u32,
        /// Largest allowed guess.
        max: u32,
    },

    /// A fixed secret fell outside the difficulty's range.
    #[display("Secret {} is outside {}..={}", secret, min, max)]
    SecretOutOfRange {
        /// Rejected secret.
        secret: u32,
        /// Smallest allowed secret.
        min: u32,
        /// Largest allowed secret.
        max: u32,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_engine_error_is_a_leaf_error() {
        let err: Box<dyn Error> = Box::new(EngineError::InvariantViolation("range widened".into()));
        assert_eq!(err.to_string(), "Invariant violation: range widened");
        assert!(err.source().is_none());

        let out_of_range = EngineError::GuessOutOfRange {
            guess: 0,
            min: 1,
            max: 100,
        };
        assert_eq!(out_of_range.to_string(), "Guess 0 is outside 1..=100");
    }
}
