//! Number-guessing game logic.
//!
//! Two play modes share one [`GameEngine`] capability set:
//!
//! - [`ComputerGuessesEngine`]: binary search over a [`RangeTracker`], driven
//!   by the person's hints, with contradiction detection.
//! - [`UserGuessesEngine`]: a secret drawn from an injected RNG, answered
//!   with [`Hint`]s.
//!
//! [`Difficulty`] carries the range and round budget; custom difficulties
//! are validated here and stored behind the [`DifficultyRegistry`] trait.
//! This crate performs no I/O.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod difficulty;
mod engine;
mod hint;
mod invariants;
mod outcome;
mod play;
mod range;
mod registry;
mod rounds;

pub use action::{EngineError, GuessPrompt, RoundPrompt, RoundReport, Step, Turn};
pub use contracts::{Contract, GameNotOver, GuessContract, GuessInRange, HintContract};
pub use difficulty::{
    DEFAULT_DIFFICULTY, Difficulty, DifficultyDraft, DifficultyField, DifficultyId,
    MAX_ROUNDS, MAX_VALUE_LIMIT, MIN_ROUNDS, MIN_VALUE_LIMIT, NAME_MAX_LEN, NAME_MIN_LEN,
    Origin, ValidationError, is_valid_name,
};
pub use engine::{ComputerGuessesEngine, GameEngine, UserGuessesEngine};
pub use hint::Hint;
pub use invariants::{
    ComputerInvariants, Invariant, InvariantSet, InvariantViolation, LossSpendsBudget,
    RangeOrdered, RoundsWithinBudget, SecretInRange, UserInvariants,
};
pub use outcome::{GameMode, GameOutcome, OutcomeKind};
pub use play::{
    GuessProvider, HintProvider, play_computer_guesses, play_user_guesses,
    run_computer_guesses_game, run_user_guesses_game,
};
pub use range::{RangeTracker, TrackerStatus, guaranteed_rounds};
pub use registry::{AccountId, DifficultyRegistry};
pub use rounds::RoundCounter;
