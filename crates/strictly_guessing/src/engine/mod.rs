//! Guessing engines.
//!
//! Both play modes implement [`GameEngine`]: an engine is initialized from a
//! [`Difficulty`], stepped once per round with a [`Turn`], and ends with a
//! single immutable [`GameOutcome`].

mod computer;
mod user;

pub use computer::ComputerGuessesEngine;
pub use user::UserGuessesEngine;

use crate::{Difficulty, EngineError, GameMode, GameOutcome, RoundCounter, RoundReport, Step, Turn};

/// Shared capability set of the two guessing engines.
pub trait GameEngine {
    /// What the person supplies each round.
    type Input;

    /// Which side guesses.
    fn mode(&self) -> GameMode;

    /// The engine's own copy of the difficulty.
    fn difficulty(&self) -> &Difficulty;

    /// Round bookkeeping.
    fn rounds(&self) -> &RoundCounter;

    /// Rounds played so far, oldest first.
    fn history(&self) -> &[RoundReport];

    /// Plays one round (or aborts).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::GameOver`] once an outcome exists, and other
    /// variants when the input breaks the step contract.
    fn step(&mut self, turn: Turn<Self::Input>) -> Result<Step, EngineError>;

    /// Terminal outcome, once the game has ended.
    fn outcome(&self) -> Option<&GameOutcome>;

    /// Returns true once the game has ended.
    fn is_finished(&self) -> bool {
        self.outcome().is_some()
    }
}
