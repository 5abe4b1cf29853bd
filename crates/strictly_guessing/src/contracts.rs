//! Contract-based validation for engine steps.
//!
//! Contracts formalize Hoare-style reasoning: {P} step {Q}. Preconditions are
//! always checked; postconditions are checked in debug builds.

use tracing::{instrument, warn};

use crate::invariants::{ComputerInvariants, InvariantSet, InvariantViolation, UserInvariants};
use crate::{ComputerGuessesEngine, Difficulty, EngineError, GameEngine, Hint, Turn, UserGuessesEngine};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), EngineError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), EngineError>;
}

// ─────────────────────────────────────────────────────────────
//  Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has not ended.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails with [`EngineError::GameOver`] once an outcome exists.
    #[instrument(skip(engine))]
    pub fn check<E: GameEngine>(engine: &E) -> Result<(), EngineError> {
        if engine.is_finished() {
            warn!("Step attempted on a finished game");
            Err(EngineError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: a guess lies inside the difficulty's range.
pub struct GuessInRange;

impl GuessInRange {
    /// Fails with [`EngineError::GuessOutOfRange`] for guesses outside `[min, max]`.
    #[instrument(skip(difficulty))]
    pub fn check(guess: u32, difficulty: &Difficulty) -> Result<(), EngineError> {
        if difficulty.contains(guess) {
            Ok(())
        } else {
            Err(EngineError::GuessOutOfRange {
                guess,
                min: difficulty.min_value(),
                max: difficulty.max_value(),
            })
        }
    }
}

fn violations_to_error(violations: Vec<InvariantViolation>) -> EngineError {
    let descriptions = violations
        .iter()
        .map(|v| v.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    EngineError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
}

// ─────────────────────────────────────────────────────────────
//  Step contracts
// ─────────────────────────────────────────────────────────────

/// Contract for answering the computer's guess.
///
/// Preconditions:
/// - Game not over
///
/// Postconditions:
/// - Range never widens
/// - Rounds advance by at most one
/// - Computer-guesses invariants hold
pub struct HintContract;

impl Contract<ComputerGuessesEngine, Turn<Hint>> for HintContract {
    fn pre(engine: &ComputerGuessesEngine, _turn: &Turn<Hint>) -> Result<(), EngineError> {
        GameNotOver::check(engine)
    }

    fn post(
        before: &ComputerGuessesEngine,
        after: &ComputerGuessesEngine,
    ) -> Result<(), EngineError> {
        let (old, new) = (before.tracker(), after.tracker());
        if new.low() < old.low() || new.high() > old.high() {
            return Err(EngineError::InvariantViolation(
                "Postcondition failed: tracked range widened".to_string(),
            ));
        }
        if after.rounds().current() > before.rounds().current() + 1 {
            return Err(EngineError::InvariantViolation(
                "Postcondition failed: more than one round consumed".to_string(),
            ));
        }
        ComputerInvariants::check_all(after).map_err(violations_to_error)
    }
}

/// Contract for the person's guess.
///
/// Preconditions:
/// - Game not over
/// - Guess inside the difficulty's range
///
/// Postconditions:
/// - Secret unchanged
/// - User-guesses invariants hold
pub struct GuessContract;

impl Contract<UserGuessesEngine, Turn<u32>> for GuessContract {
    fn pre(engine: &UserGuessesEngine, turn: &Turn<u32>) -> Result<(), EngineError> {
        GameNotOver::check(engine)?;
        match turn {
            Turn::Play(guess) => GuessInRange::check(*guess, engine.difficulty()),
            Turn::Abort => Ok(()),
        }
    }

    fn post(before: &UserGuessesEngine, after: &UserGuessesEngine) -> Result<(), EngineError> {
        if before.secret_value() != after.secret_value() {
            return Err(EngineError::InvariantViolation(
                "Postcondition failed: secret changed mid-game".to_string(),
            ));
        }
        UserInvariants::check_all(after).map_err(violations_to_error)
    }
}
