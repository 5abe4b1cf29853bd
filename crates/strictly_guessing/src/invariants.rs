//! First-class invariants for guessing games.
//!
//! Invariants are logical properties that must hold after every engine step.
//! They are testable independently and document what the engines guarantee.

use crate::{ComputerGuessesEngine, GameEngine, GameOutcome, UserGuessesEngine};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2) as InvariantSet<S>>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Invariants
// ─────────────────────────────────────────────────────────────

/// Invariant: the round counter never passes the budget.
pub struct RoundsWithinBudget;

impl<E: GameEngine> Invariant<E> for RoundsWithinBudget {
    fn holds(engine: &E) -> bool {
        engine.rounds().current() <= engine.rounds().budget()
    }

    fn description() -> &'static str {
        "Rounds played never exceed the budget"
    }
}

/// Invariant: a game lost on rounds has used the whole budget.
pub struct LossSpendsBudget;

impl<E: GameEngine> Invariant<E> for LossSpendsBudget {
    fn holds(engine: &E) -> bool {
        match engine.outcome() {
            Some(GameOutcome::LostRounds { rounds_played, .. }) => {
                *rounds_played == engine.rounds().budget()
            }
            _ => true,
        }
    }

    fn description() -> &'static str {
        "A game lost on rounds has played every allowed round"
    }
}

/// Invariant: the tracked range is never inverted.
pub struct RangeOrdered;

impl Invariant<ComputerGuessesEngine> for RangeOrdered {
    fn holds(engine: &ComputerGuessesEngine) -> bool {
        let tracker = engine.tracker();
        tracker.low() <= tracker.high()
            && engine.difficulty().contains(tracker.low())
            && engine.difficulty().contains(tracker.high())
    }

    fn description() -> &'static str {
        "Tracked range stays ordered and inside the difficulty"
    }
}

/// Invariant: the computer's secret lies inside the difficulty's range.
pub struct SecretInRange;

impl Invariant<UserGuessesEngine> for SecretInRange {
    fn holds(engine: &UserGuessesEngine) -> bool {
        engine.difficulty().contains(engine.secret_value())
    }

    fn description() -> &'static str {
        "Secret lies inside the difficulty's range"
    }
}

/// All computer-guesses invariants as a composable set.
pub type ComputerInvariants = (RangeOrdered, RoundsWithinBudget, LossSpendsBudget);

/// All user-guesses invariants as a composable set.
pub type UserInvariants = (SecretInRange, RoundsWithinBudget, LossSpendsBudget);
