//! Round bookkeeping against a difficulty's budget.

use serde::{Deserialize, Serialize};

/// Guesses consumed so far and the number allowed.
///
/// The budget counts guesses: the guess made on the final round still counts
/// before the game is declared lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundCounter {
    current: u32,
    budget: u32,
}

impl RoundCounter {
    /// Starts a counter at zero with the given budget.
    pub fn new(budget: u32) -> Self {
        Self { current: 0, budget }
    }

    /// Rounds played so far.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Rounds allowed.
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Rounds still available.
    pub fn remaining(&self) -> u32 {
        self.budget.saturating_sub(self.current)
    }

    /// Number of the round about to be played (1-based).
    pub fn next_round(&self) -> u32 {
        self.current + 1
    }

    /// Returns true once every allowed round has been played.
    pub fn is_exhausted(&self) -> bool {
        self.current >= self.budget
    }

    /// Records one guess/hint exchange and returns the round number.
    pub(crate) fn tick(&mut self) -> u32 {
        self.current += 1;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_exhausts_at_budget() {
        let mut counter = RoundCounter::new(2);
        assert_eq!(counter.next_round(), 1);
        assert_eq!(counter.tick(), 1);
        assert!(!counter.is_exhausted());
        assert_eq!(counter.remaining(), 1);
        assert_eq!(counter.tick(), 2);
        assert!(counter.is_exhausted());
        assert_eq!(counter.remaining(), 0);
    }
}
