//! Range tracking: the interval that can still hold the secret.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::Hint;

/// Number of midpoint guesses that always finds a secret among `size` values.
///
/// This is `floor(log2(size)) + 1`, the bit length of `size`.
pub fn guaranteed_rounds(size: u32) -> u32 {
    u32::BITS - size.leading_zeros()
}

/// What the hints seen so far say about the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackerStatus {
    /// More than one candidate may remain.
    Narrowing,
    /// The secret was confirmed.
    Solved(u32),
    /// No single secret fits every hint.
    Contradiction,
}

/// The guesser's belief `low <= secret <= high`.
///
/// Bounds only ever shrink. A hint that would empty the interval puts the
/// tracker into [`TrackerStatus::Contradiction`] and leaves the bounds at their
/// last consistent values; a contradiction is permanent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeTracker {
    low: u32,
    high: u32,
    status: TrackerStatus,
}

impl RangeTracker {
    /// Starts tracking `[min, max]`.
    #[instrument]
    pub fn new(min: u32, max: u32) -> Self {
        debug_assert!(min <= max, "range must not start empty");
        Self {
            low: min,
            high: max,
            status: TrackerStatus::Narrowing,
        }
    }

    /// Lowest value still possible.
    pub fn low(&self) -> u32 {
        self.low
    }

    /// Highest value still possible.
    pub fn high(&self) -> u32 {
        self.high
    }

    /// Current status.
    pub fn status(&self) -> TrackerStatus {
        self.status
    }

    /// Returns true if `value` is still possible.
    pub fn contains(&self, value: u32) -> bool {
        (self.low..=self.high).contains(&value)
    }

    /// Number of values still possible.
    pub fn remaining(&self) -> u32 {
        self.high - self.low + 1
    }

    /// Midpoint of the remaining interval, rounded down.
    pub fn propose_guess(&self) -> u32 {
        self.low + (self.high - self.low) / 2
    }

    /// Narrows the interval with the hint given for `guess`.
    #[instrument(skip(self), fields(low = self.low, high = self.high))]
    pub fn apply_hint(&mut self, guess: u32, hint: Hint) -> TrackerStatus {
        if self.status == TrackerStatus::Contradiction {
            return self.status;
        }

        self.status = match hint {
            Hint::Correct if self.contains(guess) => {
                self.low = guess;
                self.high = guess;
                TrackerStatus::Solved(guess)
            }
            Hint::Correct => TrackerStatus::Contradiction,
            Hint::Lower => match guess.checked_sub(1) {
                Some(high) if high >= self.low => {
                    self.high = self.high.min(high);
                    TrackerStatus::Narrowing
                }
                _ => TrackerStatus::Contradiction,
            },
            Hint::Higher => match guess.checked_add(1) {
                Some(low) if low <= self.high => {
                    self.low = self.low.max(low);
                    TrackerStatus::Narrowing
                }
                _ => TrackerStatus::Contradiction,
            },
        };

        if self.status == TrackerStatus::Contradiction {
            warn!(guess, %hint, low = self.low, high = self.high, "Hint contradicts earlier hints");
        } else {
            debug!(low = self.low, high = self.high, status = ?self.status, "Range narrowed");
        }
        self.status
    }
}
