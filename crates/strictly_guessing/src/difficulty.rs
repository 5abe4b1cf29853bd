//! Difficulty definitions and the rules every difficulty must satisfy.
//!
//! A [`Difficulty`] is a numeric range plus a round budget. Built-ins are
//! process constants; custom difficulties are built from a [`DifficultyDraft`]
//! that must pass validation before anything is persisted.

use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::range::guaranteed_rounds;

/// Identifier of a persisted custom difficulty.
pub type DifficultyId = i32;

/// Fewest rounds a difficulty may allow.
pub const MIN_ROUNDS: u32 = 1;
/// Most rounds a difficulty may allow.
pub const MAX_ROUNDS: u32 = 99;
/// Largest allowed `min_value`.
pub const MIN_VALUE_LIMIT: u32 = 999_989;
/// Largest allowed `max_value`.
pub const MAX_VALUE_LIMIT: u32 = 999_999;
/// Shortest custom difficulty name.
pub const NAME_MIN_LEN: usize = 3;
/// Longest custom difficulty name.
pub const NAME_MAX_LEN: usize = 30;

/// Name of the difficulty new accounts start with.
pub const DEFAULT_DIFFICULTY: &str = "Beginner";

const BUILTINS: [(&str, u32, u32, u32); 3] = [
    ("Beginner", 10, 1, 100),
    ("Intermediate", 10, 1, 1_000),
    ("Expert", 12, 1, 10_000),
];

/// Where a difficulty comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Shipped with the game.
    BuiltIn,
    /// Defined by an account and persisted under `id`.
    Custom {
        /// Storage identifier of the custom difficulty.
        id: DifficultyId,
    },
}

/// A numeric range and a round budget.
///
/// Invariants: `min_value < max_value` and `rounds >= 1`. Engines take their
/// own copy and never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    name: String,
    rounds: u32,
    min_value: u32,
    max_value: u32,
    origin: Origin,
}

impl Difficulty {
    /// Returns the built-in difficulties in display order.
    #[instrument]
    pub fn builtins() -> Vec<Self> {
        BUILTINS
            .iter()
            .map(|&(name, rounds, min_value, max_value)| Self {
                name: name.to_string(),
                rounds,
                min_value,
                max_value,
                origin: Origin::BuiltIn,
            })
            .collect()
    }

    /// Returns the built-in difficulty with the given name.
    #[instrument]
    pub fn builtin(name: &str) -> Option<Self> {
        Self::builtins().into_iter().find(|d| d.name == name)
    }

    /// Builds a custom difficulty from a draft, checking every creation rule.
    ///
    /// `taken` is the union of built-ins and the account's existing customs.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    #[instrument(skip(taken), fields(taken = taken.len()))]
    pub fn custom(
        id: DifficultyId,
        draft: DifficultyDraft,
        taken: &[Difficulty],
    ) -> Result<Self, ValidationError> {
        draft.validate(taken)?;
        Ok(draft.into_difficulty(id))
    }

    /// Rebuilds a persisted custom difficulty, re-checking the field rules.
    ///
    /// Name uniqueness is not re-checked here; storage enforces it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the stored values break a field rule.
    #[instrument]
    pub fn restore(
        id: DifficultyId,
        name: String,
        rounds: u32,
        min_value: u32,
        max_value: u32,
    ) -> Result<Self, ValidationError> {
        let draft = DifficultyDraft::new(name, rounds, min_value, max_value);
        draft.validate_fields()?;
        Ok(draft.into_difficulty(id))
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the round budget.
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Returns the smallest possible secret.
    pub fn min_value(&self) -> u32 {
        self.min_value
    }

    /// Returns the largest possible secret.
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// Returns where this difficulty comes from.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Returns the storage id if this is a custom difficulty.
    pub fn custom_id(&self) -> Option<DifficultyId> {
        match self.origin {
            Origin::Custom { id } => Some(id),
            Origin::BuiltIn => None,
        }
    }

    /// Returns true if `value` lies in `[min_value, max_value]`.
    pub fn contains(&self, value: u32) -> bool {
        (self.min_value..=self.max_value).contains(&value)
    }

    /// Number of candidate secrets.
    pub fn range_size(&self) -> u32 {
        self.max_value - self.min_value + 1
    }

    /// Rounds the computer needs to be certain of finding any secret.
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn guaranteed_rounds(&self) -> u32 {
        guaranteed_rounds(self.range_size())
    }

    /// Returns true if honest hints always let the computer win within budget.
    pub fn computer_always_wins(&self) -> bool {
        self.rounds >= self.guaranteed_rounds()
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - Rounds: {} - Min value: {} - Max value: {}",
            self.name, self.rounds, self.min_value, self.max_value
        )
    }
}

// ─────────────────────────────────────────────────────────────
//  Creation rules
// ─────────────────────────────────────────────────────────────

/// The fields a person supplies when creating a custom difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct DifficultyDraft {
    /// Requested name.
    pub name: String,
    /// Requested round budget.
    pub rounds: u32,
    /// Requested smallest secret.
    pub min_value: u32,
    /// Requested largest secret.
    pub max_value: u32,
}

impl DifficultyDraft {
    /// Checks the per-field rules: name pattern, rounds, min and max.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule, checked in field order.
    #[instrument]
    pub fn validate_fields(&self) -> Result<(), ValidationError> {
        if !is_valid_name(&self.name) {
            return Err(ValidationError::InvalidName {
                name: self.name.clone(),
            });
        }
        if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&self.rounds) {
            return Err(ValidationError::RoundsOutOfRange {
                rounds: self.rounds,
            });
        }
        if self.min_value > MIN_VALUE_LIMIT {
            return Err(ValidationError::MinOutOfRange {
                min_value: self.min_value,
            });
        }
        if self.max_value <= self.min_value || self.max_value > MAX_VALUE_LIMIT {
            return Err(ValidationError::MaxOutOfRange {
                min_value: self.min_value,
                max_value: self.max_value,
            });
        }
        Ok(())
    }

    /// Checks every creation rule, including name uniqueness against `taken`.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    #[instrument(skip(taken), fields(taken = taken.len()))]
    pub fn validate(&self, taken: &[Difficulty]) -> Result<(), ValidationError> {
        self.validate_fields()?;
        if taken.iter().any(|d| d.name == self.name) {
            warn!(name = %self.name, "Difficulty name already in use");
            return Err(ValidationError::DuplicateName {
                name: self.name.clone(),
            });
        }
        debug!(name = %self.name, "Difficulty draft is valid");
        Ok(())
    }

    fn into_difficulty(self, id: DifficultyId) -> Difficulty {
        Difficulty {
            name: self.name,
            rounds: self.rounds,
            min_value: self.min_value,
            max_value: self.max_value,
            origin: Origin::Custom { id },
        }
    }
}

/// Returns true if `name` is 3 to 30 ASCII letters.
pub fn is_valid_name(name: &str) -> bool {
    (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&name.len())
        && name.chars().all(|c| c.is_ascii_alphabetic())
}

/// Difficulty field a validation rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DifficultyField {
    /// The difficulty name.
    Name,
    /// The round budget.
    Rounds,
    /// The smallest secret.
    MinValue,
    /// The largest secret.
    MaxValue,
}

/// A custom difficulty broke a creation rule.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ValidationError {
    /// Name is not 3 to 30 letters.
    #[display(
        "Difficulty name '{}' must be {} to {} letters",
        name,
        NAME_MIN_LEN,
        NAME_MAX_LEN
    )]
    InvalidName {
        /// Rejected name.
        name: String,
    },
    /// Name is already used by a built-in or one of the account's customs.
    #[display("Difficulty name '{}' is already in use", name)]
    DuplicateName {
        /// Rejected name.
        name: String,
    },
    /// Rounds outside `[1, 99]`.
    #[display("Rounds must be between {} and {}, got {}", MIN_ROUNDS, MAX_ROUNDS, rounds)]
    RoundsOutOfRange {
        /// Rejected round budget.
        rounds: u32,
    },
    /// Minimum above the allowed limit.
    #[display("Min value must be between 0 and {}, got {}", MIN_VALUE_LIMIT, min_value)]
    MinOutOfRange {
        /// Rejected minimum.
        min_value: u32,
    },
    /// Maximum not above the minimum, or above the allowed limit.
    #[display(
        "Max value must be between {} and {}, got {}",
        min_value.saturating_add(1),
        MAX_VALUE_LIMIT,
        max_value
    )]
    MaxOutOfRange {
        /// Minimum the maximum was checked against.
        min_value: u32,
        /// Rejected maximum.
        max_value: u32,
    },
}

impl ValidationError {
    /// Returns the field that broke the rule.
    pub fn field(&self) -> DifficultyField {
        match self {
            Self::InvalidName { .. } | Self::DuplicateName { .. } => DifficultyField::Name,
            Self::RoundsOutOfRange { .. } => DifficultyField::Rounds,
            Self::MinOutOfRange { .. } => DifficultyField::MinValue,
            Self::MaxOutOfRange { .. } => DifficultyField::MaxValue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, rounds: u32, min: u32, max: u32) -> DifficultyDraft {
        DifficultyDraft::new(name.to_string(), rounds, min, max)
    }

    #[test]
    fn test_builtins_satisfy_field_rules() {
        for builtin in Difficulty::builtins() {
            assert!(builtin.min_value() < builtin.max_value(), "{builtin}");
            assert!(builtin.rounds() >= MIN_ROUNDS, "{builtin}");
            assert_eq!(builtin.origin(), Origin::BuiltIn);
        }
    }

    #[test]
    fn test_default_difficulty_is_builtin() {
        assert!(Difficulty::builtin(DEFAULT_DIFFICULTY).is_some());
    }

    #[test]
    fn test_short_name_rejected() {
        let err = draft("AB", 5, 10, 20).validate(&[]).unwrap_err();
        assert_eq!(err.field(), DifficultyField::Name);
    }

    #[test]
    fn test_non_letter_name_rejected() {
        let err = draft("Hard2", 5, 10, 20).validate(&[]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidName { .. }));
        let err = draft("Very Hard", 5, 10, 20).validate(&[]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidName { .. }));
    }

    #[test]
    fn test_name_length_limits() {
        assert!(draft("Abc", 5, 10, 20).validate(&[]).is_ok());
        assert!(draft(&"a".repeat(30), 5, 10, 20).validate(&[]).is_ok());
        assert!(draft(&"a".repeat(31), 5, 10, 20).validate(&[]).is_err());
    }

    #[test]
    fn test_max_not_above_min_rejected() {
        let err = draft("Easy", 10, 50, 10).validate(&[]).unwrap_err();
        assert_eq!(err.field(), DifficultyField::MaxValue);

        let err = draft("Easy", 10, 50, 50).validate(&[]).unwrap_err();
        assert_eq!(err.field(), DifficultyField::MaxValue);
    }

    #[test]
    fn test_rounds_limits() {
        assert_eq!(
            draft("Easy", 0, 1, 10).validate(&[]).unwrap_err().field(),
            DifficultyField::Rounds
        );
        assert_eq!(
            draft("Easy", 100, 1, 10).validate(&[]).unwrap_err().field(),
            DifficultyField::Rounds
        );
        assert!(draft("Easy", 1, 1, 10).validate(&[]).is_ok());
        assert!(draft("Easy", 99, 1, 10).validate(&[]).is_ok());
    }

    #[test]
    fn test_value_limits() {
        assert!(draft("Wide", 5, 0, MAX_VALUE_LIMIT).validate(&[]).is_ok());
        assert!(draft("Top", 5, MIN_VALUE_LIMIT, MIN_VALUE_LIMIT + 1)
            .validate(&[])
            .is_ok());
        assert_eq!(
            draft("Top", 5, MIN_VALUE_LIMIT + 1, MAX_VALUE_LIMIT)
                .validate(&[])
                .unwrap_err()
                .field(),
            DifficultyField::MinValue
        );
        assert_eq!(
            draft("Wide", 5, 0, MAX_VALUE_LIMIT + 1)
                .validate(&[])
                .unwrap_err()
                .field(),
            DifficultyField::MaxValue
        );
    }

    #[test]
    fn test_duplicate_of_builtin_rejected() {
        let err = draft("Beginner", 5, 1, 10)
            .validate(&Difficulty::builtins())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateName {
                name: "Beginner".to_string()
            }
        );
    }

    #[test]
    fn test_name_comparison_is_case_sensitive() {
        assert!(draft("beginner", 5, 1, 10)
            .validate(&Difficulty::builtins())
            .is_ok());
    }

    #[test]
    fn test_custom_carries_id() {
        let difficulty = Difficulty::custom(7, draft("Tiny", 3, 1, 8), &[]).unwrap();
        assert_eq!(difficulty.custom_id(), Some(7));
        assert_eq!(difficulty.range_size(), 8);
        assert_eq!(difficulty.guaranteed_rounds(), 4);
        assert!(!difficulty.computer_always_wins());
    }

    #[test]
    fn test_restore_rejects_corrupt_values() {
        assert!(Difficulty::restore(1, "Broken".to_string(), 5, 20, 10).is_err());
        assert!(Difficulty::restore(1, "Fine".to_string(), 5, 10, 20).is_ok());
    }

    #[test]
    fn test_display_lists_all_fields() {
        let beginner = Difficulty::builtin("Beginner").unwrap();
        assert_eq!(
            beginner.to_string(),
            "Beginner - Rounds: 10 - Min value: 1 - Max value: 100"
        );
    }

    #[test]
    fn test_error_names_field() {
        let err = draft("Easy", 10, 50, 10).validate(&[]).unwrap_err();
        assert_eq!(err.field().to_string(), "max_value");
        assert_eq!(err.to_string(), "Max value must be between 51 and 999999, got 10");
    }
}
