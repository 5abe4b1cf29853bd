//! The person guesses a number the computer picked.

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::contracts::{Contract, GuessContract};
use crate::engine::GameEngine;
use crate::{
    Difficulty, EngineError, GameMode, GameOutcome, Hint, RoundCounter, RoundPrompt,
    RoundReport, Step, Turn,
};

/// Holds a secret and answers each guess with a [`Hint`].
#[derive(Debug, Clone)]
pub struct UserGuessesEngine {
    difficulty: Difficulty,
    secret: u32,
    rounds: RoundCounter,
    history: Vec<RoundReport>,
    outcome: Option<GameOutcome>,
}

impl UserGuessesEngine {
    /// Starts a game with a secret drawn uniformly from the difficulty's range.
    #[instrument(skip(rng), fields(difficulty = %difficulty.name()))]
    pub fn new<R: Rng>(difficulty: &Difficulty, rng: &mut R) -> Self {
        let secret = rng.random_range(difficulty.min_value()..=difficulty.max_value());
        debug!(rounds = difficulty.rounds(), "User-guesses game initialized");
        Self::start(difficulty, secret)
    }

    /// Starts a game with a fixed secret.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SecretOutOfRange`] if `secret` is outside the
    /// difficulty's range.
    #[instrument(fields(difficulty = %difficulty.name()))]
    pub fn with_secret(difficulty: &Difficulty, secret: u32) -> Result<Self, EngineError> {
        if !difficulty.contains(secret) {
            return Err(EngineError::SecretOutOfRange {
                secret,
                min: difficulty.min_value(),
                max: difficulty.max_value(),
            });
        }
        Ok(Self::start(difficulty, secret))
    }

    fn start(difficulty: &Difficulty, secret: u32) -> Self {
        Self {
            difficulty: difficulty.clone(),
            secret,
            rounds: RoundCounter::new(difficulty.rounds()),
            history: Vec::new(),
            outcome: None,
        }
    }

    pub(crate) fn secret_value(&self) -> u32 {
        self.secret
    }

    /// The secret, disclosed only after the game has ended.
    pub fn revealed_secret(&self) -> Option<u32> {
        self.outcome.map(|_| self.secret)
    }

    /// What to show the person before the next guess, or `None` once finished.
    pub fn prompt(&self) -> Option<RoundPrompt> {
        if self.is_finished() {
            return None;
        }
        Some(RoundPrompt {
            round: self.rounds.next_round(),
            budget: self.rounds.budget(),
            min: self.difficulty.min_value(),
            max: self.difficulty.max_value(),
        })
    }

    fn finish(&mut self, outcome: GameOutcome) -> GameOutcome {
        info!(
            difficulty = %self.difficulty.name(),
            outcome = %outcome.kind(),
            rounds_played = outcome.rounds_played(),
            "User-guesses game finished"
        );
        self.outcome = Some(outcome);
        outcome
    }
}

impl GameEngine for UserGuessesEngine {
    type Input = u32;

    fn mode(&self) -> GameMode {
        GameMode::UserGuesses
    }

    fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    fn rounds(&self) -> &RoundCounter {
        &self.rounds
    }

    fn history(&self) -> &[RoundReport] {
        &self.history
    }

    /// Scores one guess.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always (game not over, guess in range)
    /// - Postconditions checked in debug builds only
    #[instrument(skip(self), fields(round = self.rounds.next_round()))]
    fn step(&mut self, turn: Turn<u32>) -> Result<Step, EngineError> {
        GuessContract::pre(self, &turn)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let guess = match turn {
            Turn::Play(guess) => guess,
            Turn::Abort => {
                let outcome = self.finish(GameOutcome::Aborted {
                    rounds_played: self.rounds.current(),
                });
                return Ok(Step::Finished {
                    last_round: None,
                    outcome,
                });
            }
        };

        let round = self.rounds.tick();
        let hint = Hint::compare(guess, self.secret);
        let report = RoundReport { round, guess, hint };
        self.history.push(report);
        debug!(%report, "Round played");

        let outcome = if hint.is_correct() {
            Some(GameOutcome::Won {
                rounds_played: round,
                secret: self.secret,
            })
        } else if self.rounds.is_exhausted() {
            Some(GameOutcome::LostRounds {
                rounds_played: round,
                secret: Some(self.secret),
            })
        } else {
            None
        };
        let outcome = outcome.map(|outcome| self.finish(outcome));

        #[cfg(debug_assertions)]
        GuessContract::post(&before, self)?;

        Ok(match outcome {
            Some(outcome) => Step::Finished {
                last_round: Some(report),
                outcome,
            },
            None => Step::Continue(report),
        })
    }

    fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }
}
