//! The computer guesses a number the person keeps in mind.

use tracing::{debug, info, instrument};

use crate::contracts::{Contract, HintContract};
use crate::engine::GameEngine;
use crate::{
    Difficulty, EngineError, GameMode, GameOutcome, GuessPrompt, Hint, RangeTracker,
    RoundCounter, RoundReport, Step, TrackerStatus, Turn,
};

/// Binary search over the difficulty's range, driven by the person's hints.
///
/// Every round the engine proposes the midpoint of the interval still
/// possible, the person answers with a [`Hint`], and the interval narrows.
/// Hints that rule out every number end the game with
/// [`GameOutcome::Contradiction`].
#[derive(Debug, Clone)]
pub struct ComputerGuessesEngine {
    difficulty: Difficulty,
    tracker: RangeTracker,
    rounds: RoundCounter,
    history: Vec<RoundReport>,
    outcome: Option<GameOutcome>,
}

impl ComputerGuessesEngine {
    /// Starts a game over the difficulty's full range.
    #[instrument(fields(difficulty = %difficulty.name()))]
    pub fn new(difficulty: &Difficulty) -> Self {
        debug!(
            rounds = difficulty.rounds(),
            guaranteed = difficulty.guaranteed_rounds(),
            "Computer-guesses game initialized"
        );
        Self {
            difficulty: difficulty.clone(),
            tracker: RangeTracker::new(difficulty.min_value(), difficulty.max_value()),
            rounds: RoundCounter::new(difficulty.rounds()),
            history: Vec::new(),
            outcome: None,
        }
    }

    /// The interval the secret can still be in.
    pub fn tracker(&self) -> &RangeTracker {
        &self.tracker
    }

    /// The guess the next step will answer.
    pub fn current_guess(&self) -> u32 {
        self.tracker.propose_guess()
    }

    /// What to show the person before the next hint, or `None` once finished.
    pub fn prompt(&self) -> Option<GuessPrompt> {
        if self.is_finished() {
            return None;
        }
        Some(GuessPrompt {
            round: self.rounds.next_round(),
            budget: self.rounds.budget(),
            guess: self.current_guess(),
        })
    }

    fn finish(&mut self, outcome: GameOutcome) -> GameOutcome {
        info!(
            difficulty = %self.difficulty.name(),
            outcome = %outcome.kind(),
            rounds_played = outcome.rounds_played(),
            "Computer-guesses game finished"
        );
        self.outcome = Some(outcome);
        outcome
    }
}

impl GameEngine for ComputerGuessesEngine {
    type Input = Hint;

    fn mode(&self) -> GameMode {
        GameMode::ComputerGuesses
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

    /// Answers the current guess.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always (game not over)
    /// - Postconditions checked in debug builds only
    #[instrument(skip(self), fields(round = self.rounds.next_round()))]
    fn step(&mut self, turn: Turn<Hint>) -> Result<Step, EngineError> {
        HintContract::pre(self, &turn)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let hint = match turn {
            Turn::Play(hint) => hint,
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

        let guess = self.tracker.propose_guess();
        let round = self.rounds.tick();
        let report = RoundReport { round, guess, hint };
        self.history.push(report);
        debug!(%report, "Round played");

        let outcome = match self.tracker.apply_hint(guess, hint) {
            TrackerStatus::Solved(secret) => Some(GameOutcome::Won {
                rounds_played: round,
                secret,
            }),
            TrackerStatus::Contradiction => Some(GameOutcome::Contradiction {
                rounds_played: round,
            }),
            TrackerStatus::Narrowing if self.rounds.is_exhausted() => {
                Some(GameOutcome::LostRounds {
                    rounds_played: round,
                    secret: None,
                })
            }
            TrackerStatus::Narrowing => None,
        };
        let outcome = outcome.map(|outcome| self.finish(outcome));

        #[cfg(debug_assertions)]
        HintContract::post(&before, self)?;

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
