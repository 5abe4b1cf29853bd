//! Blocking game runners.
//!
//! A runner owns the loop: it asks an input collaborator for the next turn,
//! steps the engine and reports each round back until an outcome exists.
//! Collaborators never see engine internals and engines never parse text.

use rand::Rng;
use tracing::{debug, instrument};

use crate::engine::GameEngine;
use crate::{
    ComputerGuessesEngine, Difficulty, EngineError, GameOutcome, GuessPrompt, Hint,
    RoundPrompt, RoundReport, Step, Turn, UserGuessesEngine,
};

/// Supplies hints for the computer's guesses.
pub trait HintProvider {
    /// Answers the computer's guess, or asks to leave.
    fn hint_for(&mut self, prompt: &GuessPrompt) -> Turn<Hint>;

    /// Called after every round, including the last.
    fn on_round(&mut self, _report: &RoundReport) {}
}

/// Supplies the person's guesses and receives the computer's hints.
pub trait GuessProvider {
    /// Collects the next guess, already checked against `prompt.min..=prompt.max`.
    fn next_guess(&mut self, prompt: &RoundPrompt) -> Turn<u32>;

    /// Called after every round, including the last.
    fn on_round(&mut self, report: &RoundReport);
}

/// Plays a computer-guesses game to completion.
///
/// # Errors
///
/// Returns [`EngineError`] only if the engine's contract is broken.
#[instrument(skip(person), fields(difficulty = %difficulty.name()))]
pub fn run_computer_guesses_game<P: HintProvider>(
    difficulty: &Difficulty,
    person: &mut P,
) -> Result<GameOutcome, EngineError> {
    let mut engine = ComputerGuessesEngine::new(difficulty);
    play_computer_guesses(&mut engine, person)
}

/// Plays a user-guesses game with a secret drawn from `rng`.
///
/// # Errors
///
/// Returns [`EngineError`] only if the engine's contract is broken.
#[instrument(skip(person, rng), fields(difficulty = %difficulty.name()))]
pub fn run_user_guesses_game<P: GuessProvider, R: Rng>(
    difficulty: &Difficulty,
    person: &mut P,
    rng: &mut R,
) -> Result<GameOutcome, EngineError> {
    let mut engine = UserGuessesEngine::new(difficulty, rng);
    play_user_guesses(&mut engine, person)
}

/// Drives an existing computer-guesses engine until it finishes.
///
/// # Errors
///
/// Returns [`EngineError::GameOver`] if the engine has already finished.
#[instrument(skip_all)]
pub fn play_computer_guesses<P: HintProvider>(
    engine: &mut ComputerGuessesEngine,
    person: &mut P,
) -> Result<GameOutcome, EngineError> {
    loop {
        let prompt = engine.prompt().ok_or(EngineError::GameOver)?;
        let turn = person.hint_for(&prompt);
        debug!(?turn, guess = prompt.guess, "Hint collected");
        match engine.step(turn)? {
            Step::Continue(report) => person.on_round(&report),
            Step::Finished {
                last_round,
                outcome,
            } => {
                if let Some(report) = last_round {
                    person.on_round(&report);
                }
                return Ok(outcome);
            }
        }
    }
}

/// Drives an existing user-guesses engine until it finishes.
///
/// # Errors
///
/// Returns [`EngineError::GameOver`] if the engine has already finished.
#[instrument(skip_all)]
pub fn play_user_guesses<P: GuessProvider>(
    engine: &mut UserGuessesEngine,
    person: &mut P,
) -> Result<GameOutcome, EngineError> {
    loop {
        let prompt = engine.prompt().ok_or(EngineError::GameOver)?;
        let turn = person.next_guess(&prompt);
        debug!(?turn, "Guess collected");
        match engine.step(turn)? {
            Step::Continue(report) => person.on_round(&report),
            Step::Finished {
                last_round,
                outcome,
            } => {
                if let Some(report) = last_round {
                    person.on_round(&report);
                }
                return Ok(outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted {
        hints: Vec<Turn<Hint>>,
        rounds_seen: usize,
    }

    impl HintProvider for Scripted {
        fn hint_for(&mut self, _prompt: &GuessPrompt) -> Turn<Hint> {
            if self.hints.is_empty() {
                Turn::Abort
            } else {
                self.hints.remove(0)
            }
        }

        fn on_round(&mut self, _report: &RoundReport) {
            self.rounds_seen += 1;
        }
    }

    #[test]
    fn test_runner_stops_on_outcome() {
        let difficulty = Difficulty::builtin("Beginner").unwrap();
        let mut person = Scripted {
            hints: vec![Turn::Play(Hint::Lower), Turn::Play(Hint::Correct)],
            rounds_seen: 0,
        };
        let outcome = run_computer_guesses_game(&difficulty, &mut person).unwrap();
        assert_eq!(
            outcome,
            GameOutcome::Won {
                rounds_played: 2,
                secret: 25
            }
        );
        assert_eq!(person.rounds_seen, 2);
    }

    #[test]
    fn test_runner_rejects_finished_engine() {
        let difficulty = Difficulty::builtin("Beginner").unwrap();
        let mut engine = ComputerGuessesEngine::new(&difficulty);
        engine.step(Turn::Abort).unwrap();
        let mut person = Scripted {
            hints: Vec::new(),
            rounds_seen: 0,
        };
        assert_eq!(
            play_computer_guesses(&mut engine, &mut person),
            Err(EngineError::GameOver)
        );
    }
}
