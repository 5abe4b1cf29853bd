//! End-to-end engine scenarios driven through the public runners.

use rand::SeedableRng;
use rand::rngs::StdRng;
use strictly_guessing::{
    ComputerGuessesEngine, Difficulty, EngineError, GameEngine, GameOutcome, GuessPrompt,
    GuessProvider, Hint, HintProvider, RoundPrompt, RoundReport, TrackerStatus, Turn,
    UserGuessesEngine, guaranteed_rounds, play_user_guesses, run_computer_guesses_game,
    run_user_guesses_game,
};

fn difficulty(rounds: u32, min: u32, max: u32) -> Difficulty {
    Difficulty::restore(1, "Scenario".to_string(), rounds, min, max).unwrap()
}

/// Answers every guess truthfully.
struct HonestOracle {
    secret: u32,
}

impl HintProvider for HonestOracle {
    fn hint_for(&mut self, prompt: &GuessPrompt) -> Turn<Hint> {
        Turn::Play(Hint::compare(prompt.guess, self.secret))
    }
}

/// Replays a fixed list of hints, then leaves.
struct ScriptedHints(Vec<Hint>);

impl HintProvider for ScriptedHints {
    fn hint_for(&mut self, _prompt: &GuessPrompt) -> Turn<Hint> {
        if self.0.is_empty() {
            Turn::Abort
        } else {
            Turn::Play(self.0.remove(0))
        }
    }
}

/// Replays a fixed list of guesses and records every reported round.
struct ScriptedGuesses {
    guesses: Vec<u32>,
    reports: Vec<RoundReport>,
}

impl ScriptedGuesses {
    fn new(guesses: Vec<u32>) -> Self {
        Self {
            guesses,
            reports: Vec::new(),
        }
    }
}

impl GuessProvider for ScriptedGuesses {
    fn next_guess(&mut self, _prompt: &RoundPrompt) -> Turn<u32> {
        if self.guesses.is_empty() {
            Turn::Abort
        } else {
            Turn::Play(self.guesses.remove(0))
        }
    }

    fn on_round(&mut self, report: &RoundReport) {
        self.reports.push(*report);
    }
}

#[test]
fn test_user_finds_secret_in_four_rounds() {
    let mut engine = UserGuessesEngine::with_secret(&difficulty(5, 1, 100), 42).unwrap();
    let mut person = ScriptedGuesses::new(vec![50, 25, 37, 42]);

    let outcome = play_user_guesses(&mut engine, &mut person).unwrap();

    assert_eq!(
        outcome,
        GameOutcome::Won {
            rounds_played: 4,
            secret: 42
        }
    );
    let hints: Vec<Hint> = person.reports.iter().map(|r| r.hint).collect();
    assert_eq!(
        hints,
        vec![Hint::Lower, Hint::Higher, Hint::Higher, Hint::Correct]
    );
    assert_eq!(engine.rounds().remaining(), 1);
}

#[test]
fn test_computer_loses_small_budget() {
    let difficulty = difficulty(2, 1, 1000);

    let outcome = run_computer_guesses_game(&difficulty, &mut HonestOracle { secret: 7 }).unwrap();
    assert_eq!(
        outcome,
        GameOutcome::LostRounds {
            rounds_played: 2,
            secret: None
        }
    );

    // Only secrets hit exactly by the first two midpoints are found.
    let outcome = run_computer_guesses_game(&difficulty, &mut HonestOracle { secret: 500 }).unwrap();
    assert_eq!(outcome.rounds_played(), 1);
    let outcome = run_computer_guesses_game(&difficulty, &mut HonestOracle { secret: 250 }).unwrap();
    assert!(matches!(outcome, GameOutcome::Won { rounds_played: 2, .. }));
}

#[test]
fn test_honest_play_wins_within_guaranteed_rounds() {
    for (min, max) in [(1, 100), (0, 1), (1, 1024), (5, 17), (999_000, 999_999)] {
        let size = max - min + 1;
        let difficulty = difficulty(guaranteed_rounds(size), min, max);
        for secret in min..=max {
            let outcome =
                run_computer_guesses_game(&difficulty, &mut HonestOracle { secret }).unwrap();
            assert!(
                matches!(outcome, GameOutcome::Won { secret: found, rounds_played }
                    if found == secret && rounds_played <= guaranteed_rounds(size)),
                "secret {} in {}..={} gave {:?}",
                secret,
                min,
                max,
                outcome
            );
        }
    }
}

#[test]
fn test_inconsistent_hints_report_contradiction() {
    // [1,10]: 5 lower -> [1,4], 2 higher -> [3,4], 3 lower -> empty
    let outcome = run_computer_guesses_game(
        &difficulty(10, 1, 10),
        &mut ScriptedHints(vec![Hint::Lower, Hint::Higher, Hint::Lower]),
    )
    .unwrap();
    assert_eq!(outcome, GameOutcome::Contradiction { rounds_played: 3 });
}

#[test]
fn test_contradiction_is_not_a_loss() {
    let mut engine = ComputerGuessesEngine::new(&difficulty(3, 1, 10));
    engine.step(Turn::Play(Hint::Lower)).unwrap();
    engine.step(Turn::Play(Hint::Higher)).unwrap();
    // Budget and contradiction coincide on the last round; contradiction wins.
    let step = engine.step(Turn::Play(Hint::Lower)).unwrap();
    assert_eq!(
        step.outcome(),
        Some(GameOutcome::Contradiction { rounds_played: 3 })
    );
    assert_eq!(engine.tracker().status(), TrackerStatus::Contradiction);
    assert_eq!(
        engine.step(Turn::Play(Hint::Correct)),
        Err(EngineError::GameOver)
    );
}

#[test]
fn test_abort_before_first_round() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut person = ScriptedGuesses::new(Vec::new());
    let outcome = run_user_guesses_game(&difficulty(5, 1, 100), &mut person, &mut rng).unwrap();
    assert_eq!(outcome, GameOutcome::Aborted { rounds_played: 0 });
    assert!(person.reports.is_empty());
}

#[test]
fn test_seeded_secret_is_deterministic() {
    let difficulty = difficulty(5, 1, 999_999);
    let mut first = UserGuessesEngine::new(&difficulty, &mut StdRng::seed_from_u64(99));
    let mut second = UserGuessesEngine::new(&difficulty, &mut StdRng::seed_from_u64(99));
    first.step(Turn::Abort).unwrap();
    second.step(Turn::Abort).unwrap();
    assert_eq!(first.revealed_secret(), second.revealed_secret());
    assert!(first.revealed_secret().is_some());
}

#[test]
fn test_final_round_miss_reveals_secret() {
    let mut engine = UserGuessesEngine::with_secret(&difficulty(2, 1, 100), 99).unwrap();
    let mut person = ScriptedGuesses::new(vec![10, 20]);
    let outcome = play_user_guesses(&mut engine, &mut person).unwrap();
    assert_eq!(
        outcome,
        GameOutcome::LostRounds {
            rounds_played: 2,
            secret: Some(99)
        }
    );
    assert_eq!(person.reports.len(), 2);
}
