//! Tests for the persistent difficulty registry.

use strictly_guessing::{
    ComputerGuessesEngine, DifficultyDraft, DifficultyField, DifficultyRegistry, GameEngine,
    GameOutcome, Hint, Turn, ValidationError,
};
use tempfile::NamedTempFile;

use number_guessing::{DifficultyService, GameRepository, NewUser, RegistryError};

fn setup() -> (NamedTempFile, DifficultyService, i32) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.migrate().expect("Migrations failed");
    let user = repo
        .create_user(NewUser::new("p@example.com".to_string(), "Player".to_string(), None))
        .expect("Create failed");
    (db_file, DifficultyService::new(repo), *user.id())
}

fn draft(name: &str, rounds: u32, min: u32, max: u32) -> DifficultyDraft {
    DifficultyDraft::new(name.to_string(), rounds, min, max)
}

fn validation_field(err: RegistryError) -> DifficultyField {
    match err {
        RegistryError::Validation(e) => e.field(),
        other => panic!("Expected validation error, got {}", other),
    }
}

#[test]
fn test_builtins_first() {
    let (_db, registry, account) = setup();
    let names: Vec<String> = registry
        .list_all(account)
        .expect("List failed")
        .iter()
        .map(|d| d.name().to_string())
        .collect();
    assert_eq!(names, vec!["Beginner", "Intermediate", "Expert"]);
}

#[test]
fn test_create_and_list_custom() {
    let (_db, registry, account) = setup();
    let created = registry
        .create_custom(account, draft("Tiny", 3, 1, 8))
        .expect("Create failed");
    assert!(created.custom_id().is_some());
    assert_eq!(created.to_string(), "Tiny - Rounds: 3 - Min value: 1 - Max value: 8");

    let customs = registry.list_custom(account).expect("List failed");
    assert_eq!(customs, vec![created]);
}

#[test]
fn test_short_name_fails_on_name() {
    let (_db, registry, account) = setup();
    let err = registry
        .create_custom(account, draft("AB", 5, 10, 20))
        .unwrap_err();
    assert_eq!(validation_field(err), DifficultyField::Name);
    assert!(registry.list_custom(account).expect("List failed").is_empty());
}

#[test]
fn test_max_below_min_fails_on_max() {
    let (_db, registry, account) = setup();
    let err = registry
        .create_custom(account, draft("Easy", 10, 50, 10))
        .unwrap_err();
    assert_eq!(validation_field(err), DifficultyField::MaxValue);
    assert!(registry.list_custom(account).expect("List failed").is_empty());
}

#[test]
fn test_rounds_and_min_limits() {
    let (_db, registry, account) = setup();
    let err = registry
        .create_custom(account, draft("Many", 100, 1, 10))
        .unwrap_err();
    assert_eq!(validation_field(err), DifficultyField::Rounds);

    let err = registry
        .create_custom(account, draft("High", 5, 999_990, 999_999))
        .unwrap_err();
    assert_eq!(validation_field(err), DifficultyField::MinValue);

    assert!(registry
        .create_custom(account, draft("Edge", 99, 999_989, 999_999))
        .is_ok());
}

#[test]
fn test_duplicate_names_rejected_case_sensitively() {
    let (_db, registry, account) = setup();
    let err = registry
        .create_custom(account, draft("Expert", 5, 1, 10))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Validation(ValidationError::DuplicateName { .. })
    ));

    registry
        .create_custom(account, draft("Tiny", 3, 1, 8))
        .expect("Create failed");
    let err = registry
        .create_custom(account, draft("Tiny", 4, 1, 9))
        .unwrap_err();
    assert_eq!(validation_field(err), DifficultyField::Name);

    assert!(registry.create_custom(account, draft("tiny", 4, 1, 9)).is_ok());
}

#[test]
fn test_delete_missing_is_not_found() {
    let (_db, registry, account) = setup();
    assert!(matches!(
        registry.delete_custom(account, 42),
        Err(RegistryError::NotFound { id: 42 })
    ));
}

#[test]
fn test_delete_mid_game_keeps_engine_difficulty() {
    let (_db, registry, account) = setup();
    let tiny = registry
        .create_custom(account, draft("Tiny", 3, 1, 8))
        .expect("Create failed");
    let mut engine = ComputerGuessesEngine::new(&tiny);
    engine.step(Turn::Play(Hint::Higher)).expect("Step failed");

    let id = tiny.custom_id().expect("Custom id missing");
    registry.delete_custom(account, id).expect("Delete failed");
    assert!(registry.find(account, "Tiny").expect("Find failed").is_none());

    // [1,8]: 4 higher -> [5,8], 6 correct
    let step = engine.step(Turn::Play(Hint::Correct)).expect("Step failed");
    assert_eq!(
        step.outcome(),
        Some(GameOutcome::Won {
            rounds_played: 2,
            secret: 6
        })
    );
    assert_eq!(engine.difficulty(), &tiny);
}

#[test]
fn test_resolve_falls_back_for_stale_names() {
    let (_db, registry, account) = setup();
    registry
        .create_custom(account, draft("Tiny", 3, 1, 8))
        .expect("Create failed");

    let found = registry
        .resolve(account, Some("Tiny"), "Beginner")
        .expect("Resolve failed");
    assert_eq!(found.name(), "Tiny");

    let fallback = registry
        .resolve(account, Some("Gone"), "Expert")
        .expect("Resolve failed");
    assert_eq!(fallback.name(), "Expert");

    assert!(matches!(
        registry.resolve(account, None, "Nope"),
        Err(RegistryError::UnknownName { .. })
    ));
}
