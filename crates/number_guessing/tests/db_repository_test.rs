//! Tests for database repository operations.

use strictly_guessing::{DifficultyDraft, GameMode, OutcomeKind};
use tempfile::NamedTempFile;

use number_guessing::{
    DbErrorKind, GameRepository, NewCustomDifficulty, NewGameStat, NewUser, User,
};

/// Creates a temporary database file with migrations applied. The file handle
/// must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, GameRepository) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    repo.migrate().expect("Migrations failed");
    (db_file, repo)
}

fn create_user(repo: &GameRepository, email: &str) -> User {
    repo.create_user(NewUser::new(
        email.to_string(),
        "Player".to_string(),
        Some("Beginner".to_string()),
    ))
    .expect("Create failed")
}

fn stat(user_id: i32, mode: GameMode, outcome: OutcomeKind) -> NewGameStat {
    NewGameStat::new(
        user_id,
        mode.to_string(),
        "Beginner".to_string(),
        outcome.to_string(),
        4,
    )
}

#[test]
fn test_migrate_is_idempotent() {
    let (_db, repo) = setup_test_db();
    repo.migrate().expect("Second migrate failed");
}

#[test]
fn test_empty_path_rejected() {
    let err = GameRepository::new("  ".to_string()).expect_err("Empty path");
    assert_eq!(err.kind, DbErrorKind::Connection);
}

#[test]
fn test_create_and_find_user() {
    let (_db, repo) = setup_test_db();
    let user = create_user(&repo, "alice@example.com");
    assert!(*user.id() > 0);
    assert_eq!(user.current_difficulty().as_deref(), Some("Beginner"));

    let found = repo
        .get_user_by_email("alice@example.com")
        .expect("Query failed")
        .expect("User missing");
    assert_eq!(found, user);
    assert_eq!(repo.get_user(*user.id()).expect("Query failed"), Some(user));
}

#[test]
fn test_unknown_email_not_found() {
    let (_db, repo) = setup_test_db();
    assert!(repo.get_user_by_email("nobody@example.com").expect("Query failed").is_none());
}

#[test]
fn test_duplicate_email_fails() {
    let (_db, repo) = setup_test_db();
    create_user(&repo, "bob@example.com");
    let result = repo.create_user(NewUser::new(
        "bob@example.com".to_string(),
        "Other".to_string(),
        None,
    ));
    let err = result.expect_err("Duplicate email should fail");
    assert!(err.is_conflict());
}

#[test]
fn test_update_username_and_difficulty() {
    let (_db, repo) = setup_test_db();
    let user = create_user(&repo, "carol@example.com");

    let renamed = repo.update_username(*user.id(), "Carol").expect("Update failed");
    assert_eq!(renamed.username(), "Carol");

    let updated = repo
        .set_current_difficulty(*user.id(), "Expert")
        .expect("Update failed");
    assert_eq!(updated.current_difficulty().as_deref(), Some("Expert"));
    assert_eq!(updated.username(), "Carol");
}

#[test]
fn test_update_missing_user_fails() {
    let (_db, repo) = setup_test_db();
    let err = repo.update_username(999, "Ghost").expect_err("Missing user");
    assert_eq!(err.kind, DbErrorKind::NotFound);
}

#[test]
fn test_custom_difficulties_listed_in_creation_order() {
    let (_db, repo) = setup_test_db();
    let user = create_user(&repo, "dave@example.com");
    let other = create_user(&repo, "erin@example.com");

    for (name, max) in [("Zeta", 20), ("Alpha", 30)] {
        let draft = DifficultyDraft::new(name.to_string(), 5, 1, max);
        let row = NewCustomDifficulty::from_draft(*user.id(), &draft).expect("Convert failed");
        repo.insert_custom_difficulty(row).expect("Insert failed");
    }

    let rows = repo.list_custom_difficulties(*user.id()).expect("List failed");
    let names: Vec<&str> = rows.iter().map(|r| r.name().as_str()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha"]);
    assert_eq!(rows[1].to_difficulty().expect("Invalid row").max_value(), 30);

    assert!(repo.list_custom_difficulties(*other.id()).expect("List failed").is_empty());
}

#[test]
fn test_custom_difficulty_name_unique_per_account() {
    let (_db, repo) = setup_test_db();
    let user = create_user(&repo, "frank@example.com");
    let other = create_user(&repo, "gina@example.com");
    let draft = DifficultyDraft::new("Tiny".to_string(), 3, 1, 8);

    let row = NewCustomDifficulty::from_draft(*user.id(), &draft).expect("Convert failed");
    repo.insert_custom_difficulty(row.clone()).expect("Insert failed");
    let err = repo.insert_custom_difficulty(row).expect_err("Duplicate name");
    assert!(err.is_conflict());

    let row = NewCustomDifficulty::from_draft(*other.id(), &draft).expect("Convert failed");
    assert!(repo.insert_custom_difficulty(row).is_ok());
}

#[test]
fn test_delete_custom_difficulty_scoped_to_account() {
    let (_db, repo) = setup_test_db();
    let user = create_user(&repo, "hank@example.com");
    let other = create_user(&repo, "ivy@example.com");
    let draft = DifficultyDraft::new("Tiny".to_string(), 3, 1, 8);
    let row = NewCustomDifficulty::from_draft(*user.id(), &draft).expect("Convert failed");
    let stored = repo.insert_custom_difficulty(row).expect("Insert failed");

    assert_eq!(repo.delete_custom_difficulty(*other.id(), *stored.id()).expect("Delete failed"), 0);
    assert_eq!(repo.delete_custom_difficulty(*user.id(), *stored.id()).expect("Delete failed"), 1);
    assert_eq!(repo.delete_custom_difficulty(*user.id(), *stored.id()).expect("Delete failed"), 0);
}

#[test]
fn test_record_game() {
    let (_db, repo) = setup_test_db();
    let user = create_user(&repo, "jack@example.com");

    let recorded = repo
        .record_game(stat(*user.id(), GameMode::UserGuesses, OutcomeKind::Won))
        .expect("Record failed");
    assert_eq!(recorded.user_id(), user.id());
    assert_eq!(recorded.mode(), "user_guesses");
    assert_eq!(recorded.outcome(), "won");
    assert_eq!(*recorded.rounds_played(), 4);
    assert_eq!(recorded.parse_outcome().expect("Parse failed"), OutcomeKind::Won);
}

#[test]
fn test_user_stats_most_recent_first() {
    let (_db, repo) = setup_test_db();
    let user = create_user(&repo, "kate@example.com");

    repo.record_game(stat(*user.id(), GameMode::UserGuesses, OutcomeKind::Won))
        .expect("Record failed");
    repo.record_game(stat(*user.id(), GameMode::ComputerGuesses, OutcomeKind::Contradiction))
        .expect("Record failed");

    let stats = repo.get_user_stats(*user.id()).expect("Query failed");
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].outcome(), "contradiction");
}

#[test]
fn test_aggregated_stats_take_person_side() {
    let (_db, repo) = setup_test_db();
    let user = create_user(&repo, "liam@example.com");
    let id = *user.id();

    for (mode, outcome) in [
        (GameMode::UserGuesses, OutcomeKind::Won),
        (GameMode::ComputerGuesses, OutcomeKind::LostRounds),
        (GameMode::UserGuesses, OutcomeKind::LostRounds),
        (GameMode::ComputerGuesses, OutcomeKind::Won),
        (GameMode::ComputerGuesses, OutcomeKind::Contradiction),
    ] {
        repo.record_game(stat(id, mode, outcome)).expect("Record failed");
    }

    let aggregated = repo.get_aggregated_stats(id).expect("Stats failed");
    assert_eq!(*aggregated.total_games(), 5);
    assert_eq!(*aggregated.wins(), 2);
    assert_eq!(*aggregated.losses(), 2);
    assert_eq!(*aggregated.contradictions(), 1);
}

#[test]
fn test_aggregated_stats_empty() {
    let (_db, repo) = setup_test_db();
    let user = create_user(&repo, "mia@example.com");
    let aggregated = repo.get_aggregated_stats(*user.id()).expect("Stats failed");
    assert_eq!(*aggregated.total_games(), 0);
    assert_eq!(aggregated.win_rate(), 0.0);
}
