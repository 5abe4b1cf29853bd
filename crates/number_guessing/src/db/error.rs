//! Database error types.

use derive_more::{Display, Error};
use diesel::result::DatabaseErrorKind;
use tracing::instrument;

/// What went wrong in the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DbErrorKind {
    /// The database file could not be opened.
    #[display("connection")]
    Connection,
    /// Embedded migrations did not apply.
    #[display("migration")]
    Migration,
    /// The row asked for does not exist.
    #[display("not found")]
    NotFound,
    /// A unique constraint rejected the write (duplicate email or difficulty name).
    #[display("conflict")]
    Conflict,
    /// A stored or incoming value does not fit the domain.
    #[display("data")]
    Data,
    /// Any other query failure.
    #[display("query")]
    Query,
}

/// Database error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Database {} error: {} at {}:{}", kind, message, file, line)]
pub struct DbError {
    /// Category of the failure.
    pub kind: DbErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a database error of `kind`, recording the caller's location.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(kind: DbErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for a [`DbErrorKind::Data`] error.
    #[track_caller]
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(DbErrorKind::Data, message)
    }

    /// True when a unique constraint rejected the write.
    pub fn is_conflict(&self) -> bool {
        self.kind == DbErrorKind::Conflict
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        let kind = match &err {
            diesel::result::Error::NotFound => DbErrorKind::NotFound,
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                DbErrorKind::Conflict
            }
            _ => DbErrorKind::Query,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(DbErrorKind::Connection, err.to_string())
    }
}

impl From<strictly_guessing::ValidationError> for DbError {
    #[track_caller]
    fn from(err: strictly_guessing::ValidationError) -> Self {
        Self::data(format!("Stored difficulty is invalid: {}", err))
    }
}
