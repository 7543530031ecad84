//! Shared error types for the services crate.

use thiserror::Error;

use doomsday_core::model::WeekdayError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by quiz sessions.
///
/// Calling an operation in the wrong round state is reported, never ignored.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a guess was already submitted for this challenge")]
    NotAwaitingGuess,
    #[error("the current round has not been resolved yet")]
    RoundNotResolved,
    #[error(transparent)]
    Weekday(#[from] WeekdayError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
