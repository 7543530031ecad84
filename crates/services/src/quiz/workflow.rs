use std::sync::Arc;

use tracing::{info, warn};

use doomsday_core::model::{History, QuizSettings, Weekday};
use storage::repository::{HistoryRepository, StorageError};

use super::service::{QuizSession, RoundResult};
use crate::Clock;
use crate::error::QuizError;
use crate::sampler::DateSampler;

/// Result of a guess, including whether the updated history reached storage.
///
/// A failed save does not undo the round: the in-memory history and streak keep
/// the new entry and the next successful save writes it out with everything else.
#[derive(Debug)]
pub struct GuessOutcome {
    pub result: RoundResult,
    pub save_error: Option<StorageError>,
}

impl GuessOutcome {
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.save_error.is_none()
    }
}

/// Orchestrates loading history, opening sessions and persisted guessing.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    settings: QuizSettings,
    history: Arc<dyn HistoryRepository>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, settings: QuizSettings, history: Arc<dyn HistoryRepository>) -> Self {
        Self {
            clock,
            settings,
            history,
        }
    }

    /// Load the stored history. Unreadable data is logged and treated as empty.
    pub async fn load_history(&self) -> History {
        match self.history.load_history().await {
            Ok(entries) => History::from_entries(entries),
            Err(err) => {
                warn!(error = %err, "stored history is unreadable; starting from an empty history");
                History::new()
            }
        }
    }

    /// Open a session over the stored history with an OS-seeded sampler.
    pub async fn open_session(&self) -> QuizSession {
        self.open_session_with(DateSampler::new(self.settings.range))
            .await
    }

    /// Open a session over the stored history drawing challenges from `sampler`.
    ///
    /// If the store cannot be reached the session starts empty and is detached:
    /// it will not write until the stored history has been read again.
    pub async fn open_session_with(&self, sampler: DateSampler) -> QuizSession {
        let (history, detached) = match self.history.load_history().await {
            Ok(entries) => (History::from_entries(entries), false),
            Err(err) => {
                warn!(error = %err, "stored history is unreadable; starting from an empty history");
                (History::new(), err.is_transient())
            }
        };
        info!(
            total_guesses = history.total_guesses(),
            current_streak = history.current_streak(),
            detached,
            "quiz session opened"
        );
        let mut session = QuizSession::new(sampler, self.settings.advance, history);
        if detached {
            session.detach();
        }
        session
    }

    /// Grade a guess, then write the full history.
    ///
    /// A detached session first re-reads the store and merges what it finds, so
    /// entries that could not be read earlier are never overwritten.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAwaitingGuess` if the round was already resolved. Storage
    /// failures are reported through `GuessOutcome::save_error` instead.
    pub async fn submit_guess(
        &self,
        session: &mut QuizSession,
        guess: Weekday,
    ) -> Result<GuessOutcome, QuizError> {
        let result = session.submit_guess(guess, self.clock.now())?;

        if session.is_detached() {
            match self.history.load_history().await {
                Ok(stored) => {
                    info!(stored = stored.len(), "stored history is readable again; merging");
                    session.rebase_onto(stored);
                }
                Err(err) if err.is_transient() => {
                    warn!(error = %err, "stored history is still unreadable; not overwriting it");
                    return Ok(GuessOutcome {
                        result,
                        save_error: Some(err),
                    });
                }
                Err(err) => {
                    warn!(error = %err, "stored history is malformed; replacing it");
                    session.rebase_onto(Vec::new());
                }
            }
        }

        let save_error = match self.history.save_history(session.history().entries()).await {
            Ok(()) => None,
            Err(err) => {
                warn!(
                    error = %err,
                    total_guesses = session.total_guesses(),
                    "failed to save history; keeping the result in memory"
                );
                Some(err)
            }
        };

        Ok(GuessOutcome { result, save_error })
    }

    /// Grade a guess given as a weekday index (Monday = 0).
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Weekday` for an index above 6, otherwise as [`Self::submit_guess`].
    pub async fn submit_index(
        &self,
        session: &mut QuizSession,
        index: u8,
    ) -> Result<GuessOutcome, QuizError> {
        let guess = Weekday::from_index(index)?;
        self.submit_guess(session, guess).await
    }
}
