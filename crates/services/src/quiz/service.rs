use chrono::{DateTime, Utc};
use tracing::debug;

use doomsday_core::doomsday::weekday_of;
use doomsday_core::model::{AdvancePolicy, CalendarDate, History, HistoryEntry, Weekday};

use crate::error::QuizError;
use crate::sampler::DateSampler;

//
// ─── ROUND ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    AwaitingGuess,
    Resolved,
}

/// Outcome of a single graded guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub challenge: CalendarDate,
    pub guess: Weekday,
    pub correct: bool,
    pub revealed: Weekday,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One player's quiz: the current challenge, the round state and the full history.
///
/// The session is the single source of truth for the presentation layer. It is
/// purely in-memory; persisting the history after a guess is done by
/// [`crate::quiz::QuizLoopService`].
#[derive(Debug, Clone)]
pub struct QuizSession {
    sampler: DateSampler,
    advance: AdvancePolicy,
    history: History,
    challenge: CalendarDate,
    pending: Option<RoundResult>,
    detached: bool,
}

impl QuizSession {
    /// Create a session over `history` and draw the first challenge.
    #[must_use]
    pub fn new(mut sampler: DateSampler, advance: AdvancePolicy, history: History) -> Self {
        let challenge = sampler.sample();
        debug!(%challenge, "first challenge drawn");
        Self {
            sampler,
            advance,
            history,
            challenge,
            pending: None,
            detached: false,
        }
    }

    /// Draw a fresh challenge and wait for a guess.
    pub fn start(&mut self) {
        self.challenge = self.sampler.sample();
        self.pending = None;
        debug!(challenge = %self.challenge, "challenge drawn");
    }

    /// Grade `guess` against the current challenge and record it in the history.
    ///
    /// `recorded_at` becomes the entry's timestamp.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAwaitingGuess` if the round was already resolved.
    pub fn submit_guess(
        &mut self,
        guess: Weekday,
        recorded_at: DateTime<Utc>,
    ) -> Result<RoundResult, QuizError> {
        if self.pending.is_some() {
            return Err(QuizError::NotAwaitingGuess);
        }

        let revealed = weekday_of(self.challenge);
        let entry = HistoryEntry::graded(self.challenge, guess, recorded_at);
        let result = RoundResult {
            challenge: self.challenge,
            guess,
            correct: entry.is_correct(),
            revealed,
        };
        self.history.push(entry);
        debug!(
            challenge = %result.challenge,
            %guess,
            correct = result.correct,
            streak = self.history.current_streak(),
            "round resolved"
        );

        match self.advance {
            AdvancePolicy::ExplicitReset => self.pending = Some(result),
            AdvancePolicy::AutoAdvance => self.start(),
        }
        Ok(result)
    }

    /// Leave a resolved round and draw the next challenge.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::RoundNotResolved` while a guess is still expected.
    pub fn reset(&mut self) -> Result<(), QuizError> {
        if self.pending.is_none() {
            return Err(QuizError::RoundNotResolved);
        }
        self.start();
        Ok(())
    }

    /// Mark the history as not reflecting what is stored, so it must not replace it.
    pub(crate) fn detach(&mut self) {
        self.detached = true;
    }

    /// Put the stored entries in front of the ones recorded this session.
    pub(crate) fn rebase_onto(&mut self, stored: Vec<HistoryEntry>) {
        let mut entries = stored;
        entries.extend_from_slice(self.history.entries());
        self.history = History::from_entries(entries);
        self.detached = false;
    }

    /// True while the stored history could not be read and this session only
    /// holds the answers given since.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    #[must_use]
    pub fn state(&self) -> RoundState {
        if self.pending.is_some() {
            RoundState::Resolved
        } else {
            RoundState::AwaitingGuess
        }
    }

    #[must_use]
    pub fn challenge(&self) -> CalendarDate {
        self.challenge
    }

    #[must_use]
    pub fn pending_result(&self) -> Option<&RoundResult> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn total_guesses(&self) -> usize {
        self.history.total_guesses()
    }

    #[must_use]
    pub fn total_correct(&self) -> usize {
        self.history.total_correct()
    }

    #[must_use]
    pub fn current_streak(&self) -> usize {
        self.history.current_streak()
    }
}
