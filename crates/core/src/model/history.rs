use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::doomsday::weekday_of;
use crate::model::{CalendarDate, Weekday};

//
// ─── HISTORY ENTRY ─────────────────────────────────────────────────────────────
//

/// One answered challenge.
///
/// Stored with the field names `date`, `guess`, `correct` and `timestamp`. The
/// date is the display label rendered when the guess was recorded
/// ("6th June 2000") and is kept verbatim; older stores may hold labels in
/// other languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    date: String,
    guess: Weekday,
    correct: bool,
    timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Grade `guess` against the true weekday of `date`.
    #[must_use]
    pub fn graded(date: CalendarDate, guess: Weekday, timestamp: DateTime<Utc>) -> Self {
        Self {
            date: date.long_form(),
            guess,
            correct: weekday_of(date) == guess,
            timestamp,
        }
    }

    /// The date label exactly as recorded.
    #[must_use]
    pub fn date_label(&self) -> &str {
        &self.date
    }

    /// The recorded date, if its label is in a form this crate reads.
    #[must_use]
    pub fn date(&self) -> Option<CalendarDate> {
        self.date.parse().ok()
    }

    #[must_use]
    pub fn guess(&self) -> Weekday {
        self.guess
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.correct
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

//
// ─── HISTORY ───────────────────────────────────────────────────────────────────
//

/// Number of consecutive correct entries at the end of `entries`.
#[must_use]
pub fn trailing_streak(entries: &[HistoryEntry]) -> usize {
    entries
        .iter()
        .rev()
        .take_while(|entry| entry.is_correct())
        .count()
}

/// Append-only record of every answer, oldest first.
///
/// The current streak is recomputed from the tail when a history is loaded and
/// maintained incrementally on [`History::push`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
    streak: usize,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let streak = trailing_streak(&entries);
        Self { entries, streak }
    }

    /// Append an entry, extending the streak on a correct answer and
    /// resetting it otherwise.
    pub fn push(&mut self, entry: HistoryEntry) {
        if entry.is_correct() {
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        self.entries.push(entry);
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn total_guesses(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn total_correct(&self) -> usize {
        self.entries.iter().filter(|e| e.is_correct()).count()
    }

    #[must_use]
    pub fn current_streak(&self) -> usize {
        self.streak
    }

    /// Longest run of correct answers anywhere in the history.
    #[must_use]
    pub fn best_streak(&self) -> usize {
        let mut best = 0;
        let mut run = 0;
        for entry in &self.entries {
            if entry.is_correct() {
                run += 1;
                best = best.max(run);
            } else {
                run = 0;
            }
        }
        best
    }

    /// Up to `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev().take(limit)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
