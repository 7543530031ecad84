use serde::Serialize;

use doomsday_core::doomsday::doomsday;
use doomsday_core::model::{History, Weekday};

use super::service::{QuizSession, RoundResult};

/// Running totals shown beside every round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TotalsView {
    pub total_guesses: usize,
    pub total_correct: usize,
    pub current_streak: usize,
    pub best_streak: usize,
}

impl TotalsView {
    #[must_use]
    pub fn from_history(history: &History) -> Self {
        Self {
            total_guesses: history.total_guesses(),
            total_correct: history.total_correct(),
            current_streak: history.current_streak(),
            best_streak: history.best_streak(),
        }
    }
}

/// What the player learns once a guess is graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealView {
    pub challenge: String,
    pub correct: bool,
    pub guess: &'static str,
    pub answer: &'static str,
    pub year: i32,
    /// Weekday of this year's doomsday (the weekday of 6 June).
    pub doomsday: &'static str,
}

impl RevealView {
    #[must_use]
    pub fn from_result(result: &RoundResult) -> Self {
        let year = result.challenge.year();
        Self {
            challenge: result.challenge.long_form(),
            correct: result.correct,
            guess: result.guess.name(),
            answer: result.revealed.name(),
            year,
            doomsday: doomsday(year).name(),
        }
    }
}

/// Everything the presentation layer needs to draw the current round.
///
/// Guesses come back as a weekday index into `weekday_labels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundView {
    pub challenge: String,
    pub weekday_labels: Vec<&'static str>,
    pub reveal: Option<RevealView>,
    pub totals: TotalsView,
}

impl RoundView {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        Self {
            challenge: session.challenge().long_form(),
            weekday_labels: Weekday::ALL.iter().map(|day| day.name()).collect(),
            reveal: session.pending_result().map(RevealView::from_result),
            totals: TotalsView::from_history(session.history()),
        }
    }
}
