mod service;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use service::{QuizSession, RoundResult, RoundState};
pub use view::{RevealView, RoundView, TotalsView};
pub use workflow::{GuessOutcome, QuizLoopService};
