#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod quiz;
pub mod sampler;

pub use doomsday_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuizError};
pub use quiz::{
    GuessOutcome, QuizLoopService, QuizSession, RevealView, RoundResult, RoundState, RoundView,
    TotalsView,
};
pub use sampler::DateSampler;
