mod date;
mod history;
mod settings;
mod weekday;

pub use date::{
    CalendarDate, CalendarError, MONTH_NAMES, days_in_month, is_leap_year, ordinal_suffix,
};
pub use history::{History, HistoryEntry, trailing_streak};
pub use settings::{AdvancePolicy, ConfigError, DateRange, QuizSettings};
pub use weekday::{Weekday, WeekdayError};
