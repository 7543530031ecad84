use thiserror::Error;

use crate::model::CalendarDate;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("date range start {start} is after end {end}")]
    InvertedRange {
        start: CalendarDate,
        end: CalendarDate,
    },
}

//
// ─── DATE RANGE ────────────────────────────────────────────────────────────────
//

/// Inclusive span of dates challenges are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: CalendarDate,
    end: CalendarDate,
}

impl DateRange {
    /// 1700-01-01 through 2400-12-31.
    pub const DEFAULT: DateRange = DateRange {
        start: CalendarDate::from_parts_unchecked(1700, 1, 1),
        end: CalendarDate::from_parts_unchecked(2400, 12, 31),
    };

    /// # Errors
    ///
    /// Returns `ConfigError::InvertedRange` if `start` is after `end`.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, ConfigError> {
        if start > end {
            return Err(ConfigError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> CalendarDate {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> CalendarDate {
        self.end
    }

    #[must_use]
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the range, both ends included.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        self.end.to_day_number() - self.start.to_day_number() + 1
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//
// ─── QUIZ SETTINGS ─────────────────────────────────────────────────────────────
//

/// What happens after a guess is graded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdvancePolicy {
    /// The round stays resolved until the player asks for a new date.
    #[default]
    ExplicitReset,
    /// A new challenge is drawn as soon as the guess is recorded.
    AutoAdvance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuizSettings {
    pub range: DateRange,
    pub advance: AdvancePolicy,
}

impl QuizSettings {
    #[must_use]
    pub fn new(range: DateRange, advance: AdvancePolicy) -> Self {
        Self { range, advance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn default_range_covers_1700_through_2400() {
        let range = DateRange::default();
        assert_eq!(range.start(), date(1700, 1, 1));
        assert_eq!(range.end(), date(2400, 12, 31));
        // 701 years, 170 of them leap.
        assert_eq!(range.span_days(), 701 * 365 + 170);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = DateRange::new(date(2000, 1, 2), date(2000, 1, 1)).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { .. }));
    }

    #[test]
    fn single_day_range_is_allowed() {
        let day = date(1999, 12, 31);
        let range = DateRange::new(day, day).unwrap();
        assert_eq!(range.span_days(), 1);
        assert!(range.contains(day));
        assert!(!range.contains(date(2000, 1, 1)));
    }

    #[test]
    fn default_settings_wait_for_explicit_reset() {
        let settings = QuizSettings::default();
        assert_eq!(settings.advance, AdvancePolicy::ExplicitReset);
        assert_eq!(settings.range, DateRange::DEFAULT);
    }
}
