use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WeekdayError {
    #[error("weekday index must be in 0..=6, got {0}")]
    InvalidIndex(u8),
    #[error("unknown weekday name: {0:?}")]
    UnknownName(String),
}

/// Day of the week, indexed from Monday (0) to Sunday (6).
///
/// Serializes as the English name (`"Monday"`), which is also the stored form
/// of a guess in quiz history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in display order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Canonical index, Monday = 0.
    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// # Errors
    ///
    /// Returns `WeekdayError::InvalidIndex` for values above 6.
    pub fn from_index(index: u8) -> Result<Self, WeekdayError> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(WeekdayError::InvalidIndex(index))
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// The weekday `days` after this one (negative counts go backwards).
    #[must_use]
    pub fn succ_by(self, days: i64) -> Self {
        let index = (i64::from(self.index()) + days).rem_euclid(7);
        // rem_euclid(7) keeps the index in 0..=6.
        Self::ALL[usize::try_from(index).unwrap_or_default()]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = WeekdayError;

    /// Case-insensitive full name or three-letter abbreviation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        Self::ALL
            .into_iter()
            .find(|day| {
                let name = day.name();
                name.eq_ignore_ascii_case(raw)
                    || (raw.len() == 3 && name[..3].eq_ignore_ascii_case(raw))
            })
            .ok_or_else(|| WeekdayError::UnknownName(raw.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_in_display_order() {
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(usize::from(day.index()), i);
            assert_eq!(Weekday::from_index(day.index()).unwrap(), *day);
        }
        assert_eq!(Weekday::Monday.index(), 0);
        assert_eq!(Weekday::Sunday.index(), 6);
        assert!(matches!(
            Weekday::from_index(7),
            Err(WeekdayError::InvalidIndex(7))
        ));
    }

    #[test]
    fn succ_by_wraps_both_directions() {
        assert_eq!(Weekday::Sunday.succ_by(1), Weekday::Monday);
        assert_eq!(Weekday::Monday.succ_by(-1), Weekday::Sunday);
        assert_eq!(Weekday::Wednesday.succ_by(14), Weekday::Wednesday);
        assert_eq!(Weekday::Tuesday.succ_by(-30), Weekday::Sunday);
    }

    #[test]
    fn parses_names_and_abbreviations() {
        assert_eq!("friday".parse::<Weekday>().unwrap(), Weekday::Friday);
        assert_eq!(" SAT ".parse::<Weekday>().unwrap(), Weekday::Saturday);
        assert!(matches!(
            "Funday".parse::<Weekday>(),
            Err(WeekdayError::UnknownName(_))
        ));
    }

    #[test]
    fn serializes_as_name() {
        let json = serde_json::to_string(&Weekday::Thursday).unwrap();
        assert_eq!(json, "\"Thursday\"");
    }
}
