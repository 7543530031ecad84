use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CalendarError {
    #[error("month must be in 1..=12, got {0}")]
    InvalidMonth(u8),

    #[error("day {day} does not exist in {year:04}-{month:02}")]
    InvalidDay { year: i32, month: u8, day: u8 },

    #[error("day number {0} is outside the representable range")]
    DayNumberOutOfRange(i64),

    #[error("unrecognised date: {0:?}")]
    Unparseable(String),
}

//
// ─── CALENDAR RULES ────────────────────────────────────────────────────────────
//

/// English month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Proleptic Gregorian leap-year rule: every fourth year, except centuries
/// not divisible by 400.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`. Months outside 1..=12 yield 0.
#[must_use]
pub const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// English ordinal suffix for a day of the month ("st", "nd", "rd", "th").
#[must_use]
pub const fn ordinal_suffix(day: u8) -> &'static str {
    if day > 3 && day < 21 {
        return "th";
    }
    match day % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

//
// ─── CALENDAR DATE ─────────────────────────────────────────────────────────────
//

/// A valid date in the proleptic Gregorian calendar.
///
/// The only ways to obtain one are [`CalendarDate::new`], [`CalendarDate::from_day_number`]
/// and parsing, all of which validate, so every value names a day that exists.
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Build a date from its parts.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidMonth` or `CalendarError::InvalidDay` when the
    /// parts do not name a real day (e.g. 1900-02-29).
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(CalendarError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Compile-time constructor for dates known to be valid.
    pub(crate) const fn from_parts_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month(&self) -> u8 {
        self.month
    }

    #[must_use]
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Linear day index: days elapsed since 1970-01-01 (negative before it).
    #[must_use]
    pub fn to_day_number(&self) -> i64 {
        let month = i64::from(self.month);
        let year = i64::from(self.year) - i64::from(month <= 2);
        let era = year.div_euclid(400);
        let year_of_era = year - era * 400;
        // Months counted from March so the leap day falls at the end of the year.
        let shifted_month = (month + 9) % 12;
        let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(self.day) - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
        era * 146_097 + day_of_era - 719_468
    }

    /// Inverse of [`CalendarDate::to_day_number`].
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::DayNumberOutOfRange` if the resulting year does not fit in `i32`.
    pub fn from_day_number(day_number: i64) -> Result<Self, CalendarError> {
        let shifted = day_number
            .checked_add(719_468)
            .ok_or(CalendarError::DayNumberOutOfRange(day_number))?;
        let era = shifted.div_euclid(146_097);
        let day_of_era = shifted - era * 146_097;
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let shifted_month = (5 * day_of_year + 2) / 153;
        let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
        let month = if shifted_month < 10 {
            shifted_month + 3
        } else {
            shifted_month - 9
        };
        let year = year_of_era + era * 400 + i64::from(month <= 2);

        let year =
            i32::try_from(year).map_err(|_| CalendarError::DayNumberOutOfRange(day_number))?;
        // month is in 1..=12 and day in 1..=31 by construction.
        let month = u8::try_from(month).map_err(|_| CalendarError::DayNumberOutOfRange(day_number))?;
        let day = u8::try_from(day).map_err(|_| CalendarError::DayNumberOutOfRange(day_number))?;
        Ok(Self { year, month, day })
    }

    /// Display string used in quiz history, e.g. `"6th June 2000"`.
    #[must_use]
    pub fn long_form(&self) -> String {
        format!(
            "{}{} {} {}",
            self.day,
            ordinal_suffix(self.day),
            MONTH_NAMES[usize::from(self.month - 1)],
            self.year
        )
    }

    fn parse_iso(raw: &str) -> Option<Result<Self, CalendarError>> {
        // Split from the right so a leading minus stays with the year.
        let mut parts = raw.rsplitn(3, '-');
        let day = parts.next()?.parse::<u8>().ok()?;
        let month = parts.next()?.parse::<u8>().ok()?;
        let year = parts.next()?.parse::<i32>().ok()?;
        Some(Self::new(year, month, day))
    }

    fn parse_long(raw: &str) -> Option<Result<Self, CalendarError>> {
        let mut tokens = raw.split_whitespace();
        let day_token = tokens.next()?;
        let month_token = tokens.next()?;
        let year = tokens.next()?.parse::<i32>().ok()?;
        if tokens.next().is_some() {
            return None;
        }

        let digits = day_token.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        let suffix = &day_token[digits.len()..];
        if !matches!(suffix, "" | "st" | "nd" | "rd" | "th") {
            return None;
        }
        let day = digits.parse::<u8>().ok()?;

        let month = MONTH_NAMES.iter().position(|name| {
            name.eq_ignore_ascii_case(month_token)
                || (month_token.len() == 3 && name[..3].eq_ignore_ascii_case(month_token))
        })?;
        let month = u8::try_from(month + 1).ok()?;
        Some(Self::new(year, month, day))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    /// Accepts ISO `YYYY-MM-DD` and the long form produced by [`CalendarDate::long_form`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let parsed = if raw.contains(char::is_whitespace) {
            Self::parse_long(raw)
        } else {
            Self::parse_iso(raw)
        };
        parsed.unwrap_or_else(|| Err(CalendarError::Unparseable(raw.to_owned())))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leap_rule_handles_centuries() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2400));
        assert!(is_leap_year(1996));
        for century in [1700, 1800, 1900, 2100, 2200, 2300] {
            assert!(!is_leap_year(century), "{century} must not be leap");
        }
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn rejects_days_that_do_not_exist() {
        assert!(CalendarDate::new(2000, 2, 29).is_ok());
        assert_eq!(
            CalendarDate::new(1900, 2, 29).unwrap_err(),
            CalendarError::InvalidDay {
                year: 1900,
                month: 2,
                day: 29
            }
        );
        assert!(matches!(
            CalendarDate::new(2020, 13, 1),
            Err(CalendarError::InvalidMonth(13))
        ));
        assert!(CalendarDate::new(2020, 4, 31).is_err());
        assert!(CalendarDate::new(2020, 1, 0).is_err());
    }

    #[test]
    fn day_number_matches_known_epochs() {
        let epoch = CalendarDate::new(1970, 1, 1).unwrap();
        assert_eq!(epoch.to_day_number(), 0);
        let y2k = CalendarDate::new(2000, 3, 1).unwrap();
        assert_eq!(y2k.to_day_number(), 11_017);
        let early = CalendarDate::new(1700, 1, 1).unwrap();
        assert_eq!(early.to_day_number(), -98_615);
    }

    #[test]
    fn day_number_inverts_across_the_quiz_window() {
        let start = CalendarDate::new(1700, 1, 1).unwrap().to_day_number();
        let end = CalendarDate::new(2400, 12, 31).unwrap().to_day_number();
        let mut previous: Option<CalendarDate> = None;
        for n in start..=end {
            let date = CalendarDate::from_day_number(n).unwrap();
            assert_eq!(date.to_day_number(), n);
            if let Some(prev) = previous {
                assert!(prev < date);
            }
            previous = Some(date);
        }
    }

    #[test]
    fn long_form_uses_ordinal_suffixes() {
        let cases = [
            (1, "1st January 2020"),
            (2, "2nd January 2020"),
            (3, "3rd January 2020"),
            (4, "4th January 2020"),
            (11, "11th January 2020"),
            (12, "12th January 2020"),
            (13, "13th January 2020"),
            (21, "21st January 2020"),
            (22, "22nd January 2020"),
            (23, "23rd January 2020"),
            (31, "31st January 2020"),
        ];
        for (day, expected) in cases {
            let date = CalendarDate::new(2020, 1, day).unwrap();
            assert_eq!(date.long_form(), expected);
        }
    }

    #[test]
    fn parses_long_and_iso_forms() {
        let expected = CalendarDate::new(2000, 6, 6).unwrap();
        assert_eq!("6th June 2000".parse::<CalendarDate>().unwrap(), expected);
        assert_eq!("6 jun 2000".parse::<CalendarDate>().unwrap(), expected);
        assert_eq!("2000-06-06".parse::<CalendarDate>().unwrap(), expected);
        assert_eq!(expected.to_string(), "2000-06-06");

        assert!(matches!(
            "29th February 1900".parse::<CalendarDate>(),
            Err(CalendarError::InvalidDay { .. })
        ));
        assert!(matches!(
            "sometime in June".parse::<CalendarDate>(),
            Err(CalendarError::Unparseable(_))
        ));
        assert!(matches!(
            "2000/06/06".parse::<CalendarDate>(),
            Err(CalendarError::Unparseable(_))
        ));
    }
}
