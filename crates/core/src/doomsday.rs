//! Day-of-week computation by the doomsday rule.
//!
//! Every year has a "doomsday": a weekday shared by a fixed set of easy dates
//! (4/4, 6/6, 8/8, 10/10, 12/12, the last day of February, ...). The doomsday is
//! derived from a per-century anchor and the year within the century; any date
//! is then a short hop from its month's anchor date.
//!
//! The calendar is the proleptic Gregorian one, so results agree with
//! [`weekday_from_day_number`] for every representable date.

use crate::model::{CalendarDate, Weekday, is_leap_year};

/// Century anchors for the 400-year Gregorian cycle, indexed by `century mod 4`
/// (1600/2000 → Tuesday, 1700/2100 → Sunday, 1800/2200 → Friday, 1900/2300 → Wednesday).
const CENTURY_ANCHORS: [Weekday; 4] = [
    Weekday::Tuesday,
    Weekday::Sunday,
    Weekday::Friday,
    Weekday::Wednesday,
];

/// Doomsday weekday of the first year of `year`'s century.
#[must_use]
pub fn century_anchor(year: i32) -> Weekday {
    let slot = year.div_euclid(100).rem_euclid(4);
    CENTURY_ANCHORS[usize::try_from(slot).unwrap_or_default()]
}

/// The weekday on which this year's doomsday dates fall.
#[must_use]
pub fn doomsday(year: i32) -> Weekday {
    let y = i64::from(year.rem_euclid(100));
    let offset = y + y / 4 - y / 100 + y / 400;
    century_anchor(year).succ_by(offset)
}

/// Day of `month` that falls on the doomsday.
///
/// March uses 0, i.e. the last day of February. January and February move by
/// one in leap years. `month` must be in 1..=12.
#[must_use]
pub fn month_anchor_day(year: i32, month: u8) -> i32 {
    debug_assert!((1..=12).contains(&month), "month out of range: {month}");
    let leap = is_leap_year(year);
    match month {
        1 if leap => 4,
        1 => 3,
        2 if leap => 29,
        2 => 28,
        3 => 0,
        4 => 4,
        5 => 9,
        6 => 6,
        7 => 11,
        8 => 8,
        9 => 5,
        10 => 10,
        11 => 7,
        _ => 12,
    }
}

/// Day of the week for `date`.
#[must_use]
pub fn weekday_of(date: CalendarDate) -> Weekday {
    let anchor = month_anchor_day(date.year(), date.month());
    doomsday(date.year()).succ_by(i64::from(date.day()) - i64::from(anchor))
}

/// Day of the week for a linear day number (1970-01-01 was a Thursday).
#[must_use]
pub fn weekday_from_day_number(day_number: i64) -> Weekday {
    Weekday::Thursday.succ_by(day_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn date(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn century_anchor_table_rotates_every_four_centuries() {
        assert_eq!(century_anchor(1700), Weekday::Sunday);
        assert_eq!(century_anchor(1800), Weekday::Friday);
        assert_eq!(century_anchor(1999), Weekday::Wednesday);
        assert_eq!(century_anchor(2000), Weekday::Tuesday);
        assert_eq!(century_anchor(2150), Weekday::Sunday);
        assert_eq!(century_anchor(2400), Weekday::Tuesday);
    }

    #[test]
    fn worked_examples() {
        assert_eq!(weekday_of(date(2000, 2, 29)), Weekday::Tuesday);
        assert_eq!(weekday_of(date(2000, 6, 6)), Weekday::Tuesday);
        assert_eq!(weekday_of(date(2000, 1, 1)), Weekday::Saturday);
        assert_eq!(weekday_of(date(1970, 1, 1)), Weekday::Thursday);
        assert_eq!(weekday_of(date(1776, 7, 4)), Weekday::Thursday);
        assert_eq!(weekday_of(date(2400, 12, 31)), Weekday::Sunday);
        assert_eq!(weekday_of(date(1700, 1, 1)), Weekday::Friday);
    }

    #[test]
    fn doomsday_dates_share_a_weekday() {
        for year in [1700, 1800, 1899, 2000, 2024, 2100, 2399] {
            let expected = doomsday(year);
            let last_of_feb = if is_leap_year(year) { 29 } else { 28 };
            for (m, d) in [
                (2, last_of_feb),
                (4, 4),
                (6, 6),
                (8, 8),
                (10, 10),
                (12, 12),
                (5, 9),
                (9, 5),
                (7, 11),
                (11, 7),
            ] {
                assert_eq!(weekday_of(date(year, m, d)), expected, "{year}-{m}-{d}");
            }
            assert_eq!(weekday_of(date(year, 6, 6)), expected);
        }
    }

    #[test]
    fn non_leap_centuries_have_no_leap_day() {
        for year in [1700, 1800, 1900, 2100, 2200, 2300] {
            assert!(CalendarDate::new(year, 2, 29).is_err());
            // March 1 directly follows February 28.
            let feb_28 = weekday_of(date(year, 2, 28));
            assert_eq!(weekday_of(date(year, 3, 1)), feb_28.succ_by(1));
        }
    }

    #[test]
    fn matches_day_number_reference_for_every_date_in_window() {
        for year in 1700..=2400 {
            for month in 1..=12u8 {
                for day in 1..=crate::model::days_in_month(year, month) {
                    let d = date(year, month, day);
                    assert_eq!(
                        weekday_of(d),
                        weekday_from_day_number(d.to_day_number()),
                        "{d}"
                    );
                }
            }
        }
    }

    #[test]
    fn matches_chrono_for_every_date_in_window() {
        let mut current = NaiveDate::from_ymd_opt(1700, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2400, 12, 31).unwrap();
        while current <= last {
            let d = date(
                current.year(),
                u8::try_from(current.month()).unwrap(),
                u8::try_from(current.day()).unwrap(),
            );
            let expected = Weekday::from_index(
                u8::try_from(current.weekday().num_days_from_monday()).unwrap(),
            )
            .unwrap();
            assert_eq!(weekday_of(d), expected, "{d}");
            current = current.succ_opt().unwrap();
        }
    }
}
