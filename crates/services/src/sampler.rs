use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use doomsday_core::model::{CalendarDate, ConfigError, DateRange};

/// Draw a date uniformly over the days of `range`.
///
/// Sampling is over the linear day count, so every day is equally likely and
/// short months are not over-represented.
pub fn sample_in<R: Rng>(range: &DateRange, rng: &mut R) -> CalendarDate {
    let first = range.start().to_day_number();
    let last = range.end().to_day_number();
    let pick = rng.random_range(first..=last);
    // Any day number between two valid dates converts back.
    CalendarDate::from_day_number(pick).unwrap_or(range.start())
}

/// Source of random challenge dates.
#[derive(Debug, Clone)]
pub struct DateSampler {
    range: DateRange,
    rng: StdRng,
}

impl DateSampler {
    /// Sampler over `range` seeded from the operating system.
    #[must_use]
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sampler, for tests and reproducible drills.
    #[must_use]
    pub fn seeded(range: DateRange, seed: u64) -> Self {
        Self {
            range,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvertedRange` if `start` is after `end`.
    pub fn from_bounds(start: CalendarDate, end: CalendarDate) -> Result<Self, ConfigError> {
        Ok(Self::new(DateRange::new(start, end)?))
    }

    pub fn sample(&mut self) -> CalendarDate {
        sample_in(&self.range, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doomsday_core::doomsday::weekday_of;

    fn date(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn samples_stay_inside_the_range() {
        let range = DateRange::new(date(1899, 12, 30), date(1900, 3, 2)).unwrap();
        let mut sampler = DateSampler::seeded(range, 7);
        let mut saw_start = false;
        let mut saw_end = false;
        for _ in 0..5_000 {
            let d = sampler.sample();
            assert!(range.contains(d), "{d} escaped the range");
            saw_start |= d == range.start();
            saw_end |= d == range.end();
        }
        assert!(saw_start && saw_end, "both endpoints are reachable");
    }

    #[test]
    fn single_day_range_always_returns_that_day() {
        let day = date(2000, 2, 29);
        let mut sampler = DateSampler::from_bounds(day, day).unwrap();
        for _ in 0..100 {
            assert_eq!(sampler.sample(), day);
        }
    }

    #[test]
    fn inverted_bounds_are_a_config_error() {
        let err = DateSampler::from_bounds(date(2001, 1, 1), date(2000, 1, 1)).unwrap_err();
        assert!(matches!(err, ConfigError::InvertedRange { .. }));
    }

    #[test]
    fn weekdays_are_uniform_over_default_range() {
        const DRAWS: usize = 70_000;
        let mut sampler = DateSampler::seeded(DateRange::default(), 42);
        let mut counts = [0_usize; 7];
        for _ in 0..DRAWS {
            counts[usize::from(weekday_of(sampler.sample()).index())] += 1;
        }
        let expected = DRAWS / 7;
        for (index, count) in counts.iter().enumerate() {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 20,
                "weekday {index} drawn {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn february_share_follows_day_count() {
        const DRAWS: usize = 70_000;
        let range = DateRange::default();
        let mut sampler = DateSampler::seeded(range, 1234);
        let february = (0..DRAWS).filter(|_| sampler.sample().month() == 2).count();

        // 19_798 of the 256_035 days in the range fall in February.
        let expected = DRAWS * 19_798 / 256_035;
        assert!(
            february.abs_diff(expected) < 300,
            "february drawn {february} times, expected about {expected}"
        );
    }
}
