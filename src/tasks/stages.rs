//! The fixed review-interval ladder.
//!
//! Index meaning: 0: +5m, 1: +10m, 2: +25m, 3: +1h, 4: +6h, 5: +24h, 6: +48h,
//! 7: +168h (one week). A task that has climbed past the last rung is complete.

use chrono::TimeDelta;

/// Wait before each successive review, in minutes.
pub const STAGE_MINUTES: [i64; 8] = [5, 10, 25, 60, 6 * 60, 24 * 60, 48 * 60, 168 * 60];

/// How many review steps exist before a task is completed.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn total_stages() -> u32 {
    STAGE_MINUTES.len() as u32
}

/// The wait scheduled when a task enters `stage`.
///
/// Returns `None` once `stage` is at or past [`total_stages`].
#[must_use]
pub fn interval(stage: u32) -> Option<TimeDelta> {
    let minutes = *STAGE_MINUTES.get(usize::try_from(stage).ok()?)?;
    Some(TimeDelta::minutes(minutes))
}

/// The wait used at creation and after a forgotten review.
#[must_use]
pub fn first_interval() -> TimeDelta {
    TimeDelta::minutes(STAGE_MINUTES[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_stages() {
        assert_eq!(total_stages(), 8);
    }

    #[test]
    fn test_reference_values() {
        assert_eq!(interval(0), Some(TimeDelta::minutes(5)));
        assert_eq!(interval(1), Some(TimeDelta::minutes(10)));
        assert_eq!(interval(2), Some(TimeDelta::minutes(25)));
        assert_eq!(interval(3), Some(TimeDelta::hours(1)));
        assert_eq!(interval(4), Some(TimeDelta::hours(6)));
        assert_eq!(interval(5), Some(TimeDelta::hours(24)));
        assert_eq!(interval(6), Some(TimeDelta::hours(48)));
        assert_eq!(interval(7), Some(TimeDelta::hours(168)));
    }

    #[test]
    fn test_interval_past_end() {
        assert_eq!(interval(8), None);
        assert_eq!(interval(u32::MAX), None);
    }

    #[test]
    fn test_first_interval_matches_stage_zero() {
        assert_eq!(Some(first_interval()), interval(0));
    }

    #[test]
    fn test_ladder_strictly_increasing() {
        assert!(STAGE_MINUTES.windows(2).all(|w| w[0] < w[1]));
    }
}
