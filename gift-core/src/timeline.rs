//! Date arithmetic for the shared timeline.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole days from `start` to `today`, zero if `start` lies in the future.
pub fn days_together(start: NaiveDate, today: NaiveDate) -> u32 {
    let days = (today - start).num_days();
    u32::try_from(days.max(0)).unwrap_or(u32::MAX)
}

/// Time remaining until a future date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Countdown to midnight at the start of `target`, or `None` once reached.
pub fn countdown(target: NaiveDate, now: NaiveDateTime) -> Option<Countdown> {
    let remaining = target.and_time(chrono::NaiveTime::MIN) - now;
    let total = remaining.num_seconds();
    if total <= 0 {
        return None;
    }
    Some(Countdown {
        days: total / 86_400,
        hours: total % 86_400 / 3_600,
        minutes: total % 3_600 / 60,
        seconds: total % 60,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_together() {
        assert_eq!(days_together(date(2024, 1, 1), date(2024, 1, 1)), 0);
        assert_eq!(days_together(date(2024, 1, 1), date(2024, 12, 31)), 365);
    }

    #[test]
    fn test_days_together_clamps_future_start() {
        assert_eq!(days_together(date(2030, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_countdown_breakdown() {
        let now = date(2027, 6, 13).and_hms_opt(22, 30, 15).unwrap();
        let left = countdown(date(2027, 6, 15), now).unwrap();
        assert_eq!(
            left,
            Countdown {
                days: 1,
                hours: 1,
                minutes: 29,
                seconds: 45
            }
        );
        assert_eq!(left.to_string(), "1d 01h 29m 45s");
    }

    #[test]
    fn test_countdown_past_date() {
        let now = date(2027, 6, 15).and_hms_opt(0, 0, 0).unwrap();
        assert!(countdown(date(2027, 6, 15), now).is_none());
        assert!(countdown(date(2020, 1, 1), now).is_none());
    }
}
