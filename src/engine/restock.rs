//! Countdown to the next stock rotation.
//!
//! Reset hours are civil hours in a fixed time zone, independent of where
//! the viewer is. The clock is injected so boundary instants can be tested.

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use thiserror::Error;

pub const SECONDS_PER_HOUR: u32 = 3_600;
pub const SECONDS_PER_DAY: u32 = 86_400;
pub const DEFAULT_RESET_HOURS: [u32; 4] = [0, 6, 12, 18];
pub const DEFAULT_TIME_ZONE: &str = "Europe/London";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestockError {
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
    #[error("reset hour out of range (0-23): {0}")]
    InvalidHour(u32),
    #[error("restock schedule has no reset hours")]
    EmptySchedule,
}

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Ascending, de-duplicated reset hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestockSchedule {
    hours: Vec<u32>,
}

impl RestockSchedule {
    pub fn new(hours: impl IntoIterator<Item = u32>) -> Result<Self, RestockError> {
        let mut hours: Vec<u32> = hours.into_iter().collect();
        if let Some(&bad) = hours.iter().find(|&&h| h > 23) {
            return Err(RestockError::InvalidHour(bad));
        }
        if hours.is_empty() {
            return Err(RestockError::EmptySchedule);
        }
        hours.sort_unstable();
        hours.dedup();
        Ok(Self { hours })
    }

    pub fn hours(&self) -> &[u32] {
        &self.hours
    }

    /// First reset hour strictly after `hour`, if any remains today.
    pub fn next_after(&self, hour: u32) -> Option<u32> {
        self.hours.iter().copied().find(|&h| h > hour)
    }
}

impl Default for RestockSchedule {
    fn default() -> Self {
        Self {
            hours: DEFAULT_RESET_HOURS.to_vec(),
        }
    }
}

pub fn resolve_time_zone(name: &str) -> Result<Tz, RestockError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| RestockError::UnknownTimeZone(name.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub seconds_remaining: u32,
    pub next_reset_hour: u32,
}

impl Countdown {
    /// Zero-padded `HH:MM:SS`.
    pub fn formatted(&self) -> String {
        let s = self.seconds_remaining;
        format!(
            "{:02}:{:02}:{:02}",
            s / SECONDS_PER_HOUR,
            (s % SECONDS_PER_HOUR) / 60,
            s % 60
        )
    }
}

/// Seconds from the civil time of day `time` to the next reset.
///
/// A reset hour equal to the current hour has already passed. When no
/// later hour remains today the next reset is midnight of the next day.
pub fn seconds_until_next_reset(schedule: &RestockSchedule, time: NaiveTime) -> Countdown {
    let now_seconds = i64::from(time.num_seconds_from_midnight());
    let (next_hour, day_offset) = match schedule.next_after(time.hour()) {
        Some(h) => (h, 0),
        None => (0, i64::from(SECONDS_PER_DAY)),
    };
    let target = i64::from(next_hour) * i64::from(SECONDS_PER_HOUR) + day_offset;
    let remaining = (target - now_seconds).clamp(0, i64::from(SECONDS_PER_DAY));

    Countdown {
        seconds_remaining: remaining as u32,
        next_reset_hour: next_hour,
    }
}

/// Schedule bound to its time zone.
#[derive(Debug, Clone, PartialEq)]
pub struct RestockCountdown {
    schedule: RestockSchedule,
    tz: Tz,
}

impl RestockCountdown {
    pub fn new(schedule: RestockSchedule, tz: Tz) -> Self {
        Self { schedule, tz }
    }

    pub fn from_zone_name(schedule: RestockSchedule, zone: &str) -> Result<Self, RestockError> {
        Ok(Self::new(schedule, resolve_time_zone(zone)?))
    }

    pub fn schedule(&self) -> &RestockSchedule {
        &self.schedule
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    pub fn at(&self, instant: DateTime<Utc>) -> Countdown {
        let local = instant.with_timezone(&self.tz);
        seconds_until_next_reset(&self.schedule, local.time())
    }

    pub fn now(&self, clock: &dyn Clock) -> Countdown {
        self.at(clock.now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn default_at(h: u32, m: u32, s: u32) -> Countdown {
        seconds_until_next_reset(&RestockSchedule::default(), hms(h, m, s))
    }

    #[test]
    fn test_one_second_before_reset() {
        let c = default_at(5, 59, 59);
        assert_eq!(c.seconds_remaining, 1);
        assert_eq!(c.next_reset_hour, 6);
    }

    #[test]
    fn test_exactly_on_reset_targets_following_reset() {
        let c = default_at(6, 0, 0);
        assert_eq!(c.seconds_remaining, 21_600);
        assert_eq!(c.next_reset_hour, 12);
    }

    #[test]
    fn test_wraps_to_midnight() {
        let c = default_at(23, 0, 0);
        assert_eq!(c.seconds_remaining, 3_600);
        assert_eq!(c.next_reset_hour, 0);

        let c = default_at(18, 0, 0);
        assert_eq!(c.seconds_remaining, 6 * 3_600);
    }

    #[test]
    fn test_wrap_ignores_schedule_without_midnight() {
        let schedule = RestockSchedule::new([9, 21]).unwrap();
        let c = seconds_until_next_reset(&schedule, hms(22, 30, 0));
        assert_eq!(c.next_reset_hour, 0);
        assert_eq!(c.seconds_remaining, 1_800);
    }

    #[test]
    fn test_leap_second_before_midnight() {
        let leap = NaiveTime::from_hms_milli_opt(23, 59, 59, 1_500).unwrap();
        let c = seconds_until_next_reset(&RestockSchedule::default(), leap);
        assert_eq!(c.seconds_remaining, 1);
        assert_eq!(c.next_reset_hour, 0);
    }

    #[test]
    fn test_formatted_is_zero_padded() {
        assert_eq!(default_at(5, 59, 59).formatted(), "00:00:01");
        assert_eq!(default_at(6, 0, 0).formatted(), "06:00:00");
        assert_eq!(default_at(0, 0, 1).formatted(), "05:59:59");
    }

    #[test]
    fn test_schedule_validation() {
        assert_eq!(RestockSchedule::new(Vec::new()), Err(RestockError::EmptySchedule));
        assert_eq!(RestockSchedule::new([6, 24]), Err(RestockError::InvalidHour(24)));
        let s = RestockSchedule::new([18, 0, 6, 6, 12]).unwrap();
        assert_eq!(s.hours(), &[0, 6, 12, 18]);
        assert_eq!(s, RestockSchedule::default());
    }

    #[test]
    fn test_unknown_time_zone_is_an_error() {
        assert_eq!(
            resolve_time_zone("Mars/Olympus_Mons"),
            Err(RestockError::UnknownTimeZone("Mars/Olympus_Mons".to_string()))
        );
        assert!(resolve_time_zone("Europe/London").is_ok());
    }

    #[test]
    fn test_countdown_uses_target_zone_not_utc() {
        let countdown =
            RestockCountdown::from_zone_name(RestockSchedule::default(), "Europe/London").unwrap();

        // January: London is on GMT.
        let winter = Utc.with_ymd_and_hms(2024, 1, 15, 5, 59, 59).unwrap();
        assert_eq!(countdown.at(winter).seconds_remaining, 1);

        // July: London is on BST (UTC+1), so 04:59:59Z is 05:59:59 local.
        let summer = Utc.with_ymd_and_hms(2024, 7, 1, 4, 59, 59).unwrap();
        assert_eq!(countdown.at(summer).seconds_remaining, 1);
    }

    #[test]
    fn test_now_reads_injected_clock() {
        let countdown =
            RestockCountdown::from_zone_name(RestockSchedule::default(), "UTC").unwrap();
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 1, 23, 0, 0).unwrap());
        assert_eq!(countdown.now(&clock).seconds_remaining, 3_600);
    }
}
