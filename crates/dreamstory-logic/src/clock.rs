//! Calendar clock: `(day, hour, minute)` with carry, absolute minutes,
//! and the absolute time jumps that situation outcomes perform.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::time::{
    DAY_NAMES, FIRST_DAY, HOURS_PER_DAY, MINUTES_PER_DAY, MINUTES_PER_HOUR,
};

/// In-game calendar time. Day 1 is the first day of the challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clock {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Clock {
    pub fn new(day: u32, hour: u32, minute: u32) -> Self {
        Self { day, hour, minute }
    }

    /// Normalize arbitrary hour/minute overflow into the next hour/day.
    pub fn normalized(day: u32, hour: u32, minute: u32) -> Self {
        let hour = hour + minute / MINUTES_PER_HOUR;
        let minute = minute % MINUTES_PER_HOUR;
        let day = day + hour / HOURS_PER_DAY;
        let hour = hour % HOURS_PER_DAY;
        Self { day, hour, minute }
    }

    /// Minutes since day 1, 00:00.
    pub fn total_minutes(&self) -> u64 {
        let days = u64::from(self.day.saturating_sub(FIRST_DAY));
        days * u64::from(MINUTES_PER_DAY)
            + u64::from(self.hour) * u64::from(MINUTES_PER_HOUR)
            + u64::from(self.minute)
    }

    pub fn from_total_minutes(total: u64) -> Self {
        let per_day = u64::from(MINUTES_PER_DAY);
        let per_hour = u64::from(MINUTES_PER_HOUR);
        Self {
            day: (total / per_day) as u32 + FIRST_DAY,
            hour: ((total % per_day) / per_hour) as u32,
            minute: (total % per_hour) as u32,
        }
    }

    /// Advance by `minutes`, carrying into hour and day.
    pub fn advanced_by(&self, minutes: u32) -> Self {
        Self::normalized(self.day, self.hour, self.minute.saturating_add(minutes))
    }

    /// Set the clock to an absolute target. Bypasses carry and may go backward.
    pub fn jumped_to(&self, jump: &TimeJump) -> Self {
        Self {
            day: jump.day.unwrap_or(self.day),
            hour: jump.hour,
            minute: jump.minute,
        }
    }

    pub fn day_name(&self) -> &'static str {
        let idx = self.day.saturating_sub(FIRST_DAY) as usize % DAY_NAMES.len();
        DAY_NAMES[idx]
    }

    pub fn is_valid(&self) -> bool {
        self.day >= FIRST_DAY && self.hour < HOURS_PER_DAY && self.minute < MINUTES_PER_HOUR
    }
}

impl fmt::Display for Clock {
    /// `"Sun 06:00"`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}:{:02}", self.day_name(), self.hour, self.minute)
    }
}

/// Absolute clock target. `day: None` keeps the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeJump {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    pub hour: u32,
    pub minute: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_carry() {
        let c = Clock::new(1, 6, 55).advanced_by(5);
        assert_eq!(c, Clock::new(1, 7, 0));
    }

    #[test]
    fn test_day_carry() {
        let c = Clock::new(1, 23, 58).advanced_by(5);
        assert_eq!(c, Clock::new(2, 0, 3));
    }

    #[test]
    fn test_large_advance() {
        // 2 days, 3 hours, 7 minutes
        let c = Clock::new(3, 22, 0).advanced_by(2 * 1440 + 3 * 60 + 7);
        assert_eq!(c, Clock::new(6, 1, 7));
    }

    #[test]
    fn test_huge_advance_does_not_overflow() {
        let c = Clock::new(1, 0, 59).advanced_by(u32::MAX);
        assert!(c.is_valid());
        assert!(c.day > 1);
    }

    #[test]
    fn test_total_minutes_roundtrip_points() {
        assert_eq!(Clock::new(1, 0, 0).total_minutes(), 0);
        assert_eq!(Clock::new(1, 6, 0).total_minutes(), 360);
        assert_eq!(Clock::new(2, 0, 3).total_minutes(), 1443);
        assert_eq!(Clock::from_total_minutes(1443), Clock::new(2, 0, 3));
        assert_eq!(Clock::from_total_minutes(0), Clock::new(1, 0, 0));
    }

    #[test]
    fn test_jump_keeps_day_when_absent() {
        let c = Clock::new(4, 10, 0);
        let j = TimeJump {
            day: None,
            hour: 11,
            minute: 30,
        };
        assert_eq!(c.jumped_to(&j), Clock::new(4, 11, 30));
    }

    #[test]
    fn test_jump_can_go_backward() {
        let c = Clock::new(1, 8, 15);
        let j = TimeJump {
            day: None,
            hour: 7,
            minute: 0,
        };
        assert!(c.jumped_to(&j).total_minutes() < c.total_minutes());
    }

    #[test]
    fn test_jump_with_day() {
        let c = Clock::new(6, 21, 0);
        let j = TimeJump {
            day: Some(7),
            hour: 5,
            minute: 0,
        };
        assert_eq!(c.jumped_to(&j), Clock::new(7, 5, 0));
    }

    #[test]
    fn test_display_and_day_names() {
        assert_eq!(Clock::new(1, 6, 0).to_string(), "Sun 06:00");
        assert_eq!(Clock::new(7, 23, 5).to_string(), "Sat 23:05");
        assert_eq!(Clock::new(8, 9, 30).to_string(), "Sun 09:30");
    }

    #[test]
    fn test_validity() {
        assert!(Clock::new(1, 23, 59).is_valid());
        assert!(!Clock::new(0, 10, 0).is_valid());
        assert!(!Clock::new(1, 24, 0).is_valid());
        assert!(!Clock::new(1, 10, 60).is_valid());
    }
}
