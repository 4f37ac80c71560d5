use std::env;
use std::ops::RangeInclusive;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_SLOT_DURATION_MINUTES: u32 = 30;
pub const MIN_SLOT_DURATION_MINUTES: u32 = 15;
pub const MAX_SLOT_DURATION_MINUTES: u32 = 120;
pub const CANCELLATION_NOTICE_HOURS: i64 = 24;
pub const MAX_BOOKING_DAYS_AHEAD: i64 = 90;

/// Upper bounds accepted from the environment: one year of notice, ten years of booking window.
pub const CANCELLATION_NOTICE_HOURS_LIMIT: i64 = 24 * 365;
pub const MAX_BOOKING_DAYS_AHEAD_LIMIT: i64 = 3650;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingConfig {
    pub default_slot_duration_minutes: u32,
    pub min_slot_duration_minutes: u32,
    pub max_slot_duration_minutes: u32,
    pub cancellation_notice_hours: i64,
    pub max_booking_days_ahead: i64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            default_slot_duration_minutes: DEFAULT_SLOT_DURATION_MINUTES,
            min_slot_duration_minutes: MIN_SLOT_DURATION_MINUTES,
            max_slot_duration_minutes: MAX_SLOT_DURATION_MINUTES,
            cancellation_notice_hours: CANCELLATION_NOTICE_HOURS,
            max_booking_days_ahead: MAX_BOOKING_DAYS_AHEAD,
        }
    }
}

impl SchedulingConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let mut config = Self {
            default_slot_duration_minutes: env_or(
                "DEFAULT_SLOT_DURATION_MINUTES",
                defaults.default_slot_duration_minutes,
            ),
            min_slot_duration_minutes: env_or(
                "MIN_SLOT_DURATION_MINUTES",
                defaults.min_slot_duration_minutes,
            ),
            max_slot_duration_minutes: env_or(
                "MAX_SLOT_DURATION_MINUTES",
                defaults.max_slot_duration_minutes,
            ),
            cancellation_notice_hours: env_in_range(
                "CANCELLATION_NOTICE_HOURS",
                defaults.cancellation_notice_hours,
                0..=CANCELLATION_NOTICE_HOURS_LIMIT,
            ),
            max_booking_days_ahead: env_in_range(
                "MAX_BOOKING_DAYS_AHEAD",
                defaults.max_booking_days_ahead,
                0..=MAX_BOOKING_DAYS_AHEAD_LIMIT,
            ),
        };

        if !config.has_consistent_slot_durations() {
            warn!(
                "Slot duration bounds are inconsistent (min {}, default {}, max {}), using defaults",
                config.min_slot_duration_minutes,
                config.default_slot_duration_minutes,
                config.max_slot_duration_minutes
            );
            config.min_slot_duration_minutes = defaults.min_slot_duration_minutes;
            config.default_slot_duration_minutes = defaults.default_slot_duration_minutes;
            config.max_slot_duration_minutes = defaults.max_slot_duration_minutes;
        }

        config
    }

    pub fn is_consistent(&self) -> bool {
        self.has_consistent_slot_durations()
            && (0..=CANCELLATION_NOTICE_HOURS_LIMIT).contains(&self.cancellation_notice_hours)
            && (0..=MAX_BOOKING_DAYS_AHEAD_LIMIT).contains(&self.max_booking_days_ahead)
    }

    fn has_consistent_slot_durations(&self) -> bool {
        self.min_slot_duration_minutes > 0
            && self.min_slot_duration_minutes <= self.default_slot_duration_minutes
            && self.default_slot_duration_minutes <= self.max_slot_duration_minutes
    }

    pub fn is_slot_duration_allowed(&self, duration_minutes: u32) -> bool {
        (self.min_slot_duration_minutes..=self.max_slot_duration_minutes)
            .contains(&duration_minutes)
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn env_in_range(key: &str, default: i64, allowed: RangeInclusive<i64>) -> i64 {
    let value = env_or(key, default);
    if allowed.contains(&value) {
        return value;
    }

    warn!(
        "{} is {}, outside {}..={}, using default {}",
        key,
        value,
        allowed.start(),
        allowed.end(),
        default
    );
    default
}
