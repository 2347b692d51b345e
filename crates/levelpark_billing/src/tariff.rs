//! # Tariffs
//!
//! Flat hourly pricing. Under one hour is free; every hour boundary crossed
//! between check-in and check-out costs one `hourly_rate`.
//!
//! Elapsed time is `end hour - start hour` on the 24-hour dial, so a session
//! that spans midnight produces a negative difference. [`MidnightPolicy`]
//! decides what happens to it.

use serde::Deserialize;

use crate::clock::{Hour, HOURS_PER_DAY};

/// How a negative hour difference (a session spanning midnight) is billed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MidnightPolicy {
    /// Negative elapsed hours clamp to zero: the session is free.
    #[default]
    ClampToZero,
    /// Pass the raw difference through. A negative charge credits the holder.
    Raw,
    /// Count a negative difference as one midnight crossing: `(end - start) mod 24`.
    Wrap,
}

impl MidnightPolicy {
    /// Billable hours between two hours of the day.
    #[must_use]
    pub fn elapsed_hours(self, start: Hour, end: Hour) -> i64 {
        let raw = i64::from(end.value()) - i64::from(start.value());
        match self {
            Self::ClampToZero => raw.max(0),
            Self::Raw => raw,
            Self::Wrap => raw.rem_euclid(i64::from(HOURS_PER_DAY)),
        }
    }
}

/// Hourly rate plus the midnight rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tariff {
    /// Charge per elapsed hour.
    pub hourly_rate: u32,
    /// Treatment of sessions that span midnight.
    pub midnight_policy: MidnightPolicy,
}

impl Tariff {
    /// Creates a tariff with the default midnight policy.
    #[must_use]
    pub const fn hourly(hourly_rate: u32) -> Self {
        Self {
            hourly_rate,
            midnight_policy: MidnightPolicy::ClampToZero,
        }
    }

    /// Returns `(elapsed_hours, charge)` for a session.
    #[must_use]
    pub fn bill(&self, start: Hour, end: Hour) -> (i64, i64) {
        let elapsed = self.midnight_policy.elapsed_hours(start, end);
        (elapsed, elapsed * i64::from(self.hourly_rate))
    }
}
