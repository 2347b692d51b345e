//! # Hour Clocks
//!
//! Billing works at hour-of-day granularity. The ledger asks an injected
//! [`HourClock`] for the current hour instead of reading the wall clock
//! itself, so tests and simulations can move time by hand.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use chrono::Timelike;

/// Hours in a day.
pub const HOURS_PER_DAY: u8 = 24;

/// An hour of the day, `0..=23`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Hour(u8);

impl Hour {
    /// Midnight.
    pub const MIDNIGHT: Self = Self(0);

    /// Creates an hour, or `None` if `hour` is 24 or more.
    #[inline]
    #[must_use]
    pub const fn new(hour: u8) -> Option<Self> {
        if hour < HOURS_PER_DAY {
            Some(Self(hour))
        } else {
            None
        }
    }

    /// Returns the hour as a number.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Moves forward `hours`, wrapping past midnight.
    #[inline]
    #[must_use]
    pub const fn wrapping_add(self, hours: u32) -> Self {
        Self(((self.0 as u32 + hours % HOURS_PER_DAY as u32) % HOURS_PER_DAY as u32) as u8)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

/// Source of the current hour-of-day.
pub trait HourClock: Send + Sync {
    /// Returns the current hour.
    fn current_hour(&self) -> Hour;
}

/// Local wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl HourClock for SystemClock {
    #[allow(clippy::cast_possible_truncation)]
    fn current_hour(&self) -> Hour {
        // chrono guarantees 0..=23
        Hour(chrono::Local::now().hour() as u8)
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    hour: AtomicU8,
}

impl ManualClock {
    /// Creates a clock stopped at `hour`.
    #[must_use]
    pub const fn new(hour: Hour) -> Self {
        Self {
            hour: AtomicU8::new(hour.0),
        }
    }

    /// Creates a clock stopped at a raw hour, or `None` if out of range.
    #[must_use]
    pub const fn at(hour: u8) -> Option<Self> {
        match Hour::new(hour) {
            Some(hour) => Some(Self::new(hour)),
            None => None,
        }
    }

    /// Sets the current hour.
    pub fn set(&self, hour: Hour) {
        self.hour.store(hour.0, Ordering::Release);
    }

    /// Moves the clock forward, wrapping past midnight. Returns the new hour.
    pub fn advance(&self, hours: u32) -> Hour {
        let next = self.current_hour().wrapping_add(hours);
        self.set(next);
        next
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Hour::MIDNIGHT)
    }
}

impl HourClock for ManualClock {
    fn current_hour(&self) -> Hour {
        Hour(self.hour.load(Ordering::Acquire))
    }
}

impl<C: HourClock + ?Sized> HourClock for std::sync::Arc<C> {
    fn current_hour(&self) -> Hour {
        (**self).current_hour()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_range() {
        assert_eq!(Hour::new(23).map(Hour::value), Some(23));
        assert!(Hour::new(24).is_none());
    }

    #[test]
    fn test_wrapping_add() {
        let late = Hour::new(22).unwrap();
        assert_eq!(late.wrapping_add(3).value(), 1);
        assert_eq!(late.wrapping_add(48).value(), 22);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::at(23).unwrap();
        assert_eq!(clock.advance(1), Hour::MIDNIGHT);
        assert_eq!(clock.current_hour(), Hour::MIDNIGHT);
        clock.set(Hour::new(7).unwrap());
        assert_eq!(clock.current_hour().to_string(), "07:00");
    }

    #[test]
    fn test_system_clock_in_range() {
        assert!(SystemClock.current_hour().value() < HOURS_PER_DAY);
    }
}
