//! Inclusive slot ranges.

use std::fmt;
use std::ops::RangeInclusive;

/// An inclusive `[start, end]` run of slot indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotRange {
    /// First slot index.
    pub start: usize,
    /// Last slot index (inclusive).
    pub end: usize,
}

impl SlotRange {
    /// Creates a range covering `start..=end`.
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Number of slots covered.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start + 1
    }

    /// A range always covers at least one slot.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Returns true if `index` falls inside this range.
    #[inline]
    #[must_use]
    pub const fn contains(self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Returns true if the two ranges share any slot.
    #[inline]
    #[must_use]
    pub const fn overlaps(self, other: Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The slot indices as a std range.
    #[inline]
    #[must_use]
    pub const fn indices(self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

impl fmt::Display for SlotRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
