//! # Resource Pool
//!
//! Fixed-capacity slot pool with a first-fit contiguous search.

use std::collections::HashMap;
use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::item::{ItemId, ResourceItem};
use crate::slots::SlotRange;

/// Occupancy of a single slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SlotState {
    /// Nobody is parked here.
    #[default]
    Free = 0,
    /// Part of some item's range.
    Occupied = 1,
}

impl SlotState {
    /// Returns true if the slot is occupied.
    #[inline]
    #[must_use]
    pub const fn is_occupied(self) -> bool {
        matches!(self, Self::Occupied)
    }
}

/// A fixed run of slots that items are parked into.
///
/// Slots never record who occupies them. Ownership lives only in the
/// `ItemId -> SlotRange` map, and the two are always updated together.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. [`MultiPoolAllocator`](crate::MultiPoolAllocator)
/// wraps every pool in its own mutex.
///
/// # Example
///
/// ```rust
/// use levelpark_core::{ResourceItem, ResourcePool, SlotRange};
///
/// let mut floor = ResourcePool::new(3).unwrap();
/// let truck = ResourceItem::new(2).unwrap();
///
/// assert_eq!(floor.place(&truck), Some(SlotRange::new(0, 1)));
/// assert_eq!(floor.free_count(), 1);
///
/// assert_eq!(floor.release(&truck), Some(SlotRange::new(0, 1)));
/// assert_eq!(floor.free_count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct ResourcePool {
    /// Per-slot occupancy.
    slots: Box<[SlotState]>,
    /// Range held by each placed item.
    placements: HashMap<ItemId, SlotRange>,
    /// Number of occupied slots.
    occupied: usize,
}

impl ResourcePool {
    /// Creates an empty pool with `capacity` free slots.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> CoreResult<Self> {
        if capacity == 0 {
            return Err(CoreError::InvalidCapacity(capacity));
        }

        Ok(Self {
            slots: vec![SlotState::Free; capacity].into_boxed_slice(),
            placements: HashMap::new(),
            occupied: 0,
        })
    }

    /// Returns the total number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    #[must_use]
    pub const fn occupied_count(&self) -> usize {
        self.occupied
    }

    /// Returns the number of free slots.
    #[inline]
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.capacity() - self.occupied
    }

    /// Returns the number of items currently placed.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns true if nothing is placed.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Places an item into the first free run that reaches its demand size.
    ///
    /// The scan keeps a window `[left, right]` of consecutive free slots and
    /// resets it past every occupied slot. The first time the window length
    /// equals the demand, that window is taken. Larger runs are never
    /// searched for a tighter fit.
    ///
    /// **O(capacity)**.
    ///
    /// # Returns
    ///
    /// The claimed range, or `None` if no run fits (or the item is already
    /// placed here). On `None` the pool is unchanged.
    pub fn place(&mut self, item: &ResourceItem) -> Option<SlotRange> {
        if self.placements.contains_key(&item.id()) {
            return None;
        }

        let range = self.find_first_fit(item.demand_size())?;
        self.fill(range, SlotState::Occupied);
        self.placements.insert(item.id(), range);
        self.occupied += range.len();

        Some(range)
    }

    /// Frees the item's range.
    ///
    /// # Returns
    ///
    /// The freed range, or `None` if the item is not placed here. Releasing
    /// twice is a no-op the second time.
    pub fn release(&mut self, item: &ResourceItem) -> Option<SlotRange> {
        let range = self.placements.remove(&item.id())?;
        self.fill(range, SlotState::Free);
        self.occupied -= range.len();

        Some(range)
    }

    /// Returns the range held by an item, if it is placed here.
    #[inline]
    #[must_use]
    pub fn range_of(&self, item: &ResourceItem) -> Option<SlotRange> {
        self.placements.get(&item.id()).copied()
    }

    /// Returns true if the item is placed here.
    #[inline]
    #[must_use]
    pub fn contains(&self, item: &ResourceItem) -> bool {
        self.placements.contains_key(&item.id())
    }

    /// Read-only view of per-slot occupancy.
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[SlotState] {
        &self.slots
    }

    /// Copies the current occupancy out for display or diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        PoolSnapshot {
            slots: self.slots.to_vec(),
        }
    }

    /// Iterates over every placed item and its range.
    pub fn placements(&self) -> impl Iterator<Item = (ItemId, SlotRange)> + '_ {
        self.placements.iter().map(|(&id, &range)| (id, range))
    }

    /// Leftmost window of free slots whose length reaches `demand`.
    fn find_first_fit(&self, demand: usize) -> Option<SlotRange> {
        let mut left = 0;
        for (right, state) in self.slots.iter().enumerate() {
            if state.is_occupied() {
                left = right + 1;
                continue;
            }
            if right + 1 - left == demand {
                return Some(SlotRange::new(left, right));
            }
        }
        None
    }

    fn fill(&mut self, range: SlotRange, state: SlotState) {
        self.slots[range.indices()].fill(state);
    }
}

/// Point-in-time copy of a pool's slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    /// Occupancy, one entry per slot in index order.
    pub slots: Vec<SlotState>,
}

impl PoolSnapshot {
    /// Number of occupied slots in the snapshot.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_occupied()).count()
    }

    /// Occupancy as booleans (`true` = occupied).
    #[must_use]
    pub fn as_bools(&self) -> Vec<bool> {
        self.slots.iter().map(|s| s.is_occupied()).collect()
    }
}

/// Renders as `[##..#]`: `#` occupied, `.` free.
impl fmt::Display for PoolSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for state in &self.slots {
            f.write_str(if state.is_occupied() { "#" } else { "." })?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(demand: usize) -> ResourceItem {
        ResourceItem::new(demand).unwrap()
    }

    /// Occupied count matches mapped demand, ranges are disjoint, and every
    /// occupied slot is owned by exactly one range.
    fn assert_consistent(pool: &ResourcePool) {
        let ranges: Vec<SlotRange> = pool.placements().map(|(_, r)| r).collect();
        let mapped: usize = ranges.iter().map(|r| r.len()).sum();
        assert_eq!(pool.occupied_count(), mapped);

        for (i, a) in ranges.iter().enumerate() {
            for b in &ranges[i + 1..] {
                assert!(!a.overlaps(*b), "{a} overlaps {b}");
            }
        }

        for (index, state) in pool.slots().iter().enumerate() {
            let owners = ranges.iter().filter(|r| r.contains(index)).count();
            assert_eq!(owners, usize::from(state.is_occupied()), "slot {index}");
        }
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(ResourcePool::new(0).unwrap_err(), CoreError::InvalidCapacity(0));
    }

    #[test]
    fn test_four_singles_then_full() {
        let mut pool = ResourcePool::new(4).unwrap();
        let items: Vec<_> = (0..4).map(|_| item(1)).collect();

        for (i, it) in items.iter().enumerate() {
            assert_eq!(pool.place(it), Some(SlotRange::new(i, i)));
        }
        assert!(pool.place(&item(1)).is_none());
        assert_eq!(pool.free_count(), 0);
        assert_consistent(&pool);
    }

    #[test]
    fn test_fill_remaining_slot_then_full() {
        let mut pool = ResourcePool::new(3).unwrap();
        let limo = item(2);
        assert_eq!(pool.place(&limo), Some(SlotRange::new(0, 1)));

        assert_eq!(pool.place(&item(1)), Some(SlotRange::new(2, 2)));
        assert!(pool.place(&item(1)).is_none());
        assert_consistent(&pool);
    }

    #[test]
    fn test_rejection_leaves_pool_untouched() {
        let mut pool = ResourcePool::new(3).unwrap();
        let _ = pool.place(&item(1));
        let before = pool.snapshot();

        assert!(pool.place(&item(3)).is_none());
        assert_eq!(pool.snapshot(), before);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_place_release_round_trip() {
        let mut pool = ResourcePool::new(6).unwrap();
        let a = item(2);
        let _ = pool.place(&a);
        let before = pool.snapshot();

        let b = item(3);
        let range = pool.place(&b).unwrap();
        assert_eq!(pool.release(&b), Some(range));
        assert_eq!(pool.snapshot(), before);
        assert_consistent(&pool);
    }

    #[test]
    fn test_double_release_is_noop() {
        let mut pool = ResourcePool::new(2).unwrap();
        let car = item(1);
        let _ = pool.place(&car);

        assert!(pool.release(&car).is_some());
        assert!(pool.release(&car).is_none());
        assert_eq!(pool.occupied_count(), 0);
    }

    #[test]
    fn test_release_unknown_item() {
        let mut pool = ResourcePool::new(2).unwrap();
        assert!(pool.release(&item(1)).is_none());
    }

    #[test]
    fn test_first_fit_not_best_fit() {
        // Layout after setup: [. . . # .]
        let mut pool = ResourcePool::new(5).unwrap();
        let fillers: Vec<_> = (0..5).map(|_| item(1)).collect();
        for f in &fillers {
            let _ = pool.place(f);
        }
        for i in [0, 1, 2, 4] {
            let _ = pool.release(&fillers[i]);
        }

        // Slot 4 is an exact single-slot hole, but the leftmost run wins.
        assert_eq!(pool.place(&item(1)), Some(SlotRange::new(0, 0)));
        assert_consistent(&pool);
    }

    #[test]
    fn test_window_resets_past_occupied_slot() {
        // Layout: [. # . .]
        let mut pool = ResourcePool::new(4).unwrap();
        let a = item(1);
        let b = item(1);
        let _ = pool.place(&a);
        let _ = pool.place(&b);
        let _ = pool.release(&a);

        assert_eq!(pool.place(&item(2)), Some(SlotRange::new(2, 3)));
        assert!(pool.place(&item(2)).is_none());
    }

    #[test]
    fn test_same_item_twice_rejected() {
        let mut pool = ResourcePool::new(4).unwrap();
        let car = item(1);
        assert!(pool.place(&car).is_some());
        assert!(pool.place(&car).is_none());
        assert_eq!(pool.occupied_count(), 1);
    }

    #[test]
    fn test_equal_demand_items_tracked_separately() {
        let mut pool = ResourcePool::new(2).unwrap();
        let a = item(1);
        let b = item(1);
        let _ = pool.place(&a);
        let _ = pool.place(&b);

        assert_eq!(pool.release(&b), Some(SlotRange::new(1, 1)));
        assert_eq!(pool.range_of(&a), Some(SlotRange::new(0, 0)));
        assert!(!pool.contains(&b));
    }

    #[test]
    fn test_mixed_sequence_stays_consistent() {
        let mut pool = ResourcePool::new(10).unwrap();
        let items: Vec<_> = [3, 1, 2, 1, 3, 2].iter().map(|&d| item(d)).collect();

        for it in &items {
            let _ = pool.place(it);
            assert_consistent(&pool);
        }
        for it in items.iter().step_by(2) {
            let _ = pool.release(it);
            assert_consistent(&pool);
        }
        for it in &items {
            let _ = pool.place(it);
            assert_consistent(&pool);
        }
    }

    #[test]
    fn test_snapshot_display() {
        let mut pool = ResourcePool::new(4).unwrap();
        let _ = pool.place(&item(2));
        let snapshot = pool.snapshot();

        assert_eq!(snapshot.to_string(), "[##..]");
        assert_eq!(snapshot.occupied_count(), 2);
        assert_eq!(snapshot.as_bools(), vec![true, true, false, false]);
    }
}
