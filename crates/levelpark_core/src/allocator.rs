//! # Multi-Pool Allocator
//!
//! An ordered set of pools tried front to back for every placement.
//!
//! ```text
//! place(item) -> pool 0 ──accepts──> Placement { pool: 0, .. }
//!                  │ rejects
//!                  └─> pool 1 ──accepts──> Placement { pool: 1, .. }
//!                        │ rejects
//!                        └─> ... -> None (nothing changed)
//! ```
//!
//! There is no global lock around the scan. Each pool sits behind its own
//! mutex and the scan-then-commit for that pool happens entirely inside its
//! guard. A separate claim set records which items are placed anywhere; an
//! item must win its claim before any pool is scanned, so one item can never
//! commit to two pools.

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::item::{ItemId, ResourceItem};
use crate::slots::{PoolSnapshot, ResourcePool, SlotRange};

/// Where an item is parked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Index of the pool, in construction order.
    pub pool: usize,
    /// Slots held inside that pool.
    pub range: SlotRange,
}

/// Occupancy counters for one pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Total slots.
    pub capacity: usize,
    /// Occupied slots.
    pub occupied: usize,
    /// Items placed.
    pub items: usize,
}

impl PoolStats {
    /// Free slots.
    #[inline]
    #[must_use]
    pub const fn free(&self) -> usize {
        self.capacity - self.occupied
    }
}

/// Ordered collection of independently locked pools.
///
/// # Thread Safety
///
/// `MultiPoolAllocator` is `Send + Sync`. Distinct items may be placed
/// concurrently; two callers racing for the same free run are serialized by
/// that pool's lock. Two callers placing the *same* item race for its claim
/// and only the winner scans the pools.
pub struct MultiPoolAllocator {
    /// Pools in the fixed order they are tried.
    pools: Box<[Mutex<ResourcePool>]>,
    /// Items that are placed, or being placed, in some pool.
    ///
    /// Only held for the insert or remove, never across a pool lock.
    claims: Mutex<HashSet<ItemId>>,
}

impl MultiPoolAllocator {
    /// Creates `pool_count` pools of `slots_per_pool` slots each.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoPools`] if `pool_count` is zero, or
    /// [`CoreError::InvalidCapacity`] if `slots_per_pool` is zero.
    pub fn new(pool_count: usize, slots_per_pool: usize) -> CoreResult<Self> {
        let pools = (0..pool_count)
            .map(|_| ResourcePool::new(slots_per_pool))
            .collect::<CoreResult<Vec<_>>>()?;
        Self::from_pools(pools)
    }

    /// Builds an allocator over existing pools, tried in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoPools`] if `pools` is empty, or
    /// [`CoreError::DuplicatePlacement`] if one item is already placed in
    /// more than one of them.
    pub fn from_pools(pools: Vec<ResourcePool>) -> CoreResult<Self> {
        if pools.is_empty() {
            return Err(CoreError::NoPools);
        }

        let mut claims = HashSet::new();
        for (id, _) in pools.iter().flat_map(ResourcePool::placements) {
            if !claims.insert(id) {
                return Err(CoreError::DuplicatePlacement(id));
            }
        }

        Ok(Self {
            pools: pools.into_iter().map(Mutex::new).collect(),
            claims: Mutex::new(claims),
        })
    }

    /// Number of pools.
    #[inline]
    #[must_use]
    pub fn pool_count(&self) -> usize {
        self.pools.len()
    }

    /// Capacity of one pool, or `None` if the index is out of range.
    #[must_use]
    pub fn pool_capacity(&self, pool: usize) -> Option<usize> {
        self.pools.get(pool).map(|p| p.lock().capacity())
    }

    /// Total slots across all pools.
    #[must_use]
    pub fn total_capacity(&self) -> usize {
        self.pools.iter().map(|p| p.lock().capacity()).sum()
    }

    /// Places an item in the first pool that accepts it.
    ///
    /// # Returns
    ///
    /// The placement, or `None` if every pool rejected the item. A rejected
    /// request leaves every pool unchanged. An item already placed anywhere
    /// is rejected.
    pub fn place(&self, item: &ResourceItem) -> Option<Placement> {
        if !self.claims.lock().insert(item.id()) {
            tracing::warn!(item = %item.id(), "item is already placed");
            return None;
        }

        for (pool, slot_pool) in self.pools.iter().enumerate() {
            if let Some(range) = slot_pool.lock().place(item) {
                tracing::debug!(item = %item.id(), pool, %range, "placed");
                return Some(Placement { pool, range });
            }
        }

        self.claims.lock().remove(&item.id());
        tracing::debug!(
            item = %item.id(),
            demand = item.demand_size(),
            "no pool has a fitting run"
        );
        None
    }

    /// Releases an item from whichever pool holds it.
    ///
    /// # Returns
    ///
    /// Where the item was, or `None` if it was not placed anywhere.
    pub fn release(&self, item: &ResourceItem) -> Option<Placement> {
        for (pool, slot_pool) in self.pools.iter().enumerate() {
            let released = slot_pool.lock().release(item);
            if let Some(range) = released {
                self.claims.lock().remove(&item.id());
                tracing::debug!(item = %item.id(), pool, %range, "released");
                return Some(Placement { pool, range });
            }
        }
        None
    }

    /// Finds where an item is parked.
    #[must_use]
    pub fn locate(&self, item: &ResourceItem) -> Option<Placement> {
        self.pools.iter().enumerate().find_map(|(pool, slot_pool)| {
            slot_pool
                .lock()
                .range_of(item)
                .map(|range| Placement { pool, range })
        })
    }

    /// Copies every pool's occupancy, in pool order.
    ///
    /// Each pool is copied under its own lock; the result is not a single
    /// atomic cut across pools.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PoolSnapshot> {
        self.pools.iter().map(|p| p.lock().snapshot()).collect()
    }

    /// Per-pool occupancy counters, in pool order.
    #[must_use]
    pub fn stats(&self) -> Vec<PoolStats> {
        self.pools
            .iter()
            .map(|p| {
                let pool = p.lock();
                PoolStats {
                    capacity: pool.capacity(),
                    occupied: pool.occupied_count(),
                    items: pool.len(),
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for MultiPoolAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiPoolAllocator")
            .field("pools", &self.stats())
            .finish()
    }
}
