//! # Session Ledger
//!
//! Check-in places an item and records the hour it arrived. Check-out frees
//! the item, bills the elapsed hours and debits the holder.
//!
//! ## Locking
//!
//! Sessions live in a sharded map keyed by [`ItemId`]. The item's shard lock
//! is held across the allocator call *and* the session mutation, so no other
//! operation on that item can observe a placement without its session or a
//! session without its placement. Lock order is always shard, then pool;
//! pools never take shard locks. Items in different shards proceed in
//! parallel.

use std::collections::HashMap;

use levelpark_core::{ItemId, MultiPoolAllocator, Placement, PoolSnapshot, PoolStats, ResourceItem};
use parking_lot::Mutex;

use crate::account::HolderAccount;
use crate::clock::{Hour, HourClock, SystemClock};
use crate::config::GarageConfig;
use crate::error::{LedgerError, LedgerResult};
use crate::tariff::Tariff;

/// Default number of session shards.
pub const DEFAULT_SESSION_SHARDS: usize = 16;

/// An active hold on some slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Session {
    /// Where the item is parked.
    pub placement: Placement,
    /// Hour the item checked in.
    pub start_hour: Hour,
}

/// Outcome of a successful check-out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// The item that left.
    pub item: ItemId,
    /// Where it had been parked.
    pub placement: Placement,
    /// Check-in hour.
    pub start_hour: Hour,
    /// Check-out hour.
    pub end_hour: Hour,
    /// Billable hours.
    pub elapsed_hours: i64,
    /// Amount debited from the holder.
    pub charge: i64,
    /// Holder's balance after the debit.
    pub balance_after: i64,
}

type SessionShard = Mutex<HashMap<ItemId, Session>>;

/// Allocator plus per-item sessions and hourly billing.
///
/// # Thread Safety
///
/// `SessionLedger` is `Send + Sync` and can be shared across threads behind
/// an `Arc`.
pub struct SessionLedger<C: HourClock = SystemClock> {
    /// Slots for every floor.
    allocator: MultiPoolAllocator,
    /// Active sessions, sharded by item id.
    shards: Box<[SessionShard]>,
    /// Pricing.
    tariff: Tariff,
    /// Source of the current hour.
    clock: C,
}

impl<C: HourClock> SessionLedger<C> {
    /// Wraps an allocator with the default number of session shards.
    #[must_use]
    pub fn new(allocator: MultiPoolAllocator, tariff: Tariff, clock: C) -> Self {
        Self::with_shards(allocator, tariff, clock, DEFAULT_SESSION_SHARDS)
    }

    /// Wraps an allocator with `shard_count` session shards (at least one).
    #[must_use]
    pub fn with_shards(
        allocator: MultiPoolAllocator,
        tariff: Tariff,
        clock: C,
        shard_count: usize,
    ) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Mutex::new(HashMap::new()))
            .collect();

        Self {
            allocator,
            shards,
            tariff,
            clock,
        }
    }

    /// Builds the allocator and ledger described by a config.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Config`] if the config is invalid.
    pub fn from_config(config: &GarageConfig, clock: C) -> LedgerResult<Self> {
        config.validate()?;
        let allocator = MultiPoolAllocator::new(config.pool_count, config.slots_per_pool)?;

        tracing::info!(
            pools = config.pool_count,
            slots_per_pool = config.slots_per_pool,
            hourly_rate = config.hourly_rate,
            "garage opened"
        );

        Ok(Self::with_shards(
            allocator,
            config.tariff(),
            clock,
            config.session_shards,
        ))
    }

    /// Places an item and starts its session.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AlreadyCheckedIn`] if the item has an active session;
    ///   the allocator is not consulted.
    /// - [`LedgerError::AllocationRejected`] if no pool has room; nothing is
    ///   recorded.
    pub fn check_in(&self, item: &ResourceItem) -> LedgerResult<Placement> {
        let id = item.id();
        let mut sessions = self.shard(id).lock();

        if sessions.contains_key(&id) {
            return Err(LedgerError::AlreadyCheckedIn(id));
        }

        let Some(placement) = self.allocator.place(item) else {
            tracing::warn!(item = %id, demand = item.demand_size(), "check-in rejected");
            return Err(LedgerError::AllocationRejected {
                item: id,
                demand: item.demand_size(),
            });
        };

        let start_hour = self.clock.current_hour();
        sessions.insert(
            id,
            Session {
                placement,
                start_hour,
            },
        );

        tracing::info!(
            item = %id,
            pool = placement.pool,
            range = %placement.range,
            %start_hour,
            "checked in"
        );
        Ok(placement)
    }

    /// Frees an item, bills the session and debits the holder.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownItem`] if the item has no active
    /// session. Nothing is released and nothing is billed.
    pub fn check_out(&self, holder: &HolderAccount, item: &ResourceItem) -> LedgerResult<Receipt> {
        let id = item.id();
        let mut sessions = self.shard(id).lock();

        let Some(session) = sessions.remove(&id) else {
            tracing::debug!(item = %id, "check-out of unknown item");
            return Err(LedgerError::UnknownItem(id));
        };

        // Sessions and placements change together under this shard lock.
        let released = self.allocator.release(item);
        debug_assert_eq!(released, Some(session.placement));

        let end_hour = self.clock.current_hour();
        let (elapsed_hours, charge) = self.tariff.bill(session.start_hour, end_hour);
        let balance_after = holder.debit(charge);

        tracing::info!(
            item = %id,
            pool = session.placement.pool,
            start_hour = %session.start_hour,
            %end_hour,
            elapsed_hours,
            charge,
            "checked out"
        );

        Ok(Receipt {
            item: id,
            placement: session.placement,
            start_hour: session.start_hour,
            end_hour,
            elapsed_hours,
            charge,
            balance_after,
        })
    }

    /// What checking the item out right now would cost, without doing it.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownItem`] if the item has no active
    /// session.
    pub fn quote(&self, item: &ResourceItem) -> LedgerResult<i64> {
        let session = self
            .session_of(item)
            .ok_or(LedgerError::UnknownItem(item.id()))?;
        let (_, charge) = self
            .tariff
            .bill(session.start_hour, self.clock.current_hour());
        Ok(charge)
    }

    /// The item's active session, if any.
    #[must_use]
    pub fn session_of(&self, item: &ResourceItem) -> Option<Session> {
        let id = item.id();
        self.shard(id).lock().get(&id).copied()
    }

    /// Number of active sessions.
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    /// Per-pool occupancy, for display.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PoolSnapshot> {
        self.allocator.snapshot()
    }

    /// Per-pool occupancy counters.
    #[must_use]
    pub fn stats(&self) -> Vec<PoolStats> {
        self.allocator.stats()
    }

    /// Where an item is parked.
    #[must_use]
    pub fn locate(&self, item: &ResourceItem) -> Option<Placement> {
        self.allocator.locate(item)
    }

    /// The pricing in force.
    #[inline]
    #[must_use]
    pub const fn tariff(&self) -> Tariff {
        self.tariff
    }

    /// The clock this ledger reads.
    #[inline]
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    #[allow(clippy::cast_possible_truncation)]
    fn shard(&self, id: ItemId) -> &SessionShard {
        &self.shards[(id.raw() % self.shards.len() as u64) as usize]
    }
}
