//! # Resource Items
//!
//! Items are the things that get parked. Each one carries an opaque
//! [`ItemId`] handed out by a process-wide counter, so identity survives
//! even when two items demand the same number of slots.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{CoreError, CoreResult};

/// Next identity to hand out. Zero is never issued.
static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a resource item.
///
/// Pools and ledgers key their maps by this value, never by the item's
/// attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Issues a fresh, never-before-seen identity.
    #[inline]
    fn next() -> Self {
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identity value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Vehicle kinds with their default slot demand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VehicleKind {
    /// A car takes one slot.
    Car,
    /// A limousine takes two adjacent slots.
    Limo,
    /// A semitruck takes three adjacent slots.
    Semitruck,
}

impl VehicleKind {
    /// Number of contiguous slots this kind needs.
    #[inline]
    #[must_use]
    pub const fn demand_size(self) -> usize {
        match self {
            Self::Car => 1,
            Self::Limo => 2,
            Self::Semitruck => 3,
        }
    }
}

/// Something that needs a contiguous run of slots.
///
/// Cloning an item clones the handle, not the identity: both copies refer to
/// the same parked vehicle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceItem {
    /// Identity used as the map key everywhere.
    id: ItemId,
    /// Contiguous slots required. Always at least 1.
    demand_size: usize,
}

impl ResourceItem {
    /// Creates a new item with a fresh identity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDemand`] if `demand_size` is zero.
    pub fn new(demand_size: usize) -> CoreResult<Self> {
        if demand_size == 0 {
            return Err(CoreError::InvalidDemand(demand_size));
        }

        Ok(Self {
            id: ItemId::next(),
            demand_size,
        })
    }

    /// Creates an item sized for a vehicle kind.
    #[must_use]
    pub fn vehicle(kind: VehicleKind) -> Self {
        Self {
            id: ItemId::next(),
            demand_size: kind.demand_size(),
        }
    }

    /// Returns this item's identity.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the number of contiguous slots this item needs.
    #[inline]
    #[must_use]
    pub const fn demand_size(&self) -> usize {
        self.demand_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_demand_rejected() {
        assert_eq!(ResourceItem::new(0), Err(CoreError::InvalidDemand(0)));
    }

    #[test]
    fn test_equal_demand_distinct_identity() {
        let a = ResourceItem::new(2).unwrap();
        let b = ResourceItem::new(2).unwrap();

        assert_eq!(a.demand_size(), b.demand_size());
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }

    #[test]
    fn test_clone_shares_identity() {
        let a = ResourceItem::vehicle(VehicleKind::Semitruck);
        let b = a.clone();
        assert_eq!(a.id(), b.id());
        assert_eq!(b.demand_size(), 3);
    }

    #[test]
    fn test_vehicle_kind_sizes() {
        assert_eq!(ResourceItem::vehicle(VehicleKind::Car).demand_size(), 1);
        assert_eq!(ResourceItem::vehicle(VehicleKind::Limo).demand_size(), 2);
        assert_eq!(ResourceItem::vehicle(VehicleKind::Semitruck).demand_size(), 3);
    }
}
