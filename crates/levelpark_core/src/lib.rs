//! # LEVELPARK Core Allocator
//!
//! Contiguous slot allocation across several independent pools, modelled as
//! a parking garage: every floor is a [`ResourcePool`] of identically-sized
//! slots, and every vehicle is a [`ResourceItem`] that needs a run of
//! adjacent free slots on a single floor.
//!
//! ## Architecture Rules
//!
//! 1. **First-fit, leftmost** - a pool takes the first free run that grows to
//!    the requested size. No best-fit, no relocation, no compaction.
//! 2. **Identity, not value** - pools key placements by [`ItemId`]. Two
//!    vehicles of the same size are still two distinct holders.
//! 3. **One lock per pool** - the scan and the commit happen under the same
//!    guard, so two callers can never both claim one free run.
//!
//! ## Example
//!
//! ```rust
//! use levelpark_core::{MultiPoolAllocator, ResourceItem, VehicleKind};
//!
//! let garage = MultiPoolAllocator::new(2, 4).unwrap();
//! let limo = ResourceItem::vehicle(VehicleKind::Limo);
//!
//! let placement = garage.place(&limo).unwrap();
//! assert_eq!(placement.pool, 0);
//! assert_eq!(placement.range.len(), 2);
//!
//! assert!(garage.release(&limo).is_some());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod allocator;
pub mod error;
pub mod item;
pub mod slots;

pub use allocator::{MultiPoolAllocator, Placement, PoolStats};
pub use error::{CoreError, CoreResult};
pub use item::{ItemId, ResourceItem, VehicleKind};
pub use slots::{PoolSnapshot, ResourcePool, SlotRange, SlotState};
