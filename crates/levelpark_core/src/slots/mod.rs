//! # Slot Pools
//!
//! A pool is one floor of the garage: a fixed run of slots, each either
//! free or occupied, plus the record of which item holds which range.
//!
//! ## Design Philosophy
//!
//! All slots are allocated once at construction. During operation:
//! - No resizing
//! - No relocation of parked items
//! - Linear, predictable scan cost

mod pool;
mod range;

pub use pool::{PoolSnapshot, ResourcePool, SlotState};
pub use range::SlotRange;
