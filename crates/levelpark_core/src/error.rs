//! # Core Error Types
//!
//! Construction-time failures of items, pools and allocators.
//!
//! Running out of space is NOT an error here: `place` reports it as `None`
//! and the caller picks its own retry policy.

use thiserror::Error;

use crate::item::ItemId;

/// Errors that can occur while building allocator structures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An item must demand at least one slot.
    #[error("invalid demand size: {0} (must be at least 1)")]
    InvalidDemand(usize),

    /// A pool must hold at least one slot.
    #[error("invalid pool capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),

    /// An allocator needs at least one pool to place anything.
    #[error("allocator has no pools")]
    NoPools,

    /// Pools handed to an allocator hold the same item more than once.
    #[error("{0} is placed in more than one pool")]
    DuplicatePlacement(ItemId),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
