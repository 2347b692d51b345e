//! # Billing Error Types
//!
//! All errors that can occur in the billing layer.

use levelpark_core::{CoreError, ItemId};
use thiserror::Error;

/// Errors that can occur while checking items in and out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No pool has a contiguous free run of the required size.
    ///
    /// Not fatal: the caller may retry later or with a different size.
    #[error("allocation rejected: no pool has {demand} contiguous free slots for {item}")]
    AllocationRejected {
        /// The rejected item.
        item: ItemId,
        /// Slots it asked for.
        demand: usize,
    },

    /// The item already has an active session.
    #[error("{0} is already checked in")]
    AlreadyCheckedIn(ItemId),

    /// Check-out for an item with no active session. Nothing was billed.
    #[error("{0} has no active session")]
    UnknownItem(ItemId),

    /// A guarded debit would take the balance below zero.
    #[error("insufficient funds: balance {balance}, tried to debit {amount}")]
    InsufficientFunds {
        /// Balance at the time of the attempt.
        balance: i64,
        /// Amount requested.
        amount: i64,
    },

    /// Building the allocator failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Loading or validating configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors from loading garage configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config {path}: {reason}")]
    Io {
        /// File that failed.
        path: String,
        /// Underlying I/O error text.
        reason: String,
    },

    /// The TOML text did not parse.
    #[error("invalid config syntax: {0}")]
    Parse(String),

    /// The values parsed but are out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for billing operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
