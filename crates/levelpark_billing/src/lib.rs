//! # LEVELPARK Billing
//!
//! Check-in / check-out on top of the [`levelpark_core`] allocator.
//!
//! ## The Check-Out Pipeline
//!
//! ```text
//! check_out(holder, item) ->
//!   1. Lock the item's session shard
//!   2. Take the session (UnknownItem if there is none)
//!   3. Release the item's slots
//!   4. elapsed = end hour - start hour (see MidnightPolicy)
//!   5. charge = elapsed * hourly rate, debit the holder
//! ```
//!
//! ## Design Principles
//!
//! 1. **Integer money** - balances and charges are `i64`
//! 2. **Injected time** - every ledger owns an [`HourClock`]
//! 3. **Atomic per item** - a placement and its session appear and vanish
//!    together
//!
//! ## Example
//!
//! ```rust
//! use levelpark_billing::{GarageConfig, HolderAccount, ManualClock, SessionLedger};
//! use levelpark_core::{ResourceItem, VehicleKind};
//!
//! let config = GarageConfig::from_toml_str("pool_count = 2\nslots_per_pool = 4\nhourly_rate = 5").unwrap();
//! let ledger = SessionLedger::from_config(&config, ManualClock::at(9).unwrap()).unwrap();
//! let driver = HolderAccount::new(100);
//! let car = ResourceItem::vehicle(VehicleKind::Car);
//!
//! ledger.check_in(&car).unwrap();
//! ledger.clock().advance(2);
//!
//! let receipt = ledger.check_out(&driver, &car).unwrap();
//! assert_eq!(receipt.charge, 10);
//! assert_eq!(driver.balance(), 90);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod account;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod tariff;

pub use account::HolderAccount;
pub use clock::{Hour, HourClock, ManualClock, SystemClock};
pub use config::GarageConfig;
pub use error::{ConfigError, LedgerError, LedgerResult};
pub use ledger::{Receipt, Session, SessionLedger};
pub use tariff::{MidnightPolicy, Tariff};
