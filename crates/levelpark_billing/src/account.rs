//! # Holder Accounts
//!
//! A holder's balance, debited when their item checks out.
//!
//! The balance has no lower bound: [`HolderAccount::debit`] always applies.
//! Callers that want an overdraft check use [`HolderAccount::try_debit`].

use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::{LedgerError, LedgerResult};

/// A single mutable integer balance.
///
/// `HolderAccount` is `Send + Sync`; all mutation goes through `&self`.
#[derive(Debug, Default)]
pub struct HolderAccount {
    balance: AtomicI64,
}

impl HolderAccount {
    /// Creates an account with an opening balance.
    #[must_use]
    pub const fn new(balance: i64) -> Self {
        Self {
            balance: AtomicI64::new(balance),
        }
    }

    /// Returns the current balance.
    #[inline]
    #[must_use]
    pub fn balance(&self) -> i64 {
        self.balance.load(Ordering::Acquire)
    }

    /// Subtracts `amount` and returns the new balance. May go negative.
    ///
    /// Saturates at the `i64` bounds instead of wrapping.
    pub fn debit(&self, amount: i64) -> i64 {
        self.apply(|balance| balance.saturating_sub(amount))
    }

    /// Adds `amount` and returns the new balance.
    ///
    /// Saturates at the `i64` bounds instead of wrapping.
    pub fn credit(&self, amount: i64) -> i64 {
        self.apply(|balance| balance.saturating_add(amount))
    }

    /// Subtracts `amount` only if the balance stays non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InsufficientFunds`] and leaves the balance
    /// untouched if the debit would overdraw the account.
    pub fn try_debit(&self, amount: i64) -> LedgerResult<i64> {
        self.balance
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |balance| {
                let next = balance.checked_sub(amount)?;
                (next >= 0).then_some(next)
            })
            .map(|previous| previous - amount)
            .map_err(|balance| LedgerError::InsufficientFunds { balance, amount })
    }

    /// Applies an infallible update atomically and returns the new balance.
    fn apply(&self, update: impl Fn(i64) -> i64) -> i64 {
        let mut next = 0;
        // The closure never returns None, so the update always lands.
        let _ = self
            .balance
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |balance| {
                next = update(balance);
                Some(next)
            });
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_and_credit() {
        let account = HolderAccount::new(20);
        assert_eq!(account.debit(5), 15);
        assert_eq!(account.credit(10), 25);
        assert_eq!(account.balance(), 25);
    }

    #[test]
    fn test_debit_may_go_negative() {
        let account = HolderAccount::new(3);
        assert_eq!(account.debit(10), -7);
    }

    #[test]
    fn test_debit_saturates_at_lower_bound() {
        let account = HolderAccount::new(i64::MIN + 2);
        assert_eq!(account.debit(5), i64::MIN);
        assert_eq!(account.balance(), i64::MIN);
        assert_eq!(account.debit(1), i64::MIN);
    }

    #[test]
    fn test_credit_saturates_at_upper_bound() {
        let account = HolderAccount::new(i64::MAX - 1);
        assert_eq!(account.credit(10), i64::MAX);
        assert_eq!(account.balance(), i64::MAX);
    }

    #[test]
    fn test_negative_debit_saturates_as_credit() {
        let account = HolderAccount::new(i64::MAX);
        assert_eq!(account.debit(-1), i64::MAX);
        assert_eq!(account.debit(i64::MIN), i64::MAX);
    }

    #[test]
    fn test_try_debit_guards_overdraft() {
        let account = HolderAccount::new(10);
        assert_eq!(account.try_debit(4), Ok(6));
        assert_eq!(
            account.try_debit(7),
            Err(LedgerError::InsufficientFunds { balance: 6, amount: 7 })
        );
        assert_eq!(account.balance(), 6);
        assert_eq!(account.try_debit(6), Ok(0));
    }
}
