//! The ledger capability contract consumed by the pool.

use crate::domain::{AccountId, Amount};
use crate::error::Result;

/// A mapping from opaque account identity to a non-negative balance.
///
/// This is the full contract the pool requires from a token: the pool
/// is generic over it, so any balance store honoring these semantics
/// can back a pool side.
///
/// # Semantics
///
/// - [`BalanceLedger::balance_of`] returns zero for unseen accounts.
/// - [`BalanceLedger::transfer_from`] debits and credits atomically;
///   it must not mutate anything when the sender's balance is short.
/// - The sum of all balances equals [`BalanceLedger::total_supply`]
///   at all times.
pub trait BalanceLedger {
    /// Credits `amount` to `account`.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::Overflow`](crate::error::SwapError::Overflow)
    /// if the account balance or the total supply would exceed the
    /// representable range. There is no other failure condition.
    fn mint(&mut self, account: AccountId, amount: Amount) -> Result<()>;

    /// Debits `amount` from `account`.
    ///
    /// # Errors
    ///
    /// Returns
    /// [`SwapError::InsufficientBalance`](crate::error::SwapError::InsufficientBalance)
    /// if the account holds less than `amount`.
    fn burn(&mut self, account: AccountId, amount: Amount) -> Result<()>;

    /// Returns the current balance of `account`, zero if unseen.
    fn balance_of(&self, account: &AccountId) -> Amount;

    /// Moves `amount` from `sender` to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns
    /// [`SwapError::InsufficientBalance`](crate::error::SwapError::InsufficientBalance)
    /// if the sender holds less than `amount`; no balance changes in
    /// that case.
    fn transfer_from(
        &mut self,
        sender: AccountId,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<()>;

    /// Returns the sum of all balances.
    fn total_supply(&self) -> Amount;
}
