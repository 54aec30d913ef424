//! In-memory ledger implementation.

use std::collections::HashMap;

use crate::domain::{AccountId, Amount};
use crate::error::{Result, SwapError};
use crate::ledger::BalanceLedger;

/// An in-memory [`BalanceLedger`]: a key→amount map plus a cached
/// running total.
///
/// Self-transfers are permitted and leave the balance unchanged.
/// Transfers never change the total supply; only mint and burn do.
///
/// # Examples
///
/// ```
/// use pegswap::domain::{AccountId, Amount};
/// use pegswap::ledger::{BalanceLedger, TokenLedger};
///
/// let alice = AccountId::from_bytes([1u8; 32]);
/// let bob = AccountId::from_bytes([2u8; 32]);
///
/// let mut ledger = TokenLedger::new();
/// ledger.mint(alice, Amount::new(100)).expect("mint");
/// ledger.transfer_from(alice, bob, Amount::new(40)).expect("transfer");
///
/// assert_eq!(ledger.balance_of(&alice), Amount::new(60));
/// assert_eq!(ledger.balance_of(&bob), Amount::new(40));
/// assert_eq!(ledger.total_supply(), Amount::new(100));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokenLedger {
    balances: HashMap<AccountId, Amount>,
    total: Amount,
}

impl TokenLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn credit(&mut self, account: AccountId, amount: Amount) -> Result<()> {
        let current = self.balance_of(&account);
        let updated = current
            .checked_add(&amount)
            .ok_or(SwapError::Overflow("account balance overflow"))?;
        self.balances.insert(account, updated);
        Ok(())
    }
}

impl BalanceLedger for TokenLedger {
    fn mint(&mut self, account: AccountId, amount: Amount) -> Result<()> {
        let total = self
            .total
            .checked_add(&amount)
            .ok_or(SwapError::Overflow("total supply overflow"))?;
        self.credit(account, amount)?;
        self.total = total;
        Ok(())
    }

    fn burn(&mut self, account: AccountId, amount: Amount) -> Result<()> {
        let remaining = self
            .balance_of(&account)
            .checked_sub(&amount)
            .ok_or(SwapError::InsufficientBalance("not enough tokens to burn"))?;
        self.balances.insert(account, remaining);
        // Supply cannot underflow: the account balance is part of the sum.
        self.total = Amount::new(self.total.get() - amount.get());
        Ok(())
    }

    fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    fn transfer_from(
        &mut self,
        sender: AccountId,
        recipient: AccountId,
        amount: Amount,
    ) -> Result<()> {
        let debited = self
            .balance_of(&sender)
            .checked_sub(&amount)
            .ok_or(SwapError::InsufficientBalance("sender balance too low"))?;
        if sender == recipient {
            return Ok(());
        }
        self.balances.insert(sender, debited);
        // Cannot overflow: recipient balance + amount <= total supply.
        let credited = Amount::new(self.balance_of(&recipient).get() + amount.get());
        self.balances.insert(recipient, credited);
        Ok(())
    }

    fn total_supply(&self) -> Amount {
        self.total
    }
}
