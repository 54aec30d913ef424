//! Pool configuration.

use crate::domain::AccountId;
use crate::error::{Result, SwapError};

/// Default bisection tolerance: one smallest token unit.
pub const DEFAULT_THRESHOLD: u128 = 1;

/// Immutable parameters for a [`PeggedPool`](crate::pool::PeggedPool).
///
/// - `account` — the pool's own ledger identity; its holdings on both
///   token ledgers are keyed by it.
/// - `operator` — the caller on whose behalf deposits, withdrawals,
///   and swaps move funds, bound once at construction.
/// - `threshold` — the bisection solver stops once its bracket closes
///   to this width, in smallest token units.
///
/// # Validation
///
/// - Neither identity may be the zero sentinel.
/// - The pool cannot be its own operator.
/// - The threshold must be at least one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    account: AccountId,
    operator: AccountId,
    threshold: u128,
}

impl PoolConfig {
    /// Creates a config with the default threshold.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidConfiguration`] if validation fails.
    pub fn new(account: AccountId, operator: AccountId) -> Result<Self> {
        Self::with_threshold(account, operator, DEFAULT_THRESHOLD)
    }

    /// Creates a config with an explicit bisection threshold.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidConfiguration`] if validation fails.
    pub fn with_threshold(account: AccountId, operator: AccountId, threshold: u128) -> Result<Self> {
        let config = Self {
            account,
            operator,
            threshold,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidConfiguration`] naming the violated
    /// invariant.
    pub fn validate(&self) -> Result<()> {
        if self.account.is_zero() {
            return Err(SwapError::InvalidConfiguration(
                "pool account must not be the zero identity",
            ));
        }
        if self.operator.is_zero() {
            return Err(SwapError::InvalidConfiguration(
                "operator must not be the zero identity",
            ));
        }
        if self.account == self.operator {
            return Err(SwapError::InvalidConfiguration(
                "pool cannot be its own operator",
            ));
        }
        if self.threshold == 0 {
            return Err(SwapError::InvalidConfiguration(
                "threshold must be at least one unit",
            ));
        }
        Ok(())
    }

    /// Returns the pool's ledger identity.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Returns the operator identity.
    #[must_use]
    pub const fn operator(&self) -> AccountId {
        self.operator
    }

    /// Returns the bisection tolerance.
    #[must_use]
    pub const fn threshold(&self) -> u128 {
        self.threshold
    }
}
