//! Pool accounting: deposits, withdrawals, and swaps between two
//! pegged token balances, settled against liquidity shares.
//!
//! # Structure
//!
//! The pool holds shared references to the two external token ledgers
//! and owns a third ledger for its liquidity shares. Its own holdings
//! on the token ledgers are keyed by the pool's account identity; the
//! pool balances are whatever those ledgers report at the instant of a
//! call, never cached.
//!
//! # Atomicity
//!
//! Every public operation is all-or-nothing. Each one runs a compute/
//! validate phase — amounts, recipient checks, balance sufficiency,
//! representability — before the first ledger mutation, so an `Err`
//! return guarantees no observable state change. Operations against
//! one pool instance must be serialized; within a single-threaded
//! caller the `Rc<RefCell<_>>` handles enforce exactly that borrow
//! discipline.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::config::PoolConfig;
use crate::domain::{AccountId, Amount, Ratio, SwapDirection};
use crate::error::{Result, SwapError};
use crate::ledger::{BalanceLedger, TokenLedger};
use crate::math::{mul_div, solver};

/// A two-token pool pricing swaps along the pegged bonding curve and
/// tracking proportional claims as liquidity shares.
///
/// Generic over the ledger implementation backing the two tokens; the
/// share ledger is always an owned [`TokenLedger`].
#[derive(Debug)]
pub struct PeggedPool<L: BalanceLedger = TokenLedger> {
    token0: Rc<RefCell<L>>,
    token1: Rc<RefCell<L>>,
    shares: TokenLedger,
    config: PoolConfig,
}

impl<L: BalanceLedger> PeggedPool<L> {
    /// Creates a pool over two distinct token ledgers.
    ///
    /// # Errors
    ///
    /// Returns [`SwapError::InvalidConfiguration`] if both handles
    /// point at the same ledger (sequential borrows of the two sides
    /// would otherwise alias).
    pub fn new(config: PoolConfig, token0: Rc<RefCell<L>>, token1: Rc<RefCell<L>>) -> Result<Self> {
        if Rc::ptr_eq(&token0, &token1) {
            return Err(SwapError::InvalidConfiguration(
                "token ledgers must be distinct",
            ));
        }
        Ok(Self {
            token0,
            token1,
            shares: TokenLedger::new(),
            config,
        })
    }

    /// Returns the pool's ledger identity.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.config.account()
    }

    /// Returns the operator identity.
    #[must_use]
    pub const fn operator(&self) -> AccountId {
        self.config.operator()
    }

    /// Returns the bisection tolerance.
    #[must_use]
    pub const fn threshold(&self) -> u128 {
        self.config.threshold()
    }

    /// Returns the pool's current holdings of both tokens.
    #[must_use]
    pub fn balances(&self) -> (Amount, Amount) {
        let account = self.account();
        (
            self.token0.borrow().balance_of(&account),
            self.token1.borrow().balance_of(&account),
        )
    }

    /// Returns the total liquidity shares outstanding.
    #[must_use]
    pub fn total_shares(&self) -> Amount {
        self.shares.total_supply()
    }

    /// Returns `account`'s liquidity share balance.
    #[must_use]
    pub fn share_balance_of(&self, account: &AccountId) -> Amount {
        self.shares.balance_of(account)
    }

    /// Quotes the output of swapping `input` in the given direction
    /// against the current pool balances, without touching state.
    ///
    /// # Errors
    ///
    /// - [`SwapError::QuoteOverflow`] if `input` exceeds the
    ///   destination balance.
    /// - Curve pricing errors for degenerate balances.
    pub fn get_return(&self, direction: SwapDirection, input: Amount) -> Result<Amount> {
        let (balance0, balance1) = self.balances();
        let (from_balance, to_balance) = match direction {
            SwapDirection::ZeroForOne => (balance0, balance1),
            SwapDirection::OneForZero => (balance1, balance0),
        };
        if input > to_balance {
            return Err(SwapError::QuoteOverflow);
        }
        crate::math::curve::get_return(from_balance, to_balance, input)
    }

    /// Deposits up to two token amounts and mints shares to the
    /// operator. See [`PeggedPool::deposit_to`].
    ///
    /// # Errors
    ///
    /// As for [`PeggedPool::deposit_to`].
    pub fn deposit(&mut self, amount0: Amount, amount1: Amount) -> Result<Amount> {
        self.deposit_to(amount0, amount1, self.operator())
    }

    /// Deposits up to two token amounts from the operator and mints
    /// the resulting shares to `to`.
    ///
    /// The raw pair is first reduced to its balanced equivalent
    /// against the current pool ratio; the share amount prices that
    /// equivalent against the pool's total holdings. The first deposit
    /// into an empty pool sets the share exchange rate 1:1 with the
    /// balanced equivalent.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidRecipient`] if `to` is the pool or zero.
    /// - [`SwapError::InvalidAmount`] if the balanced equivalent is
    ///   empty.
    /// - [`SwapError::InsufficientBalance`] if the operator cannot
    ///   fund either leg.
    /// - [`SwapError::DivisionByZero`] if shares are outstanding but
    ///   the pool and deposit together hold nothing to price against.
    pub fn deposit_to(
        &mut self,
        amount0: Amount,
        amount1: Amount,
        to: AccountId,
    ) -> Result<Amount> {
        self.check_recipient(&to)?;

        let (balance0, balance1) = self.balances();
        let (virtual0, virtual1) =
            solver::deposit_split(amount0, amount1, balance0, balance1, self.threshold())?;
        let virtual_sum = virtual0
            .checked_add(&virtual1)
            .ok_or(SwapError::Overflow("virtual amount sum"))?;
        if virtual_sum.is_zero() {
            return Err(SwapError::InvalidAmount("empty deposit is not allowed"));
        }

        let total_shares = self.total_shares();
        let minted = if total_shares.is_zero() {
            virtual_sum
        } else {
            // Denominator counts the incoming raw amounts but backs the
            // balanced equivalent out, pricing shares at the pre-deposit
            // rate. The balanced equivalent never exceeds the raw sum.
            let denominator = balance0
                .checked_add(&balance1)
                .and_then(|t| t.checked_add(&amount0))
                .and_then(|t| t.checked_add(&amount1))
                .ok_or(SwapError::Overflow("pool balance sum"))?
                .checked_sub(&virtual_sum)
                .ok_or(SwapError::Overflow("pool balance sum"))?;
            mul_div(virtual_sum, total_shares, denominator)?
        };

        let operator = self.operator();
        if self.token0.borrow().balance_of(&operator) < amount0 {
            return Err(SwapError::InsufficientBalance(
                "operator cannot fund token0 deposit",
            ));
        }
        if self.token1.borrow().balance_of(&operator) < amount1 {
            return Err(SwapError::InsufficientBalance(
                "operator cannot fund token1 deposit",
            ));
        }
        if total_shares.checked_add(&minted).is_none() {
            return Err(SwapError::Overflow("total share supply"));
        }

        let account = self.account();
        if !amount0.is_zero() {
            self.token0
                .borrow_mut()
                .transfer_from(operator, account, amount0)?;
        }
        if !amount1.is_zero() {
            self.token1
                .borrow_mut()
                .transfer_from(operator, account, amount1)?;
        }
        self.shares.mint(to, minted)?;

        debug!(
            amount0 = %amount0,
            amount1 = %amount1,
            minted = %minted,
            "deposit"
        );
        Ok(minted)
    }

    /// Burns `share_amount` of the operator's shares and pays the
    /// pro-rata token amounts to the operator. See
    /// [`PeggedPool::withdraw_to`].
    ///
    /// # Errors
    ///
    /// As for [`PeggedPool::withdraw_to`].
    pub fn withdraw(&mut self, share_amount: Amount) -> Result<(Amount, Amount)> {
        self.withdraw_to(share_amount, self.operator())
    }

    /// Burns `share_amount` of the operator's shares and pays the
    /// pro-rata token amounts to `to`.
    ///
    /// Both payouts floor, so dust stays with the pool.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidAmount`] if `share_amount` is zero.
    /// - [`SwapError::InvalidRecipient`] if `to` is the pool or zero.
    /// - [`SwapError::InsufficientBalance`] if the operator holds
    ///   fewer shares.
    pub fn withdraw_to(&mut self, share_amount: Amount, to: AccountId) -> Result<(Amount, Amount)> {
        self.check_recipient(&to)?;
        if share_amount.is_zero() {
            return Err(SwapError::InvalidAmount("empty withdrawal is not allowed"));
        }
        let operator = self.operator();
        if self.shares.balance_of(&operator) < share_amount {
            return Err(SwapError::InsufficientBalance(
                "operator share balance too low",
            ));
        }

        let total_shares = self.total_shares();
        let (balance0, balance1) = self.balances();
        let amount0 = mul_div(balance0, share_amount, total_shares)?;
        let amount1 = mul_div(balance1, share_amount, total_shares)?;

        self.commit_withdrawal(share_amount, amount0, amount1, to)?;
        debug!(
            shares = %share_amount,
            amount0 = %amount0,
            amount1 = %amount1,
            "withdraw"
        );
        Ok((amount0, amount1))
    }

    /// Burns `share_amount` of the operator's shares, re-splits the
    /// pro-rata claim so `first_token_share` of it is realized as
    /// token 0, and pays the operator. See
    /// [`PeggedPool::withdraw_with_ratio_to`].
    ///
    /// # Errors
    ///
    /// As for [`PeggedPool::withdraw_with_ratio_to`].
    pub fn withdraw_with_ratio(
        &mut self,
        share_amount: Amount,
        first_token_share: Ratio,
    ) -> Result<(Amount, Amount)> {
        self.withdraw_with_ratio_to(share_amount, first_token_share, self.operator())
    }

    /// Burns `share_amount` of the operator's shares and pays `to` a
    /// pair re-split so `first_token_share` of the withdrawal is
    /// realized as token 0 ([`Ratio::ZERO`] pays everything as token 1,
    /// [`Ratio::ONE`] everything as token 0).
    ///
    /// The excess of one side converts into the other through the
    /// curve, so the total paid out is slightly below the plain
    /// pro-rata value for any ratio away from the pool's own.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidAmount`] if `share_amount` is zero.
    /// - [`SwapError::InvalidRecipient`] if `to` is the pool or zero.
    /// - [`SwapError::InsufficientBalance`] if the operator holds
    ///   fewer shares, or the pool cannot cover the requested split.
    /// - [`SwapError::DegenerateState`] if both remaining balances are
    ///   zero when the conversion is priced.
    pub fn withdraw_with_ratio_to(
        &mut self,
        share_amount: Amount,
        first_token_share: Ratio,
        to: AccountId,
    ) -> Result<(Amount, Amount)> {
        self.check_recipient(&to)?;
        if share_amount.is_zero() {
            return Err(SwapError::InvalidAmount("empty withdrawal is not allowed"));
        }
        let operator = self.operator();
        if self.shares.balance_of(&operator) < share_amount {
            return Err(SwapError::InsufficientBalance(
                "operator share balance too low",
            ));
        }

        let total_shares = self.total_shares();
        let (balance0, balance1) = self.balances();
        let virtual0 = mul_div(balance0, share_amount, total_shares)?;
        let virtual1 = mul_div(balance1, share_amount, total_shares)?;
        let (amount0, amount1) = solver::withdraw_split(
            virtual0,
            virtual1,
            balance0,
            balance1,
            first_token_share,
            self.threshold(),
        )?;
        if amount0 > balance0 || amount1 > balance1 {
            return Err(SwapError::InsufficientBalance(
                "pool cannot cover the requested split",
            ));
        }

        self.commit_withdrawal(share_amount, amount0, amount1, to)?;
        debug!(
            shares = %share_amount,
            ratio = %first_token_share,
            amount0 = %amount0,
            amount1 = %amount1,
            "withdraw with ratio"
        );
        Ok((amount0, amount1))
    }

    /// Swaps `input` of token 0 for token 1, paying the operator.
    ///
    /// # Errors
    ///
    /// As for [`PeggedPool::swap_zero_for_one_to`], minus the
    /// recipient checks.
    pub fn swap_zero_for_one(&mut self, input: Amount) -> Result<Amount> {
        self.swap(SwapDirection::ZeroForOne, input, self.operator())
    }

    /// Swaps `input` of token 1 for token 0, paying the operator.
    ///
    /// # Errors
    ///
    /// As for [`PeggedPool::swap_one_for_zero_to`], minus the
    /// recipient checks.
    pub fn swap_one_for_zero(&mut self, input: Amount) -> Result<Amount> {
        self.swap(SwapDirection::OneForZero, input, self.operator())
    }

    /// Swaps `input` of token 0 for token 1, paying `to`.
    ///
    /// # Errors
    ///
    /// - [`SwapError::InvalidRecipient`] if `to` is the pool or zero.
    /// - [`SwapError::InvalidAmount`] if `input` is zero or the output
    ///   rounds to zero.
    /// - [`SwapError::QuoteOverflow`] if `input` exceeds the
    ///   destination balance.
    /// - [`SwapError::InsufficientBalance`] if the operator cannot
    ///   fund the input.
    pub fn swap_zero_for_one_to(&mut self, input: Amount, to: AccountId) -> Result<Amount> {
        self.check_recipient(&to)?;
        self.swap(SwapDirection::ZeroForOne, input, to)
    }

    /// Swaps `input` of token 1 for token 0, paying `to`.
    ///
    /// # Errors
    ///
    /// As for [`PeggedPool::swap_zero_for_one_to`].
    pub fn swap_one_for_zero_to(&mut self, input: Amount, to: AccountId) -> Result<Amount> {
        self.check_recipient(&to)?;
        self.swap(SwapDirection::OneForZero, input, to)
    }

    fn swap(&mut self, direction: SwapDirection, input: Amount, to: AccountId) -> Result<Amount> {
        if input.is_zero() {
            return Err(SwapError::InvalidAmount("swap input must be positive"));
        }
        let output = self.get_return(direction, input)?;
        if output.is_zero() {
            return Err(SwapError::InvalidAmount("empty swap is not allowed"));
        }

        let operator = self.operator();
        let account = self.account();
        let (source, destination) = match direction {
            SwapDirection::ZeroForOne => (&self.token0, &self.token1),
            SwapDirection::OneForZero => (&self.token1, &self.token0),
        };
        if source.borrow().balance_of(&operator) < input {
            return Err(SwapError::InsufficientBalance(
                "operator cannot fund swap input",
            ));
        }

        source.borrow_mut().transfer_from(operator, account, input)?;
        destination.borrow_mut().transfer_from(account, to, output)?;

        debug!(?direction, input = %input, output = %output, "swap");
        Ok(output)
    }

    /// Burns shares and pays out both legs; all preconditions must
    /// already hold. Pro-rata amounts never exceed the balances they
    /// were derived from, and ratio splits are re-checked by the
    /// caller, so the transfers cannot fail here.
    fn commit_withdrawal(
        &mut self,
        share_amount: Amount,
        amount0: Amount,
        amount1: Amount,
        to: AccountId,
    ) -> Result<()> {
        let account = self.account();
        self.shares.burn(self.operator(), share_amount)?;
        if !amount0.is_zero() {
            self.token0
                .borrow_mut()
                .transfer_from(account, to, amount0)?;
        }
        if !amount1.is_zero() {
            self.token1
                .borrow_mut()
                .transfer_from(account, to, amount1)?;
        }
        Ok(())
    }

    fn check_recipient(&self, to: &AccountId) -> Result<()> {
        if to.is_zero() {
            return Err(SwapError::InvalidRecipient(
                "recipient must not be the zero identity",
            ));
        }
        if *to == self.account() {
            return Err(SwapError::InvalidRecipient(
                "recipient must not be the pool itself",
            ));
        }
        Ok(())
    }
}
