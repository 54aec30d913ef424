//! Balance ledgers: the capability contract the pool consumes, and an
//! in-memory implementation of it.
//!
//! The pool never touches token storage directly. Everything it needs
//! from a token is captured by the [`BalanceLedger`] trait: credit,
//! debit, balance lookup, total supply, and an atomic transfer that
//! fails on insufficient funds. [`TokenLedger`] is the reference
//! implementation backing both the external token ledgers and the
//! pool's own liquidity-share ledger.
//!
//! # Supply Invariant
//!
//! For any ledger, the sum of all account balances equals
//! [`BalanceLedger::total_supply`] at all times. [`TokenLedger`]
//! maintains this with a cached running total updated on every mint
//! and burn (transfers are supply-neutral).

mod contract;
mod memory;

pub use contract::BalanceLedger;
pub use memory::TokenLedger;
