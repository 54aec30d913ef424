//! # Pegswap
//!
//! A fixed-rate swap pool for a pair of fungible token balances:
//! bonding-curve pricing that approximates a 1:1 peg for small trades,
//! a bisection solver that settles unbalanced deposits and
//! ratio-targeted withdrawals, and liquidity-share accounting over
//! pluggable balance ledgers.
//!
//! # Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use pegswap::prelude::*;
//!
//! const ETHER: u128 = Ratio::SCALE;
//!
//! let operator = AccountId::from_bytes([1u8; 32]);
//! let pool_id = AccountId::from_bytes([2u8; 32]);
//!
//! // 1. Two external token ledgers, operator funded on both.
//! let usdx = Rc::new(RefCell::new(TokenLedger::new()));
//! let usdy = Rc::new(RefCell::new(TokenLedger::new()));
//! usdx.borrow_mut().mint(operator, Amount::new(10 * ETHER)).expect("mint");
//! usdy.borrow_mut().mint(operator, Amount::new(10 * ETHER)).expect("mint");
//!
//! // 2. A pool over the pair, seeded with a balanced deposit.
//! let config = PoolConfig::new(pool_id, operator).expect("valid config");
//! let mut pool = PeggedPool::new(config, Rc::clone(&usdx), Rc::clone(&usdy))
//!     .expect("distinct ledgers");
//! pool.deposit(Amount::new(ETHER), Amount::new(ETHER)).expect("seed");
//!
//! // 3. Swap along the curve: near 1:1 while the pool stays balanced.
//! let out = pool.swap_zero_for_one(Amount::new(ETHER / 100)).expect("swap");
//! assert!(out.get() > ETHER / 100 * 9_998 / 10_000);
//! assert!(out <= Amount::new(ETHER / 100));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  deposit / withdraw / swap / quote
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │     Pool      │  validates, then commits against the ledgers
//! └──────┬───────┘
//!        │ deposit_split / withdraw_split
//!        ▼
//! ┌──────────────┐
//! │    Solver     │  bisection over the implied conversion size
//! └──────┬───────┘
//!        │ get_return
//!        ▼
//! ┌──────────────┐
//! │    Curve      │  fixed-point polynomial peg pricing
//! └──────────────┘
//! ```
//!
//! The pool reads and mutates two external [`BalanceLedger`]s
//! (`ledger::BalanceLedger`) through shared handles and owns a third
//! ledger for its liquidity shares. All numeric work happens in the
//! `math` modules on 256-bit intermediates; every division floors in
//! the caller's disfavor.
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Ratio`](domain::Ratio), [`AccountId`](domain::AccountId), [`SwapDirection`](domain::SwapDirection) |
//! | [`ledger`] | The [`BalanceLedger`](ledger::BalanceLedger) contract and the in-memory [`TokenLedger`](ledger::TokenLedger) |
//! | [`math`]   | Curve pricing, bisection solvers, wide-integer helpers |
//! | [`config`] | [`PoolConfig`](config::PoolConfig) pool parameters |
//! | [`pool`]   | [`PeggedPool`](pool::PeggedPool) accounting operations |
//! | [`error`]  | [`SwapError`](error::SwapError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pool;
pub mod prelude;
