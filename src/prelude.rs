//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use pegswap::prelude::*;
//! ```

pub use crate::config::PoolConfig;
pub use crate::domain::{AccountId, Amount, Ratio, SwapDirection};
pub use crate::error::{Result, SwapError};
pub use crate::ledger::{BalanceLedger, TokenLedger};
pub use crate::pool::PeggedPool;
