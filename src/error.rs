//! Unified error types for the pegswap library.
//!
//! All fallible operations across the crate return [`SwapError`] as their
//! error type, ensuring a consistent error handling experience for consumers.
//!
//! Every failure is a precondition violation detected before any ledger
//! state is mutated — operations are all-or-nothing, so an `Err` return
//! guarantees the pool and both token ledgers are untouched.

use thiserror::Error;

/// Unified error enum for every fallible operation in the crate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    /// A burn or transfer was requested beyond the available balance.
    #[error("insufficient balance: {0}")]
    InsufficientBalance(&'static str),

    /// A zero amount was supplied where a positive amount is required.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// The recipient is the pool itself or the zero sentinel account.
    #[error("invalid recipient: {0}")]
    InvalidRecipient(&'static str),

    /// A withdrawal ratio outside the `[0, SCALE]` fixed-point range.
    #[error("ratio exceeds the fixed-point scale")]
    InvalidRatio,

    /// A quote was requested for more than the destination balance holds.
    #[error("input amount exceeds destination balance")]
    QuoteOverflow,

    /// Both pool balances are zero, so no conversion rate exists.
    #[error("both pool balances are zero")]
    DegenerateState,

    /// Arithmetic overflow or underflow during calculation.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero during calculation.
    #[error("division by zero")]
    DivisionByZero,

    /// Invalid construction parameters for a pool or config.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, SwapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            SwapError::InsufficientBalance("burn").to_string(),
            "insufficient balance: burn"
        );
        assert_eq!(
            SwapError::QuoteOverflow.to_string(),
            "input amount exceeds destination balance"
        );
        assert_eq!(SwapError::DivisionByZero.to_string(), "division by zero");
    }

    #[test]
    fn equality() {
        assert_eq!(SwapError::InvalidRatio, SwapError::InvalidRatio);
        assert_ne!(
            SwapError::Overflow("a"),
            SwapError::Overflow("b"),
            "payload participates in equality"
        );
    }

    #[test]
    fn debug_format() {
        let e = SwapError::DegenerateState;
        assert!(format!("{e:?}").contains("DegenerateState"));
    }
}
