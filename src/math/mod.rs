//! Numeric core: wide-integer helpers, the bonding-curve pricing
//! function, and the bisection split solvers.
//!
//! All domain arithmetic is integer-only. Intermediate products of the
//! 10^18-scale formulas exceed `u128`, so they are evaluated in
//! [`U256`](primitive_types::U256) and narrowed back with explicit
//! range checks. Every division floors; truncation always goes against
//! the caller.

pub mod curve;
pub mod solver;

#[cfg(test)]
mod proptest_properties;

use primitive_types::U256;

use crate::domain::Amount;
use crate::error::{Result, SwapError};

/// Multiplies two `u128` values into a `U256`.
///
/// The product of two 128-bit values always fits in 256 bits, so this
/// cannot overflow.
#[must_use]
pub(crate) fn wide_mul(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Narrows a `U256` back into an [`Amount`].
///
/// # Errors
///
/// Returns [`SwapError::Overflow`] with `context` if the value does not
/// fit in `u128`.
pub(crate) fn narrow(value: U256, context: &'static str) -> Result<Amount> {
    if value > U256::from(u128::MAX) {
        return Err(SwapError::Overflow(context));
    }
    Ok(Amount::new(value.low_u128()))
}

/// Computes `a * b / divisor` with a 256-bit intermediate product and
/// flooring division.
///
/// # Errors
///
/// - [`SwapError::DivisionByZero`] if `divisor` is zero.
/// - [`SwapError::Overflow`] if the quotient does not fit in `u128`.
pub fn mul_div(a: Amount, b: Amount, divisor: Amount) -> Result<Amount> {
    if divisor.is_zero() {
        return Err(SwapError::DivisionByZero);
    }
    let quotient = wide_mul(a.get(), b.get()) / U256::from(divisor.get());
    narrow(quotient, "mul_div quotient exceeds amount range")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn wide_mul_max_operands() {
        let product = wide_mul(u128::MAX, u128::MAX);
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1, representable in 256 bits.
        assert_eq!(product, U256::from(u128::MAX) * U256::from(u128::MAX));
    }

    #[test]
    fn narrow_in_range() {
        let Ok(a) = narrow(U256::from(42u8), "ctx") else {
            panic!("narrow");
        };
        assert_eq!(a, Amount::new(42));
    }

    #[test]
    fn narrow_out_of_range() {
        let too_big = U256::from(u128::MAX) + U256::from(1u8);
        assert_eq!(narrow(too_big, "ctx"), Err(SwapError::Overflow("ctx")));
    }

    #[test]
    fn mul_div_basic() {
        let Ok(q) = mul_div(Amount::new(10), Amount::new(30), Amount::new(4)) else {
            panic!("mul_div");
        };
        assert_eq!(q, Amount::new(75));
    }

    #[test]
    fn mul_div_floors() {
        let Ok(q) = mul_div(Amount::new(10), Amount::new(10), Amount::new(3)) else {
            panic!("mul_div");
        };
        assert_eq!(q, Amount::new(33));
    }

    #[test]
    fn mul_div_wide_intermediate() {
        // a * b overflows u128 but the quotient fits.
        let a = Amount::new(u128::MAX / 2);
        let Ok(q) = mul_div(a, Amount::new(4), Amount::new(2)) else {
            panic!("mul_div");
        };
        assert_eq!(q, Amount::new(u128::MAX - 1));
    }

    #[test]
    fn mul_div_zero_divisor() {
        assert_eq!(
            mul_div(Amount::new(1), Amount::new(1), Amount::ZERO),
            Err(SwapError::DivisionByZero)
        );
    }

    #[test]
    fn mul_div_quotient_overflow() {
        let result = mul_div(Amount::MAX, Amount::new(3), Amount::new(1));
        assert!(matches!(result, Err(SwapError::Overflow(_))));
    }
}
