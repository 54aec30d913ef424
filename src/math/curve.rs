//! Bonding-curve pricing for near-pegged asset pairs.
//!
//! Converts an input amount of one asset into an output amount of the
//! other, given the pool's current balances. The curve holds the rate
//! close to 1:1 while the pool stays balanced and penalizes trades
//! that push it away from balance.
//!
//! # Formula
//!
//! With `ONE = 10^18` as the fixed-point scale and `t = from + to`:
//!
//! ```text
//! x0 = ONE · from / t
//! x1 = ONE · (from + input) / t
//! m  = (C1 · ONE · input / t + C2 · P(x0) − C2 · P(x1)) · t / (ONE · input)
//! out = input · min(m, ONE) / ONE
//! ```
//!
//! `P(x)` is a degree-18 even polynomial in `|x − C3|`, computed by
//! repeated squaring with a `/ ONE` rescale after each multiplication.
//! It is a polynomial stand-in for a transcendental stableswap curve
//! that stays cheap in integer arithmetic.
//!
//! The calibration constants `C1`, `C2`, `C3` are empirical. Their
//! exact digits determine the peg behavior; they must never be
//! rounded, reformatted, or re-derived.
//!
//! Every division floors and the multiplier is capped at `ONE`, so the
//! output never exceeds the input and truncation always favors the
//! pool.

use primitive_types::U256;

use crate::domain::{Amount, Ratio};
use crate::error::{Result, SwapError};
use crate::math::{narrow, wide_mul};

/// Fixed-point scale, the integer meaning `1.0`.
pub const ONE: u128 = Ratio::SCALE;

/// Linear calibration term, `0.9999 · ONE`.
const C1: u128 = 999_900_000_000_000_000;

/// Polynomial calibration weight, `≈ 3.3827 · ONE`.
const C2: u128 = 3_382_712_334_998_325_432;

/// Polynomial center, `≈ 0.4568 · ONE`.
const C3: u128 = 456_807_350_974_663_119;

/// Prices `input_amount` of the source asset in units of the
/// destination asset, given the pool balances of both.
///
/// Pure in its three inputs. Callers quoting on behalf of users must
/// additionally enforce `input_amount <= to_balance`; this function
/// itself stays total for probe inputs beyond that bound (the split
/// solvers rely on it), failing only when the curve value would go
/// negative.
///
/// # Errors
///
/// - [`SwapError::DegenerateState`] if both balances are zero and the
///   input is nonzero.
/// - [`SwapError::Overflow`] if the multiplier numerator would go
///   negative (input far beyond the destination balance) or an
///   intermediate product exceeds 256 bits.
pub fn get_return(
    from_balance: Amount,
    to_balance: Amount,
    input_amount: Amount,
) -> Result<Amount> {
    if input_amount.is_zero() {
        return Ok(Amount::ZERO);
    }

    let one = U256::from(ONE);
    let total = U256::from(from_balance.get()) + U256::from(to_balance.get());
    if total.is_zero() {
        return Err(SwapError::DegenerateState);
    }

    let x0 = wide_mul(ONE, from_balance.get()) / total;
    let x1 = (U256::from(from_balance.get()) + U256::from(input_amount.get()))
        .checked_mul(one)
        .ok_or(SwapError::Overflow("scaled post-trade share"))?
        / total;
    let scaled_input = wide_mul(ONE, input_amount.get());

    let linear = U256::from(C1)
        .checked_mul(scaled_input)
        .ok_or(SwapError::Overflow("linear term"))?
        / total;
    let gain = U256::from(C2)
        .checked_mul(power(x0)?)
        .ok_or(SwapError::Overflow("curve term at x0"))?;
    let loss = U256::from(C2)
        .checked_mul(power(x1)?)
        .ok_or(SwapError::Overflow("curve term at x1"))?;

    let numerator = linear
        .checked_add(gain)
        .ok_or(SwapError::Overflow("multiplier numerator"))?
        .checked_sub(loss)
        .ok_or(SwapError::Overflow("curve multiplier underflow"))?;
    let multiplier = numerator
        .checked_mul(total)
        .ok_or(SwapError::Overflow("multiplier rescale"))?
        / scaled_input;

    let output = U256::from(input_amount.get()) * multiplier.min(one) / one;
    narrow(output, "curve output exceeds amount range")
}

/// `|x − C3|^18 / ONE^17`, by squaring: p², p⁴, p⁸, p¹⁶, then
/// p¹⁶ · p² for p¹⁸, rescaling by `ONE` at each step.
fn power(x: U256) -> Result<U256> {
    let one = U256::from(ONE);
    let c3 = U256::from(C3);
    let p = if x > c3 { x - c3 } else { c3 - x };

    let p2 = p.checked_mul(p).ok_or(SwapError::Overflow("power p^2"))? / one;
    let mut pp = p2.checked_mul(p2).ok_or(SwapError::Overflow("power p^4"))? / one;
    pp = pp.checked_mul(pp).ok_or(SwapError::Overflow("power p^8"))? / one;
    pp = pp.checked_mul(pp).ok_or(SwapError::Overflow("power p^16"))? / one;
    p2.checked_mul(pp)
        .map(|v| v / one)
        .ok_or(SwapError::Overflow("power p^18"))
}
