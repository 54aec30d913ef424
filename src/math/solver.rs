//! Bisection solvers that split a two-asset amount against a target
//! ratio.
//!
//! An unbalanced deposit (or a ratio-targeted withdrawal) is settled as
//! if part of one asset had been converted into the other through the
//! pricing curve. The conversion size `dx` cannot be solved in closed
//! form, so both solvers search for it by bisection:
//!
//! 1. Linearize the ratio equation assuming `dx ≈ dy` to get an
//!    initial guess `dx₀`.
//! 2. Bracket the root in `[dx₀ · 998/1000, min(dx₀ · 1002/1000, bound)]`.
//! 3. At each candidate, price `dy = get_return(…, dx)` and evaluate
//!    the sign of the ratio shift; halve toward the root until the
//!    bracket closes to within the pool's `threshold` or the shift
//!    hits zero exactly.
//!
//! Termination is unconditional: the bracket width halves every
//! iteration. The loop tolerates a candidate `dx` that overshoots the
//! available excess (the shift is then negative by construction), but
//! a *final* overshoot cannot be represented and surfaces as
//! [`SwapError::Overflow`].

use core::cmp::Ordering;

use primitive_types::U256;
use tracing::trace;

use crate::domain::{Amount, Ratio};
use crate::error::{Result, SwapError};
use crate::math::{curve, narrow, wide_mul};

/// Reduces a raw deposit `(x, y)` to the pair that matches the pool
/// ratio `x_balance : y_balance`.
///
/// The equilibrium condition is `x / y == xBalance / yBalance`. If the
/// deposit already satisfies it (cross-products equal) it is returned
/// unchanged. Otherwise the asset in excess is determined by the sign
/// of `x·yBalance − y·xBalance` and the oriented solve runs with that
/// asset as the source; the formula is symmetric, so the opposite
/// orientation just swaps the argument pair and the result back.
///
/// # Errors
///
/// Propagates curve pricing errors, and [`SwapError::Overflow`] if the
/// converged split cannot be represented.
pub fn deposit_split(
    x: Amount,
    y: Amount,
    x_balance: Amount,
    y_balance: Amount,
    threshold: u128,
) -> Result<(Amount, Amount)> {
    match cross_ratio(x, y, x_balance, y_balance) {
        Ordering::Equal => Ok((x, y)),
        Ordering::Greater => solve_deposit(x, y, x_balance, y_balance, threshold),
        Ordering::Less => solve_deposit(y, x, y_balance, x_balance, threshold)
            .map(|(vy, vx)| (vx, vy)),
    }
}

/// Re-splits pro-rata virtual amounts `(virtual_x, virtual_y)` into the
/// real pair to pay out, so that `first_token_share` of the withdrawal
/// is realized as asset X.
///
/// `balance_x` / `balance_y` are the pool's full balances; the oriented
/// solve prices against what remains once the virtual amounts are set
/// aside. Orientation compares the requested share with the share the
/// virtual amounts already imply; an exact match pays the virtual
/// amounts as-is.
///
/// # Errors
///
/// - [`SwapError::DivisionByZero`] if both virtual amounts are zero
///   (no implied share exists).
/// - [`SwapError::InvalidAmount`] if a virtual amount exceeds its pool
///   balance.
/// - [`SwapError::DegenerateState`] if both remaining balances are
///   zero.
/// - [`SwapError::Overflow`] if the split cannot be represented.
pub fn withdraw_split(
    virtual_x: Amount,
    virtual_y: Amount,
    balance_x: Amount,
    balance_y: Amount,
    first_token_share: Ratio,
    threshold: u128,
) -> Result<(Amount, Amount)> {
    let total_virtual = virtual_x
        .checked_add(&virtual_y)
        .ok_or(SwapError::Overflow("virtual amount sum"))?;
    if total_virtual.is_zero() {
        return Err(SwapError::DivisionByZero);
    }
    let rest_x = balance_x
        .checked_sub(&virtual_x)
        .ok_or(SwapError::InvalidAmount("virtual amount exceeds pool balance"))?;
    let rest_y = balance_y
        .checked_sub(&virtual_y)
        .ok_or(SwapError::InvalidAmount("virtual amount exceeds pool balance"))?;

    let current_share = wide_mul(virtual_x.get(), Ratio::SCALE) / U256::from(total_virtual.get());
    match U256::from(first_token_share.get()).cmp(&current_share) {
        Ordering::Equal => Ok((virtual_x, virtual_y)),
        Ordering::Less => solve_withdraw(
            virtual_x,
            virtual_y,
            rest_x,
            rest_y,
            first_token_share,
            threshold,
        ),
        Ordering::Greater => solve_withdraw(
            virtual_y,
            virtual_x,
            rest_y,
            rest_x,
            first_token_share.complement(),
            threshold,
        )
        .map(|(ry, rx)| (rx, ry)),
    }
}

/// Sign of `x·y_balance − y·x_balance` without signed arithmetic.
fn cross_ratio(x: Amount, y: Amount, x_balance: Amount, y_balance: Amount) -> Ordering {
    wide_mul(x.get(), y_balance.get()).cmp(&wide_mul(y.get(), x_balance.get()))
}

/// Sign of `(x − dx)·x_side − y_new·y_side`, where the candidate `dx`
/// may overshoot `x`. An overshoot makes the first term negative, so
/// the shift is negative unless both sides vanish.
fn split_shift(x: u128, dx: u128, y_new: U256, x_side: U256, y_side: U256) -> Result<Ordering> {
    let rhs = y_new
        .checked_mul(y_side)
        .ok_or(SwapError::Overflow("shift product"))?;
    if dx <= x {
        let lhs = U256::from(x - dx)
            .checked_mul(x_side)
            .ok_or(SwapError::Overflow("shift product"))?;
        Ok(lhs.cmp(&rhs))
    } else if rhs.is_zero() && x_side.is_zero() {
        Ok(Ordering::Equal)
    } else {
        Ok(Ordering::Less)
    }
}

/// Oriented deposit solve: asset X is in excess relative to the pool.
///
/// The initial guess comes from linearizing the equilibrium with
/// `dx ≈ dy`:
///
/// ```text
/// x − dx     xBalance + dx
/// ──────  =  ─────────────
/// y + dx     yBalance − dx
///
/// dx₀ = (x·yBalance − y·xBalance) / (xBalance + yBalance + x + y)
/// ```
fn solve_deposit(
    x: Amount,
    y: Amount,
    x_balance: Amount,
    y_balance: Amount,
    threshold: u128,
) -> Result<(Amount, Amount)> {
    let excess = wide_mul(x.get(), y_balance.get())
        .checked_sub(wide_mul(y.get(), x_balance.get()))
        .ok_or(SwapError::Overflow("deposit orientation"))?;
    let denominator = U256::from(x_balance.get())
        + U256::from(y_balance.get())
        + U256::from(x.get())
        + U256::from(y.get());
    let guess = narrow(excess / denominator, "initial split guess")?.get();
    if guess == 0 {
        return Ok((x, y));
    }

    let shift = |dx: u128, dy: Amount| {
        // dy <= dx <= y_balance: the bracket is capped at the pool's Y
        // balance and the curve never returns more than its input.
        let remaining_y = U256::from(y_balance.get()) - U256::from(dy.get());
        split_shift(
            x.get(),
            dx,
            U256::from(y.get()) + U256::from(dy.get()),
            remaining_y,
            U256::from(x_balance.get()) + U256::from(dx),
        )
    };
    let (dx, dy) = bisect(guess, y_balance, x_balance, y_balance, threshold, shift)?;

    let real_x = x
        .checked_sub(&Amount::new(dx))
        .ok_or(SwapError::Overflow("deposit split overshoot"))?;
    let real_y = y
        .checked_add(&dy)
        .ok_or(SwapError::Overflow("deposit split result"))?;
    Ok((real_x, real_y))
}

/// Oriented withdraw solve: less of asset X is requested than the
/// virtual amounts imply, so part of X converts into Y.
///
/// Same machinery as the deposit solve, but the target is the caller's
/// requested split rather than the pool ratio:
///
/// ```text
/// virtualX − dx         firstTokenShare
/// ─────────────  =  ─────────────────────
/// virtualY + dx     SCALE − firstTokenShare
/// ```
fn solve_withdraw(
    virtual_x: Amount,
    virtual_y: Amount,
    balance_x: Amount,
    balance_y: Amount,
    first_token_share: Ratio,
    threshold: u128,
) -> Result<(Amount, Amount)> {
    if balance_x.is_zero() && balance_y.is_zero() {
        return Err(SwapError::DegenerateState);
    }
    if first_token_share.is_zero() {
        // The whole withdrawal is realized as asset Y.
        let dy = curve::get_return(balance_x, balance_y, virtual_x)?;
        let all_y = virtual_y
            .checked_add(&dy)
            .ok_or(SwapError::Overflow("withdraw split result"))?;
        return Ok((Amount::ZERO, all_y));
    }

    let second_token_share = first_token_share.complement();
    let excess = wide_mul(virtual_x.get(), second_token_share.get())
        .checked_sub(wide_mul(virtual_y.get(), first_token_share.get()))
        .ok_or(SwapError::Overflow("withdraw orientation"))?;
    let guess = narrow(excess / U256::from(Ratio::SCALE), "initial split guess")?.get();

    let shift = |dx: u128, dy: Amount| {
        split_shift(
            virtual_x.get(),
            dx,
            U256::from(virtual_y.get()) + U256::from(dy.get()),
            U256::from(second_token_share.get()),
            U256::from(first_token_share.get()),
        )
    };
    let (dx, dy) = bisect(guess, balance_y, balance_x, balance_y, threshold, shift)?;

    let real_x = virtual_x
        .checked_sub(&Amount::new(dx))
        .ok_or(SwapError::Overflow("withdraw split overshoot"))?;
    let real_y = virtual_y
        .checked_add(&dy)
        .ok_or(SwapError::Overflow("withdraw split result"))?;
    Ok((real_x, real_y))
}

/// Bounded bisection around an initial guess.
///
/// `shift` maps a candidate `(dx, dy)` to the sign of the remaining
/// ratio imbalance: positive means `dx` is too small, negative too
/// large, zero is an exact fixed point. The bracket is
/// `[guess · 998/1000, min(guess · 1002/1000, right_cap)]` and closes
/// by halving, so the loop runs at most
/// `log₂(guess · 4/1000 / threshold)` iterations.
fn bisect(
    guess: u128,
    right_cap: Amount,
    from_balance: Amount,
    to_balance: Amount,
    threshold: u128,
    shift: impl Fn(u128, Amount) -> Result<Ordering>,
) -> Result<(u128, Amount)> {
    let mut dx = guess;
    let scaled_down = U256::from(guess) * U256::from(998u32) / U256::from(1000u32);
    let scaled_up = U256::from(guess) * U256::from(1002u32) / U256::from(1000u32);
    let mut left = narrow(scaled_down, "bracket")?.get();
    let mut right = narrow(scaled_up.min(U256::from(right_cap.get())), "bracket")?.get();

    let mut dy = curve::get_return(from_balance, to_balance, Amount::new(dx))?;
    let mut ordering = shift(dx, dy)?;
    let mut iterations = 0u32;

    while left.saturating_add(threshold) < right {
        match ordering {
            Ordering::Greater => {
                left = dx;
                dx = midpoint(dx, right);
            }
            Ordering::Less => {
                right = dx;
                dx = midpoint(left, dx);
            }
            Ordering::Equal => break,
        }
        dy = curve::get_return(from_balance, to_balance, Amount::new(dx))?;
        ordering = shift(dx, dy)?;
        iterations += 1;
    }

    trace!(iterations, dx, dy = dy.get(), "bisection converged");
    Ok((dx, dy))
}

/// Floor of `(a + b) / 2` without overflow.
fn midpoint(a: u128, b: u128) -> u128 {
    ((U256::from(a) + U256::from(b)) / U256::from(2u8)).low_u128()
}
