//! Property-based tests using `proptest` for the curve and solver
//! invariants.
//!
//! 1. **Peg cap** — the curve never returns more than its input.
//! 2. **Zero input** — a zero input prices to zero on any pool.
//! 3. **Monotonicity** — output is non-decreasing in the input.
//! 4. **Balanced identity** — a deposit matching the pool ratio passes
//!    through the solver unchanged.
//! 5. **Deposit convergence** — the solver terminates with a balanced
//!    equivalent that conserves value and sits within a
//!    threshold-scaled band of the pool ratio.
//! 6. **Withdraw conservation** — a ratio split never pays out more
//!    than the pro-rata claim, and a zero ratio pays nothing of the
//!    first token.

use primitive_types::U256;
use proptest::prelude::*;

use crate::domain::{Amount, Ratio};
use crate::error::SwapError;
use crate::math::{curve, solver, wide_mul};

/// Balances and amounts across eleven orders of magnitude, up to well
/// past ether scale.
fn scaled_pair() -> impl Strategy<Value = (u128, u128)> {
    (3u32..=24).prop_flat_map(|exp| {
        let scale = 10u128.pow(exp);
        (1..=scale, 1..=scale)
    })
}

fn scaled_quad() -> impl Strategy<Value = (u128, u128, u128, u128)> {
    (3u32..=24).prop_flat_map(|exp| {
        let scale = 10u128.pow(exp);
        (1..=scale, 1..=scale, 0..=scale, 0..=scale)
    })
}

proptest! {
    #[test]
    fn curve_never_beats_the_peg((from, to) in scaled_pair(), seed in any::<u128>()) {
        let input = seed % (to + 1);
        let out = curve::get_return(Amount::new(from), Amount::new(to), Amount::new(input));
        prop_assert!(out.is_ok(), "in-range quote failed: {out:?}");
        if let Ok(out) = out {
            prop_assert!(out.get() <= input);
        }
    }

    #[test]
    fn curve_zero_input_is_zero(from in 0u128..=u128::MAX / 2, to in 0u128..=u128::MAX / 2) {
        let out = curve::get_return(Amount::new(from), Amount::new(to), Amount::ZERO);
        prop_assert_eq!(out, Ok(Amount::ZERO));
    }

    #[test]
    fn curve_is_monotone_in_input((from, to) in scaled_pair(), seed in any::<u128>()) {
        let larger = seed % (to + 1);
        let smaller = larger / 2;
        let out_small =
            curve::get_return(Amount::new(from), Amount::new(to), Amount::new(smaller));
        let out_large =
            curve::get_return(Amount::new(from), Amount::new(to), Amount::new(larger));
        prop_assert!(out_small.is_ok() && out_large.is_ok());
        if let (Ok(s), Ok(l)) = (out_small, out_large) {
            prop_assert!(s <= l, "smaller input {smaller} out-priced larger {larger}");
        }
    }

    #[test]
    fn balanced_deposit_passes_through(
        (x, y) in (0u128..=1_000_000_000_000, 0u128..=1_000_000_000_000),
        multiplier in 1u128..=1_000_000,
    ) {
        let x_balance = x * multiplier;
        let y_balance = y * multiplier;
        let split = solver::deposit_split(
            Amount::new(x),
            Amount::new(y),
            Amount::new(x_balance),
            Amount::new(y_balance),
            1,
        );
        prop_assert_eq!(split, Ok((Amount::new(x), Amount::new(y))));
    }

    #[test]
    fn deposit_split_converges_and_conserves((a, b, c, d) in scaled_quad()) {
        // Orient so the X side is the one in excess.
        let ((x, y), (x_balance, y_balance)) =
            if wide_mul(c, b) >= wide_mul(d, a) { ((c, d), (a, b)) } else { ((d, c), (b, a)) };
        prop_assume!(wide_mul(x, y_balance) > wide_mul(y, x_balance));

        let split = solver::deposit_split(
            Amount::new(x),
            Amount::new(y),
            Amount::new(x_balance),
            Amount::new(y_balance),
            1,
        );
        prop_assert!(split.is_ok(), "solver failed: {split:?}");
        if let Ok((vx, vy)) = split {
            prop_assert!(vx.get() <= x);
            prop_assert!(vy.get() >= y);
            prop_assert!(vx.get() + vy.get() <= x + y, "split created value");

            // Residual imbalance against the post-conversion balances
            // stays within a threshold-scaled band of the pool size.
            let dx = x - vx.get();
            let dy = vy.get() - y;
            prop_assert!(dy <= y_balance);
            let lhs = wide_mul(vx.get(), y_balance - dy);
            let rhs = U256::from(vy.get()) * (U256::from(x_balance) + U256::from(dx));
            let residual = if lhs > rhs { lhs - rhs } else { rhs - lhs };
            let denom =
                U256::from(x) + U256::from(y) + U256::from(x_balance) + U256::from(y_balance);
            prop_assert!(
                residual <= denom * U256::from(8u8),
                "residual {residual} exceeds band {denom}"
            );
        }
    }

    #[test]
    fn withdraw_split_conserves_value(
        (balance0, balance1) in scaled_pair(),
        total_shares in 1u128..=1_000_000,
        seed in any::<u128>(),
        share_raw in 0u128..=Ratio::SCALE,
    ) {
        let share_amount = seed % total_shares + 1;
        let virtual0 = balance0 * share_amount / total_shares;
        let virtual1 = balance1 * share_amount / total_shares;
        prop_assume!(virtual0 + virtual1 > 0);
        // In range by construction.
        let ratio = Ratio::new(share_raw).unwrap_or(Ratio::ZERO);

        let split = solver::withdraw_split(
            Amount::new(virtual0),
            Amount::new(virtual1),
            Amount::new(balance0),
            Amount::new(balance1),
            ratio,
            1,
        );
        match split {
            Ok((real0, real1)) => {
                prop_assert!(
                    real0.get() + real1.get() <= virtual0 + virtual1,
                    "split paid out more than the claim"
                );
                if ratio.is_zero() {
                    prop_assert_eq!(real0, Amount::ZERO);
                }
            }
            // Extreme ratios against drained or lopsided pools fault
            // the same way the reference implementation does.
            Err(SwapError::Overflow(_) | SwapError::DegenerateState) => {}
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }
}
