//! Majority evaluation against the live token supply.
//!
//! A ballot passes when `100 × weight > majority_percent × total_supply`.
//! The inequality is strict: a weight sitting exactly on the threshold fails.
//! Both products are computed exactly in 136 bits, so no input overflows.

use agora_types::Amount;
use std::cmp::Ordering;

const LOW_MASK: u128 = u64::MAX as u128;

/// Exact product of a `u128` and a small factor as a `(high, low)` pair of words.
fn widening_mul(value: u128, factor: u8) -> (u128, u128) {
    let factor = u128::from(factor);
    let low_part = (value & LOW_MASK) * factor;
    let high_part = (value >> 64) * factor;
    let (low, carry) = low_part.overflowing_add(high_part << 64);
    let high = (high_part >> 64) + u128::from(carry);
    (high, low)
}

/// Compare `a × fa` with `b × fb` without overflow.
fn compare_scaled(a: u128, fa: u8, b: u128, fb: u8) -> Ordering {
    widening_mul(a, fa).cmp(&widening_mul(b, fb))
}

/// Whether `weight` strictly exceeds `majority_percent` of `total_supply`.
pub fn passes(weight: Amount, total_supply: Amount, majority_percent: u8) -> bool {
    compare_scaled(weight.raw(), 100, total_supply.raw(), majority_percent) == Ordering::Greater
}

/// The largest weight that still fails the majority check.
///
/// Callers use it to report how far a ballot fell short; `passes(threshold + 1)`
/// always holds when the threshold is below `u128::MAX`.
pub fn threshold(total_supply: Amount, majority_percent: u8) -> Amount {
    let (high, low) = widening_mul(total_supply.raw(), majority_percent);
    // floor((high·2^128 + low) / 100); high < 2^8 so the quotient fits in u128
    // whenever majority_percent <= 100.
    let upper = (high << 64) | (low >> 64);
    let q_upper = upper / 100;
    let r_upper = upper % 100;
    let lower = (r_upper << 64) | (low & LOW_MASK);
    let q_lower = lower / 100;
    Amount::new((q_upper << 64).saturating_add(q_lower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::UNIT;

    #[test]
    fn exact_threshold_does_not_pass() {
        let supply = Amount::new(1_000);
        let at = Amount::new(1_000 * 60 / 100);
        assert!(!passes(at, supply, 60));
        assert!(passes(Amount::new(at.raw() + 1), supply, 60));
    }

    #[test]
    fn zero_supply_passes_with_any_weight() {
        assert!(passes(Amount::new(1), Amount::ZERO, 55));
        assert!(!passes(Amount::ZERO, Amount::ZERO, 55));
    }

    #[test]
    fn large_values_do_not_overflow() {
        let supply = Amount::new(u128::MAX);
        assert!(!passes(Amount::new(u128::MAX / 2), supply, 55));
        assert!(passes(Amount::new(u128::MAX), supply, 80));
        assert!(!passes(Amount::new(u128::MAX), supply, 100));
    }

    #[test]
    fn threshold_is_last_failing_weight() {
        for (supply, pct) in [
            (1_000u128, 60u8),
            (999, 55),
            (7 * UNIT + 3, 80),
            (u128::MAX, 80),
            (u128::MAX - 12_345, 55),
        ] {
            let supply = Amount::new(supply);
            let t = threshold(supply, pct);
            assert!(!passes(t, supply, pct), "threshold itself passed");
            assert!(passes(Amount::new(t.raw() + 1), supply, pct));
        }
    }

    #[test]
    fn widening_mul_matches_native_for_small_values() {
        let v = 123_456_789_012_345_678_901u128;
        assert_eq!(widening_mul(v, 77), (0, v * 77));
        assert_eq!(widening_mul(u128::MAX, 2), (1, u128::MAX - 1));
    }
}
