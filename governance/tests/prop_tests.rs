use proptest::prelude::*;

use agora_governance::config::validate;
use agora_governance::majority::{passes, threshold};
use agora_governance::{ConfigViolation, VotingConfig};
use agora_types::{Amount, DAY_SECS, UNIT};

proptest! {
    /// The exact evaluator agrees with plain arithmetic wherever plain arithmetic fits.
    #[test]
    fn majority_matches_reference(
        weight in 0u128..(1u128 << 120),
        supply in 0u128..(1u128 << 120),
        pct in 55u8..=80,
    ) {
        let expected = 100 * weight > u128::from(pct) * supply;
        prop_assert_eq!(passes(Amount::new(weight), Amount::new(supply), pct), expected);
    }

    /// The threshold fails and the next weight passes, across the whole range.
    #[test]
    fn threshold_is_tight(supply in any::<u128>(), pct in 55u8..=80) {
        let supply = Amount::new(supply);
        let t = threshold(supply, pct);
        prop_assert!(!passes(t, supply, pct));
        prop_assert!(passes(Amount::new(t.raw() + 1), supply, pct));
    }

    /// More weight never turns a passing ballot into a failing one.
    #[test]
    fn majority_is_monotonic_in_weight(
        weight in any::<u128>(),
        extra in any::<u128>(),
        supply in any::<u128>(),
        pct in 55u8..=80,
    ) {
        let heavier = weight.saturating_add(extra);
        if passes(Amount::new(weight), Amount::new(supply), pct) {
            prop_assert!(passes(Amount::new(heavier), Amount::new(supply), pct));
        }
    }

    /// Every in-range configuration is returned unchanged.
    #[test]
    fn in_range_configs_accepted(
        pct in 55u8..=80,
        lock in (120 * DAY_SECS)..=(730 * DAY_SECS),
        fee in 0u128..=(2 * UNIT),
    ) {
        let config = VotingConfig {
            proposal_fee: Amount::new(fee),
            lock_duration_secs: lock,
            majority_percent: pct,
        };
        prop_assert_eq!(validate(config), Ok(config));
    }

    /// A majority outside the band is reported no matter what else is wrong.
    #[test]
    fn majority_violation_reported_first(
        pct in prop_oneof![0u8..55, 81u8..=255],
        lock in any::<u64>(),
        fee in any::<u128>(),
    ) {
        let config = VotingConfig {
            proposal_fee: Amount::new(fee),
            lock_duration_secs: lock,
            majority_percent: pct,
        };
        let is_majority_violation =
            matches!(validate(config), Err(ConfigViolation::MajorityOutOfRange { .. }));
        prop_assert!(is_majority_violation);
    }
}
