use proptest::prelude::*;

use agora_types::{AccountId, Amount, Asset, BallotId, Timestamp, UNIT};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since saturates to 0 when now < self.
    #[test]
    fn timestamp_elapsed_since_saturates(
        base in 1u64..1_000_000,
        deficit in 1u64..1_000_000,
    ) {
        let later = Timestamp::new(base + deficit);
        let earlier = Timestamp::new(base);
        prop_assert_eq!(later.elapsed_since(earlier), 0);
        prop_assert_eq!(earlier.elapsed_since(later), deficit);
    }

    /// Timestamp has_expired agrees with manual arithmetic.
    #[test]
    fn timestamp_has_expired_correct(
        start in 0u64..500_000,
        duration in 1u64..500_000,
        offset in 0u64..1_000_000,
    ) {
        let t = Timestamp::new(start);
        let now = Timestamp::new(start.saturating_add(offset));
        prop_assert_eq!(t.has_expired(duration, now), offset >= duration);
    }

    /// saturating_add never wraps around.
    #[test]
    fn timestamp_saturating_add_is_monotonic(start in 0u64..u64::MAX, secs in 0u64..u64::MAX) {
        let t = Timestamp::new(start);
        prop_assert!(t.saturating_add(secs) >= t);
    }

    /// Amount: checked_add(a, b) == Some(a + b) when no overflow.
    #[test]
    fn amount_checked_add(a in 0u128..u128::MAX / 2, b in 0u128..u128::MAX / 2) {
        let sum = Amount::new(a).checked_add(Amount::new(b));
        prop_assert_eq!(sum, Some(Amount::new(a + b)));
    }

    /// Amount: checked_sub returns None when b > a.
    #[test]
    fn amount_checked_sub_underflow(a in 0u128..1_000_000, b in 0u128..1_000_000) {
        let result = Amount::new(a).checked_sub(Amount::new(b));
        if b > a {
            prop_assert!(result.is_none());
        } else {
            prop_assert_eq!(result, Some(Amount::new(a - b)));
        }
    }

    /// Amount: from_units scales by UNIT.
    #[test]
    fn amount_from_units(units in 0u128..1_000_000_000) {
        prop_assert_eq!(Amount::from_units(units).raw(), units * UNIT);
    }

    /// BallotId survives bincode intact (ballot ids are persisted in snapshots).
    #[test]
    fn ballot_id_bincode_roundtrip(raw in any::<u64>()) {
        let id = BallotId::new(raw);
        let encoded = bincode::serialize(&id).unwrap();
        let decoded: BallotId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, id);
    }
}

#[test]
fn asset_token_accessor() {
    let token = AccountId::new("usdc");
    assert_eq!(Asset::Native.token(), None);
    assert!(Asset::Native.is_native());
    assert_eq!(Asset::Token(token.clone()).token(), Some(&token));
    assert!(!Asset::Token(token).is_native());
}

#[test]
fn amount_from_units_saturates() {
    assert_eq!(Amount::from_units(u128::MAX).raw(), u128::MAX);
}
