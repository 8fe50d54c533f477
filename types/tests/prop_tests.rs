use proptest::prelude::*;

use tokengate_types::{Identity, PublicKey, Signature, Timestamp};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
    }

    /// elapsed_since saturates to 0 when now < self.
    #[test]
    fn timestamp_elapsed_since_saturates(
        base in 1u64..1_000_000,
        deficit in 1u64..1_000_000,
    ) {
        let later = Timestamp::new(base + deficit);
        let earlier = Timestamp::new(base);
        prop_assert_eq!(later.elapsed_since(earlier), 0);
    }

    /// has_expired agrees with manual arithmetic.
    #[test]
    fn timestamp_has_expired(
        base in 0u64..1_000_000,
        duration in 0u64..1_000_000,
        now in 0u64..3_000_000,
    ) {
        let t = Timestamp::new(base);
        prop_assert_eq!(t.has_expired(duration, Timestamp::new(now)), now >= base + duration);
    }

    /// plus_secs then minus_secs round-trips (away from saturation).
    #[test]
    fn timestamp_plus_minus_roundtrip(base in 0u64..1_000_000, delta in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        prop_assert_eq!(t.plus_secs(delta).minus_secs(delta), t);
    }

    /// Identity preserves arbitrary platform ids verbatim.
    #[test]
    fn identity_preserves_raw_string(s in ".{0,64}") {
        let id = Identity::new(s.clone());
        prop_assert_eq!(id.as_str(), s.as_str());
    }

    /// PublicKey JSON serde round-trip.
    #[test]
    fn public_key_serde_roundtrip(bytes in prop::collection::vec(0u8.., 33)) {
        let mut arr = [0u8; 33];
        arr.copy_from_slice(&bytes);
        let key = PublicKey(arr);
        let encoded = serde_json::to_string(&key).unwrap();
        let decoded: PublicKey = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, key);
    }

    /// Signature JSON serde round-trip.
    #[test]
    fn signature_serde_roundtrip(bytes in prop::collection::vec(0u8.., 64)) {
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        let sig = Signature(arr);
        let encoded = serde_json::to_string(&sig).unwrap();
        let decoded: Signature = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, sig);
    }

    /// Timestamp JSON serde round-trip.
    #[test]
    fn timestamp_serde_roundtrip(secs in 0u64..u64::MAX) {
        let t = Timestamp::new(secs);
        let encoded = serde_json::to_string(&t).unwrap();
        let decoded: Timestamp = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded, t);
    }
}
