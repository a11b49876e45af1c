// ArrayHash property tests against the public API.
//
// Property 1: membership and count match a reference set.
//  - Model: BTreeSet of inserted keys.
//  - Invariant: find(k) == model.contains(k) for inserted and probe keys;
//               len() == model.len(); insert reports freshness correctly.
//
// Property 2: traversal is insertion-order independent as a set.
//  - Inserting the same keys in two different orders yields tables whose
//    traversals contain exactly the same keys, each once.
//
// Property 3: over-long keys are always rejected and never change the table.
use array_hash::{ArrayHash, Error, MAX_KEY_LEN};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        3 => proptest::collection::vec(any::<u8>(), 0..24),
        1 => "[a-z]{0,4}".prop_map(String::into_bytes),
    ]
}

// Property 1: membership, freshness and count parity.
proptest! {
    #[test]
    fn prop_membership_matches_reference(
        keys in proptest::collection::vec(arb_key(), 0..200),
        probes in proptest::collection::vec(arb_key(), 0..50),
    ) {
        let mut t = ArrayHash::new();
        let mut model = BTreeSet::new();
        for k in &keys {
            let fresh = model.insert(k.clone());
            prop_assert_eq!(t.insert(k), Ok(fresh));
            prop_assert_eq!(t.len(), model.len());
        }
        for k in keys.iter().chain(probes.iter()) {
            prop_assert_eq!(t.find(k), Ok(model.contains(k)));
        }
    }
}

// Property 2: traversal completeness regardless of insertion order.
proptest! {
    #[test]
    fn prop_traversal_complete_in_any_order(keys in proptest::collection::vec(arb_key(), 0..100)) {
        let mut forward = ArrayHash::new();
        let mut backward = ArrayHash::new();
        for k in &keys {
            forward.insert(k).unwrap();
        }
        for k in keys.iter().rev() {
            backward.insert(k).unwrap();
        }
        let expected: BTreeSet<&[u8]> = keys.iter().map(Vec::as_slice).collect();
        for t in [&forward, &backward] {
            let walked: Vec<&[u8]> = t.iter().collect();
            prop_assert_eq!(walked.len(), expected.len());
            let walked: BTreeSet<&[u8]> = walked.into_iter().collect();
            prop_assert_eq!(&walked, &expected);
        }
    }
}

// Property 3: length overflow is rejected without side effects.
proptest! {
    #![proptest_config(ProptestConfig { cases: 16, .. ProptestConfig::default() })]
    #[test]
    fn prop_overlong_keys_rejected(extra in 1usize..64, fill in any::<u8>()) {
        let mut t = ArrayHash::new();
        t.insert("seed").unwrap();
        let key = vec![fill; MAX_KEY_LEN + extra];
        let err = Error::LengthOverflow { len: MAX_KEY_LEN + extra, max: MAX_KEY_LEN };
        prop_assert_eq!(t.insert(&key), Err(err));
        prop_assert_eq!(t.find(&key), Err(err));
        prop_assert_eq!(t.len(), 1);
        prop_assert_eq!(t.iter().count(), 1);
    }
}
