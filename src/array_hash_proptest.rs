#![cfg(test)]

// Property tests for ArrayHash kept inside the crate so they can check
// internal layout (slot search, byte accounting) alongside the public API.

use crate::array_hash::ArrayHash;
use crate::hasher::{ShiftAddXor, SlotHasher};
use crate::record::{record_len, LEN_WIDTH};
use crate::slot::Probe;
use hashbrown::HashSet;
use proptest::prelude::*;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize),
    Find(usize),
    FindAny(Vec<u8>),
    Iterate,
    CursorWalk,
}

// Arbitrary bytes, so the empty key and embedded nulls show up regularly.
fn arb_key() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 0..6),
        "[a-c]{0,3}".prop_map(String::into_bytes),
    ]
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    proptest::collection::vec(arb_key(), 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => idx.clone().prop_map(OpI::Insert),
            2 => idx.clone().prop_map(OpI::Find),
            1 => arb_key().prop_map(OpI::FindAny),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::CursorWalk),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Sum of record sizes plus one sentinel per occupied slot.
fn expected_bytes<H: SlotHasher, const SLOTS: usize>(
    sut: &ArrayHash<H, SLOTS>,
    model: &HashSet<Vec<u8>>,
) -> usize {
    let records: usize = model.iter().map(|k| LEN_WIDTH + k.len() + 1).sum();
    let occupied: HashSet<usize> = model.iter().map(|k| sut.slot_index(k)).collect();
    records + occupied.len() * LEN_WIDTH
}

fn run_state_machine<H: SlotHasher, const SLOTS: usize>(
    mut sut: ArrayHash<H, SLOTS>,
    pool: Vec<Vec<u8>>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashSet<Vec<u8>> = HashSet::new();

    for op in ops {
        match op {
            OpI::Insert(i) => {
                let k = &pool[i];
                let fresh = !model.contains(k);
                prop_assert_eq!(sut.find(k), Ok(!fresh));
                prop_assert_eq!(sut.insert(k), Ok(fresh));
                prop_assert_eq!(sut.find(k), Ok(true));
                model.insert(k.clone());
            }
            OpI::Find(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.find(k), Ok(model.contains(k)));
                // Hashing up front and passing the slot must agree with hashing inside.
                let len = record_len(k).unwrap();
                let slot = sut.slot_index(k);
                prop_assert_eq!(sut.search(k, len, Some(slot)), sut.search(k, len, None));
            }
            OpI::FindAny(k) => {
                prop_assert_eq!(sut.find(&k), Ok(model.contains(&k)));
            }
            OpI::Iterate => {
                let seen: Vec<Vec<u8>> = sut.iter().map(<[u8]>::to_vec).collect();
                prop_assert_eq!(seen.len(), model.len());
                let distinct: HashSet<Vec<u8>> = seen.into_iter().collect();
                prop_assert_eq!(&distinct, &model);
            }
            OpI::CursorWalk => {
                let mut c = sut.begin();
                let mut walked = Vec::new();
                while c != sut.end() {
                    walked.push(c.get(&sut).expect("fresh cursor").to_vec());
                    prop_assert!(c.advance(&sut).is_ok());
                }
                let by_iter: Vec<Vec<u8>> = sut.iter().map(<[u8]>::to_vec).collect();
                prop_assert_eq!(walked, by_iter);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.stats().bytes, expected_bytes(&sut, &model));
        if let Some(k) = model.iter().next() {
            let len = record_len(k).unwrap();
            prop_assert_eq!(sut.search(k, len, None), Probe::Found);
        }
    }
    Ok(())
}

// Property: State-machine equivalence against a reference set.
// Invariants exercised across random operation sequences:
// - `insert` returns true exactly for keys the model lacks; duplicates are no-ops.
// - `find` agrees with the model for pooled and arbitrary keys.
// - `iter` and the cursor walk yield each stored key exactly once, in the same order.
// - `len`/`is_empty` parity, and the slot buffers hold exactly the records
//   plus one sentinel per occupied slot.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ArrayHash::new(), pool, ops)?;
    }

    #[test]
    fn prop_state_machine_few_slots((pool, ops) in arb_scenario()) {
        let sut: ArrayHash<ShiftAddXor, 4> = ArrayHash::with_hasher(ShiftAddXor::default());
        run_state_machine(sut, pool, ops)?;
    }
}

// Collision variant: a constant hasher puts every key into one slot.
struct ConstSlotHasher;
impl SlotHasher for ConstSlotHasher {
    fn hash_key(&self, _key: &[u8]) -> u64 {
        0
    }
}

// Property: Same state-machine invariants as above, under worst-case
// collision behavior. This stresses length-then-bytes matching within a
// single packed buffer.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut: ArrayHash<ConstSlotHasher> = ArrayHash::with_hasher(ConstSlotHasher);
        run_state_machine(sut, pool, ops)?;
    }
}

// Property: tables built from the same insert sequence iterate in the same order.
proptest! {
    #[test]
    fn prop_iteration_is_deterministic(keys in proptest::collection::vec(arb_key(), 0..40), seed in any::<u32>()) {
        let mut a: ArrayHash = ArrayHash::with_hasher(ShiftAddXor::with_seed(seed));
        let mut b: ArrayHash = ArrayHash::with_hasher(ShiftAddXor::with_seed(seed));
        for k in &keys {
            a.insert(k).unwrap();
            b.insert(k).unwrap();
        }
        let ia: Vec<&[u8]> = a.iter().collect();
        let ib: Vec<&[u8]> = b.iter().collect();
        prop_assert_eq!(ia, ib);
    }
}
