#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can reach the
// slot store and fingerprint internals.

use crate::fingerprint::Fingerprint;
use crate::growth::is_prime;
use crate::{Config, HashTable, Row, Value};
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i64),
    Get(usize),
    Remove(usize),
    Contains(String),
    Iterate,
    Clear,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            6 => (idx.clone(), any::<i64>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            3 => idx.clone().prop_map(OpI::Remove),
            1 => "[a-z]{0,4}".prop_map(OpI::Contains),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn check_invariants(sut: &HashTable, model: &HashMap<String, i64>) -> Result<(), TestCaseError> {
    let cap = sut.capacity();
    prop_assert!(is_prime(cap) && cap % 2 == 1, "capacity {} not an odd prime", cap);
    prop_assert!(sut.size() + sut.contamination() <= cap);
    prop_assert!(
        (sut.size() + sut.contamination()) as f64 <= 0.75 * cap as f64,
        "occupancy {}+{} over bound at capacity {}",
        sut.size(),
        sut.contamination(),
        cap
    );
    prop_assert_eq!(sut.size(), model.len());
    prop_assert_eq!(
        sut.fingerprint(),
        Fingerprint::from_rows(sut.iter()).value(),
        "incremental fingerprint drifted"
    );
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised after every op:
// - Capacity stays an odd prime and occupancy stays within the 0.75 bound.
// - `put` returns the previous fields exactly when the model had the key.
// - `get`/`contains` agree with the model, including across tombstones.
// - The incremental fingerprint equals a rescan of live rows.
// - Iteration yields each live row once and matches the model.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut = HashTable::new("p", ["k", "v"]).unwrap();
        let mut model: HashMap<String, i64> = HashMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = &pool[i];
                    let prev = sut.put(k, vec![Value::Integer(v)]).unwrap();
                    let expected = model.insert(k.clone(), v).map(|o| vec![Value::Integer(o)]);
                    prop_assert_eq!(prev, expected);
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    let got = sut.get(k).map(|f| f.to_vec());
                    let expected = model.get(k).map(|&v| vec![Value::Integer(v)]);
                    prop_assert_eq!(got, expected);
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    let got = sut.remove(k);
                    let expected = model.remove(k).map(|v| vec![Value::Integer(v)]);
                    prop_assert_eq!(got, expected);
                    prop_assert!(!sut.contains(k));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
                }
                OpI::Iterate => {
                    let seen: BTreeMap<&str, &[Value]> =
                        sut.iter().map(|r| (r.key(), r.fields())).collect();
                    prop_assert_eq!(seen.len(), sut.size());
                    for (k, v) in &model {
                        let expected = [Value::Integer(*v)];
                        prop_assert_eq!(seen.get(k.as_str()).copied(), Some(&expected[..]));
                    }
                }
                OpI::Clear => {
                    sut.clear();
                    model.clear();
                    prop_assert_eq!(sut.capacity(), 43);
                    prop_assert_eq!(sut.contamination(), 0);
                }
            }
            check_invariants(&sut, &model)?;
        }
    }
}

// Property: a small starting capacity forces many rehashes; remove/put
// churn over a fixed key set must not grow contamination without bound,
// and rows survive every rehash unchanged.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_churn_keeps_rows_and_bounds_tombstones(
        keys in proptest::collection::btree_set("[a-z]{1,6}", 1..60),
        rounds in 1usize..8,
    ) {
        let config = Config::default().initial_capacity(3);
        let mut sut = HashTable::with_config("churn", ["k", "v"], config).unwrap();
        let keys: Vec<String> = keys.into_iter().collect();

        for round in 0..rounds {
            for (i, k) in keys.iter().enumerate() {
                sut.put(k, vec![Value::from(format!("{round}:{i}"))]).unwrap();
            }
            for k in keys.iter().step_by(2) {
                prop_assert!(sut.remove(k).is_some());
            }
            prop_assert!(sut.contamination() <= sut.capacity());
            prop_assert!((sut.size() + sut.contamination()) as f64 <= 0.75 * sut.capacity() as f64);
        }

        let last = rounds - 1;
        for (i, k) in keys.iter().enumerate() {
            let expected = (i % 2 == 1).then(|| vec![Value::from(format!("{last}:{i}"))]);
            prop_assert_eq!(sut.get(k).map(|f| f.to_vec()), expected);
        }
        let rows: Vec<&Row> = sut.iter().collect();
        prop_assert_eq!(rows.len(), keys.len() / 2);
    }
}
