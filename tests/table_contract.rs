// Contract suite run against every Table backend.
//
// The same scenarios drive HashTable and SearchTable through `dyn Table`
// and `dyn BoundedTable`, so backends stay interchangeable:
// - put/get/remove/contains agree on hits and misses.
// - size/is_empty/degree/name/columns report the construction shape.
// - clear empties the table and zeroes the fingerprint.
// - fingerprints agree across backends holding the same rows.
use dh_table::{
    fields, same_rows, BoundedTable, Error, HashTable, LookupTable, SearchTable, Table,
};
use test_log::test;

fn backends(columns: &[&str]) -> Vec<Box<dyn BoundedTable>> {
    vec![
        Box::new(HashTable::new("contract", columns.iter().copied()).unwrap()),
        Box::new(SearchTable::new("contract", columns.iter().copied()).unwrap()),
    ]
}

// Test: shape accessors.
// Verifies: name, columns, and degree as constructed.
#[test]
fn shape() {
    for t in backends(&["id", "name", "age"]) {
        assert_eq!(t.name(), "contract");
        assert_eq!(t.columns(), ["id", "name", "age"]);
        assert_eq!(t.degree(), 3);
        assert!(t.is_empty());
        assert_eq!(t.fingerprint(), 0);
    }
}

// Test: empty column lists.
// Verifies: both constructors refuse a table without a key column.
#[test]
fn no_columns() {
    assert_eq!(
        HashTable::new("t", Vec::<&str>::new()).unwrap_err(),
        Error::NoColumns
    );
    assert_eq!(
        SearchTable::new("t", Vec::<&str>::new()).unwrap_err(),
        Error::NoColumns
    );
    assert_eq!(
        LookupTable::new("t", Vec::<&str>::new()).unwrap_err(),
        Error::NoColumns
    );
}

// Test: basic hit/miss semantics.
// Verifies: identical return values from every backend.
#[test]
fn put_get_remove() {
    for mut t in backends(&["k", "f1", "f2"]) {
        assert_eq!(t.put("a", fields!["x", 1]).unwrap(), None);
        assert_eq!(t.put("b", fields![None::<i64>, 2.5]).unwrap(), None);
        assert!(t.contains("a"));
        assert!(!t.contains("c"));
        assert_eq!(t.get("b"), Some(&fields![None::<i64>, 2.5][..]));

        assert_eq!(t.put("a", fields!["y", true]).unwrap(), Some(fields!["x", 1]));
        assert_eq!(t.size(), 2);

        assert_eq!(t.remove("a"), Some(fields!["y", true]));
        assert_eq!(t.remove("a"), None);
        assert_eq!(t.get("a"), None);
        assert_eq!(t.size(), 1);

        assert!(t.put("z", fields![1]).is_err());
        assert_eq!(t.size(), 1);
    }
}

// Test: clear.
// Verifies: rows, size and fingerprint reset; the table stays usable.
#[test]
fn clear_then_reuse() {
    for mut t in backends(&["k", "v"]) {
        for i in 0..100 {
            t.put(&format!("k{i}"), fields![i]).unwrap();
        }
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.fingerprint(), 0);
        assert_eq!(t.rows().count(), 0);
        assert!(!t.is_full());

        t.put("k1", fields![1]).unwrap();
        assert_eq!(t.get("k1"), Some(&fields![1][..]));
    }
}

// Test: iteration completeness.
// Verifies: rows() yields size() rows, each agreeing with get().
#[test]
fn rows_match_lookups() {
    for mut t in backends(&["k", "v"]) {
        for i in 0..250 {
            t.put(&format!("k{i}"), fields![i * 7]).unwrap();
        }
        for i in (0..250).step_by(3) {
            t.remove(&format!("k{i}"));
        }
        let mut n = 0;
        for row in t.rows() {
            assert_eq!(t.get(row.key()), Some(row.fields()));
            n += 1;
        }
        assert_eq!(n, t.size());
        assert!(t.load_factor() <= 1.0);
    }
}

// Test: cross-backend identity.
// Assumes: both backends sum the same row hash.
// Verifies: same rows give the same fingerprint and `same_rows` holds.
#[test]
fn backends_agree_on_fingerprint() {
    let mut h = HashTable::new("h", ["k", "v"]).unwrap();
    let mut s = SearchTable::new("s", ["k", "v"]).unwrap();
    for i in 0..60 {
        h.put(&format!("k{i}"), fields![format!("v{i}")]).unwrap();
        s.put(&format!("k{}", 59 - i), fields![format!("v{}", 59 - i)])
            .unwrap();
    }
    assert_eq!(h.fingerprint(), s.fingerprint());
    assert!(same_rows(&h, &s));

    s.remove("k0");
    assert!(!same_rows(&h, &s));
    h.remove("k0");
    assert!(same_rows(&h, &s));
}

// Test: letter-keyed rows across all three backends.
// Assumes: LookupTable accepts exactly the single ASCII letters.
// Verifies: the unbounded LookupTable reports the same rows and fingerprint
// as the bounded backends.
#[test]
fn lookup_table_agrees_with_bounded_backends() {
    let mut l = LookupTable::new("l", ["k", "v"]).unwrap();
    let mut h = HashTable::new("h", ["k", "v"]).unwrap();
    let mut s = SearchTable::new("s", ["k", "v"]).unwrap();
    for c in ('a'..='z').chain('A'..='Z') {
        let key = c.to_string();
        l.put(&key, fields![key.as_str()]).unwrap();
        h.put(&key, fields![key.as_str()]).unwrap();
        s.put(&key, fields![key.as_str()]).unwrap();
    }
    assert_eq!(l.size(), 52);
    assert_eq!(l.fingerprint(), h.fingerprint());
    assert_eq!(l.fingerprint(), s.fingerprint());
    assert!(same_rows(&l, &h));
    assert!(same_rows(&l, &s));

    assert_eq!(l.remove("Q"), Some(fields!["Q"]));
    assert!(!same_rows(&l, &h));
    assert!(matches!(l.put("Qu", fields!["x"]), Err(Error::InvalidKey(_))));
}
