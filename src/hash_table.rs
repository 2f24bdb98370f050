//! HashTable: bounded open-addressing table over a [`SlotStore`].
//!
//! Mutations go through three steps: the growth policy may rehash, the
//! slot store walks the double-hash probe sequence, and the fingerprint is
//! adjusted for whatever row entered or left.

use crate::config::Config;
use crate::fingerprint::Fingerprint;
use crate::growth::{grown_capacity, is_prime, GrowthPolicy};
use crate::row::{Row, Value};
use crate::slot_store::{Probe, SlotStore, Upsert};
use crate::table::{check_degree, same_rows, BoundedTable, Table};
use crate::{Error, Result};
use core::hash::{Hash, Hasher};

pub use crate::slot_store::Iter;

/// A bounded hash table keyed by text, resolving collisions by double
/// hashing.
///
/// Capacity is always an odd prime. Deleted entries leave tombstones that
/// are reclaimed by later insertions on the same probe path or dropped
/// wholesale when the table rehashes.
#[derive(Debug)]
pub struct HashTable {
    name: String,
    columns: Vec<String>,
    config: Config,
    policy: GrowthPolicy,
    store: SlotStore,
    fingerprint: Fingerprint,
}

impl HashTable {
    /// Creates an empty table with the default [`Config`].
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(name, columns, Config::default())
    }

    /// Creates an empty table sized and bounded by `config`.
    pub fn with_config<I, S>(name: impl Into<String>, columns: I, config: Config) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let policy = config.validate()?;
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(Error::NoColumns);
        }
        let name = name.into();
        log::trace!(
            "Creating hash table {name:?} with {} columns, capacity {}",
            columns.len(),
            config.initial_capacity
        );
        Ok(Self {
            name,
            columns,
            store: SlotStore::with_capacity(config.initial_capacity),
            config,
            policy,
            fingerprint: Fingerprint::default(),
        })
    }

    /// Number of tombstoned slots.
    pub fn contamination(&self) -> usize {
        self.store.contamination()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.store.iter()
    }

    /// Moves every live row into a fresh store of the next capacity.
    ///
    /// The incremental fingerprint is checked against a full rescan before
    /// the old store is touched, so a drifted fingerprint panics with the
    /// table still intact.
    fn rehash(&mut self) {
        let old_capacity = self.store.capacity();
        let new_capacity = grown_capacity(old_capacity);
        let dropped = self.store.contamination();

        let rescan = Fingerprint::from_rows(self.store.iter());
        assert_eq!(
            rescan, self.fingerprint,
            "incremental fingerprint diverged from live rows"
        );

        let old = core::mem::replace(&mut self.store, SlotStore::with_capacity(new_capacity));
        for row in old.into_rows() {
            let placed = self.store.upsert(row);
            debug_assert!(matches!(placed, Upsert::Inserted), "duplicate key in store");
        }
        self.fingerprint = rescan;

        debug_assert!(is_prime(self.store.capacity()) && self.store.capacity() % 2 == 1);
        log::debug!(
            "Rehashed {:?}: capacity {old_capacity} -> {new_capacity}, {} live rows, {dropped} tombstones dropped",
            self.name,
            self.store.size(),
        );
    }

    fn claims_empty_slot(&self, key: &str) -> bool {
        matches!(
            self.store.locate(key),
            Probe::Vacant {
                reclaims_tombstone: false,
                ..
            }
        )
    }

    fn occupancy(&self) -> usize {
        self.store.size() + self.store.contamination()
    }
}

impl Table for HashTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn clear(&mut self) {
        log::trace!("Clearing hash table {:?}", self.name);
        self.store = SlotStore::with_capacity(self.config.initial_capacity);
        self.fingerprint.reset();
    }

    fn put(&mut self, key: &str, fields: Vec<Value>) -> Result<Option<Vec<Value>>> {
        check_degree(self.degree(), &fields)?;

        // Hits and tombstone reuse leave occupancy unchanged.
        if self.claims_empty_slot(key) {
            while self
                .policy
                .needs_rehash(self.occupancy(), self.store.capacity())
            {
                self.rehash();
            }
        }

        let row = Row::new(key, fields);
        let hash = row.fingerprint_hash();
        match self.store.upsert(row) {
            Upsert::Replaced(old) => {
                self.fingerprint.subtract(&old);
                self.fingerprint.add_hash(hash);
                Ok(Some(old.into_fields()))
            }
            Upsert::Inserted => {
                self.fingerprint.add_hash(hash);
                Ok(None)
            }
        }
    }

    fn get(&self, key: &str) -> Option<&[Value]> {
        self.store.get(key).map(Row::fields)
    }

    fn remove(&mut self, key: &str) -> Option<Vec<Value>> {
        let old = self.store.remove(key)?;
        self.fingerprint.subtract(&old);
        Some(old.into_fields())
    }

    fn size(&self) -> usize {
        self.store.size()
    }

    fn fingerprint(&self) -> u64 {
        self.fingerprint.value()
    }

    fn rows(&self) -> Box<dyn Iterator<Item = &Row> + '_> {
        Box::new(self.iter())
    }
}

impl BoundedTable for HashTable {
    fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// Counts tombstones as well as live rows, since both lengthen probes
    /// and both count toward the rehash bound.
    fn load_factor(&self) -> f64 {
        self.occupancy() as f64 / self.store.capacity() as f64
    }
}

// Inherent shortcuts so callers need not import the traits for common use.
impl HashTable {
    pub fn name(&self) -> &str {
        Table::name(self)
    }

    pub fn columns(&self) -> &[String] {
        Table::columns(self)
    }

    pub fn degree(&self) -> usize {
        Table::degree(self)
    }

    pub fn clear(&mut self) {
        Table::clear(self)
    }

    pub fn put(&mut self, key: &str, fields: Vec<Value>) -> Result<Option<Vec<Value>>> {
        Table::put(self, key, fields)
    }

    pub fn get(&self, key: &str) -> Option<&[Value]> {
        Table::get(self, key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<Value>> {
        Table::remove(self, key)
    }

    pub fn contains(&self, key: &str) -> bool {
        Table::contains(self, key)
    }

    pub fn size(&self) -> usize {
        Table::size(self)
    }

    pub fn is_empty(&self) -> bool {
        Table::is_empty(self)
    }

    pub fn fingerprint(&self) -> u64 {
        Table::fingerprint(self)
    }

    pub fn capacity(&self) -> usize {
        BoundedTable::capacity(self)
    }

    pub fn is_full(&self) -> bool {
        BoundedTable::is_full(self)
    }

    pub fn load_factor(&self) -> f64 {
        BoundedTable::load_factor(self)
    }
}

/// Tables are equal when they hold the same rows. Fingerprints settle most
/// comparisons; a full row comparison runs only when they match.
impl PartialEq for HashTable {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other) || same_rows(self, other)
    }
}

impl Eq for HashTable {}

impl Hash for HashTable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = &'a Row;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;
    use test_log::test;

    fn table() -> HashTable {
        HashTable::new("t", ["k", "f1", "f2"]).unwrap()
    }

    fn rescan(t: &HashTable) -> u64 {
        Fingerprint::from_rows(t.iter()).value()
    }

    #[test]
    fn fresh_table_shape() {
        let t = table();
        assert_eq!(t.name(), "t");
        assert_eq!(t.columns(), ["k", "f1", "f2"]);
        assert_eq!(t.degree(), 3);
        assert_eq!(t.size(), 0);
        assert_eq!(t.capacity(), 43);
        assert_eq!(t.fingerprint(), 0);
        assert!(t.is_empty());
        assert!(!t.is_full());
    }

    #[test]
    fn no_columns_rejected() {
        let r = HashTable::new("t", Vec::<String>::new());
        assert!(matches!(r, Err(Error::NoColumns)));
    }

    #[test]
    fn degree_mismatch_leaves_table_untouched() {
        let mut t = table();
        t.put("a", fields!["x", 1]).unwrap();
        let fp = t.fingerprint();

        let err = t.put("b", fields!["only one"]).unwrap_err();
        assert_eq!(
            err,
            Error::DegreeMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(t.put("a", fields!["x", 1, 2]).is_err());
        assert_eq!(t.size(), 1);
        assert_eq!(t.fingerprint(), fp);
        assert_eq!(t.get("a"), Some(&fields!["x", 1][..]));
    }

    #[test]
    fn hit_replaces_and_adjusts_fingerprint() {
        let mut t = table();
        assert_eq!(t.put("a", fields!["x", 1]).unwrap(), None);
        assert_eq!(
            t.put("a", fields!["y", 2]).unwrap(),
            Some(fields!["x", 1])
        );
        assert_eq!(t.size(), 1);
        assert_eq!(t.fingerprint(), rescan(&t));
        assert_eq!(
            t.fingerprint(),
            Row::new("a", fields!["y", 2]).fingerprint_hash()
        );
    }

    #[test]
    fn remove_leaves_tombstone() {
        let mut t = table();
        t.put("a", fields!["x", 1]).unwrap();
        assert_eq!(t.remove("a"), Some(fields!["x", 1]));
        assert_eq!(t.contamination(), 1);
        assert_eq!(t.fingerprint(), 0);
        assert_eq!(t.remove("a"), None);
        assert!(!t.contains("a"));
    }

    #[test]
    fn rehash_grows_to_prime_and_drops_tombstones() {
        let mut t = table();
        for i in 0..20 {
            t.put(&format!("k{i}"), fields![i, i]).unwrap();
        }
        for i in 0..12 {
            t.remove(&format!("k{i}"));
        }
        assert_eq!(t.contamination(), 12);
        let fp = t.fingerprint();

        // 20 used slots; a dozen more new keys cross 0.75 * 43.
        let mut i = 100;
        while t.capacity() == 43 {
            t.put(&format!("k{i}"), fields![i, i]).unwrap();
            i += 1;
        }
        assert_eq!(t.capacity(), 89);
        assert!(t.contamination() < 12);
        assert_eq!(t.fingerprint(), rescan(&t));
        assert_ne!(t.fingerprint(), fp);
        for i in 12..20 {
            assert_eq!(t.get(&format!("k{i}")), Some(&fields![i, i][..]));
        }
    }

    #[test]
    fn update_at_bound_does_not_rehash() {
        let mut t = table();
        for i in 0..32 {
            t.put(&format!("k{i}"), fields![i, i]).unwrap();
        }
        assert_eq!(t.capacity(), 43);

        // 32/43 is under the bound and a hit adds no slot.
        assert_eq!(t.put("k0", fields![0, "new"]).unwrap(), Some(fields![0, 0]));
        assert_eq!(t.capacity(), 43);
        assert_eq!(t.size(), 32);

        // A fresh key would make it 33/43, so that one grows the table.
        t.put("k32", fields![32, 32]).unwrap();
        assert_eq!(t.capacity(), 89);
    }

    #[test]
    fn tombstone_reuse_at_bound_does_not_rehash() {
        let mut t = table();
        for i in 0..32 {
            t.put(&format!("k{i}"), fields![i, i]).unwrap();
        }
        t.remove("k5");
        assert_eq!(t.contamination(), 1);

        // Same key, same probe path: the tombstone is reclaimed in place.
        t.put("k5", fields![5, 5]).unwrap();
        assert_eq!(t.capacity(), 43);
        assert_eq!(t.contamination(), 0);
        assert_eq!(t.fingerprint(), rescan(&t));
    }

    #[test]
    fn clear_resets_to_initial_capacity() {
        let mut t = table();
        for i in 0..200 {
            t.put(&format!("k{i}"), fields![i, i]).unwrap();
        }
        t.remove("k0");
        assert!(t.capacity() > 43);
        t.clear();
        assert_eq!(t.capacity(), 43);
        assert_eq!(t.size(), 0);
        assert_eq!(t.contamination(), 0);
        assert_eq!(t.fingerprint(), 0);
        assert_eq!(t.get("k1"), None);
    }

    #[test]
    fn load_factor_counts_tombstones() {
        let mut t = HashTable::with_config("t", ["k"], Config::default().initial_capacity(11))
            .unwrap();
        t.put("a", vec![]).unwrap();
        t.put("b", vec![]).unwrap();
        t.remove("a");
        assert!((t.load_factor() - 2.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn low_load_bound_still_holds_after_put() {
        let config = Config::default().initial_capacity(3).max_load_factor(0.1);
        let mut t = HashTable::with_config("t", ["k"], config).unwrap();
        for i in 0..50 {
            t.put(&format!("{i}"), vec![]).unwrap();
            let used = (t.size() + t.contamination()) as f64;
            assert!(used <= 0.1 * t.capacity() as f64);
        }
    }

    #[test]
    fn equality_by_content_not_layout() {
        let mut a = table();
        let mut b = HashTable::with_config(
            "other",
            ["k", "f1", "f2"],
            Config::default().initial_capacity(7),
        )
        .unwrap();
        for i in 0..30 {
            a.put(&format!("k{i}"), fields![i, "v"]).unwrap();
        }
        for i in (0..30).rev() {
            b.put(&format!("k{i}"), fields![i, "v"]).unwrap();
        }
        assert_ne!(a.capacity(), b.capacity());
        assert_eq!(a, b);

        let hash_of = |t: &HashTable| {
            let mut h = std::collections::hash_map::DefaultHasher::new();
            t.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash_of(&a), hash_of(&b));

        b.put("k3", fields![3, "changed"]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn iteration_via_into_iterator() {
        let mut t = table();
        t.put("a", fields![1, 2]).unwrap();
        t.put("b", fields![3, 4]).unwrap();
        let mut n = 0;
        for row in &t {
            assert_eq!(t.get(row.key()), Some(row.fields()));
            n += 1;
        }
        assert_eq!(n, t.size());
    }
}
