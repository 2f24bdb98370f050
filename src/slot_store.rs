//! Slot store: a fixed array of tri-state slots walked by double hashing.
//!
//! The store keeps its own `size` and `contamination` counters but knows
//! nothing about fingerprints or growth; the table facade composes those.

use crate::addressing::ProbeSeq;
use crate::row::Row;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
    Empty,
    Tombstone,
    Occupied(Row),
}

/// Where a key lives, or where it would go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Probe {
    /// An occupied slot holds the key.
    Found(usize),
    /// The key is absent. `at` is the first tombstone on the probe path,
    /// or the empty slot that ended the walk if there was none.
    Vacant { at: usize, reclaims_tombstone: bool },
}

/// Outcome of [`SlotStore::upsert`].
#[derive(Debug)]
pub(crate) enum Upsert {
    Inserted,
    Replaced(Row),
}

#[derive(Debug)]
pub(crate) struct SlotStore {
    slots: Vec<Slot>,
    size: usize,
    contamination: usize,
}

#[cold]
#[inline(never)]
fn probe_exhausted(key: &str, capacity: usize) -> ! {
    panic!(
        "probe for {key:?} visited all {capacity} slots without reaching an empty one; \
         occupancy bound violated"
    )
}

impl SlotStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::Empty; capacity],
            size: 0,
            contamination: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contamination(&self) -> usize {
        self.contamination
    }

    /// Walks the probe sequence for `key`.
    ///
    /// Tombstones never end the walk: a deleted entry says nothing about
    /// whether the key was inserted further along. Only an empty slot
    /// proves absence. Panics if the whole sequence is walked without
    /// meeting one.
    pub fn locate(&self, key: &str) -> Probe {
        let capacity = self.capacity();
        let mut first_tombstone = None;
        for idx in ProbeSeq::new(key, capacity) {
            match &self.slots[idx] {
                Slot::Occupied(row) if row.key() == key => return Probe::Found(idx),
                Slot::Occupied(_) => {}
                Slot::Tombstone => {
                    first_tombstone.get_or_insert(idx);
                }
                Slot::Empty => {
                    return match first_tombstone {
                        Some(at) => Probe::Vacant {
                            at,
                            reclaims_tombstone: true,
                        },
                        None => Probe::Vacant {
                            at: idx,
                            reclaims_tombstone: false,
                        },
                    };
                }
            }
        }
        probe_exhausted(key, capacity)
    }

    pub fn get(&self, key: &str) -> Option<&Row> {
        match self.locate(key) {
            Probe::Found(idx) => match &self.slots[idx] {
                Slot::Occupied(row) => Some(row),
                _ => unreachable!("located slot is occupied"),
            },
            Probe::Vacant { .. } => None,
        }
    }

    /// Inserts `row`, replacing a live row with the same key if present.
    pub fn upsert(&mut self, row: Row) -> Upsert {
        match self.locate(row.key()) {
            Probe::Found(idx) => match core::mem::replace(&mut self.slots[idx], Slot::Occupied(row))
            {
                Slot::Occupied(old) => Upsert::Replaced(old),
                _ => unreachable!("located slot is occupied"),
            },
            Probe::Vacant {
                at,
                reclaims_tombstone,
            } => {
                if reclaims_tombstone {
                    self.contamination -= 1;
                }
                self.slots[at] = Slot::Occupied(row);
                self.size += 1;
                Upsert::Inserted
            }
        }
    }

    /// Replaces the live row for `key` with a tombstone.
    pub fn remove(&mut self, key: &str) -> Option<Row> {
        let Probe::Found(idx) = self.locate(key) else {
            return None;
        };
        match core::mem::replace(&mut self.slots[idx], Slot::Tombstone) {
            Slot::Occupied(old) => {
                self.size -= 1;
                self.contamination += 1;
                Some(old)
            }
            _ => unreachable!("located slot is occupied"),
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.size,
        }
    }

    /// Consumes the store, yielding live rows and dropping tombstones.
    pub fn into_rows(self) -> impl Iterator<Item = Row> {
        self.slots.into_iter().filter_map(|slot| match slot {
            Slot::Occupied(row) => Some(row),
            Slot::Empty | Slot::Tombstone => None,
        })
    }

    #[cfg(test)]
    pub fn slot(&self, idx: usize) -> &Slot {
        &self.slots[idx]
    }
}

/// Front-to-back scan over occupied slots.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    slots: core::slice::Iter<'a, Slot>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Row;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Slot::Occupied(row) = slot {
                self.remaining -= 1;
                return Some(row);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl core::iter::FusedIterator for Iter<'_> {}
