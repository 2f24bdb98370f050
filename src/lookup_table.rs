//! LookupTable: direct-indexed table for single-letter keys.
//!
//! Each of the 52 ASCII letters owns one slot (`a..=z` then `A..=Z`), so
//! there is no hashing, probing or growth. Keys outside that alphabet are
//! rejected by `put` and simply miss on `get` and `remove`.

use crate::fingerprint::Fingerprint;
use crate::row::{Row, Value};
use crate::table::{check_degree, same_rows, Table};
use crate::{Error, Result};
use core::hash::{Hash, Hasher};

const SLOTS: usize = 52;

fn slot_of(key: &str) -> Option<usize> {
    match key.as_bytes() {
        [c @ b'a'..=b'z'] => Some(usize::from(c - b'a')),
        [c @ b'A'..=b'Z'] => Some(usize::from(c - b'A') + 26),
        _ => None,
    }
}

#[derive(Debug)]
pub struct LookupTable {
    name: String,
    columns: Vec<String>,
    slots: Vec<Option<Row>>,
    size: usize,
    fingerprint: Fingerprint,
}

impl LookupTable {
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(Error::NoColumns);
        }
        Ok(Self {
            name: name.into(),
            columns,
            slots: vec![None; SLOTS],
            size: 0,
            fingerprint: Fingerprint::default(),
        })
    }

    /// Rows in slot order: lowercase letters first, then uppercase.
    pub fn iter(&self) -> impl Iterator<Item = &Row> + '_ {
        self.slots.iter().flatten()
    }
}

impl Table for LookupTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.size = 0;
        self.fingerprint.reset();
    }

    fn put(&mut self, key: &str, fields: Vec<Value>) -> Result<Option<Vec<Value>>> {
        let idx = slot_of(key).ok_or_else(|| Error::InvalidKey(key.to_owned()))?;
        check_degree(self.degree(), &fields)?;

        let row = Row::new(key, fields);
        self.fingerprint.add(&row);
        match self.slots[idx].replace(row) {
            Some(old) => {
                self.fingerprint.subtract(&old);
                Ok(Some(old.into_fields()))
            }
            None => {
                self.size += 1;
                Ok(None)
            }
        }
    }

    fn get(&self, key: &str) -> Option<&[Value]> {
        let idx = slot_of(key)?;
        self.slots[idx].as_ref().map(Row::fields)
    }

    fn remove(&mut self, key: &str) -> Option<Vec<Value>> {
        let old = self.slots[slot_of(key)?].take()?;
        self.size -= 1;
        self.fingerprint.subtract(&old);
        Some(old.into_fields())
    }

    fn size(&self) -> usize {
        self.size
    }

    fn fingerprint(&self) -> u64 {
        self.fingerprint.value()
    }

    fn rows(&self) -> Box<dyn Iterator<Item = &Row> + '_> {
        Box::new(self.iter())
    }
}

impl PartialEq for LookupTable {
    fn eq(&self, other: &Self) -> bool {
        same_rows(self, other)
    }
}

impl Eq for LookupTable {}

impl Hash for LookupTable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}
