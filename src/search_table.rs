//! SearchTable: array-backed table with linear search.
//!
//! Rows sit contiguously in insertion order until a removal swaps the last
//! row into the hole. Capacity doubles when the array fills. Useful as a
//! small-table backend and as a reference model for [`HashTable`].
//!
//! [`HashTable`]: crate::HashTable

use crate::fingerprint::Fingerprint;
use crate::row::{Row, Value};
use crate::table::{check_degree, same_rows, BoundedTable, Table};
use crate::{Error, Result};
use core::hash::{Hash, Hasher};

const INITIAL_CAPACITY: usize = 16;

#[derive(Debug)]
pub struct SearchTable {
    name: String,
    columns: Vec<String>,
    rows: Vec<Row>,
    capacity: usize,
    fingerprint: Fingerprint,
}

impl SearchTable {
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
            rows: Vec::with_capacity(INITIAL_CAPACITY),
            capacity: INITIAL_CAPACITY,
            fingerprint: Fingerprint::default(),
        })
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.rows.iter().position(|r| r.key() == key)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl Table for SearchTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn clear(&mut self) {
        self.rows = Vec::with_capacity(INITIAL_CAPACITY);
        self.capacity = INITIAL_CAPACITY;
        self.fingerprint.reset();
    }

    fn put(&mut self, key: &str, fields: Vec<Value>) -> Result<Option<Vec<Value>>> {
        check_degree(self.degree(), &fields)?;
        let row = Row::new(key, fields);

        if let Some(idx) = self.position(key) {
            self.fingerprint.add(&row);
            let old = core::mem::replace(&mut self.rows[idx], row);
            self.fingerprint.subtract(&old);
            return Ok(Some(old.into_fields()));
        }

        if self.rows.len() == self.capacity {
            self.capacity *= 2;
            self.rows.reserve_exact(self.capacity - self.rows.len());
            log::debug!("Grew search table {:?} to capacity {}", self.name, self.capacity);
        }
        self.fingerprint.add(&row);
        self.rows.push(row);
        Ok(None)
    }

    fn get(&self, key: &str) -> Option<&[Value]> {
        self.position(key).map(|idx| self.rows[idx].fields())
    }

    fn remove(&mut self, key: &str) -> Option<Vec<Value>> {
        let idx = self.position(key)?;
        let old = self.rows.swap_remove(idx);
        self.fingerprint.subtract(&old);
        Some(old.into_fields())
    }

    fn size(&self) -> usize {
        self.rows.len()
    }

    fn fingerprint(&self) -> u64 {
        self.fingerprint.value()
    }

    fn rows(&self) -> Box<dyn Iterator<Item = &Row> + '_> {
        Box::new(self.rows.iter())
    }
}

impl BoundedTable for SearchTable {
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl PartialEq for SearchTable {
    fn eq(&self, other: &Self) -> bool {
        same_rows(self, other)
    }
}

impl Eq for SearchTable {}

impl Hash for SearchTable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

impl<'a> IntoIterator for &'a SearchTable {
    type Item = &'a Row;
    type IntoIter = core::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
