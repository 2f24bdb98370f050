//! The relational contract shared by every table backend.

use crate::row::{Row, Value};
use crate::Result;

/// A keyed collection of rows with a fixed column layout.
///
/// Every row has `degree() - 1` fields; the key is the first column.
pub trait Table {
    fn name(&self) -> &str;

    /// Column names, key column first.
    fn columns(&self) -> &[String];

    /// Number of columns, including the key column.
    fn degree(&self) -> usize {
        self.columns().len()
    }

    /// Removes every row and resets the backend to its initial shape.
    fn clear(&mut self);

    /// Inserts or replaces the row for `key`, returning the replaced fields.
    ///
    /// Fails with [`Error::DegreeMismatch`](crate::Error::DegreeMismatch),
    /// leaving the table untouched, unless `fields.len() == degree() - 1`.
    fn put(&mut self, key: &str, fields: Vec<Value>) -> Result<Option<Vec<Value>>>;

    fn get(&self, key: &str) -> Option<&[Value]>;

    /// Removes the row for `key`, returning its fields.
    fn remove(&mut self, key: &str) -> Option<Vec<Value>>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of live rows.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Order-independent checksum over the live rows.
    ///
    /// Backends that hold the same rows report the same value.
    fn fingerprint(&self) -> u64;

    /// Every live row, once, in backend order.
    fn rows(&self) -> Box<dyn Iterator<Item = &Row> + '_>;
}

/// A table with a slot capacity.
pub trait BoundedTable: Table {
    fn capacity(&self) -> usize;

    fn is_full(&self) -> bool {
        self.size() == self.capacity()
    }

    fn load_factor(&self) -> f64 {
        self.size() as f64 / self.capacity() as f64
    }
}

/// Whether two tables hold exactly the same rows.
///
/// The fingerprints are compared first; only when they agree are the row
/// sets compared one lookup at a time. Names and columns are not compared.
pub fn same_rows(a: &dyn Table, b: &dyn Table) -> bool {
    if a.fingerprint() != b.fingerprint() || a.size() != b.size() {
        return false;
    }
    a.rows().all(|row| b.get(row.key()) == Some(row.fields()))
}

pub(crate) fn check_degree(degree: usize, fields: &[Value]) -> Result<()> {
    let expected = degree - 1;
    if fields.len() != expected {
        return Err(crate::Error::DegreeMismatch {
            expected,
            actual: fields.len(),
        });
    }
    Ok(())
}
