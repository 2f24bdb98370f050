//! Order-independent checksum over a table's live rows.

use crate::row::Row;

/// Wrapping sum of [`Row::fingerprint_hash`] over live rows.
///
/// Addition is commutative, so the value is independent of slot layout and
/// insertion order. Two tables holding the same rows always agree; two
/// tables that agree almost always hold the same rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Recomputes the checksum from scratch.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a Row>) -> Self {
        let mut fp = Self::default();
        for row in rows {
            fp.add(row);
        }
        fp
    }

    #[inline]
    pub fn add(&mut self, row: &Row) {
        self.add_hash(row.fingerprint_hash());
    }

    /// Adds a row hash computed before the row was moved into a slot.
    #[inline]
    pub fn add_hash(&mut self, hash: u64) {
        self.0 = self.0.wrapping_add(hash);
    }

    #[inline]
    pub fn subtract(&mut self, row: &Row) {
        self.0 = self.0.wrapping_sub(row.fingerprint_hash());
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }
}
