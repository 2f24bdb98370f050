//! Construction-time tuning for [`HashTable`](crate::HashTable).

use crate::growth::{next_odd_prime, GrowthPolicy, DEFAULT_CAPACITY, DEFAULT_MAX_LOAD};
use crate::{Error, Result};

/// Hash table configuration
///
/// ```
/// use dh_table::{Config, HashTable};
///
/// let config = Config::default().initial_capacity(100).max_load_factor(0.5);
/// let table = HashTable::with_config("t", ["k", "v"], config)?;
/// assert_eq!(table.capacity(), 101);
/// # Ok::<(), dh_table::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub(crate) initial_capacity: usize,
    pub(crate) max_load_factor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD,
        }
    }
}

impl Config {
    /// Slot count after construction and after `clear`.
    ///
    /// Rounded up to the next odd prime (at least 3).
    ///
    /// Default = 43
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = next_odd_prime(capacity);
        self
    }

    /// Occupancy ratio (live plus tombstoned slots over capacity) that an
    /// insertion may not push the table past.
    ///
    /// Must lie strictly between 0 and 1.
    ///
    /// Default = 0.75
    #[must_use]
    pub fn max_load_factor(mut self, ratio: f64) -> Self {
        self.max_load_factor = ratio;
        self
    }

    pub(crate) fn validate(&self) -> Result<GrowthPolicy> {
        if !(self.max_load_factor > 0.0 && self.max_load_factor < 1.0) {
            return Err(Error::InvalidConfig(
                "max_load_factor must be in the open interval (0, 1)",
            ));
        }
        Ok(GrowthPolicy::new(self.max_load_factor))
    }
}
