//! Growth policy: when to rehash and which capacity to rehash into.

/// Smallest capacity a table may have.
pub const MIN_CAPACITY: usize = 3;

/// Default starting capacity.
pub const DEFAULT_CAPACITY: usize = 43;

/// Default occupancy bound.
pub const DEFAULT_MAX_LOAD: f64 = 0.75;

/// Trial division, skipping even candidates.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Smallest odd prime `>= n` (and `>= MIN_CAPACITY`).
pub fn next_odd_prime(n: usize) -> usize {
    let mut c = n.max(MIN_CAPACITY) | 1;
    while !is_prime(c) {
        c += 2;
    }
    c
}

/// Capacity to rehash into: smallest odd prime `>= 2 * capacity + 1`.
pub fn grown_capacity(capacity: usize) -> usize {
    next_odd_prime(capacity * 2 + 1)
}

/// Occupancy bound checked before each insertion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthPolicy {
    max_load: f64,
}

impl GrowthPolicy {
    pub(crate) fn new(max_load: f64) -> Self {
        Self { max_load }
    }

    /// Whether an insertion must be preceded by a rehash.
    ///
    /// `used` counts occupied plus tombstoned slots. The check is made on
    /// the occupancy a new row could produce, so the bound holds after the
    /// insertion as well as before it, and at least one slot stays empty.
    pub fn needs_rehash(&self, used: usize, capacity: usize) -> bool {
        (used + 1) as f64 > self.max_load * capacity as f64
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LOAD)
    }
}
