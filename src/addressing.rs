//! Double-hash addressing: primary slot and probe step per key.
//!
//! Both functions are pure in `(key, capacity)`. The primary index comes
//! from SHA-256 over a salted key; the step comes from 64-bit FNV-1a over a
//! differently salted key. With a prime capacity every step in
//! `[1, capacity - 1]` is coprime with it, so a probe sequence visits every
//! slot exactly once before repeating.

use core::hash::Hasher;
use fnv::FnvHasher;
use sha2::{Digest, Sha256};

const PRIMARY_SALT: &[u8] = b"dh-table/primary:";
const STEP_SALT: &[u8] = b"dh-table/step:";

/// Starting slot for `key`, in `[0, capacity)`.
pub fn primary_index(key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    let mut hasher = Sha256::new();
    hasher.update(PRIMARY_SALT);
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();

    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(head) % capacity as u64) as usize
}

/// Probe stride for `key`, in `[1, capacity - 1]`.
pub fn probe_step(key: &str, capacity: usize) -> usize {
    debug_assert!(capacity > 1);
    let mut h = FnvHasher::default();
    h.write(STEP_SALT);
    h.write(key.as_bytes());
    1 + (h.finish() % (capacity as u64 - 1)) as usize
}

/// The slot indices visited when looking for a key.
///
/// Yields exactly `capacity` indices, then stops. A caller that exhausts
/// the sequence without resolving its walk has found a table with no empty
/// slot left, which the growth policy is supposed to rule out.
#[derive(Debug, Clone)]
pub struct ProbeSeq {
    next: usize,
    step: usize,
    capacity: usize,
    remaining: usize,
}

impl ProbeSeq {
    /// Starts the probe walk for `key` in a table of `capacity` slots.
    pub fn new(key: &str, capacity: usize) -> Self {
        Self {
            next: primary_index(key, capacity),
            step: probe_step(key, capacity),
            capacity,
            remaining: capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let idx = self.next;
        self.next = (self.next + self.step) % self.capacity;
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ProbeSeq {}
