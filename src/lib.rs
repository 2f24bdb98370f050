//! dh-table: a bounded, text-keyed table using open addressing with double
//! hashing, tombstone deletion and an incrementally maintained fingerprint.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the hash table small enough to reason about by splitting
//!   it into layers, each with one invariant to protect.
//! - Layers:
//!   - `addressing`: pure functions `(key, capacity) -> (start, step)` and
//!     the finite probe sequence built from them.
//!   - `SlotStore`: a fixed array of `Empty | Tombstone | Occupied(Row)`
//!     slots with `size`/`contamination` counters. Owns the probe walk.
//!   - `growth`: the occupancy bound and the prime capacity schedule.
//!   - `Fingerprint`: wrapping sum of row hashes over live rows.
//!   - `HashTable`: composes the above behind the [`Table`] contract.
//! - `SearchTable` and `LookupTable` are simpler backends behind the same
//!   contract, with the same row hash and so comparable fingerprints.
//!
//! Constraints
//! - Single-threaded. Mutators take `&mut self`; there is no locking.
//! - Capacity is always an odd prime, so every probe step is coprime with
//!   it and a probe sequence reaches every slot.
//! - After every `put`, `(size + contamination) / capacity` is at most the
//!   configured bound (0.75 by default), so at least one slot is empty and
//!   every probe walk terminates.
//! - `fingerprint` equals the sum of live row hashes at all times.
//!
//! Deletion and growth
//! - `remove` leaves a tombstone so keys inserted past it stay reachable.
//! - A `put` that misses reuses the first tombstone on its probe path.
//! - Before an insertion into an empty slot would cross the bound, the
//!   table rehashes into the smallest odd prime `>= 2 * capacity + 1`,
//!   reinserting live rows with the ordinary probe logic and dropping
//!   every tombstone. Hits and tombstone reuse never rehash.
//!
//! Identity
//! - Equality compares fingerprints first and falls back to a full row
//!   comparison only when they match; `Hash` writes the fingerprint.
//!
//! Notes and non-goals
//! - Keys are always `String`s; there is no generic key type.
//! - No persistence; rows are never serialized by this crate.
//! - Iterators borrow the table, so it cannot be mutated mid-iteration.

pub mod addressing;
mod config;
mod error;
mod fingerprint;
pub mod growth;
mod hash_table;
mod hash_table_proptest;
mod lookup_table;
mod row;
mod search_table;
mod slot_store;
mod table;

// Public surface
pub use config::Config;
pub use error::{Error, Result};
pub use hash_table::{HashTable, Iter};
pub use lookup_table::LookupTable;
pub use row::{Row, Value};
pub use search_table::SearchTable;
pub use table::{same_rows, BoundedTable, Table};
