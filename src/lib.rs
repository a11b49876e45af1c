//! array-hash: a set of byte strings packed into per-bucket buffers, meant
//! as the leaf container of string-indexing structures such as a
//! cache-conscious trie.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: store many short unique strings with almost no per-entry
//!   overhead: no per-key allocation, no pointers, a 2-byte header per key.
//! - Layers:
//!   - `record`: the on-buffer layout `[len: i16][bytes..][0]` and the
//!     bounds-checked walk over it. The only place bytes are read or
//!     written as a length field.
//!   - `slot`: one bucket; an exactly sized `Box<[u8]>` of records closed
//!     by a zero sentinel, or no allocation at all.
//!   - `ArrayHash<H, SLOTS>`: a fixed array of `SLOTS` slots, a
//!     `SlotHasher`, and the element count.
//!   - `cursor`: index-based positions (`Cursor`) and the borrowing `Iter`.
//!
//! Constraints
//! - Single-threaded; mutation requires `&mut ArrayHash`.
//! - `SLOTS` is a power of two, checked at compile time; the slot index is
//!   `hash & (SLOTS - 1)`.
//! - Keys are unique; inserting a present key is a no-op returning `false`.
//! - A record's length counts the terminator and must fit an `i16`, so keys
//!   are at most [`MAX_KEY_LEN`] bytes. Longer keys are rejected with
//!   [`Error::LengthOverflow`], never truncated.
//!
//! Cost model
//! - Lookup scans one bucket linearly, comparing bytes only on records of
//!   equal length.
//! - Insert builds a new bucket buffer (old records + new record +
//!   sentinel) and swaps it in, so each insert is O(bytes in the bucket)
//!   and filling one bucket with `n` keys is O(n²). Buffers stay exactly
//!   sized and contiguous; with many lightly loaded buckets this is cheap.
//!   [`ArrayHash::stats`] reports the load.
//! - The swap happens only after the new buffer is complete, so a failed
//!   allocation ([`Error::OutOfMemory`]) leaves the table unchanged.
//!
//! Iteration
//! - Order is slot index, then insertion order within a slot. It is stable
//!   for a given hasher and slot count and unspecified otherwise.
//! - `Cursor` is a detached `(slot, offset)` position stamped with the
//!   table's epoch; any successful insert bumps the epoch and turns older
//!   cursors stale (`get` yields `None`, `advance` fails). Traversal is
//!   forward only.
//! - A `Cursor` also carries its table's id, so another table refuses it
//!   (`Error::WrongTable`), and record decoding is bounds-checked, so a
//!   misplaced position reads as "no record" instead of panicking.
//!
//! Notes and non-goals
//! - No removal.
//! - No generic keys: anything `AsRef<[u8]>`, compared as bytes. Embedded
//!   null bytes are allowed; records are compared by length, not by the
//!   terminator.
//! - Logging goes through `tracing` at `trace`/`debug` level only.

mod array_hash;
mod array_hash_proptest;
pub mod cursor;
mod error;
pub mod hasher;
mod record;
mod slot;

// Public surface
pub use array_hash::{ArrayHash, SlotStats, DEFAULT_SLOTS};
pub use cursor::{Cursor, Iter};
pub use error::{Error, Result};
pub use hasher::{ShiftAddXor, SlotHasher, DEFAULT_SEED};
pub use record::{LEN_WIDTH, MAX_KEY_LEN};
