//! ArrayHash: fixed slot array of packed string buckets.

use crate::error::Result;
use crate::hasher::{ShiftAddXor, SlotHasher};
use crate::record::record_len;
use crate::slot::{Probe, Slot};
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

/// Slot count used when none is given. Must be a power of two.
pub const DEFAULT_SLOTS: usize = 2048;

static NEXT_TABLE_ID: AtomicU64 = AtomicU64::new(0);

/// A set of byte strings stored as packed records in `SLOTS` buckets.
///
/// Every append to a non-empty bucket reallocates that bucket's buffer, so
/// one insert costs O(bytes in the bucket) and filling a single bucket with
/// `n` keys is O(n²). The table is meant to have many lightly loaded
/// buckets; [`ArrayHash::stats`] shows the actual load.
pub struct ArrayHash<H = ShiftAddXor, const SLOTS: usize = DEFAULT_SLOTS> {
    hasher: H,
    slots: Box<[Slot]>,
    len: usize,
    // unique per table, never reused; cursors record their owner by it
    id: u64,
    // bumped on every successful insert; cursors compare against it
    epoch: u64,
}

/// Per-bucket load summary.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SlotStats {
    /// Slots holding at least one record.
    pub occupied_slots: usize,
    /// Records in the fullest slot.
    pub max_records_in_slot: usize,
    /// Total bytes across all slot buffers, sentinels included.
    pub bytes: usize,
}

impl ArrayHash {
    pub fn new() -> Self {
        Self::with_hasher(ShiftAddXor::default())
    }
}

impl Default for ArrayHash {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, const SLOTS: usize> ArrayHash<H, SLOTS> {
    const SLOTS_ARE_POWER_OF_TWO: () = assert!(
        SLOTS.is_power_of_two(),
        "ArrayHash slot count must be a power of two"
    );

    /// Number of distinct strings stored.
    #[doc(alias = "size")]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub const fn slot_count(&self) -> usize {
        SLOTS
    }

    #[inline]
    pub(crate) fn slot(&self, index: usize) -> &Slot {
        &self.slots[index]
    }

    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn stats(&self) -> SlotStats {
        let mut stats = SlotStats::default();
        for slot in self.slots.iter().filter(|s| !s.is_empty()) {
            stats.occupied_slots += 1;
            stats.max_records_in_slot = stats.max_records_in_slot.max(slot.records().count());
            stats.bytes += slot.byte_len();
        }
        stats
    }
}

impl<H, const SLOTS: usize> ArrayHash<H, SLOTS>
where
    H: SlotHasher,
{
    pub fn with_hasher(hasher: H) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SLOTS_ARE_POWER_OF_TWO;
        Self {
            hasher,
            slots: (0..SLOTS).map(|_| Slot::default()).collect(),
            len: 0,
            id: NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed),
            epoch: 0,
        }
    }

    /// Bucket of `key`, terminator excluded.
    #[inline]
    pub fn slot_index(&self, key: &[u8]) -> usize {
        (self.hasher.hash_key(key) as usize) & (SLOTS - 1)
    }

    fn checked_len(key: &[u8]) -> Result<i16> {
        record_len(key).map_err(|e| {
            debug!(len = key.len(), "rejecting key longer than a record can hold");
            e
        })
    }

    /// Scans `key`'s bucket, or `slot` when the caller already hashed it.
    pub(crate) fn search(&self, key: &[u8], len: i16, slot: Option<usize>) -> Probe {
        let index = slot.unwrap_or_else(|| self.slot_index(key));
        self.slots[index].search(key, len)
    }

    /// Adds `key`. Returns `Ok(false)` if it was already present, leaving the
    /// table untouched.
    pub fn insert<K: AsRef<[u8]>>(&mut self, key: K) -> Result<bool> {
        let key = key.as_ref();
        let len = Self::checked_len(key)?;
        let index = self.slot_index(key);
        let used = match self.search(key, len, Some(index)) {
            Probe::Found => return Ok(false),
            Probe::Absent { used } => used,
        };
        let slot = &mut self.slots[index];
        let old_size = slot.byte_len();
        match slot.append(key, len, used) {
            Ok(new_size) if old_size == 0 => trace!(slot = index, size = new_size, "allocated slot"),
            Ok(new_size) => trace!(slot = index, from = old_size, to = new_size, "grew slot"),
            Err(e) => {
                debug!(slot = index, error = %e, "slot allocation failed");
                return Err(e);
            }
        }
        self.len += 1;
        self.epoch = self.epoch.wrapping_add(1);
        Ok(true)
    }

    pub fn find<K: AsRef<[u8]>>(&self, key: K) -> Result<bool> {
        let key = key.as_ref();
        let len = Self::checked_len(key)?;
        Ok(self.search(key, len, None) == Probe::Found)
    }
}

impl<H, const SLOTS: usize> fmt::Debug for ArrayHash<H, SLOTS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.iter().map(String::from_utf8_lossy))
            .finish()
    }
}
