//! Slot hashing.
//!
//! The table only needs a key's bucket, so a hasher maps bytes to a raw
//! `u64` and the table folds it with `& (SLOTS - 1)`. The default is the
//! seeded shift-add-xor hash, computed in wrapping 32-bit signed arithmetic
//! with each byte sign-extended.

/// Seed used by [`ShiftAddXor::default`].
pub const DEFAULT_SEED: u32 = 23;

/// Maps a key (without terminator) to a raw hash; the table folds it into a
/// slot index. Must be a pure function of `key`.
pub trait SlotHasher {
    fn hash_key(&self, key: &[u8]) -> u64;
}

/// Seeded shift-add-xor string hash: `h ^= (h << 5) + (h >> 2) + b` per byte.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ShiftAddXor {
    seed: u32,
}

impl ShiftAddXor {
    pub const fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// The unfolded 32-bit hash of `key`.
    #[inline]
    pub fn hash32(&self, key: &[u8]) -> u32 {
        let mut h = self.seed as i32;
        for &b in key {
            let mixed = (h << 5).wrapping_add(h >> 2).wrapping_add(b as i8 as i32);
            h ^= mixed;
        }
        h as u32
    }
}

impl Default for ShiftAddXor {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl SlotHasher for ShiftAddXor {
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u64 {
        self.hash32(key) as u64
    }
}

impl<H: SlotHasher + ?Sized> SlotHasher for &H {
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u64 {
        (**self).hash_key(key)
    }
}
