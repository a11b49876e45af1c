//! One bucket of the table: a lazily allocated, exactly sized packed buffer.

use crate::error::Result;
use crate::record::{self, grown_size, Records};

/// Outcome of scanning a slot for a key.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Probe {
    Found,
    /// Not present; `used` is the byte size of the slot's records
    /// (sentinel excluded), 0 when the slot has no buffer.
    Absent { used: usize },
}

/// Either no allocation, or records followed by a zero sentinel.
#[derive(Default)]
pub(crate) struct Slot {
    buf: Option<Box<[u8]>>,
}

impl Slot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_none()
    }

    #[inline]
    pub fn bytes(&self) -> Option<&[u8]> {
        self.buf.as_deref()
    }

    /// Allocated size in bytes, sentinel included.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.buf.as_ref().map_or(0, |b| b.len())
    }

    pub fn records(&self) -> impl Iterator<Item = record::Record<'_>> {
        self.bytes().map(Records::new).into_iter().flatten()
    }

    /// Scans for `key`; `len` is its record length. Only records of equal
    /// length are compared byte for byte.
    pub fn search(&self, key: &[u8], len: i16) -> Probe {
        let Some(buf) = self.bytes() else {
            return Probe::Absent { used: 0 };
        };
        let mut walk = Records::new(buf);
        for rec in walk.by_ref() {
            if rec.len == len && rec.key() == key {
                return Probe::Found;
            }
        }
        Probe::Absent {
            used: walk.position(),
        }
    }

    /// Appends `key` behind the first `used` bytes of records by building a
    /// new buffer and swapping it in. On allocation failure the slot keeps
    /// its old buffer. Returns the new buffer size.
    pub fn append(&mut self, key: &[u8], len: i16, used: usize) -> Result<usize> {
        let size = grown_size(used, len);
        let mut next = Vec::new();
        next.try_reserve_exact(size)?;
        if let Some(old) = self.bytes() {
            next.extend_from_slice(&old[..used]);
        }
        record::write_record(&mut next, key, len);
        record::write_sentinel(&mut next);
        debug_assert_eq!(next.len(), size);
        self.buf = Some(next.into_boxed_slice());
        Ok(size)
    }
}
