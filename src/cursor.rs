//! Forward traversal: detached `Cursor`s and the borrowing `Iter`.
//!
//! Both walk the same path: records of a slot in insertion order, then the
//! next non-empty slot. A position is `(slot, offset)` where `offset` is the
//! byte offset of a record's length field; the end position is
//! `(SLOTS, 0)`. Positions are plain indices, so a cursor kept across an
//! insert can go stale but never dangles; the table's epoch detects it.
//! A cursor also records which table it came from and is refused by any
//! other table.

use crate::array_hash::ArrayHash;
use crate::error::{Error, Result};
use crate::record::{record_at, Record};
use core::iter::FusedIterator;

/// A forward-only position in an [`ArrayHash`], detached from its borrow.
///
/// Obtain one with [`ArrayHash::begin`] or [`ArrayHash::end`]. A cursor is
/// valid only for the table that produced it, and only until that table's
/// next successful insert. Cursors of different tables never compare equal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Cursor {
    table: u64,
    slot: usize,
    offset: usize,
    epoch: u64,
}

impl Cursor {
    /// Slot index of the current record (`SLOTS` at the end).
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Byte offset of the current record within its slot.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// True if this is `table`'s end position. A cursor from another table
    /// is never at `table`'s end.
    pub fn is_end<H, const SLOTS: usize>(&self, table: &ArrayHash<H, SLOTS>) -> bool {
        self.table == table.id() && self.slot >= SLOTS
    }

    #[inline]
    fn check_owner<H, const SLOTS: usize>(&self, table: &ArrayHash<H, SLOTS>) -> Result<()> {
        if self.table != table.id() {
            Err(Error::WrongTable)
        } else if self.epoch != table.epoch() {
            Err(Error::StaleCursor)
        } else {
            Ok(())
        }
    }

    /// False for a cursor from another table, or once `table` has been
    /// modified after this cursor was taken.
    pub fn is_valid<H, const SLOTS: usize>(&self, table: &ArrayHash<H, SLOTS>) -> bool {
        self.check_owner(table).is_ok()
    }

    /// The key under the cursor, without length prefix or terminator.
    /// `None` at the end, or when the cursor is stale or from another table.
    pub fn get<'a, H, const SLOTS: usize>(&self, table: &'a ArrayHash<H, SLOTS>) -> Option<&'a [u8]> {
        self.check_owner(table).ok()?;
        table.record(self.slot, self.offset).map(|r| r.key())
    }

    /// Moves to the next record. Advancing the end cursor leaves it at the end.
    /// Fails with `WrongTable` or `StaleCursor` without moving.
    pub fn advance<H, const SLOTS: usize>(&mut self, table: &ArrayHash<H, SLOTS>) -> Result<()> {
        self.check_owner(table)?;
        (self.slot, self.offset) = table.step(self.slot, self.offset);
        Ok(())
    }
}

/// Iterator over the keys of an [`ArrayHash`], in slot then insertion order.
pub struct Iter<'a, H, const SLOTS: usize> {
    table: &'a ArrayHash<H, SLOTS>,
    slot: usize,
    offset: usize,
    remaining: usize,
}

impl<'a, H, const SLOTS: usize> Iterator for Iter<'a, H, SLOTS> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let rec = self.table.record(self.slot, self.offset)?;
        (self.slot, self.offset) = self.table.step(self.slot, self.offset);
        self.remaining -= 1;
        Some(rec.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<H, const SLOTS: usize> ExactSizeIterator for Iter<'_, H, SLOTS> {}
impl<H, const SLOTS: usize> FusedIterator for Iter<'_, H, SLOTS> {}

impl<'a, H, const SLOTS: usize> IntoIterator for &'a ArrayHash<H, SLOTS> {
    type Item = &'a [u8];
    type IntoIter = Iter<'a, H, SLOTS>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<H, const SLOTS: usize> ArrayHash<H, SLOTS> {
    /// Cursor at the first record of the first non-empty slot, or the end
    /// cursor when the table is empty.
    pub fn begin(&self) -> Cursor {
        let (slot, offset) = self.seek(0);
        Cursor {
            table: self.id(),
            slot,
            offset,
            epoch: self.epoch(),
        }
    }

    pub fn end(&self) -> Cursor {
        Cursor {
            table: self.id(),
            slot: SLOTS,
            offset: 0,
            epoch: self.epoch(),
        }
    }

    pub fn iter(&self) -> Iter<'_, H, SLOTS> {
        let (slot, offset) = self.seek(0);
        Iter {
            table: self,
            slot,
            offset,
            remaining: self.len(),
        }
    }

    /// First position at or after slot `from`.
    fn seek(&self, from: usize) -> (usize, usize) {
        (from..SLOTS)
            .find(|&i| !self.slot(i).is_empty())
            .map_or((SLOTS, 0), |i| (i, 0))
    }

    fn record(&self, slot: usize, offset: usize) -> Option<Record<'_>> {
        if slot >= SLOTS {
            return None;
        }
        record_at(self.slot(slot).bytes()?, offset)
    }

    /// Position following `(slot, offset)`; the end position maps to itself.
    fn step(&self, slot: usize, offset: usize) -> (usize, usize) {
        let Some(rec) = self.record(slot, offset) else {
            return (SLOTS, 0);
        };
        match self.slot(slot).bytes() {
            Some(buf) if record_at(buf, rec.next_offset()).is_some() => (slot, rec.next_offset()),
            _ => self.seek(slot + 1),
        }
    }
}
