//! Record layout inside a slot buffer.
//!
//! A slot buffer is a run of records closed by a zero length field:
//!
//! ```text
//! [len: i16][len bytes, last one 0] [len: i16][...] ... [0: i16]
//! ```
//!
//! `len` counts the key bytes plus the null terminator, so the empty key is
//! a record of length 1 and can never be confused with the sentinel.
//! `read_len` and `write_len` are the only places bytes are reinterpreted
//! as a length field.

use crate::error::{Error, Result};

/// Width in bytes of a record's length field (and of the sentinel).
pub const LEN_WIDTH: usize = core::mem::size_of::<i16>();

/// Largest record length, terminator included.
pub const MAX_RECORD_LEN: usize = i16::MAX as usize;

/// Longest key the table accepts.
pub const MAX_KEY_LEN: usize = MAX_RECORD_LEN - 1;

/// Record length (terminator included) for `key`, or `LengthOverflow`.
#[inline]
pub(crate) fn record_len(key: &[u8]) -> Result<i16> {
    match i16::try_from(key.len() + 1) {
        Ok(len) => Ok(len),
        Err(_) => Err(Error::LengthOverflow {
            len: key.len(),
            max: MAX_KEY_LEN,
        }),
    }
}

/// Decodes the length field at `at`; `None` if it runs past `buf`.
#[inline]
pub(crate) fn read_len(buf: &[u8], at: usize) -> Option<i16> {
    let field = buf.get(at..at.checked_add(LEN_WIDTH)?)?;
    Some(i16::from_ne_bytes([field[0], field[1]]))
}

#[inline]
pub(crate) fn write_len(out: &mut Vec<u8>, len: i16) {
    out.extend_from_slice(&len.to_ne_bytes());
}

/// Appends one record for `key`; `len` must come from [`record_len`].
#[inline]
pub(crate) fn write_record(out: &mut Vec<u8>, key: &[u8], len: i16) {
    debug_assert_eq!(len as usize, key.len() + 1);
    write_len(out, len);
    out.extend_from_slice(key);
    out.push(0);
}

#[inline]
pub(crate) fn write_sentinel(out: &mut Vec<u8>) {
    write_len(out, 0);
}

/// Bytes a buffer holding `used` bytes of records plus one more record of
/// length `len` and the sentinel occupies.
#[inline]
pub(crate) fn grown_size(used: usize, len: i16) -> usize {
    used + LEN_WIDTH + len as usize + LEN_WIDTH
}

/// A record borrowed from a slot buffer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Record<'a> {
    /// Offset of the record's length field.
    pub offset: usize,
    pub len: i16,
    /// Stored bytes, terminator included.
    pub bytes: &'a [u8],
}

impl<'a> Record<'a> {
    /// The key without its terminator.
    #[inline]
    pub fn key(&self) -> &'a [u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    /// Offset just past this record, i.e. of the next length field.
    #[inline]
    pub fn next_offset(&self) -> usize {
        self.offset + LEN_WIDTH + self.len as usize
    }
}

/// Decodes the record whose length field sits at `offset`. `None` on the
/// sentinel, and on any offset that does not start a record inside `buf`.
#[inline]
pub(crate) fn record_at(buf: &[u8], offset: usize) -> Option<Record<'_>> {
    let len = read_len(buf, offset)?;
    if len <= 0 {
        return None;
    }
    let start = offset + LEN_WIDTH;
    let bytes = buf.get(start..start + len as usize)?;
    Some(Record { offset, len, bytes })
}

/// Walks the records of one slot buffer in insertion order.
pub(crate) struct Records<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Records<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Offset of the next length field. Once the walk is exhausted this is
    /// the sentinel's offset, i.e. the bytes taken by the records.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let rec = record_at(self.buf, self.pos)?;
        self.pos = rec.next_offset();
        Some(rec)
    }
}
