//! Error type shared by every fallible table operation.

use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned by [`ArrayHash`](crate::ArrayHash) and its cursors.
#[derive(Clone, Copy, Debug, Error, Eq, Hash, PartialEq)]
pub enum Error {
    /// The key does not fit the record length field. `len` is the key's
    /// byte length, `max` the longest key a record can hold.
    #[error("key of {len} bytes exceeds the maximum key length of {max} bytes")]
    LengthOverflow { len: usize, max: usize },

    /// A slot buffer could not be allocated. The table is left unchanged.
    #[error("out of memory")]
    OutOfMemory,

    /// The cursor was taken before the table was last modified.
    #[error("cursor is stale: the table was modified after it was created")]
    StaleCursor,

    /// The cursor was taken from a different table.
    #[error("cursor belongs to a different table")]
    WrongTable,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Error {
        Error::OutOfMemory
    }
}

pub type Result<T> = core::result::Result<T, Error>;
