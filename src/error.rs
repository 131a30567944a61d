// Failure modes of the public API.
//
// All errors are detected synchronously and carry no partial output; a
// failed call is all-or-nothing.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A zero-length buffer was passed to compress or decompress.
    #[error("input is empty")]
    EmptyInput,

    /// A token is truncated, references data before the start of the
    /// output, or would exceed the declared output capacity.
    #[error("corrupt compressed stream")]
    CorruptStream,

    /// Byte 0 carries a level tag with no corresponding decoder.
    #[error("unknown compression level tag {0:#05b}")]
    UnknownLevel(u8),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
