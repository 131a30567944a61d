//! Rapidlz: FastLZ-family two-level LZ77 compression in pure Rust.
//!
//! The crate provides:
//! - Whole-buffer [`compress`] / [`decompress`] (`codec`)
//! - The single-overwrite match-finder table (`hash`)
//!
//! Streams are a flat token sequence — literal chunks and back-references —
//! with the stream [`Level`] recorded in the top 3 bits of byte 0. There is
//! no length prefix and no checksum; callers track the maximum decompressed
//! size themselves and pass it to [`decompress`].
//!
//! # Quick Start
//!
//! ```
//! let data = b"the quick brown fox jumps over the lazy dog. ".repeat(64);
//!
//! let packed = rapidlz::compress(&data).unwrap();
//! assert!(packed.len() < data.len());
//!
//! let unpacked = rapidlz::decompress(&packed, data.len()).unwrap();
//! assert_eq!(unpacked, data);
//! ```

pub mod codec;
pub mod error;
pub mod hash;

pub use codec::Level;
pub use error::Error;

/// Compress `input`, choosing the level from its length (Level 1 below
/// 64 KiB, Level 2 at or above).
///
/// The output never grows beyond roughly `2 × input.len()` and is byte-for-
/// byte deterministic for a given input.
///
/// # Errors
///
/// [`Error::EmptyInput`] if `input` is empty.
pub fn compress(input: &[u8]) -> Result<Vec<u8>, Error> {
    compress_with_level(input, Level::for_input_len(input.len()))
}

/// Compress `input` with an explicitly chosen level.
///
/// Either level can decode only its own streams, but the level marker in
/// byte 0 lets [`decompress`] route automatically. Level 1 on large inputs
/// simply forgoes far matches; Level 2 on small inputs costs nothing.
///
/// # Errors
///
/// [`Error::EmptyInput`] if `input` is empty.
pub fn compress_with_level(input: &[u8], level: Level) -> Result<Vec<u8>, Error> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    let out = codec::compress(input, level);
    log::debug!(
        "compressed {} bytes to {} ({:?})",
        input.len(),
        out.len(),
        level
    );
    Ok(out)
}

/// Decompress a stream produced by [`compress`].
///
/// `max_out` is the caller-declared maximum decompressed size; the format
/// has no self-describing length field, so any replay that would exceed it
/// is rejected.
///
/// # Errors
///
/// - [`Error::EmptyInput`] if `input` is empty.
/// - [`Error::UnknownLevel`] if byte 0 carries an unrecognized level tag.
/// - [`Error::CorruptStream`] if any token is truncated, references data
///   before the start of the output, or would exceed `max_out`.
pub fn decompress(input: &[u8], max_out: usize) -> Result<Vec<u8>, Error> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    let out = codec::decompress(input, max_out)?;
    log::debug!("decompressed {} bytes to {}", input.len(), out.len());
    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
