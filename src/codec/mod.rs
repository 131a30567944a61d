// Token-stream codec: level dispatch and shared scan/replay helpers.
//
// A compressed buffer is a flat sequence of tokens with no separators:
//   - control byte < 32  → literal chunk of `ctrl + 1` raw bytes
//   - control byte >= 32 → back-reference, grammar per stream level
// Byte 0 additionally carries the stream level in its top 3 bits; the
// selected decoder masks those bits off and reads the remainder as the
// first (always-literal) control byte.

pub mod level1;
pub mod level2;
pub mod literals;

use crate::error::Error;

/// Literal chunk size cap.
pub(crate) const MAX_COPY: usize = 32;

/// Largest raw match a single Level-1 token can carry, plus 2.
pub(crate) const MAX_LEN: usize = 256 + 8;

/// Level-1 distance bound (exclusive).
pub(crate) const MAX_L1_DISTANCE: usize = 8192;

/// Level-2 near-distance bound; biased distances at or above this use the
/// 3-byte far escape.
pub(crate) const MAX_L2_DISTANCE: usize = 8191;

/// Level-2 overall distance bound (exclusive); keeps the far extension
/// within 16 bits.
pub(crate) const MAX_FAR_DISTANCE: usize = 65535 + MAX_L2_DISTANCE - 1;

/// Inputs below this many bytes compress as Level 1.
const LEVEL1_MAX_INPUT: usize = 65536;

// ---------------------------------------------------------------------------
// Stream level
// ---------------------------------------------------------------------------

/// The two match-encoding grammars. Chosen once per compressed buffer and
/// recorded in the top 3 bits of byte 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Near matches only: 13-bit distances, one length-extension byte.
    One,
    /// Near + far matches, unbounded match lengths, run collapsing.
    Two,
}

impl Level {
    /// The level [`compress`](crate::compress) picks for an input of `len`
    /// bytes: Level 1 below 64 KiB, Level 2 at or above.
    pub fn for_input_len(len: usize) -> Self {
        if len < LEVEL1_MAX_INPUT {
            Level::One
        } else {
            Level::Two
        }
    }

    /// Read the level tag from the first byte of a compressed stream.
    pub(crate) fn from_marker(byte0: u8) -> Result<Self, Error> {
        match byte0 >> 5 {
            0 => Ok(Level::One),
            1 => Ok(Level::Two),
            tag => Err(Error::UnknownLevel(tag)),
        }
    }

    /// Bits OR'd into byte 0 of the finished stream.
    pub(crate) fn marker_bits(self) -> u8 {
        match self {
            Level::One => 0,
            Level::Two => 1 << 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Compress `input` with the given level and stamp the level marker.
///
/// The output is pre-sized to `2 × input.len()`, the worst case of the
/// literal chunk grammar, so encoding never reallocates.
pub(crate) fn compress(input: &[u8], level: Level) -> Vec<u8> {
    debug_assert!(!input.is_empty());
    let mut out = Vec::with_capacity(2 * input.len());
    match level {
        Level::One => level1::compress(input, &mut out),
        Level::Two => level2::compress(input, &mut out),
    }
    // Every stream starts with a literal-run token whose top 3 bits are
    // clear, so the marker never collides with real length bits.
    out[0] |= level.marker_bits();
    out
}

/// Route a compressed stream to the decoder its level marker names.
pub(crate) fn decompress(input: &[u8], max_out: usize) -> Result<Vec<u8>, Error> {
    debug_assert!(!input.is_empty());
    match Level::from_marker(input[0])? {
        Level::One => level1::decompress(input, max_out),
        Level::Two => level2::decompress(input, max_out),
    }
}

// ---------------------------------------------------------------------------
// Shared scan helpers
// ---------------------------------------------------------------------------

/// A verified back-reference candidate produced by the match-finder step.
///
/// Each scan position either yields a `Candidate` or falls through to the
/// literal path.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate {
    /// Earlier input position the match copies from.
    pub ref_pos: usize,
    /// Backward offset from the scan cursor (`pos - ref_pos`), unbiased.
    pub distance: usize,
}

/// Decode the 3-byte prefix at `pos` as a little-endian integer.
///
/// Explicit byte assembly, never a reinterpreting wide load; the caller
/// guarantees 3 readable bytes.
#[inline(always)]
pub(crate) fn read_prefix(input: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([input[pos], input[pos + 1], input[pos + 2], 0])
}

/// Full match length at `pos` against `ref_pos`, given an already-verified
/// 3-byte prefix. Extends greedily to the end of the input.
pub(crate) fn match_length(input: &[u8], ref_pos: usize, pos: usize) -> usize {
    debug_assert!(ref_pos < pos);
    let mut len = 3;
    while pos + len < input.len() && input[ref_pos + len] == input[pos + len] {
        len += 1;
    }
    len
}

// ---------------------------------------------------------------------------
// Shared replay helpers
// ---------------------------------------------------------------------------

/// Read one byte from the compressed stream, advancing the cursor.
#[inline(always)]
pub(crate) fn take(input: &[u8], ip: &mut usize) -> Result<u8, Error> {
    let b = *input.get(*ip).ok_or(Error::CorruptStream)?;
    *ip += 1;
    Ok(b)
}

/// Replay one back-reference: copy `len` bytes starting `dist + 1` behind
/// the output cursor. `dist` is the biased on-wire distance.
///
/// Overlapping copies are legal — byte `i` of the destination may source
/// byte `i + dist + 1` later in the same copy — so the general path is a
/// byte-by-byte loop. A `dist` of 0 is a pure byte-fill and takes an
/// explicit replicate branch instead.
pub(crate) fn copy_match(
    out: &mut Vec<u8>,
    dist: usize,
    len: usize,
    max_out: usize,
) -> Result<(), Error> {
    let pos = out.len();
    let src = pos.checked_sub(dist + 1).ok_or(Error::CorruptStream)?;
    if len > max_out - pos {
        return Err(Error::CorruptStream);
    }
    if dist == 0 {
        let b = out[src];
        out.resize(pos + len, b);
    } else {
        for i in 0..len {
            let b = out[src + i];
            out.push(b);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
