// Single-slot hash table over 3-byte prefixes.
//
// No chaining — last write wins, and a new insertion unconditionally
// overwrites any previous occupant. Slot value 0 doubles as the "unset"
// sentinel, so a probe of an untouched slot yields candidate position 0;
// the caller's bytewise acceptance test makes that benign.

/// log2 of the table size.
pub const TABLE_LOG: u32 = 13;

/// Number of slots: `2^13`.
pub const TABLE_SIZE: usize = 1 << TABLE_LOG;

/// Hash a 3-byte little-endian prefix to a table index.
///
/// Knuth multiplicative hash; the top `TABLE_LOG` bits of the product give
/// a well-distributed 13-bit index for typical binary and text data.
#[inline(always)]
pub fn prefix_hash(seq: u32) -> usize {
    debug_assert!(seq <= 0x00ff_ffff);
    (seq.wrapping_mul(2_654_435_769) >> (32 - TABLE_LOG)) as usize
}

/// Fixed-size table of candidate positions for the compressor scan.
///
/// Local to a single compression call; never persisted or reused as a
/// dictionary across calls.
pub struct MatchTable {
    slots: Vec<usize>,
}

impl MatchTable {
    /// Allocate a zeroed table (all slots unset).
    pub fn new() -> Self {
        Self {
            slots: vec![0; TABLE_SIZE],
        }
    }

    /// Store `pos` in the slot for `hash`, returning the previous occupant.
    ///
    /// The store happens unconditionally, before the caller decides whether
    /// to accept the candidate, so a later collision at the same hash always
    /// sees the most recent position. Returned positions are never in the
    /// future relative to the scan cursor.
    #[inline(always)]
    pub fn replace(&mut self, hash: usize, pos: usize) -> usize {
        std::mem::replace(&mut self.slots[hash], pos)
    }

    /// Overwrite the slot for `hash` without reading it.
    ///
    /// Used to refresh the table at a match boundary, where the previous
    /// occupant is not a useful candidate.
    #[inline(always)]
    pub fn insert(&mut self, hash: usize, pos: usize) {
        self.slots[hash] = pos;
    }
}

impl Default for MatchTable {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
