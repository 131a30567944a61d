// Match-finder hashing.
//
// One flat, single-occupancy table of candidate positions, keyed by a
// 13-bit hash of the 3-byte prefix at the scan cursor. Collisions silently
// degrade compression ratio, never correctness: every candidate is verified
// bytewise before a match is emitted.

pub mod table;

pub use table::{MatchTable, TABLE_SIZE, prefix_hash};
