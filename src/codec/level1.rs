// Level-1 match codec: near-distance-only grammar.
//
// Match token: control byte `(min(m,7) << 5) | (dist >> 8)` where `m` is the
// raw match length minus 2 and `dist` the distance minus 1; a single
// extension byte `m - 7` follows when `m >= 7`, then the distance low byte.
// Matches too long for one token split into maximal 262-raw-byte tokens
// carrying the same distance; the final token always keeps at least a
// 3-byte match.

use super::{
    Candidate, MAX_L1_DISTANCE, MAX_LEN, copy_match, literals, match_length, read_prefix, take,
};
use crate::error::Error;
use crate::hash::{MatchTable, prefix_hash};

/// Largest on-wire length field value a single token can carry.
const MAX_TOKEN: usize = MAX_LEN - 2;

// ---------------------------------------------------------------------------
// Compressor
// ---------------------------------------------------------------------------

/// One probe of the match finder at `pos`. The table slot is refreshed
/// before the candidate is judged, so later collisions always see the most
/// recent position even when this probe is rejected.
fn probe(input: &[u8], table: &mut MatchTable, pos: usize) -> Option<Candidate> {
    let seq = read_prefix(input, pos);
    let ref_pos = table.replace(prefix_hash(seq), pos);
    debug_assert!(ref_pos < pos);
    let distance = pos - ref_pos;
    if distance >= MAX_L1_DISTANCE || read_prefix(input, ref_pos) != seq {
        return None;
    }
    Some(Candidate { ref_pos, distance })
}

pub(crate) fn compress(input: &[u8], out: &mut Vec<u8>) {
    if input.len() < 4 {
        // Too short for match finding: a single literal-only token.
        literals::push_run(out, input);
        return;
    }

    let mut table = MatchTable::new();
    // Stop scanning near the end; the short tail is flushed as literals.
    let limit = input.len().saturating_sub(12);
    let mut anchor = 0;
    let mut pos = 2;

    while pos < limit {
        let Some(cand) = probe(input, &mut table, pos) else {
            pos += 1;
            continue;
        };

        if pos > anchor {
            literals::push_run(out, &input[anchor..pos]);
        }
        let len = match_length(input, cand.ref_pos, pos);
        emit_match(out, len, cand.distance);

        // Refresh the table over the last two bytes of the match, then
        // resume scanning at the first byte past it.
        let end = pos + len;
        for p in [end - 2, end - 1] {
            if p + 3 <= input.len() {
                table.insert(prefix_hash(read_prefix(input, p)), p);
            }
        }
        anchor = end;
        pos = end;
    }

    if anchor < input.len() {
        literals::push_run(out, &input[anchor..]);
    }
}

/// Emit one match of raw length `len >= 3` at `distance`, splitting into
/// multiple tokens when the length field overflows.
pub(crate) fn emit_match(out: &mut Vec<u8>, len: usize, distance: usize) {
    debug_assert!(len >= 3);
    debug_assert!((1..=MAX_L1_DISTANCE).contains(&distance));
    let dist = distance - 1;
    let hi = (dist >> 8) as u8;
    let mut m = len - 2;

    // Non-final tokens each carry 262 raw bytes, so the final token is
    // always left with a representable match of at least 3 bytes.
    while m > MAX_TOKEN {
        out.push((7 << 5) | hi);
        out.push((MAX_TOKEN - 7 - 2) as u8);
        out.push(dist as u8);
        m -= MAX_TOKEN;
    }

    if m < 7 {
        out.push(((m as u8) << 5) | hi);
        out.push(dist as u8);
    } else {
        out.push((7 << 5) | hi);
        out.push((m - 7) as u8);
        out.push(dist as u8);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

pub(crate) fn decompress(input: &[u8], max_out: usize) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(max_out);
    let mut ip = 1;
    // Byte 0 doubles as the level marker; masked, it is always the first
    // literal-run control byte.
    let mut ctrl = input[0] & 0x1f;

    loop {
        if ctrl >= 32 {
            let mut len = ((ctrl >> 5) - 1) as usize;
            if len == 6 {
                len += take(input, &mut ip)? as usize;
            }
            let low = take(input, &mut ip)? as usize;
            let dist = ((ctrl & 31) as usize) << 8 | low;
            copy_match(&mut out, dist, len + 3, max_out)?;
        } else {
            literals::copy_chunk(input, &mut ip, &mut out, ctrl as usize + 1, max_out)?;
        }

        if ip >= input.len() {
            break;
        }
        ctrl = input[ip];
        ip += 1;
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
