// Level-2 match codec: near + far distances, unbounded lengths.
//
// Near matches use the Level-1 token shape with a 255-continuation length
// field instead of a single extension byte. Biased distances of 8191 and
// above escape to a far form: the low-5 distance field is forced to 31, a
// 255 marker fills the distance-low slot, and two big-endian bytes carry
// `dist - 8191`. Near encodings cap the biased distance at 8190, so the
// (31, 255) pair is unambiguous.

use super::{
    Candidate, MAX_FAR_DISTANCE, MAX_L2_DISTANCE, copy_match, literals, match_length, read_prefix,
    take,
};
use crate::error::Error;
use crate::hash::{MatchTable, prefix_hash};

// ---------------------------------------------------------------------------
// Compressor
// ---------------------------------------------------------------------------

/// Cheap RLE: when the byte behind the cursor and the 3 bytes ahead are all
/// equal, a `distance = 1` match is emitted without touching the table.
fn run_candidate(input: &[u8], pos: usize) -> Option<Candidate> {
    let b = input[pos - 1];
    (input[pos] == b && input[pos + 1] == b && input[pos + 2] == b).then_some(Candidate {
        ref_pos: pos - 1,
        distance: 1,
    })
}

/// One probe of the match finder at `pos`. Far candidates must match 5
/// bytes, not 3: the extra distance bytes would otherwise cost more than a
/// literal.
fn probe(input: &[u8], table: &mut MatchTable, pos: usize) -> Option<Candidate> {
    let seq = read_prefix(input, pos);
    let ref_pos = table.replace(prefix_hash(seq), pos);
    debug_assert!(ref_pos < pos);
    let distance = pos - ref_pos;
    if distance >= MAX_FAR_DISTANCE || read_prefix(input, ref_pos) != seq {
        return None;
    }
    if distance >= MAX_L2_DISTANCE
        && input[ref_pos + 3..ref_pos + 5] != input[pos + 3..pos + 5]
    {
        return None;
    }
    Some(Candidate { ref_pos, distance })
}

pub(crate) fn compress(input: &[u8], out: &mut Vec<u8>) {
    if input.len() < 4 {
        literals::push_run(out, input);
        return;
    }

    let mut table = MatchTable::new();
    let limit = input.len().saturating_sub(12);
    let mut anchor = 0;
    let mut pos = 2;

    while pos < limit {
        let cand = run_candidate(input, pos).or_else(|| probe(input, &mut table, pos));
        let Some(cand) = cand else {
            pos += 1;
            continue;
        };

        if pos > anchor {
            literals::push_run(out, &input[anchor..pos]);
        }
        let len = match_length(input, cand.ref_pos, pos);
        emit_match(out, len, cand.distance);

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

/// Emit one match of raw length `len >= 3` at `distance`. A single token
/// always suffices: the continuation length field is unbounded.
pub(crate) fn emit_match(out: &mut Vec<u8>, len: usize, distance: usize) {
    debug_assert!(len >= 3);
    debug_assert!((1..MAX_FAR_DISTANCE).contains(&distance));
    let m = len - 2;
    let dist = distance - 1;

    if dist < MAX_L2_DISTANCE {
        let hi = (dist >> 8) as u8;
        if m < 7 {
            out.push(((m as u8) << 5) | hi);
        } else {
            out.push((7 << 5) | hi);
            push_extended_len(out, m - 7);
        }
        out.push(dist as u8);
    } else {
        // Far escape; the extension fits 16 bits by the acceptance bound.
        let far = dist - MAX_L2_DISTANCE;
        if m < 7 {
            out.push(((m as u8) << 5) | 31);
        } else {
            out.push((7 << 5) | 31);
            push_extended_len(out, m - 7);
        }
        out.push(255);
        out.push((far >> 8) as u8);
        out.push(far as u8);
    }
}

/// 255-continuation length field: every byte equal to 255 carries on, the
/// first byte below 255 terminates.
fn push_extended_len(out: &mut Vec<u8>, mut rem: usize) {
    while rem >= 255 {
        out.push(255);
        rem -= 255;
    }
    out.push(rem as u8);
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

pub(crate) fn decompress(input: &[u8], max_out: usize) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(max_out);
    let mut ip = 1;
    let mut ctrl = input[0] & 0x1f;

    loop {
        if ctrl >= 32 {
            let mut len = ((ctrl >> 5) - 1) as usize;
            if len == 6 {
                loop {
                    let code = take(input, &mut ip)?;
                    len += code as usize;
                    if code != 255 {
                        break;
                    }
                }
            }
            let low = take(input, &mut ip)?;
            let mut dist = ((ctrl & 31) as usize) << 8 | low as usize;
            if ctrl & 31 == 31 && low == 255 {
                // Far-distance escape: 16-bit big-endian extension.
                let hi = take(input, &mut ip)? as usize;
                let lo = take(input, &mut ip)? as usize;
                dist = MAX_L2_DISTANCE + (hi << 8 | lo);
            }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_match_token() {
        let mut out = Vec::new();
        emit_match(&mut out, 3, 1);
        assert_eq!(out, [0x20, 0x00]);
    }

    #[test]
    fn continuation_length_field() {
        let mut out = Vec::new();
        emit_match(&mut out, 9, 2);
        assert_eq!(out, [0xe0, 0x00, 0x01]);

        // m - 7 = 262: one full continuation byte plus terminator.
        let mut out = Vec::new();
        emit_match(&mut out, 271, 2);
        assert_eq!(out, [0xe0, 0xff, 0x07, 0x01]);

        // Exact multiple of 255 terminates with a zero byte.
        let mut out = Vec::new();
        emit_match(&mut out, 264, 2);
        assert_eq!(out, [0xe0, 0xff, 0x00, 0x01]);
    }

    #[test]
    fn far_distance_escape() {
        // Smallest far distance: biased 8191, extension 0.
        let mut out = Vec::new();
        emit_match(&mut out, 3, 8192);
        assert_eq!(out, [0x3f, 0xff, 0x00, 0x00]);

        let mut out = Vec::new();
        emit_match(&mut out, 3, 8193);
        assert_eq!(out, [0x3f, 0xff, 0x00, 0x01]);
    }

    #[test]
    fn widest_near_distance_avoids_far_marker() {
        // Biased distance 8190: low-5 field is 31 but the low byte is 254,
        // so the decoder cannot confuse it with the far escape.
        let mut out = Vec::new();
        emit_match(&mut out, 3, 8191);
        assert_eq!(out, [0x3f, 0xfe]);
    }

    #[test]
    fn far_and_extended_combined() {
        let mut out = Vec::new();
        emit_match(&mut out, 271, 8192);
        assert_eq!(out, [0xff, 0xff, 0x07, 0xff, 0x00, 0x00]);
    }

    #[test]
    fn decode_far_match() {
        // 8193 literals then a 3-byte match at distance 8193.
        let mut stream = Vec::new();
        let lits: Vec<u8> = (0..8193u32).map(|i| (i % 251) as u8).collect();
        literals::push_run(&mut stream, &lits);
        stream.extend_from_slice(&[0x3f, 0xff, 0x00, 0x01]);
        let out = decompress(&stream, 10000).unwrap();
        assert_eq!(out.len(), 8196);
        assert_eq!(&out[8193..], &out[..3]);
    }

    #[test]
    fn decode_byte_fill_run() {
        // Two literals then a distance-1 match: pure byte replication.
        let stream = [0x01, 5, 5, 0xe0, 0x09, 0x00];
        let out = decompress(&stream, 64).unwrap();
        assert_eq!(out, vec![5u8; 20]);
    }

    #[test]
    fn compress_collapses_runs() {
        let input = vec![5u8; 20];
        let mut out = Vec::new();
        compress(&input, &mut out);
        assert_eq!(out, [0x01, 5, 5, 0xe0, 0x09, 0x00]);
    }

    #[test]
    fn decode_rejects_truncated_far_escape() {
        let stream = [0x00, b'x', 0x3f, 0xff, 0x00];
        assert_eq!(decompress(&stream, 64), Err(Error::CorruptStream));
    }

    #[test]
    fn decode_rejects_unterminated_continuation() {
        let stream = [0x00, b'x', 0xe0, 0xff, 0xff];
        assert_eq!(decompress(&stream, 1 << 20), Err(Error::CorruptStream));
    }

    #[test]
    fn run_shortcut_matches_behind_cursor() {
        let input = [9, 9, 9, 9, 9, 9, 1, 2, 3, 4, 5, 6, 7, 8];
        assert!(run_candidate(&input, 2).is_some());
        assert!(run_candidate(&input, 4).is_none());
    }

    #[test]
    fn long_run_roundtrips() {
        let input = vec![0xaau8; 9000];
        let mut out = Vec::new();
        compress(&input, &mut out);
        assert!(out.len() < 64);
        assert_eq!(decompress(&out, input.len()).unwrap(), input);
    }
}
