// Literal-run codec.
//
// A run of unmatched bytes becomes one or more chunks of at most 32 bytes:
// a control byte holding `chunk_len - 1` in its low 5 bits (top 3 clear),
// followed by the raw bytes.

use super::MAX_COPY;
use crate::error::Error;

/// Emit a literal run, splitting into `MAX_COPY`-byte chunks.
pub(crate) fn push_run(out: &mut Vec<u8>, mut lits: &[u8]) {
    debug_assert!(!lits.is_empty());
    while lits.len() > MAX_COPY {
        out.push((MAX_COPY - 1) as u8);
        out.extend_from_slice(&lits[..MAX_COPY]);
        lits = &lits[MAX_COPY..];
    }
    out.push((lits.len() - 1) as u8);
    out.extend_from_slice(lits);
}

/// Replay one literal chunk of `count` raw bytes from the compressed stream.
pub(crate) fn copy_chunk(
    input: &[u8],
    ip: &mut usize,
    out: &mut Vec<u8>,
    count: usize,
    max_out: usize,
) -> Result<(), Error> {
    let end = *ip + count;
    if end > input.len() || count > max_out - out.len() {
        return Err(Error::CorruptStream);
    }
    out.extend_from_slice(&input[*ip..end]);
    *ip = end;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_run_single_chunk() {
        let mut out = Vec::new();
        push_run(&mut out, &[9, 8, 7]);
        assert_eq!(out, [0x02, 9, 8, 7]);
    }

    #[test]
    fn exact_cap_is_one_chunk() {
        let lits = vec![5u8; 32];
        let mut out = Vec::new();
        push_run(&mut out, &lits);
        assert_eq!(out[0], 31);
        assert_eq!(out.len(), 33);
    }

    #[test]
    fn long_run_splits_at_cap() {
        let lits: Vec<u8> = (0..=64).collect();
        let mut out = Vec::new();
        push_run(&mut out, &lits);
        // 32 + 32 + 1 bytes across three chunks.
        assert_eq!(out[0], 31);
        assert_eq!(out[33], 31);
        assert_eq!(out[66], 0);
        assert_eq!(out.len(), 65 + 3);
    }

    #[test]
    fn copy_chunk_roundtrips() {
        let mut out = Vec::new();
        push_run(&mut out, b"hello");
        let mut ip = 1;
        let mut decoded = Vec::new();
        copy_chunk(&out, &mut ip, &mut decoded, out[0] as usize + 1, 64).unwrap();
        assert_eq!(decoded, b"hello");
        assert_eq!(ip, out.len());
    }

    #[test]
    fn copy_chunk_rejects_truncated_stream() {
        let stream = [0x04, b'a', b'b'];
        let mut ip = 1;
        let mut out = Vec::new();
        assert_eq!(
            copy_chunk(&stream, &mut ip, &mut out, 5, 64),
            Err(Error::CorruptStream)
        );
    }

    #[test]
    fn copy_chunk_rejects_capacity_overflow() {
        let stream = [0x04, b'a', b'b', b'c', b'd', b'e'];
        let mut ip = 1;
        let mut out = Vec::new();
        assert_eq!(
            copy_chunk(&stream, &mut ip, &mut out, 5, 4),
            Err(Error::CorruptStream)
        );
    }
}
