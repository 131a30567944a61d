// Property-based tests over the compress/decompress pair.

use proptest::prelude::*;
use rapidlz::{Level, compress, compress_with_level, decompress};

fn level_strategy() -> impl Strategy<Value = Level> {
    prop_oneof![Just(Level::One), Just(Level::Two)]
}

proptest! {
    #[test]
    fn roundtrip_arbitrary_bytes(data in proptest::collection::vec(any::<u8>(), 1..4096)) {
        let packed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&packed, data.len()).unwrap(), data);
    }

    #[test]
    fn roundtrip_repetitive_data(
        pattern in proptest::collection::vec(any::<u8>(), 1..8),
        reps in 1usize..20_000,
    ) {
        // Repeating patterns routinely cross the 64 KiB level boundary and
        // drive the run shortcut and extended length fields.
        let data = pattern.repeat(reps);
        let packed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&packed, data.len()).unwrap(), data);
    }

    #[test]
    fn roundtrip_under_forced_level(
        data in proptest::collection::vec(any::<u8>(), 1..2048),
        level in level_strategy(),
    ) {
        let packed = compress_with_level(&data, level).unwrap();
        prop_assert_eq!(decompress(&packed, data.len()).unwrap(), data);
    }

    #[test]
    fn compression_is_deterministic(data in proptest::collection::vec(any::<u8>(), 1..2048)) {
        prop_assert_eq!(compress(&data).unwrap(), compress(&data).unwrap());
    }

    #[test]
    fn output_never_doubles(data in proptest::collection::vec(any::<u8>(), 1..4096)) {
        let packed = compress(&data).unwrap();
        prop_assert!(packed.len() <= 2 * data.len());
    }

    #[test]
    fn decoder_survives_arbitrary_streams(
        stream in proptest::collection::vec(any::<u8>(), 1..512),
        max_out in 0usize..4096,
    ) {
        // Never panics; any outcome other than a clean decode is an error.
        let _ = decompress(&stream, max_out);
    }
}
