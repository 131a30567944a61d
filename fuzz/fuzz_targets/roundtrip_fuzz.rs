#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let packed = rapidlz::compress(data).unwrap();
    assert!(packed.len() <= 2 * data.len());

    let unpacked = rapidlz::decompress(&packed, data.len()).unwrap();
    assert_eq!(unpacked, data);
});
