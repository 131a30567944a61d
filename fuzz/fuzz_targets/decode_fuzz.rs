#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz the decoder with arbitrary bytes.
    // The decoder must never panic — only return errors.
    let _ = rapidlz::decompress(data, 64 * 1024);

    // A tight output capacity exercises the overflow rejection paths.
    let _ = rapidlz::decompress(data, 64);
});
