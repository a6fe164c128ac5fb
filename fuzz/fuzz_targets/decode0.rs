#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|raw_data: &[u8]| {
    // Arbitrary streams either decode or are rejected, they never panic.
    let _ = lzwcore::decompress(raw_data);
});
