#![no_main]
use libfuzzer_sys::fuzz_target;
use lzwcore::{Config, Decoder, Encoder};

fuzz_target!(|input: (bool, &[u8])| {
    let (small, data) = input;
    // A small dictionary freezes early, exercising the static tail.
    let config = if small {
        Config::with_code_sizes(9, 10).unwrap()
    } else {
        Config::default()
    };

    let buffer = Encoder::with_config(config).encode(data);
    let result = Decoder::with_config(config).decode(&buffer);
    assert_eq!(result.as_deref(), Ok(data));
});
