use lzwcore::{Config, Decoder, Encoder};
use std::{env, fs};

#[test]
fn roundtrip_all() {
    let file = env::args().next().unwrap();
    let data = fs::read(file).unwrap();

    for &(min, max) in &[(9, 16), (9, 12), (12, 12), (9, 9)] {
        let config = Config::with_code_sizes(min, max).unwrap();
        for &mask in &[0xff, 0x3f, 0x03] {
            let data: Vec<_> = data.iter().copied().map(|b| b & mask).collect();
            assert_roundtrips(&data, config);
        }
    }
}

#[test]
fn roundtrip_stream() {
    let data = b"TOBEORNOTTOBEORTOBEORNOT".repeat(100);

    let mut encoder = Encoder::new();
    let mut buffer = vec![];
    let result = encoder.into_stream(&mut buffer).encode_all(data.as_slice());
    assert!(result.status.is_ok());
    assert_eq!(result.bytes_read, data.len());
    assert_eq!(result.bytes_written, buffer.len());

    let mut decoder = Decoder::new();
    let mut compare = vec![];
    let result = decoder.into_stream(&mut compare).decode_all(buffer.as_slice());
    assert!(result.status.is_ok(), "{:?}", result.status);
    assert_eq!(result.bytes_read, buffer.len());
    assert_eq!(result.bytes_written, data.len());
    assert_eq!(compare, data);
}

#[test]
fn short_inputs() {
    let inputs: &[&[u8]] = &[b"", b"a", b"ab", b"aaa", b"abcdefgh", &[0], &[255, 255]];
    for &input in inputs {
        assert_roundtrips(input, Config::default());
    }
}

#[test]
fn crate_level_functions() {
    let data = b"abracadabra, abracadabra, abracadabra";
    let compressed = lzwcore::compress(data);
    assert!(compressed.len() < data.len());
    assert_eq!(lzwcore::decompress(&compressed).unwrap(), &data[..]);
}

fn assert_roundtrips(data: &[u8], config: Config) {
    let mut encoder = Encoder::with_config(config);
    let buffer = encoder.encode(data);

    let mut decoder = Decoder::with_config(config);
    let compare = decoder.decode(&buffer);
    assert!(compare.is_ok(), "{:?}: {:?}", config, compare);
    assert!(data == &*compare.unwrap(), "{:?}", config);
}
