use lzwcore::{pack, Config, Decoder, LzwError};
use std::io;

#[test]
fn code_beyond_reachable_dictionary() {
    let config = Config::default();
    // After three codes the decoder knows 260 entries, 260 itself would be the unseen code.
    let stream = pack(&[b'a'.into(), b'b'.into(), b'c'.into(), 261], &config).unwrap();
    assert_eq!(
        Decoder::new().decode(&stream),
        Err(LzwError::DictionaryDesync { code: 261, size: 260 })
    );

    let stream = pack(&[b'a'.into(), b'b'.into(), b'c'.into(), 260], &config).unwrap();
    assert_eq!(Decoder::new().decode(&stream).unwrap(), b"abccc");
}

#[test]
fn first_code_must_be_literal() {
    let stream = pack(&[258], &Config::default()).unwrap();
    assert_eq!(
        Decoder::new().decode(&stream),
        Err(LzwError::DictionaryDesync { code: 258, size: 258 })
    );

    // All ones: the first code is 511.
    assert_eq!(
        Decoder::new().decode(&[0xff, 0xff, 0xff]),
        Err(LzwError::DictionaryDesync { code: 511, size: 258 })
    );
}

#[test]
fn reserved_codes_are_rejected() {
    for &code in &[256, 257] {
        let stream = pack(&[b'x'.into(), code], &Config::default()).unwrap();
        assert_eq!(Decoder::new().decode(&stream), Err(LzwError::ReservedCode(code)));
    }
}

#[test]
fn error_reaches_io_adapter() {
    let mut out = vec![];
    let result = Decoder::new()
        .into_stream(&mut out)
        .decode_all(&[0xff, 0xff, 0xff][..]);

    let err = result.status.unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("511"));
    assert!(out.is_empty());
    assert_eq!(result.bytes_written, 0);
}

#[test]
fn decoder_recovers_after_error() {
    let mut decoder = Decoder::new();
    assert!(decoder.decode(&[0xff, 0xff]).is_err());
    let compressed = lzwcore::compress(b"still works");
    assert_eq!(decoder.decode(&compressed).unwrap(), b"still works");
}
