use futures::io::Cursor;
use lzwcore::{Decoder, Encoder};
use tokio_util::compat::{TokioAsyncReadCompatExt, TokioAsyncWriteCompatExt};

#[tokio::test]
async fn async_roundtrip() {
    let data = b"TOBEORNOTTOBEORTOBEORNOT".repeat(1 << 10);
    let (client, server) = tokio::io::duplex(1 << 12);

    let input = data.clone();
    let writer = tokio::spawn(async move {
        let mut encoder = Encoder::new();
        // Dropping the write half ends the reader's stream.
        let result = encoder
            .into_async(client.compat_write())
            .encode_all(Cursor::new(input))
            .await;
        result.status.map(|()| result.bytes_written)
    });

    let mut decoder = Decoder::new();
    let mut output = Cursor::new(vec![]);
    let result = decoder
        .into_async(&mut output)
        .decode_all(server.compat())
        .await;

    let written = writer.await.unwrap().unwrap();
    assert!(result.status.is_ok(), "{:?}", result.status);
    assert_eq!(result.bytes_read, written);
    assert_eq!(output.into_inner(), data);
}

#[tokio::test]
async fn async_corrupt_stream() {
    let mut decoder = Decoder::new();
    let mut output = Cursor::new(vec![]);
    let result = decoder
        .into_async(&mut output)
        .decode_all(Cursor::new(vec![0xff, 0xff, 0xff]))
        .await;

    let err = result.status.unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(output.into_inner().is_empty());
}
