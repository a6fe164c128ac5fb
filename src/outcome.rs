//! The contract shared by codecs that are compared against each other.
//!
//! A [`Codec`] only has to provide its raw encoding and decoding. Measuring a codec with
//! [`Codec::compress`] times both directions and checks that the data survived the round trip.
use std::fmt;
use std::time::{Duration, Instant};

use crate::{Config, Decoder, Encoder, LzwError};

/// A lossless compression algorithm.
pub trait Codec {
    /// The failure of decoding a corrupt stream.
    type Error: fmt::Display;

    /// A human readable name of the algorithm.
    fn name(&self) -> &str;

    /// Compress all of `data`.
    fn encode(&self, data: &[u8]) -> Vec<u8>;

    /// Decompress a complete stream produced by `encode`.
    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, Self::Error>;

    /// Compress `input` and measure the result.
    ///
    /// The compressed data is immediately decompressed again to time the reverse direction and
    /// verify its integrity.
    fn compress(&self, input: &[u8]) -> CompressionOutcome {
        let start = Instant::now();
        let compressed = self.encode(input);
        let compression_time = start.elapsed();

        let start = Instant::now();
        let decompressed = self.decompress(&compressed);
        let decompression_time = start.elapsed();

        let integrity_ok = match decompressed {
            Ok(data) => data == input,
            Err(err) => {
                log::warn!("{} failed to decode its own output: {}", self.name(), err);
                false
            }
        };

        if !integrity_ok {
            log::warn!("{} round trip of {} bytes is not lossless", self.name(), input.len());
        }

        CompressionOutcome::new(
            self.name(),
            input.len(),
            compressed.len(),
            compression_time,
            decompression_time,
            integrity_ok,
        )
    }

    /// Decompress `input`, where empty input is empty output.
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, Self::Error> {
        if input.is_empty() {
            return Ok(Vec::new());
        }

        self.decode(input)
    }
}

/// The measurements of one compression round trip.
#[derive(Clone, Debug, PartialEq)]
pub struct CompressionOutcome {
    /// Name of the algorithm used.
    pub algorithm: String,
    /// Size of the input in bytes.
    pub original_size: usize,
    /// Size of the compressed data in bytes.
    pub compressed_size: usize,
    /// Original size divided by compressed size, `1.0` if nothing was produced.
    pub compression_ratio: f64,
    /// Time spent compressing.
    pub compression_time: Duration,
    /// Time spent decompressing the compressed data again.
    pub decompression_time: Duration,
    /// If the decompressed data was equal to the input.
    pub integrity_ok: bool,
}

impl CompressionOutcome {
    pub fn new(
        algorithm: &str,
        original_size: usize,
        compressed_size: usize,
        compression_time: Duration,
        decompression_time: Duration,
        integrity_ok: bool,
    ) -> Self {
        let compression_ratio = if compressed_size == 0 {
            1.0
        } else {
            original_size as f64 / compressed_size as f64
        };

        CompressionOutcome {
            algorithm: algorithm.to_owned(),
            original_size,
            compressed_size,
            compression_ratio,
            compression_time,
            decompression_time,
            integrity_ok,
        }
    }

    /// Bytes saved by compression, zero if the data grew.
    pub fn space_savings(&self) -> usize {
        self.original_size.saturating_sub(self.compressed_size)
    }
}

impl fmt::Display for CompressionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {} bytes, ratio {:.3}, compress {:.3} ms, decompress {:.3} ms, {}",
            self.algorithm,
            self.original_size,
            self.compressed_size,
            self.compression_ratio,
            self.compression_time.as_secs_f64() * 1000.0,
            self.decompression_time.as_secs_f64() * 1000.0,
            if self.integrity_ok { "ok" } else { "CORRUPT" },
        )
    }
}

/// The LZW codec of this crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lzw {
    config: Config,
}

impl Lzw {
    pub fn new() -> Self {
        Lzw::default()
    }

    pub fn with_config(config: Config) -> Self {
        Lzw { config }
    }
}

impl Codec for Lzw {
    type Error = LzwError;

    fn name(&self) -> &str {
        "LZW"
    }

    fn encode(&self, data: &[u8]) -> Vec<u8> {
        Encoder::with_config(self.config).encode(data)
    }

    fn decode(&self, data: &[u8]) -> Result<Vec<u8>, LzwError> {
        Decoder::with_config(self.config).decode(data)
    }
}

#[cfg(test)]
mod tests {
    use super::{Codec, CompressionOutcome, Lzw};
    use std::time::Duration;

    /// Stores data unchanged but loses the last byte on the way back.
    struct Lossy;

    impl Codec for Lossy {
        type Error = String;

        fn name(&self) -> &str {
            "lossy"
        }

        fn encode(&self, data: &[u8]) -> Vec<u8> {
            data.to_vec()
        }

        fn decode(&self, data: &[u8]) -> Result<Vec<u8>, String> {
            Ok(data[..data.len() - 1].to_vec())
        }
    }

    #[test]
    fn measures_lzw_round_trip() {
        let input = b"TOBEORNOTTOBEORTOBEORNOT".repeat(64);
        let outcome = Lzw::new().compress(&input);
        assert_eq!(outcome.algorithm, "LZW");
        assert_eq!(outcome.original_size, input.len());
        assert!(outcome.compressed_size < input.len());
        assert!(outcome.compression_ratio > 1.0);
        assert!(outcome.integrity_ok);
        assert_eq!(outcome.space_savings(), input.len() - outcome.compressed_size);
    }

    #[test]
    fn empty_input() {
        let outcome = Lzw::new().compress(b"");
        assert_eq!(outcome.compressed_size, 0);
        assert_eq!(outcome.compression_ratio, 1.0);
        assert!(outcome.integrity_ok);
        assert_eq!(Lzw::new().decompress(&[]), Ok(Vec::new()));
    }

    #[test]
    fn flags_lossy_codecs() {
        let outcome = Lossy.compress(b"abc");
        assert!(!outcome.integrity_ok);
        // Empty input never reaches `decode`.
        assert!(Lossy.compress(b"").integrity_ok);
    }

    #[test]
    fn summary_line() {
        let outcome = CompressionOutcome::new(
            "LZW",
            100,
            40,
            Duration::from_millis(2),
            Duration::from_micros(500),
            true,
        );
        assert_eq!(
            outcome.to_string(),
            "LZW: 100 -> 40 bytes, ratio 2.500, compress 2.000 ms, decompress 0.500 ms, ok"
        );
    }
}
