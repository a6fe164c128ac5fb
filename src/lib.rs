//! # Adaptive dictionary (LZW) compression
//!
//! This crate provides an [`Encoder`] and a [`Decoder`] for byte-oriented LZW with a growing
//! code width. The code words are written to and read from a bit stream with the most
//! significant bit first. Codes start out 9 bits wide and grow by one bit each time the
//! dictionary could have outgrown the current width, up to a maximum of 16 bits. Once the
//! dictionary is full it is frozen and encoding continues with the entries it already has.
//!
//! The stream has no header, no clear code and no end code. The two code values directly after
//! the 256 literals are reserved and never emitted. The final byte is padded with zero bits,
//! which is unambiguous since no code is narrower than a byte.
//!
//! Exemplary use of the encoder:
//!
//! ```
//! use lzwcore::{Decoder, Encoder};
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let compressed = Encoder::new().encode(&data[..]);
//! let decompressed = Decoder::new().decode(&compressed).unwrap();
//! assert_eq!(&decompressed[..], &data[..]);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub(crate) const MIN_CODESIZE: u8 = 9;
pub(crate) const MAX_CODESIZE: u8 = 16;
/// Codes below this are the literal bytes.
pub(crate) const LITERALS: usize = 256;
/// Number of code values kept free after the literals.
pub(crate) const RESERVED_CODES: usize = 2;
/// The first code assigned to a learned phrase.
pub(crate) const FIRST_FREE: usize = LITERALS + RESERVED_CODES;

/// Alias for a LZW code point
pub type Code = u16;

mod bitstream;
mod dictionary;
mod error;

pub mod decode;
pub mod encode;
#[cfg(feature = "std")]
pub mod outcome;

pub use crate::bitstream::{pack, unpack};
pub use crate::decode::Decoder;
pub use crate::encode::Encoder;
pub use crate::error::LzwError;
#[cfg(feature = "std")]
pub use crate::outcome::{Codec, CompressionOutcome, Lzw};

/// The code width schedule shared by both sides of a stream.
///
/// Nothing of this is recorded in the compressed data, so a decoder must be configured exactly
/// like the encoder that produced its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Config {
    min_code_size: u8,
    max_code_size: u8,
}

impl Config {
    /// The default schedule, from 9 to 16 bit codes.
    pub const fn new() -> Self {
        Config {
            min_code_size: MIN_CODESIZE,
            max_code_size: MAX_CODESIZE,
        }
    }

    /// A schedule with custom initial and maximum code widths.
    ///
    /// The initial width must be at least 9 bits so that all literals and the reserved codes
    /// fit. The maximum must not exceed 16 bits, and it also bounds the dictionary to
    /// `1 << max` entries.
    pub fn with_code_sizes(min: u8, max: u8) -> Result<Self, LzwError> {
        if min < MIN_CODESIZE || max > MAX_CODESIZE || min > max {
            return Err(LzwError::InvalidCodeSize { min, max });
        }

        Ok(Config {
            min_code_size: min,
            max_code_size: max,
        })
    }

    /// The width of the first code in a stream.
    pub fn min_code_size(&self) -> u8 {
        self.min_code_size
    }

    /// The width at which code growth stops.
    pub fn max_code_size(&self) -> u8 {
        self.max_code_size
    }

    /// The number of dictionary entries, including literals and reserved codes.
    pub fn max_entries(&self) -> usize {
        1 << self.max_code_size
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

/// The total bytes moved by one of the reader/writer adapters.
#[cfg(feature = "std")]
pub struct AllResult {
    /// The total number of bytes consumed from the reader.
    pub bytes_read: usize,
    /// The total number of bytes written into the writer.
    pub bytes_written: usize,
    /// The final status of the operation.
    pub status: std::io::Result<()>,
}

/// Compress some bytes with the default configuration.
pub fn compress(data: &[u8]) -> alloc::vec::Vec<u8> {
    Encoder::new().encode(data)
}

/// Decompress a stream produced with the default configuration.
pub fn decompress(data: &[u8]) -> Result<alloc::vec::Vec<u8>, LzwError> {
    Decoder::new().decode(data)
}

#[cfg(test)]
mod tests {
    use super::{Config, LzwError};

    #[test]
    fn default_schedule() {
        let config = Config::default();
        assert_eq!(config.min_code_size(), 9);
        assert_eq!(config.max_code_size(), 16);
        assert_eq!(config.max_entries(), 65536);
    }

    #[test]
    fn rejects_unusable_code_sizes() {
        for &(min, max) in &[(8, 12), (9, 17), (12, 10), (0, 0)] {
            match Config::with_code_sizes(min, max) {
                Err(LzwError::InvalidCodeSize { min: m, max: x }) => {
                    assert_eq!((m, x), (min, max));
                }
                other => panic!("accepted {}..{}: {:?}", min, max, other),
            }
        }

        let fixed = Config::with_code_sizes(12, 12).unwrap();
        assert_eq!(fixed.max_entries(), 4096);
    }
}
