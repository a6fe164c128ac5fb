//! A module for all encoding needs.
use crate::alloc::vec::Vec;
use crate::bitstream::BitPacker;
use crate::dictionary::EncodeTable;
use crate::{Code, Config};

#[cfg(feature = "std")]
use crate::AllResult;
#[cfg(feature = "std")]
use std::io::{self, Read, Write};

/// The state for encoding data with an LZW algorithm.
///
/// The same structure can be utilized for any number of independent streams, the dictionary is
/// rebuilt at the start of every call.
pub struct Encoder {
    config: Config,
    /// The current encoding symbol tree.
    table: EncodeTable,
}

/// An encoding sink.
///
/// See [`Encoder::into_stream`] on how to create this type and more information.
#[cfg(feature = "std")]
pub struct IntoStream<'d, W> {
    encoder: &'d mut Encoder,
    writer: W,
}

/// An async encoding sink.
///
/// See [`Encoder::into_async`] on how to create this type and more information.
#[cfg(feature = "async")]
pub struct IntoAsync<'d, W> {
    encoder: &'d mut Encoder,
    writer: W,
}

impl Encoder {
    /// Create a new encoder with the default code width schedule.
    pub fn new() -> Self {
        Encoder::with_config(Config::default())
    }

    /// Create a new encoder with a custom code width schedule.
    ///
    /// The decoder must be created with the same configuration.
    pub fn with_config(config: Config) -> Self {
        Encoder {
            config,
            table: EncodeTable::new(&config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Encode all of `data` into a packed stream.
    pub fn encode(&mut self, data: &[u8]) -> Vec<u8> {
        let mut packer = BitPacker::new(&self.config);
        let count = self.for_each_code(data, |code, _| packer.push(code));
        let out = packer.finish();
        log::debug!(
            "encoded {} bytes as {} codes in {} bytes, {} dictionary entries",
            data.len(),
            count,
            out.len(),
            self.table.len()
        );
        out
    }

    /// Encode all of `data` into the unpacked code sequence.
    pub fn encode_codes(&mut self, data: &[u8]) -> Vec<Code> {
        let mut codes = Vec::new();
        self.for_each_code(data, |code, _| codes.push(code));
        codes
    }

    /// Construct an encoder into a writer.
    #[cfg(feature = "std")]
    pub fn into_stream<W: Write>(&mut self, writer: W) -> IntoStream<'_, W> {
        IntoStream {
            encoder: self,
            writer,
        }
    }

    /// Construct an encoder into an async writer.
    #[cfg(feature = "async")]
    pub fn into_async<W: futures::AsyncWrite + Unpin>(&mut self, writer: W) -> IntoAsync<'_, W> {
        IntoAsync {
            encoder: self,
            writer,
        }
    }

    /// Greedy longest match parse of `data`.
    ///
    /// Calls `emit` with every code and the number of dictionary entries at the time it is
    /// emitted. Returns the number of codes.
    pub(crate) fn for_each_code(&mut self, data: &[u8], mut emit: impl FnMut(Code, usize)) -> usize {
        self.table.reset();

        let mut bytes = data.iter();
        let mut current_code = match bytes.next() {
            None => return 0,
            Some(&byte) => Code::from(byte),
        };

        let mut count = 0;
        for &byte in bytes {
            match self.table.lookup(current_code, byte) {
                Some(code) => current_code = code,
                None => {
                    emit(current_code, self.table.len());
                    count += 1;
                    self.table.insert(current_code, byte);
                    current_code = Code::from(byte);
                }
            }
        }

        emit(current_code, self.table.len());
        count + 1
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Encoder::new()
    }
}

#[cfg(feature = "std")]
impl<W: Write> IntoStream<'_, W> {
    /// Encode all data from a reader.
    ///
    /// The reader is drained before anything is written, the dictionary needs no end marker.
    pub fn encode_all(self, mut read: impl Read) -> AllResult {
        let IntoStream {
            encoder,
            mut writer,
        } = self;

        let mut data = Vec::new();
        let mut bytes_written = 0;
        let status = (|| -> io::Result<()> {
            read.read_to_end(&mut data)?;
            let out = encoder.encode(&data);
            writer.write_all(&out)?;
            writer.flush()?;
            bytes_written = out.len();
            Ok(())
        })();

        AllResult {
            bytes_read: data.len(),
            bytes_written,
            status,
        }
    }
}

#[cfg(feature = "async")]
impl<W: futures::AsyncWrite + Unpin> IntoAsync<'_, W> {
    /// Encode all data from an async reader.
    ///
    /// The writer is flushed but not closed.
    pub async fn encode_all(self, mut read: impl futures::AsyncRead + Unpin) -> AllResult {
        use futures::{AsyncReadExt, AsyncWriteExt};
        let IntoAsync {
            encoder,
            mut writer,
        } = self;

        let mut data = Vec::new();
        let mut bytes_written = 0;
        let status = async {
            read.read_to_end(&mut data).await?;
            let out = encoder.encode(&data);
            writer.write_all(&out).await?;
            writer.flush().await?;
            bytes_written = out.len();
            Ok::<(), io::Error>(())
        }
        .await;

        AllResult {
            bytes_read: data.len(),
            bytes_written,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Encoder;
    use crate::alloc::vec::Vec;
    use crate::{Code, Config};

    #[test]
    fn empty_input_has_no_codes() {
        let mut encoder = Encoder::new();
        assert!(encoder.encode_codes(b"").is_empty());
        assert!(encoder.encode(b"").is_empty());
    }

    #[test]
    fn single_byte_is_one_literal() {
        assert_eq!(Encoder::new().encode_codes(b"x"), [Code::from(b'x')]);
    }

    #[test]
    fn repeated_byte_learns_runs() {
        let mut encoder = Encoder::new();
        assert_eq!(encoder.encode_codes(b"AAA"), [65, 258]);
        assert_eq!(encoder.encode_codes(b"AAAA"), [65, 258, 65]);
        assert_eq!(encoder.encode_codes(b"AAAAAA"), [65, 258, 259]);

        // Runs of 1, 2, .., 140 and a final run of 130.
        let codes = encoder.encode_codes(&[b'A'; 10_000]);
        assert_eq!(codes.len(), 141);
    }

    #[test]
    fn classic_example() {
        let codes = Encoder::new().encode_codes(b"TOBEORNOTTOBEORTOBEORNOT");
        let expected: Vec<Code> = Vec::from(
            &[84, 79, 66, 69, 79, 82, 78, 79, 84, 258, 260, 262, 267, 261, 263, 265][..],
        );
        assert_eq!(codes, expected);
    }

    #[test]
    fn every_code_was_assigned_when_emitted() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i * i % 251) as u8 ^ (i >> 7) as u8).collect();
        let mut encoder = Encoder::new();
        let mut index = 0;
        encoder.for_each_code(&data, |code, entries| {
            assert!(usize::from(code) < entries);
            assert!(code < 256 || code >= 258);
            assert_eq!(entries, (258 + index).min(1 << 16));
            index += 1;
        });
    }

    #[test]
    fn frozen_dictionary_keeps_encoding() {
        let config = Config::with_code_sizes(9, 9).unwrap();
        let data: Vec<u8> = (0..16_384u32).map(|i| (i * 7 + i / 13) as u8).collect();
        let mut encoder = Encoder::with_config(config);
        let codes = encoder.encode_codes(&data);
        assert!(codes.iter().all(|&code| code < 512));
        assert_eq!(encoder.table.len(), 512);
    }
}
