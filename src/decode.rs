//! A module for all decoding needs.
use crate::alloc::vec::Vec;
use crate::bitstream::CodeReader;
use crate::dictionary::DecodeTable;
use crate::{Code, Config, LzwError};

#[cfg(feature = "std")]
use crate::AllResult;
#[cfg(feature = "std")]
use std::io::{self, Read, Write};

/// The state for decoding data with an LZW algorithm.
///
/// The same structure can be utilized for any number of independent streams, the dictionary is
/// rebuilt at the start of every call.
pub struct Decoder {
    config: Config,
    /// The table of decoded codes.
    table: DecodeTable,
}

/// A decoding stream sink.
///
/// See [`Decoder::into_stream`] on how to create this type and more information.
#[cfg(feature = "std")]
pub struct IntoStream<'d, W> {
    decoder: &'d mut Decoder,
    writer: W,
}

/// An async decoding sink.
///
/// See [`Decoder::into_async`] on how to create this type and more information.
#[cfg(feature = "async")]
pub struct IntoAsync<'d, W> {
    decoder: &'d mut Decoder,
    writer: W,
}

impl Decoder {
    /// Create a new decoder with the default code width schedule.
    pub fn new() -> Self {
        Decoder::with_config(Config::default())
    }

    /// Create a new decoder with a custom code width schedule.
    ///
    /// This must match the configuration of the encoder exactly, it is not part of the stream.
    pub fn with_config(config: Config) -> Self {
        Decoder {
            config,
            table: DecodeTable::new(&config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decode a packed stream.
    ///
    /// An empty stream decodes to no data. A stream that references codes its dictionary can not
    /// have produced yet is rejected as a whole, nothing is guessed.
    pub fn decode(&mut self, data: &[u8]) -> Result<Vec<u8>, LzwError> {
        let codes = CodeReader::new(data, &self.config);
        let out = self.decode_from(codes)?;
        log::debug!(
            "decoded {} bytes into {} bytes, {} dictionary entries",
            data.len(),
            out.len(),
            self.table.len()
        );
        Ok(out)
    }

    /// Decode an unpacked code sequence.
    pub fn decode_codes(&mut self, codes: &[Code]) -> Result<Vec<u8>, LzwError> {
        self.decode_from(codes.iter().copied())
    }

    /// Construct a decoder into a writer.
    #[cfg(feature = "std")]
    pub fn into_stream<W: Write>(&mut self, writer: W) -> IntoStream<'_, W> {
        IntoStream {
            decoder: self,
            writer,
        }
    }

    /// Construct a decoder into an async writer.
    #[cfg(feature = "async")]
    pub fn into_async<W: futures::AsyncWrite + Unpin>(&mut self, writer: W) -> IntoAsync<'_, W> {
        IntoAsync {
            decoder: self,
            writer,
        }
    }

    fn decode_from(&mut self, codes: impl IntoIterator<Item = Code>) -> Result<Vec<u8>, LzwError> {
        self.decode_with(codes, |_| {})
    }

    /// Replay the dictionary over `codes`.
    ///
    /// Calls `step` with the dictionary size after each code has been processed.
    fn decode_with(
        &mut self,
        codes: impl IntoIterator<Item = Code>,
        mut step: impl FnMut(usize),
    ) -> Result<Vec<u8>, LzwError> {
        self.table.reset();

        let mut out = Vec::new();
        let mut codes = codes.into_iter();
        let mut prev = match codes.next() {
            None => return Ok(out),
            Some(code) => code,
        };

        self.table.resolve(prev, None, &mut out)?;
        step(self.table.len());

        for code in codes {
            let first = self.table.resolve(code, Some(prev), &mut out)?;
            self.table.grow(prev, first);
            step(self.table.len());
            prev = code;
        }

        Ok(out)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new()
    }
}

#[cfg(feature = "std")]
fn invalid_data(err: LzwError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

#[cfg(feature = "std")]
impl<W: Write> IntoStream<'_, W> {
    /// Decode all data from a reader.
    ///
    /// Nothing is written if the stream turns out to be corrupt.
    pub fn decode_all(self, mut read: impl Read) -> AllResult {
        let IntoStream {
            decoder,
            mut writer,
        } = self;

        let mut data = Vec::new();
        let mut bytes_written = 0;
        let status = (|| -> io::Result<()> {
            read.read_to_end(&mut data)?;
            let out = decoder.decode(&data).map_err(invalid_data)?;
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
    /// Decode all data from an async reader.
    ///
    /// The writer is flushed but not closed.
    pub async fn decode_all(self, mut read: impl futures::AsyncRead + Unpin) -> AllResult {
        use futures::{AsyncReadExt, AsyncWriteExt};
        let IntoAsync {
            decoder,
            mut writer,
        } = self;

        let mut data = Vec::new();
        let mut bytes_written = 0;
        let status = async {
            read.read_to_end(&mut data).await?;
            let out = decoder.decode(&data).map_err(invalid_data)?;
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
