//! Packing of variable width codes into bytes, most significant bit first.
use crate::alloc::vec::Vec;
use crate::dictionary::CodeSize;
use crate::{Code, Config, LzwError};

/// Writes codes with the width the schedule assigns to each of them.
pub(crate) struct BitPacker {
    code_size: CodeSize,
    /// The buffer bits, aligned to the most significant end.
    buffer: u64,
    /// The number of valid buffer bits.
    bits_in_buffer: u8,
    out: Vec<u8>,
}

/// Reads codes back, stopping at the first position where a full code no longer fits.
pub(crate) struct CodeReader<'d> {
    inp: &'d [u8],
    code_size: CodeSize,
    bit_buffer: u64,
    bits: u8,
}

/// Pack a code sequence into a byte stream.
///
/// Every code must fit the width the schedule of `config` assigns to its position, which is
/// always true for a sequence produced by the encoder with the same configuration.
pub fn pack(codes: &[Code], config: &Config) -> Result<Vec<u8>, LzwError> {
    let mut packer = BitPacker::new(config);
    for &code in codes {
        let size = packer.code_size();
        if u32::from(code) >> size != 0 {
            return Err(LzwError::CodeTooWide { code, size });
        }
        packer.push(code);
    }
    Ok(packer.finish())
}

/// Unpack all complete codes from a byte stream.
///
/// Trailing bits that do not form a whole code are padding and are ignored.
pub fn unpack(data: &[u8], config: &Config) -> Vec<Code> {
    CodeReader::new(data, config).collect()
}

impl BitPacker {
    pub(crate) fn new(config: &Config) -> Self {
        BitPacker {
            code_size: CodeSize::new(config),
            buffer: 0,
            bits_in_buffer: 0,
            out: Vec::new(),
        }
    }

    /// The width of the next code.
    pub(crate) fn code_size(&self) -> u8 {
        self.code_size.get()
    }

    pub(crate) fn push(&mut self, code: Code) {
        let size = self.code_size.get();
        debug_assert!(u32::from(code) >> size == 0, "code {} wider than {}", code, size);
        let shift = 64 - self.bits_in_buffer - size;
        self.buffer |= u64::from(code) << shift;
        self.bits_in_buffer += size;
        self.flush_out();
        self.code_size.advance();
    }

    /// Pad to a full byte and return all bytes.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        let to_byte = self.bits_in_buffer.wrapping_neg() & 0x7;
        self.bits_in_buffer += to_byte;
        self.flush_out();
        self.out
    }

    fn flush_out(&mut self) {
        while self.bits_in_buffer >= 8 {
            self.out.push((self.buffer >> 56) as u8);
            self.buffer <<= 8;
            self.bits_in_buffer -= 8;
        }
    }
}

impl<'d> CodeReader<'d> {
    pub(crate) fn new(inp: &'d [u8], config: &Config) -> Self {
        CodeReader {
            inp,
            code_size: CodeSize::new(config),
            bit_buffer: 0,
            bits: 0,
        }
    }

    fn refill_bits(&mut self) {
        let wish_count = usize::from((64 - self.bits) / 8);
        let count = wish_count.min(self.inp.len());
        if count == 0 {
            return;
        }

        let mut buffer = [0u8; 8];
        buffer[..count].copy_from_slice(&self.inp[..count]);
        self.inp = &self.inp[count..];
        self.bit_buffer |= u64::from_be_bytes(buffer) >> self.bits;
        self.bits += (count * 8) as u8;
    }
}

impl Iterator for CodeReader<'_> {
    type Item = Code;

    fn next(&mut self) -> Option<Code> {
        let size = self.code_size.get();
        if self.bits < size {
            self.refill_bits();
        }

        if self.bits < size {
            return None;
        }

        let code = (self.bit_buffer >> (64 - size)) as Code;
        self.bit_buffer <<= size;
        self.bits -= size;
        self.code_size.advance();
        Some(code)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let bits = usize::from(self.bits) + 8 * self.inp.len();
        (0, Some(bits / usize::from(self.code_size.get())))
    }
}
