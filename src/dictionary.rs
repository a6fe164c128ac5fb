//! The dictionary shared in lockstep by encoder and decoder.
use crate::alloc::vec::Vec;
use crate::{Code, Config, LzwError, FIRST_FREE, LITERALS};

/// The width schedule of codes in the stream.
///
/// Code number `i` of a stream is at most `FIRST_FREE - 1 + i`, the largest code the encoder can
/// have assigned before emitting it. The width always covers exactly that value, so both sides
/// derive it from the count of codes alone.
#[derive(Clone, Debug)]
pub(crate) struct CodeSize {
    /// The width of the next code.
    size: u8,
    max_size: u8,
    /// The dictionary size the encoder may have reached when emitting the next code.
    entries: u32,
}

/// A tree of successors for the encoding side.
///
/// One key for at most each code. To avoid using too much memory we keep nodes with few
/// successors in optimized form. This form doesn't offer lookup by indexing but instead does a
/// linear search.
#[derive(Default)]
struct Tree {
    simples: Vec<Simple>,
    complex: Vec<Full>,
    keys: Vec<FullKey>,
}

#[derive(Clone, Copy)]
enum FullKey {
    NoSuccessor,
    Simple(u16),
    Full(u16),
}

const SHORT: usize = 16;

#[derive(Clone, Copy)]
struct Simple {
    codes: [Code; SHORT],
    chars: [u8; SHORT],
    count: u8,
}

/// A dense successor node. A zero entry marks a missing successor, as no learned code can be
/// smaller than the first free one.
#[derive(Clone, Copy)]
struct Full {
    char_continuation: [Code; 256],
}

/// The phrase to code direction of the dictionary.
pub(crate) struct EncodeTable {
    tree: Tree,
    capacity: usize,
}

#[derive(Clone, Copy)]
struct Link {
    prev: Code,
    byte: u8,
}

/// The code to phrase direction of the dictionary.
pub(crate) struct DecodeTable {
    inner: Vec<Link>,
    depths: Vec<u16>,
    capacity: usize,
}

impl CodeSize {
    pub(crate) fn new(config: &Config) -> Self {
        CodeSize {
            size: config.min_code_size(),
            max_size: config.max_code_size(),
            entries: FIRST_FREE as u32,
        }
    }

    /// The width in bits of the next code.
    pub(crate) fn get(&self) -> u8 {
        self.size
    }

    /// Account for one code written or read.
    pub(crate) fn advance(&mut self) {
        if self.entries >= 1 << self.size && self.size < self.max_size {
            self.size += 1;
        }
        self.entries = self.entries.saturating_add(1);
    }
}

impl EncodeTable {
    pub(crate) fn new(config: &Config) -> Self {
        let mut table = EncodeTable {
            tree: Tree::default(),
            capacity: config.max_entries(),
        };
        table.reset();
        table
    }

    /// Forget all learned phrases.
    pub(crate) fn reset(&mut self) {
        self.tree.reset();
    }

    /// The number of assigned codes, including literals and reserved codes.
    pub(crate) fn len(&self) -> usize {
        self.tree.keys.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Find the code of the phrase `prefix` followed by `byte`.
    pub(crate) fn lookup(&self, prefix: Code, byte: u8) -> Option<Code> {
        self.tree.at_key(prefix, byte)
    }

    /// Learn the phrase `prefix` followed by `byte`, unless the dictionary is frozen.
    pub(crate) fn insert(&mut self, prefix: Code, byte: u8) -> Option<Code> {
        if self.is_full() {
            return None;
        }

        let code = self.tree.append(prefix, byte);
        if self.is_full() {
            log::trace!("dictionary frozen at {} entries", self.capacity);
        }
        Some(code)
    }
}

impl Tree {
    fn reset(&mut self) {
        self.simples.clear();
        self.complex.clear();
        self.keys.clear();
        self.keys.resize(FIRST_FREE, FullKey::NoSuccessor);
    }

    fn at_key(&self, code: Code, ch: u8) -> Option<Code> {
        let key = self.keys[usize::from(code)];
        match key {
            FullKey::NoSuccessor => None,
            FullKey::Simple(idx) => {
                let nexts = &self.simples[usize::from(idx)];
                let successors = nexts
                    .codes
                    .iter()
                    .zip(nexts.chars.iter())
                    .take(usize::from(nexts.count));
                for (&scode, &sch) in successors {
                    if sch == ch {
                        return Some(scode);
                    }
                }

                None
            }
            FullKey::Full(idx) => {
                let full = &self.complex[usize::from(idx)];
                match full.char_continuation[usize::from(ch)] {
                    0 => None,
                    next => Some(next),
                }
            }
        }
    }

    fn append(&mut self, code: Code, ch: u8) -> Code {
        let next = self.keys.len() as Code;
        let key = self.keys[usize::from(code)];
        debug_assert!(self.at_key(code, ch).is_none(), "phrase learned twice");
        match key {
            FullKey::NoSuccessor => {
                let new_key = FullKey::Simple(self.simples.len() as u16);
                let mut simple = Simple::default();
                simple.codes[0] = next;
                simple.chars[0] = ch;
                simple.count = 1;
                self.simples.push(simple);
                self.keys[usize::from(code)] = new_key;
            }
            FullKey::Simple(idx) if usize::from(self.simples[usize::from(idx)].count) < SHORT => {
                let nexts = &mut self.simples[usize::from(idx)];
                let nidx = usize::from(nexts.count);
                nexts.chars[nidx] = ch;
                nexts.codes[nidx] = next;
                nexts.count += 1;
            }
            FullKey::Simple(idx) => {
                let new_key = FullKey::Full(self.complex.len() as u16);
                let simples = &self.simples[usize::from(idx)];
                let mut full = Full {
                    char_continuation: [0; 256],
                };
                for (&pch, &pcont) in simples.chars.iter().zip(simples.codes.iter()) {
                    full.char_continuation[usize::from(pch)] = pcont;
                }
                full.char_continuation[usize::from(ch)] = next;
                self.complex.push(full);
                self.keys[usize::from(code)] = new_key;
            }
            FullKey::Full(idx) => {
                let full = &mut self.complex[usize::from(idx)];
                full.char_continuation[usize::from(ch)] = next;
            }
        }
        self.keys.push(FullKey::NoSuccessor);
        next
    }
}

impl Default for Simple {
    fn default() -> Self {
        Simple {
            codes: [0; SHORT],
            chars: [0; SHORT],
            count: 0,
        }
    }
}

impl DecodeTable {
    pub(crate) fn new(config: &Config) -> Self {
        let capacity = config.max_entries();
        let mut table = DecodeTable {
            inner: Vec::with_capacity(capacity),
            depths: Vec::with_capacity(capacity),
            capacity,
        };
        table.reset();
        table
    }

    /// Restore the literal entries and forget everything else.
    pub(crate) fn reset(&mut self) {
        self.inner.clear();
        self.depths.clear();
        for byte in 0..=u8::MAX {
            self.inner.push(Link { prev: 0, byte });
            self.depths.push(1);
        }
        // Reserved codes, never resolved.
        for _ in LITERALS..FIRST_FREE {
            self.inner.push(Link { prev: 0, byte: 0 });
            self.depths.push(0);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Append the phrase of `code` to `out` and return its first byte.
    ///
    /// `prev` is the code read before this one, if any. It resolves the one code the decoder
    /// can not know yet: the entry the encoder created right before referencing it, which is
    /// always the previous phrase followed by its own first byte.
    pub(crate) fn resolve(
        &self,
        code: Code,
        prev: Option<Code>,
        out: &mut Vec<u8>,
    ) -> Result<u8, LzwError> {
        let idx = usize::from(code);
        if idx < LITERALS || (FIRST_FREE..self.len()).contains(&idx) {
            return Ok(self.reconstruct(code, out));
        }

        if idx < FIRST_FREE {
            return Err(LzwError::ReservedCode(code));
        }

        match prev {
            Some(prev) if idx == self.len() && !self.is_full() => {
                let first = self.reconstruct(prev, out);
                out.push(first);
                Ok(first)
            }
            _ => Err(LzwError::DictionaryDesync {
                code,
                size: self.len(),
            }),
        }
    }

    /// Learn the phrase of `prev` followed by `byte`, mirroring the encoder's insert.
    pub(crate) fn grow(&mut self, prev: Code, byte: u8) -> Option<Code> {
        if self.is_full() {
            return None;
        }

        let code = self.len() as Code;
        let depth = self.depths[usize::from(prev)] + 1;
        self.inner.push(Link { prev, byte });
        self.depths.push(depth);
        Some(code)
    }

    fn reconstruct(&self, code: Code, out: &mut Vec<u8>) -> u8 {
        let depth = usize::from(self.depths[usize::from(code)]);
        let start = out.len();
        out.resize(start + depth, 0);

        let mut code_iter = code;
        for ch in out[start..].iter_mut().rev() {
            let entry = self.inner[usize::from(code_iter)];
            *ch = entry.byte;
            code_iter = entry.prev;
        }

        out[start]
    }
}
