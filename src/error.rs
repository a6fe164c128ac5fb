use crate::Code;

/// The ways in which coding can fail.
///
/// All of these are local to one call. A frozen dictionary is not an error, encoding simply
/// stops learning new phrases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LzwError {
    /// The stream referenced a code the decoder's dictionary can not have at this point.
    #[error("code {code} is out of range for a dictionary of {size} entries")]
    DictionaryDesync { code: Code, size: usize },
    /// One of the two reserved codes directly after the literals was found in the stream.
    #[error("reserved code {0} in stream")]
    ReservedCode(Code),
    /// A code does not fit the width its position in the stream allows.
    #[error("code {code} does not fit into {size} bits")]
    CodeTooWide { code: Code, size: u8 },
    /// The configured code widths can not be used.
    #[error("unsupported code sizes {min}..={max}, need 9 <= min <= max <= 16")]
    InvalidCodeSize { min: u8, max: u8 },
}
