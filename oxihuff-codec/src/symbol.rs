//! Symbol keys: the fixed-width byte groups that make up the alphabet.

use oxihuff_core::{OxiHuffError, Result};
use std::borrow::Borrow;
use std::fmt;
use thiserror::Error;

/// Error produced when parsing the text form of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSymbolError {
    /// No byte values at all.
    #[error("symbol has no byte values")]
    Empty,
    /// Wrong number of byte values.
    #[error("expected {expected} byte values, found {found}")]
    WrongLength {
        /// Byte count the caller asked for.
        expected: usize,
        /// Byte count present in the text.
        found: usize,
    },
    /// A field is not a signed byte.
    #[error("invalid byte value {0:?}")]
    InvalidByte(String),
}

/// An immutable group of bytes used as a map key.
///
/// Equality and hashing are structural; two keys of different lengths are
/// never equal. `SymbolKey` borrows as `[u8]`, so tables keyed by it can be
/// queried with a plain byte slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolKey(Box<[u8]>);

impl SymbolKey {
    /// Create a key from a non-empty byte sequence.
    pub fn new(bytes: impl Into<Box<[u8]>>) -> Result<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(OxiHuffError::invalid_argument("symbol must not be empty"));
        }
        Ok(Self(bytes))
    }

    /// The symbol's bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the symbol.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Parse the comma-joined signed byte form, requiring `expected` bytes.
    pub fn parse(text: &str, expected: usize) -> std::result::Result<Self, ParseSymbolError> {
        let bytes = parse_signed_bytes(text)?;
        if bytes.len() != expected {
            return Err(ParseSymbolError::WrongLength {
                expected,
                found: bytes.len(),
            });
        }
        Ok(Self(bytes.into_boxed_slice()))
    }
}

/// Parse `65,-1,0` into `[0x41, 0xFF, 0x00]`.
fn parse_signed_bytes(text: &str) -> std::result::Result<Vec<u8>, ParseSymbolError> {
    if text.is_empty() {
        return Err(ParseSymbolError::Empty);
    }
    text.split(',')
        .map(|field| {
            // Only the form `Display` writes: no sign on positives, no `-0`,
            // no leading zeros
            field
                .parse::<i8>()
                .ok()
                .filter(|value| value.to_string() == field)
                .map(|value| value as u8)
                .ok_or_else(|| ParseSymbolError::InvalidByte(field.to_string()))
        })
        .collect()
}

impl Borrow<[u8]> for SymbolKey {
    fn borrow(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for SymbolKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for SymbolKey {
    type Error = OxiHuffError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes)
    }
}

/// Comma-joined signed byte values, e.g. `65,-1`.
impl fmt::Display for SymbolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", byte as i8)?;
        }
        Ok(())
    }
}
