//! Codewords and codeword tables.

use crate::symbol::SymbolKey;
use crate::tree::HuffmanNode;
use oxihuff_core::{BitWriter, OxiHuffError, Result};
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Maximum codeword length in bits.
///
/// A Huffman tree deeper than 91 levels would need more than `u64::MAX`
/// occurrences, so the encoder never gets close.
pub const MAX_CODEWORD_BITS: u8 = 128;

/// A prefix-free bit string assigned to one symbol.
///
/// Bits are kept right-aligned in `bits`; the first bit of the codeword is
/// bit `len - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codeword {
    bits: u128,
    len: u8,
}

impl Codeword {
    /// The zero-length path (root of the tree).
    pub const EMPTY: Self = Self { bits: 0, len: 0 };

    /// This codeword with one more bit appended.
    pub fn push(self, bit: bool) -> Result<Self> {
        if self.len == MAX_CODEWORD_BITS {
            return Err(OxiHuffError::invalid_argument(
                "codeword exceeds maximum length",
            ));
        }
        Ok(Self {
            bits: (self.bits << 1) | bit as u128,
            len: self.len + 1,
        })
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the codeword has no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bit `index`, counted from the first bit.
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.len());
        (self.bits >> (self.len() - 1 - index)) & 1 == 1
    }

    /// Iterate over the bits, first bit first.
    pub fn bits(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len()).map(move |i| self.bit(i))
    }

    /// Whether `self` is a prefix of `other` (or equal to it).
    pub fn is_prefix_of(&self, other: &Codeword) -> bool {
        if self.len > other.len {
            return false;
        }
        let shift = other.len - self.len;
        shift == MAX_CODEWORD_BITS || (other.bits >> shift) == self.bits
    }

    /// Append this codeword to a bitstream.
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        let mut remaining = self.len;
        while remaining > 0 {
            let take = remaining.min(32);
            let chunk = (self.bits >> (remaining - take)) as u32;
            writer.write_bits(chunk, take)?;
            remaining -= take;
        }
        Ok(())
    }
}

/// Text form: a string of `0` and `1`.
impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Codeword {
    type Err = OxiHuffError;

    fn from_str(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Err(OxiHuffError::invalid_argument("empty codeword"));
        }
        text.chars().try_fold(Codeword::EMPTY, |code, c| match c {
            '0' => code.push(false),
            '1' => code.push(true),
            other => Err(OxiHuffError::invalid_argument(format!(
                "invalid codeword character {:?}",
                other
            ))),
        })
    }
}

/// Mapping from symbol to codeword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodewordTable {
    codes: HashMap<SymbolKey, Codeword>,
}

impl CodewordTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive codewords from a tree: `0` for a left branch, `1` for a right
    /// branch. A tree that is a single leaf gets the codeword `0`.
    pub fn from_tree(root: &HuffmanNode) -> Self {
        let mut table = Self::new();
        match root {
            HuffmanNode::Leaf { symbol, .. } => {
                table.codes.insert(symbol.clone(), Codeword { bits: 0, len: 1 });
            }
            HuffmanNode::Internal { .. } => table.traverse(root, Codeword::EMPTY),
        }
        table
    }

    fn traverse(&mut self, node: &HuffmanNode, path: Codeword) {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                self.codes.insert(symbol.clone(), path);
            }
            HuffmanNode::Internal { left, right, .. } => {
                // Depth is bounded well below MAX_CODEWORD_BITS by the u64
                // frequency sums.
                let left_path = Codeword {
                    bits: path.bits << 1,
                    len: path.len + 1,
                };
                let right_path = Codeword {
                    bits: (path.bits << 1) | 1,
                    len: path.len + 1,
                };
                self.traverse(left, left_path);
                self.traverse(right, right_path);
            }
        }
    }

    /// Add an entry. Returns the previous codeword of `symbol`, if any.
    pub fn insert(&mut self, symbol: SymbolKey, code: Codeword) -> Option<Codeword> {
        self.codes.insert(symbol, code)
    }

    /// Codeword of a symbol.
    pub fn get(&self, symbol: &[u8]) -> Option<&Codeword> {
        self.codes.get(symbol)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Iterate over `(symbol, codeword)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&SymbolKey, &Codeword)> {
        self.codes.iter()
    }

    /// Entries in ascending symbol order.
    pub fn sorted(&self) -> Vec<(&SymbolKey, &Codeword)> {
        let mut entries: Vec<_> = self.codes.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Find two codewords where one is a prefix of the other.
    pub fn find_prefix_conflict(&self) -> Option<(Codeword, Codeword)> {
        // In lexicographic bit order a prefix sorts directly before the
        // codewords that extend it.
        let mut codes: Vec<Codeword> = self.codes.values().copied().collect();
        codes.sort_unstable_by(|a, b| a.bits().cmp(b.bits()));
        codes
            .windows(2)
            .find(|pair| pair[0].is_prefix_of(&pair[1]))
            .map(|pair| (pair[0], pair[1]))
    }

    /// Whether no codeword is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        self.find_prefix_conflict().is_none()
    }

    /// Total payload size in bits for the given frequencies.
    pub fn encoded_bits<'a, I>(&self, counts: I) -> u64
    where
        I: IntoIterator<Item = (&'a SymbolKey, u64)>,
    {
        counts
            .into_iter()
            .filter_map(|(symbol, count)| {
                self.get(symbol.as_bytes())
                    .map(|code| code.len() as u64 * count)
            })
            .sum()
    }
}
