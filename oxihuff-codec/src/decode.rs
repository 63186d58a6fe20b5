//! Decompression: header parsing and bitstream expansion.
//!
//! The decoder walks a binary trie built from the codeword table, one payload
//! bit at a time. Reaching a leaf emits that symbol and restarts at the root.
//! Decoding stops as soon as the recorded number of symbols has been emitted,
//! so the zero bits padding the last byte are never interpreted.

use crate::codeword::CodewordTable;
use crate::config::{CodecConfig, DEFAULT_BUFFER_CEILING};
use crate::header::Header;
use crate::output::{OutputWriter, ensure_distinct_paths};
use crate::symbol::SymbolKey;
use log::{debug, info};
use oxihuff_core::{BitReader, OxiHuffError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

/// Index of the trie root.
const ROOT: usize = 0;

/// Trie node: child indices for bit `0` and bit `1`, or a symbol at a leaf.
#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: [Option<usize>; 2],
    symbol: Option<usize>,
}

/// Binary trie over the codewords of a table.
#[derive(Debug, Clone)]
pub struct DecodeTrie {
    nodes: Vec<TrieNode>,
    symbols: Vec<SymbolKey>,
}

impl DecodeTrie {
    /// Build a trie. The table must be prefix-free.
    pub fn new(table: &CodewordTable) -> Result<Self> {
        if let Some((prefix, code)) = table.find_prefix_conflict() {
            return Err(OxiHuffError::invalid_argument(format!(
                "codeword {} is a prefix of {}",
                prefix, code
            )));
        }

        let mut trie = Self {
            nodes: vec![TrieNode::default()],
            symbols: Vec::with_capacity(table.len()),
        };

        for (symbol, code) in table.sorted() {
            let mut node = ROOT;
            for bit in code.bits() {
                node = match trie.nodes[node].children[bit as usize] {
                    Some(next) => next,
                    None => {
                        let next = trie.nodes.len();
                        trie.nodes.push(TrieNode::default());
                        trie.nodes[node].children[bit as usize] = Some(next);
                        next
                    }
                };
            }
            trie.nodes[node].symbol = Some(trie.symbols.len());
            trie.symbols.push(symbol.clone());
        }

        Ok(trie)
    }

    /// Number of symbols reachable from the root.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    fn step(&self, node: usize, bit: bool) -> Option<usize> {
        self.nodes[node].children[bit as usize]
    }
}

/// Where the decoder stands after the last bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Inside a codeword.
    Accumulating,
    /// The last bit completed a codeword.
    Matched,
    /// Every recorded symbol has been emitted; further bits are ignored.
    Exhausted,
}

/// Payload statistics of a decode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeSummary {
    /// Symbols emitted.
    pub symbols: u64,
    /// Bytes written to the output.
    pub output_bytes: u64,
    /// Payload bits consumed.
    pub payload_bits: u64,
}

/// Bit-by-bit Huffman decoder.
#[derive(Debug, Clone)]
pub struct Decoder {
    trie: DecodeTrie,
    node: usize,
    remaining: u64,
    state: DecoderState,
}

impl Decoder {
    /// Create a decoder that emits `total_symbols` symbols.
    pub fn new(table: &CodewordTable, total_symbols: u64) -> Result<Self> {
        let trie = DecodeTrie::new(table)?;
        let state = if total_symbols == 0 {
            DecoderState::Exhausted
        } else {
            DecoderState::Accumulating
        };
        Ok(Self {
            trie,
            node: ROOT,
            remaining: total_symbols,
            state,
        })
    }

    /// Current state.
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// Symbols still to be decoded.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Feed one bit. `position` is only used for error reporting.
    ///
    /// Returns the symbol completed by this bit, if any.
    pub fn push_bit(&mut self, bit: bool, position: u64) -> Result<Option<&SymbolKey>> {
        if self.state == DecoderState::Exhausted {
            return Ok(None);
        }

        let next = self
            .trie
            .step(self.node, bit)
            .ok_or_else(|| OxiHuffError::invalid_code(position))?;

        match self.trie.nodes[next].symbol {
            Some(index) => {
                self.node = ROOT;
                self.remaining -= 1;
                self.state = if self.remaining == 0 {
                    DecoderState::Exhausted
                } else {
                    DecoderState::Matched
                };
                Ok(Some(&self.trie.symbols[index]))
            }
            None => {
                self.node = next;
                self.state = DecoderState::Accumulating;
                Ok(None)
            }
        }
    }

    /// Decode a packed payload from `reader` into `writer`.
    ///
    /// `capacity` is the size of the payload read buffer.
    pub fn decode_reader<R: Read, W: Write>(
        &mut self,
        reader: R,
        mut writer: W,
        capacity: usize,
    ) -> Result<DecodeSummary> {
        let mut bits = BitReader::with_capacity(reader, capacity);
        let mut summary = DecodeSummary::default();

        while self.state != DecoderState::Exhausted {
            let position = bits.bits_read();
            let Some(bit) = bits.next_bit()? else {
                return Err(OxiHuffError::unexpected_eof(self.remaining));
            };
            if let Some(symbol) = self.push_bit(bit, position)? {
                writer.write_all(symbol.as_bytes())?;
                summary.symbols += 1;
                summary.output_bytes += symbol.width() as u64;
            }
        }

        writer.flush()?;
        summary.payload_bits = bits.bits_read();
        debug!(
            "decoded {} symbols ({} bytes) from {} bits",
            summary.symbols, summary.output_bytes, summary.payload_bits
        );
        Ok(summary)
    }
}

/// Statistics of a finished decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressionSummary {
    /// Bytes per symbol.
    pub group_width: usize,
    /// Distinct symbols.
    pub symbol_count: usize,
    /// Symbol occurrences.
    pub total_symbols: u64,
    /// Header size in bytes.
    pub header_bytes: u64,
    /// Payload statistics.
    pub payload: DecodeSummary,
}

/// Payload read buffer for a given group width.
fn payload_capacity(group_width: usize) -> usize {
    let config = CodecConfig::new(group_width);
    match config.validate() {
        Ok(()) => config.chunk_size(),
        Err(_) => DEFAULT_BUFFER_CEILING,
    }
}

/// Decompress a header and payload from `reader` into `writer`.
pub fn decompress_from<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<DecompressionSummary> {
    let header = Header::read_from(reader)?;
    let payload = Decoder::new(header.codewords(), header.total_symbols())?.decode_reader(
        reader,
        writer,
        payload_capacity(header.group_width()),
    )?;

    Ok(DecompressionSummary {
        group_width: header.group_width(),
        symbol_count: header.symbol_count(),
        total_symbols: header.total_symbols(),
        header_bytes: header.encoded_len(),
        payload,
    })
}

/// Read only the header of a compressed file.
pub fn read_header(path: impl AsRef<Path>) -> Result<Header> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| OxiHuffError::file("open", path, e))?;
    Header::read_from(&mut BufReader::new(file)).map_err(|e| e.with_file("read", path))
}

/// Decompress the file at `input` into a new file at `output`.
///
/// The output file is only created once the header has been parsed.
pub fn decompress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<DecompressionSummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    ensure_distinct_paths(input, output)?;
    let file = File::open(input).map_err(|e| OxiHuffError::file("open", input, e))?;
    let mut reader = BufReader::new(file);
    let header = Header::read_from(&mut reader).map_err(|e| e.with_file("read", input))?;
    let mut decoder = Decoder::new(header.codewords(), header.total_symbols())?;

    let mut writer = OutputWriter::create(output)?;
    let payload = decoder
        .decode_reader(
            &mut reader,
            &mut writer,
            payload_capacity(header.group_width()),
        )
        .map_err(|e| writer.attribute(e, "decode", input))?;
    writer.finish()?;

    info!(
        "decompressed {} -> {} ({} symbols, {} bytes)",
        input.display(),
        output.display(),
        payload.symbols,
        payload.output_bytes
    );
    Ok(DecompressionSummary {
        group_width: header.group_width(),
        symbol_count: header.symbol_count(),
        total_symbols: header.total_symbols(),
        header_bytes: header.encoded_len(),
        payload,
    })
}
