//! # OxiHuff Codec
//!
//! Pure Rust Huffman coding over multi-byte symbols.
//!
//! The input is split into groups of `k` consecutive bytes (the last group may
//! be shorter) and every distinct group becomes one symbol of the alphabet.
//! Compression makes two passes over the input:
//!
//! 1. [`FrequencyScanner`] counts each symbol.
//! 2. [`HuffmanTree`] turns the counts into a prefix-free [`CodewordTable`],
//!    the [`Header`] is written, and the [`Encoder`] re-reads the input and
//!    packs the codewords MSB-first.
//!
//! Decompression parses the header and expands the payload with a
//! [`Decoder`] until the recorded number of symbols has been produced.
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_codec::{compress, decompress};
//!
//! let data = b"abababababcdcdcd";
//! let packed = compress(data, 2).unwrap();
//! assert!(packed.starts_with(b"2\n8\n2\n"));
//! assert_eq!(decompress(&packed).unwrap(), data);
//! ```
//!
//! ## Files
//!
//! ```rust,no_run
//! use oxihuff_codec::{CodecConfig, compress_file, decompress_file};
//!
//! let stats = compress_file("input.bin", "Compressed.3.input.bin.hc", &CodecConfig::new(3))?;
//! println!("{} -> {} bytes", stats.total_symbols, stats.compressed_bytes());
//! decompress_file("Compressed.3.input.bin.hc", "Decompressed.input.bin")?;
//! # Ok::<(), oxihuff_core::OxiHuffError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod codeword;
pub mod config;
pub mod decode;
pub mod encode;
pub mod frequency;
pub mod groups;
pub mod header;
pub mod output;
pub mod symbol;
pub mod tree;

// Re-exports
pub use codeword::{Codeword, CodewordTable, MAX_CODEWORD_BITS};
pub use config::{CodecConfig, DEFAULT_BUFFER_CEILING};
pub use decode::{
    DecodeSummary, DecodeTrie, DecompressionSummary, Decoder, DecoderState, decompress_file,
    decompress_from, read_header,
};
pub use encode::{CompressionSummary, EncodeSummary, Encoder, compress_file, compress_with};
pub use frequency::{FrequencyScanner, FrequencyTable};
pub use groups::GroupReader;
pub use header::Header;
pub use output::ensure_distinct_paths;
pub use symbol::{ParseSymbolError, SymbolKey};
pub use tree::{HuffmanNode, HuffmanTree};

use oxihuff_core::Result;

/// Compress an in-memory buffer with `group_width`-byte symbols.
pub fn compress(data: &[u8], group_width: usize) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress_with(|| Ok(data), &mut output, &CodecConfig::new(group_width))?;
    Ok(output)
}

/// Decompress an in-memory buffer produced by [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress_from(&mut &data[..], &mut output)?;
    Ok(output)
}
