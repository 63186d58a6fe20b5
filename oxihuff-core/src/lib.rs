//! # OxiHuff Core
//!
//! Core components for the OxiHuff compressor.
//!
//! - [`bitstream`]: MSB-first bit-level I/O for the packed payload
//! - [`digest`]: SHA-256 digests for file comparison
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     oxihuff compress / decompress / info / verify       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Codec (oxihuff-codec)                                   │
//! │     scanner, Huffman tree, header, encoder, decoder     │
//! ├─────────────────────────────────────────────────────────┤
//! │ BitStream (this crate)                                  │
//! │     BitReader/BitWriter, SHA-256, OxiHuffError          │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use oxihuff_core::FileDigest;
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b0001, 4).unwrap();
//! let data = writer.finish().unwrap();
//! assert_eq!(data, vec![0x10]);
//!
//! let mut reader = BitReader::new(Cursor::new(data));
//! assert_eq!(reader.read_bits(4).unwrap(), 0b0001);
//!
//! let digest = FileDigest::from_reader(&b"Hello, World!"[..]).unwrap();
//! assert_eq!(digest.len(), 13);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod digest;
pub mod error;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use digest::FileDigest;
pub use error::{OxiHuffError, Result};
