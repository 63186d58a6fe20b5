//! Compression: the bitstream writer and the two-pass pipeline.
//!
//! Pass one scans the input for symbol frequencies; the Huffman tree and
//! header follow; pass two re-reads the input with the same chunking and
//! packs each symbol's codeword MSB-first.

use crate::codeword::CodewordTable;
use crate::config::CodecConfig;
use crate::frequency::FrequencyScanner;
use crate::groups::GroupReader;
use crate::header::Header;
use crate::output::{OutputWriter, ensure_distinct_paths};
use crate::tree::HuffmanTree;
use log::{debug, info};
use oxihuff_core::{BitWriter, OxiHuffError, Result};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Result of packing one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeSummary {
    /// Symbols encoded.
    pub symbols: u64,
    /// Payload bits before padding.
    pub payload_bits: u64,
    /// Payload bytes written (padding included).
    pub payload_bytes: u64,
}

impl EncodeSummary {
    /// Zero bits appended to fill the last payload byte.
    pub fn padding_bits(&self) -> u64 {
        self.payload_bytes * 8 - self.payload_bits
    }
}

/// Statistics of a finished compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionSummary {
    /// Bytes per symbol.
    pub group_width: usize,
    /// Distinct symbols.
    pub symbol_count: usize,
    /// Symbol occurrences.
    pub total_symbols: u64,
    /// Header size in bytes.
    pub header_bytes: u64,
    /// Packed payload statistics.
    pub payload: EncodeSummary,
}

impl CompressionSummary {
    /// Size of the compressed output.
    pub fn compressed_bytes(&self) -> u64 {
        self.header_bytes + self.payload.payload_bytes
    }
}

/// Maps symbol groups to codewords and packs them into bytes.
#[derive(Debug)]
pub struct Encoder<'a> {
    codewords: &'a CodewordTable,
    config: CodecConfig,
}

impl<'a> Encoder<'a> {
    /// Create an encoder for a codeword table.
    pub fn new(codewords: &'a CodewordTable, config: CodecConfig) -> Self {
        Self { codewords, config }
    }

    /// Encode every group of `reader` into `writer`.
    ///
    /// The bit accumulator is carried across read buffers; the final partial
    /// byte is padded with zero bits.
    pub fn encode<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<EncodeSummary> {
        let mut groups = GroupReader::new(reader, &self.config)?;
        let mut bits = BitWriter::new(writer);

        let symbols = groups.for_each_group(|group| {
            let code = self.codewords.get(group).ok_or_else(|| {
                OxiHuffError::unknown_symbol(
                    group
                        .iter()
                        .map(|&b| (b as i8).to_string())
                        .collect::<Vec<_>>()
                        .join(","),
                )
            })?;
            code.write_to(&mut bits)
        })?;

        let payload_bits = bits.bits_written();
        bits.finish()?;

        let summary = EncodeSummary {
            symbols,
            payload_bits,
            payload_bytes: payload_bits.div_ceil(8),
        };
        debug!(
            "encoded {} symbols into {} bits ({} padding)",
            summary.symbols,
            summary.payload_bits,
            summary.padding_bits()
        );
        Ok(summary)
    }
}

/// Compress an input that can be opened twice.
///
/// `open` is called once per pass and must yield the same bytes both times.
pub fn compress_with<R, F, W>(
    mut open: F,
    writer: &mut W,
    config: &CodecConfig,
) -> Result<CompressionSummary>
where
    R: Read,
    F: FnMut() -> Result<R>,
    W: Write,
{
    config.validate()?;

    let table = FrequencyScanner::new(*config).scan_reader(open()?)?;
    let codewords = match HuffmanTree::build(&table) {
        Some(tree) => {
            debug!("Huffman tree depth {}", tree.root().depth());
            tree.codewords()
        }
        None => CodewordTable::new(),
    };

    let header = Header::new(config.group_width, table.total(), codewords);
    let header_bytes = header.write_to(writer)?;

    let payload = Encoder::new(header.codewords(), *config).encode(open()?, &mut *writer)?;
    if payload.symbols != table.total() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "input changed between passes: scanned {} symbols, encoded {}",
                table.total(),
                payload.symbols
            ),
        )
        .into());
    }

    Ok(CompressionSummary {
        group_width: config.group_width,
        symbol_count: header.symbol_count(),
        total_symbols: table.total(),
        header_bytes,
        payload,
    })
}

/// Compress the file at `input` into a new file at `output`.
pub fn compress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &CodecConfig,
) -> Result<CompressionSummary> {
    let input = input.as_ref();
    let output = output.as_ref();

    config.validate()?;
    ensure_distinct_paths(input, output)?;
    let mut writer = OutputWriter::create(output)?;

    let summary = compress_with(
        || File::open(input).map_err(|e| OxiHuffError::file("open", input, e)),
        &mut writer,
        config,
    )
    .map_err(|e| writer.attribute(e, "compress", input))?;
    writer.finish()?;

    info!(
        "compressed {} -> {} ({} symbols of {} bytes, {} distinct)",
        input.display(),
        output.display(),
        summary.total_symbols,
        summary.group_width,
        summary.symbol_count
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codeword::Codeword;
    use crate::symbol::SymbolKey;

    fn table(entries: &[(&str, &str)]) -> CodewordTable {
        let mut codes = CodewordTable::new();
        for &(symbol, code) in entries {
            codes.insert(
                SymbolKey::new(symbol.as_bytes()).unwrap(),
                code.parse::<Codeword>().unwrap(),
            );
        }
        codes
    }

    #[test]
    fn test_pack_and_pad() {
        let codes = table(&[("A", "0"), ("B", "1")]);
        let mut out: Vec<u8> = Vec::new();
        let summary = Encoder::new(&codes, CodecConfig::BYTE)
            .encode(&[0x41u8, 0x41, 0x41, 0x42][..], &mut out)
            .unwrap();

        assert_eq!(out, vec![0x10]);
        assert_eq!(summary.symbols, 4);
        assert_eq!(summary.payload_bits, 4);
        assert_eq!(summary.padding_bits(), 4);
    }

    #[test]
    fn test_codewords_span_bytes() {
        let codes = table(&[("ab", "110"), ("cd", "0"), ("e", "111"), ("ff", "10")]);
        let mut out: Vec<u8> = Vec::new();
        Encoder::new(&codes, CodecConfig::new(2).with_buffer_ceiling(4))
            .encode(&b"abcdffabcde"[..], &mut out)
            .unwrap();
        // 110 0 10 110 0 111 -> 11001011 00111000
        assert_eq!(out, vec![0b1100_1011, 0b0011_1000]);
    }

    #[test]
    fn test_unknown_symbol() {
        let codes = table(&[("A", "0")]);
        let err = Encoder::new(&codes, CodecConfig::BYTE)
            .encode(&[0x41u8, 0xFF][..], Vec::<u8>::new())
            .unwrap_err();
        assert!(matches!(err, OxiHuffError::UnknownSymbol { ref symbol } if symbol == "-1"));
    }

    #[test]
    fn test_compress_with_example() {
        let data = [0x41u8, 0x41, 0x41, 0x42];
        let mut out: Vec<u8> = Vec::new();
        let summary = compress_with(|| Ok(&data[..]), &mut out, &CodecConfig::BYTE).unwrap();

        assert_eq!(summary.symbol_count, 2);
        assert_eq!(summary.total_symbols, 4);
        assert_eq!(summary.compressed_bytes(), out.len() as u64);
        // B pops first and takes the left branch: A=1, B=0 -> "1110"
        assert_eq!(out, b"2\n4\n1\n1,65\n0,66\n\xE0".to_vec());
    }

    #[test]
    fn test_compress_with_changed_input() {
        let mut calls = 0;
        let err = compress_with(
            || {
                calls += 1;
                Ok(if calls == 1 { &b"aaaa"[..] } else { &b"aa"[..] })
            },
            &mut Vec::<u8>::new(),
            &CodecConfig::BYTE,
        )
        .unwrap_err();
        assert!(matches!(err, OxiHuffError::Io(_)));
    }
}
