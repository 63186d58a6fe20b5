//! Compressed file header.
//!
//! The header is plain text, one field per line, each line ending in `\n`:
//!
//! ```text
//! <symbol count>
//! <total symbol occurrences>
//! <group width>
//! <codeword>,<b0>,<b1>,...      (one line per symbol)
//! ```
//!
//! Codewords are strings of `0`/`1`; `b0..` are the symbol's bytes as signed
//! decimal values. Symbol lines are written in ascending symbol order. The
//! packed bitstream starts immediately after the last line.

use crate::codeword::{Codeword, CodewordTable};
use crate::symbol::{ParseSymbolError, SymbolKey};
use log::debug;
use oxihuff_core::{OxiHuffError, Result};
use std::collections::HashSet;
use std::fmt::Write as _;
use std::io::{BufRead, Write};

/// Header line holding the symbol count.
const LINE_SYMBOL_COUNT: usize = 1;
/// Header line holding the occurrence count.
const LINE_TOTAL: usize = 2;
/// Header line holding the group width.
const LINE_GROUP_WIDTH: usize = 3;
/// First symbol line.
const LINE_FIRST_SYMBOL: usize = 4;

/// Parsed or to-be-written header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    group_width: usize,
    total_symbols: u64,
    codewords: CodewordTable,
}

impl Header {
    /// Create a header.
    pub fn new(group_width: usize, total_symbols: u64, codewords: CodewordTable) -> Self {
        Self {
            group_width,
            total_symbols,
            codewords,
        }
    }

    /// Bytes per symbol.
    pub fn group_width(&self) -> usize {
        self.group_width
    }

    /// Total symbol occurrences in the original input.
    pub fn total_symbols(&self) -> u64 {
        self.total_symbols
    }

    /// Number of distinct symbols.
    pub fn symbol_count(&self) -> usize {
        self.codewords.len()
    }

    /// The codeword table.
    pub fn codewords(&self) -> &CodewordTable {
        &self.codewords
    }

    /// Render one symbol line (without the newline).
    fn symbol_line(line: &mut String, symbol: &SymbolKey, code: &Codeword) {
        line.clear();
        // Writing to a String cannot fail.
        let _ = write!(line, "{},{}", code, symbol);
    }

    /// Serialize the header. Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<u64> {
        let preamble = format!(
            "{}\n{}\n{}\n",
            self.codewords.len(),
            self.total_symbols,
            self.group_width
        );
        writer.write_all(preamble.as_bytes())?;
        let mut written = preamble.len() as u64;

        let mut line = String::new();
        for (symbol, code) in self.codewords.sorted() {
            Self::symbol_line(&mut line, symbol, code);
            line.push('\n');
            writer.write_all(line.as_bytes())?;
            written += line.len() as u64;
        }

        debug!(
            "wrote header: {} symbols, {} occurrences, width {}, {} bytes",
            self.codewords.len(),
            self.total_symbols,
            self.group_width,
            written
        );
        Ok(written)
    }

    /// Size of the serialized header in bytes.
    pub fn encoded_len(&self) -> u64 {
        let mut len = format!(
            "{}\n{}\n{}\n",
            self.codewords.len(),
            self.total_symbols,
            self.group_width
        )
        .len() as u64;

        let mut line = String::new();
        for (symbol, code) in self.codewords.iter() {
            Self::symbol_line(&mut line, symbol, code);
            len += line.len() as u64 + 1;
        }
        len
    }

    /// Parse a header, leaving `reader` positioned at the first payload byte.
    pub fn read_from<R: BufRead>(reader: &mut R) -> Result<Self> {
        let mut lines = HeaderLines::new(reader);

        let symbol_count: usize = lines.number(LINE_SYMBOL_COUNT, "symbol count")?;
        let total_symbols: u64 = lines.number(LINE_TOTAL, "occurrence count")?;
        let group_width: usize = lines.number(LINE_GROUP_WIDTH, "group width")?;

        if group_width == 0 {
            return Err(OxiHuffError::invalid_header(
                LINE_GROUP_WIDTH,
                "group width must be at least 1",
            ));
        }
        if (symbol_count == 0) != (total_symbols == 0) {
            return Err(OxiHuffError::invalid_header(
                LINE_TOTAL,
                format!(
                    "{} occurrences of {} distinct symbols",
                    total_symbols, symbol_count
                ),
            ));
        }

        let mut codewords = CodewordTable::new();
        let mut seen_codes = HashSet::new();
        let mut short_symbol = false;

        for index in 0..symbol_count {
            let line_no = LINE_FIRST_SYMBOL + index;
            let line = lines.next_line(line_no)?;

            let (code_text, symbol_text) = line.split_once(',').ok_or_else(|| {
                OxiHuffError::invalid_header(line_no, "expected <codeword>,<bytes>")
            })?;

            let code: Codeword = code_text
                .parse()
                .map_err(|e: OxiHuffError| OxiHuffError::invalid_header(line_no, e.to_string()))?;

            let symbol = match SymbolKey::parse(symbol_text, group_width) {
                Ok(symbol) => symbol,
                Err(ParseSymbolError::WrongLength { found, .. })
                    if found < group_width && !short_symbol =>
                {
                    short_symbol = true;
                    SymbolKey::parse(symbol_text, found)
                        .map_err(|e| OxiHuffError::invalid_header(line_no, e.to_string()))?
                }
                Err(e) => return Err(OxiHuffError::invalid_header(line_no, e.to_string())),
            };

            if !seen_codes.insert(code) {
                return Err(OxiHuffError::invalid_header(
                    line_no,
                    format!("duplicate codeword {}", code),
                ));
            }
            if codewords.insert(symbol, code).is_some() {
                return Err(OxiHuffError::invalid_header(
                    line_no,
                    format!("duplicate symbol [{}]", symbol_text),
                ));
            }
        }

        if let Some((prefix, code)) = codewords.find_prefix_conflict() {
            return Err(OxiHuffError::invalid_header(
                LINE_FIRST_SYMBOL,
                format!("codeword {} is a prefix of {}", prefix, code),
            ));
        }

        debug!(
            "read header: {} symbols, {} occurrences, width {}",
            symbol_count, total_symbols, group_width
        );
        Ok(Self {
            group_width,
            total_symbols,
            codewords,
        })
    }
}

/// Line-by-line access to the header text.
struct HeaderLines<'a, R: BufRead> {
    reader: &'a mut R,
    buffer: Vec<u8>,
}

impl<'a, R: BufRead> HeaderLines<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }

    /// Read one `\n`-terminated line, without the terminator.
    fn next_line(&mut self, line_no: usize) -> Result<&str> {
        self.buffer.clear();
        self.reader.read_until(b'\n', &mut self.buffer)?;
        if self.buffer.pop() != Some(b'\n') {
            return Err(OxiHuffError::invalid_header(line_no, "truncated header"));
        }
        std::str::from_utf8(&self.buffer)
            .map_err(|_| OxiHuffError::invalid_header(line_no, "line is not valid text"))
    }

    /// Read a line holding one decimal number.
    fn number<T: std::str::FromStr>(&mut self, line_no: usize, what: &str) -> Result<T> {
        let line = self.next_line(line_no)?;
        line.parse().map_err(|_| {
            OxiHuffError::invalid_header(line_no, format!("invalid {} {:?}", what, line))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Read};

    fn key(bytes: &[u8]) -> SymbolKey {
        SymbolKey::new(bytes).unwrap()
    }

    fn code(text: &str) -> Codeword {
        text.parse().unwrap()
    }

    fn sample() -> Header {
        let mut codes = CodewordTable::new();
        codes.insert(key(&[0x41]), code("0"));
        codes.insert(key(&[0x42]), code("1"));
        Header::new(1, 4, codes)
    }

    fn parse(text: &str) -> Result<Header> {
        Header::read_from(&mut Cursor::new(text.as_bytes()))
    }

    #[test]
    fn test_write_format() {
        let mut out: Vec<u8> = Vec::new();
        let written = sample().write_to(&mut out).unwrap();
        assert_eq!(out, b"2\n4\n1\n0,65\n1,66\n");
        assert_eq!(written, out.len() as u64);
        assert_eq!(sample().encoded_len(), written);
    }

    #[test]
    fn test_signed_bytes_and_short_symbol() {
        let mut codes = CodewordTable::new();
        codes.insert(key(&[0xFF, 0x80]), code("10"));
        codes.insert(key(&[0x00, 0x7F]), code("0"));
        codes.insert(key(&[0x01]), code("11"));
        let header = Header::new(2, 9, codes);

        let mut out: Vec<u8> = Vec::new();
        header.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out.clone()).unwrap(),
            "3\n9\n2\n0,0,127\n11,1\n10,-1,-128\n"
        );

        let parsed = Header::read_from(&mut Cursor::new(out)).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_reader_left_at_payload() {
        let mut data = Vec::new();
        sample().write_to(&mut data).unwrap();
        data.extend_from_slice(&[0x10, 0xAB]);

        let mut reader = BufReader::new(Cursor::new(data));
        let header = Header::read_from(&mut reader).unwrap();
        assert_eq!(header.total_symbols(), 4);
        assert_eq!(header.symbol_count(), 2);
        assert_eq!(header.group_width(), 1);

        let mut payload = Vec::new();
        reader.read_to_end(&mut payload).unwrap();
        assert_eq!(payload, vec![0x10, 0xAB]);
    }

    #[test]
    fn test_empty_header() {
        let header = parse("0\n0\n3\n").unwrap();
        assert_eq!(header.symbol_count(), 0);
        assert_eq!(header.total_symbols(), 0);
        assert_eq!(header.group_width(), 3);
    }

    #[test]
    fn test_rejects_malformed() {
        let cases = [
            ("", 1),
            ("x\n1\n1\n", 1),
            ("1\n-4\n1\n", 2),
            ("1\n4\n0\n0,65\n", 3),
            ("1\n4\n1\n", 4),
            ("1\n4\n1\n0;65\n", 4),
            ("1\n4\n1\n02,65\n", 4),
            ("1\n4\n1\n0,300\n", 4),
            ("1\n4\n1\n0,+65\n", 4),
            ("1\n4\n1\n0,-0\n", 4),
            ("1\n4\n1\n0,65,66\n", 4),
            ("2\n4\n1\n0,65\n0,66\n", 5),
            ("2\n4\n1\n0,65\n1,65\n", 5),
            ("2\n4\n2\n0,65\n1,66\n", 5),
            ("2\n4\n1\n0,65\n01,66\n", 4),
            ("0\n5\n1\n", 2),
        ];
        for (text, line) in cases {
            match parse(text) {
                Err(OxiHuffError::InvalidHeader { line: got, .. }) => {
                    assert_eq!(got, line, "wrong line for {:?}", text)
                }
                other => panic!("expected header error for {:?}, got {:?}", text, other),
            }
        }
    }
}
