//! Error types for OxiHuff operations.
//!
//! This module provides a single error type covering every failure of a
//! compress or decompress run: I/O errors (with the file and the operation
//! that failed), header/bitstream format errors, and invalid arguments.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for OxiHuff operations.
#[derive(Debug, Error)]
pub enum OxiHuffError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// I/O error on a named file.
    #[error("Failed to {operation} {}: {source}", path.display())]
    File {
        /// What was being done with the file (`open`, `scan`, ...).
        operation: &'static str,
        /// The file involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Malformed or truncated header.
    #[error("Invalid header at line {line}: {message}")]
    InvalidHeader {
        /// 1-based header line where the problem was found.
        line: usize,
        /// Description of the header error.
        message: String,
    },

    /// A bit sequence in the payload matches no codeword.
    #[error("Invalid Huffman code at bit position {bit_position}")]
    InvalidCode {
        /// Bit position (from the start of the payload) of the offending bit.
        bit_position: u64,
    },

    /// Payload ended before every recorded symbol was decoded.
    #[error("Unexpected end of file: expected {expected} more symbols")]
    UnexpectedEof {
        /// Number of symbols still missing.
        expected: u64,
    },

    /// A symbol was found that has no codeword.
    #[error("No codeword for symbol [{symbol}]")]
    UnknownSymbol {
        /// Text form of the symbol.
        symbol: String,
    },

    /// Invalid argument (group width, empty symbol, ...).
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the problem.
        message: String,
    },
}

/// Result type alias for OxiHuff operations.
pub type Result<T> = std::result::Result<T, OxiHuffError>;

impl OxiHuffError {
    /// Create a file I/O error.
    pub fn file(operation: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::File {
            operation,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid code error.
    pub fn invalid_code(bit_position: u64) -> Self {
        Self::InvalidCode { bit_position }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: u64) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create an unknown symbol error.
    pub fn unknown_symbol(symbol: impl Into<String>) -> Self {
        Self::UnknownSymbol {
            symbol: symbol.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Attach a file path and operation to a bare I/O error.
    ///
    /// Errors that already carry context are returned unchanged.
    pub fn with_file(self, operation: &'static str, path: impl AsRef<Path>) -> Self {
        match self {
            Self::Io(source) => Self::file(operation, path, source),
            other => other,
        }
    }

    /// Whether this error belongs to the format class (bad header or payload).
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidHeader { .. }
                | Self::InvalidCode { .. }
                | Self::UnexpectedEof { .. }
                | Self::UnknownSymbol { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiHuffError::invalid_header(3, "group width must be positive");
        assert!(err.to_string().contains("line 3"));

        let err = OxiHuffError::invalid_code(42);
        assert!(err.to_string().contains("42"));

        let err = OxiHuffError::file(
            "open",
            "/tmp/missing.hc",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        let text = err.to_string();
        assert!(text.contains("open"));
        assert!(text.contains("/tmp/missing.hc"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: OxiHuffError = io_err.into();
        assert!(matches!(err, OxiHuffError::Io(_)));

        let err = err.with_file("scan", "input.bin");
        assert!(matches!(err, OxiHuffError::File { operation: "scan", .. }));
    }

    #[test]
    fn test_with_file_keeps_format_errors() {
        let err = OxiHuffError::unexpected_eof(3).with_file("decode", "x.hc");
        assert!(matches!(err, OxiHuffError::UnexpectedEof { expected: 3 }));
        assert!(err.is_format_error());
    }
}
