//! Codec configuration.

use oxihuff_core::{OxiHuffError, Result};

/// Upper bound, in bytes, of a single read buffer.
pub const DEFAULT_BUFFER_CEILING: usize = 1_000_000;

/// Codec configuration parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Bytes per symbol (k).
    pub group_width: usize,
    /// Read buffer ceiling; the actual buffer is the largest multiple of
    /// `group_width` not above it.
    pub buffer_ceiling: usize,
}

impl CodecConfig {
    /// Single-byte symbols, default buffer ceiling.
    pub const BYTE: Self = Self {
        group_width: 1,
        buffer_ceiling: DEFAULT_BUFFER_CEILING,
    };

    /// Create a configuration for `group_width`-byte symbols.
    pub fn new(group_width: usize) -> Self {
        Self {
            group_width,
            buffer_ceiling: DEFAULT_BUFFER_CEILING,
        }
    }

    /// Override the read buffer ceiling.
    pub fn with_buffer_ceiling(mut self, buffer_ceiling: usize) -> Self {
        self.buffer_ceiling = buffer_ceiling;
        self
    }

    /// Check that a non-empty buffer of whole groups can be formed.
    pub fn validate(&self) -> Result<()> {
        if self.group_width == 0 {
            return Err(OxiHuffError::invalid_argument(
                "group width must be at least 1",
            ));
        }
        if self.group_width > self.buffer_ceiling {
            return Err(OxiHuffError::invalid_argument(format!(
                "group width {} exceeds buffer ceiling {}",
                self.group_width, self.buffer_ceiling
            )));
        }
        Ok(())
    }

    /// Read buffer size: the largest multiple of the group width that does
    /// not exceed the ceiling.
    pub fn chunk_size(&self) -> usize {
        self.buffer_ceiling - self.buffer_ceiling % self.group_width
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::BYTE
    }
}
