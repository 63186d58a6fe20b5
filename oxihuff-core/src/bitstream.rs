//! Bit-level I/O for the packed Huffman payload.
//!
//! This module provides `BitReader` and `BitWriter` for reading and writing
//! data at the bit level.
//!
//! # Bit Ordering
//!
//! OxiHuff packs bits MSB-first: the first bit of the stream is the most
//! significant bit of the first byte. A final partial byte is right-padded
//! with zero bits.
//!
//! # Example
//!
//! ```
//! use oxihuff_core::bitstream::{BitReader, BitWriter};
//! use std::io::Cursor;
//!
//! let mut writer = BitWriter::new(Vec::new());
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b1100, 4).unwrap();
//! let output = writer.finish().unwrap();
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::new(Cursor::new(output));
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! ```

use crate::error::Result;
use std::io::{self, Read, Write};

/// Default size of the `BitReader` input buffer.
pub const DEFAULT_READ_BUFFER: usize = 64 * 1024;

/// A bit-level reader (MSB-first) that wraps any `Read` implementation.
///
/// Input is pulled into an internal buffer of fixed capacity, then handed out
/// one bit at a time.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Input buffer.
    buffer: Box<[u8]>,
    /// Read position in `buffer`.
    pos: usize,
    /// Number of valid bytes in `buffer`.
    len: usize,
    /// Byte currently being expanded.
    current: u8,
    /// Bits of `current` not yet handed out.
    bits_left: u8,
    /// Total bits read.
    total_bits_read: u64,
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` with the default buffer size.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_READ_BUFFER)
    }

    /// Create a new `BitReader` reading through a buffer of `capacity` bytes.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader,
            buffer: vec![0u8; capacity.max(1)].into_boxed_slice(),
            pos: 0,
            len: 0,
            current: 0,
            bits_left: 0,
            total_bits_read: 0,
        }
    }

    /// Consume this `BitReader` and return the underlying reader.
    ///
    /// Bytes already pulled into the internal buffer are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Refill the input buffer. Returns `false` at end of stream.
    fn refill(&mut self) -> Result<bool> {
        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    self.pos = 0;
                    self.len = n;
                    return Ok(true);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Read the next bit, or `None` once the stream is exhausted.
    #[inline]
    pub fn next_bit(&mut self) -> Result<Option<bool>> {
        if self.bits_left == 0 {
            if self.pos == self.len && !self.refill()? {
                return Ok(None);
            }
            self.current = self.buffer[self.pos];
            self.pos += 1;
            self.bits_left = 8;
        }

        self.bits_left -= 1;
        self.total_bits_read += 1;
        Ok(Some((self.current >> self.bits_left) & 1 == 1))
    }

    /// Read up to 32 bits, first bit in the most significant position.
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        let mut value = 0u32;
        for _ in 0..count {
            let bit = self
                .next_bit()?
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;
            value = (value << 1) | bit as u32;
        }
        Ok(value)
    }
}

/// A bit-level writer (MSB-first) that wraps any `Write` implementation.
///
/// `BitWriter` is the accumulator state of the encoder: it is threaded
/// through every input chunk, emits each byte as soon as 8 bits are pending,
/// and pads the last partial byte in [`finish`](Self::finish).
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Pending bits, right-aligned.
    buffer: u64,
    /// Number of pending bits in buffer (always < 8 between calls).
    bits_in_buffer: u8,
    /// Total bits written (padding excluded).
    total_bits_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Number of bits waiting for a full byte.
    pub fn pending_bits(&self) -> u8 {
        self.bits_in_buffer
    }

    /// Write every complete byte from the buffer.
    #[inline]
    fn flush_bytes(&mut self) -> Result<()> {
        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.writer.write_all(&[byte])?;
            self.bits_in_buffer -= 8;
        }
        Ok(())
    }

    /// Write up to 32 bits, most significant of the `count` bits first.
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = if count == 32 {
            u32::MAX
        } else {
            (1u32 << count) - 1
        };
        self.buffer = (self.buffer << count) | (value & mask) as u64;
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        self.flush_bytes()
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Pad the final partial byte with zero bits, flush, and return the writer.
    pub fn finish(mut self) -> Result<W> {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            self.buffer <<= padding;
            self.bits_in_buffer += padding;
            self.flush_bytes()?;
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}
