//! Chunked input reading and symbol group partitioning.
//!
//! Both compression passes walk the input through [`GroupReader`], so the
//! frequency scan and the encoder see exactly the same group boundaries.

use crate::config::CodecConfig;
use log::trace;
use oxihuff_core::Result;
use std::io::{self, Read};

/// Reads input in buffers of whole groups and hands out each group.
///
/// Every buffer is filled completely before it is partitioned. A buffer can
/// only come back short when the reader reports end of stream, so a group
/// shorter than the group width appears at most once, as the very last group.
#[derive(Debug)]
pub struct GroupReader<R: Read> {
    reader: R,
    buffer: Vec<u8>,
    group_width: usize,
}

impl<R: Read> GroupReader<R> {
    /// Create a group reader for the given configuration.
    pub fn new(reader: R, config: &CodecConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            buffer: vec![0u8; config.chunk_size()],
            group_width: config.group_width,
        })
    }

    /// Read until the buffer is full or the stream ends.
    fn fill(&mut self) -> Result<usize> {
        let mut filled = 0;
        while filled < self.buffer.len() {
            match self.reader.read(&mut self.buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    /// Call `f` for every group in stream order. Returns the group count.
    pub fn for_each_group<F>(&mut self, mut f: F) -> Result<u64>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        let mut groups = 0u64;
        loop {
            let filled = self.fill()?;
            if filled == 0 {
                break;
            }
            trace!("read chunk of {} bytes", filled);

            for group in self.buffer[..filled].chunks(self.group_width) {
                f(group)?;
                groups += 1;
            }

            if filled < self.buffer.len() {
                break;
            }
        }
        Ok(groups)
    }
}
