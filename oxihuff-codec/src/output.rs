//! Output file handling shared by the file-level compressor and decompressor.

use oxihuff_core::{OxiHuffError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Fail when `output` names the same file as `input`.
///
/// Both paths are canonicalized, so `./a`, `dir/../a` and symlinks to `a`
/// are caught. An output that does not exist yet cannot be the input.
pub fn ensure_distinct_paths(input: &Path, output: &Path) -> Result<()> {
    let input_real = fs::canonicalize(input).map_err(|e| OxiHuffError::file("open", input, e))?;
    match fs::canonicalize(output) {
        Ok(output_real) if output_real == input_real => Err(OxiHuffError::invalid_argument(
            format!(
                "output {} is the same file as input {}",
                output.display(),
                input.display()
            ),
        )),
        _ => Ok(()),
    }
}

/// Writer that remembers whether the sink itself failed.
///
/// The codec passes I/O errors from both the input and the output through
/// the same `Io` variant. The flag tells them apart afterwards.
pub(crate) struct OutputWriter<'a, W: Write> {
    inner: W,
    path: &'a Path,
    failed: bool,
}

impl<'a> OutputWriter<'a, BufWriter<File>> {
    /// Create (or truncate) `path` for writing.
    pub(crate) fn create(path: &'a Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| OxiHuffError::file("create", path, e))?;
        Ok(Self::new(BufWriter::new(file), path))
    }
}

impl<'a, W: Write> OutputWriter<'a, W> {
    pub(crate) fn new(inner: W, path: &'a Path) -> Self {
        Self {
            inner,
            path,
            failed: false,
        }
    }

    /// Attach a path to an error raised while writing through `self`.
    ///
    /// Sink failures are reported as `write` on the output. Anything else is
    /// blamed on `input` under `operation`.
    pub(crate) fn attribute(
        &self,
        err: OxiHuffError,
        operation: &'static str,
        input: &Path,
    ) -> OxiHuffError {
        match err {
            OxiHuffError::Io(source) if self.failed => {
                OxiHuffError::file("write", self.path, source)
            }
            other => other.with_file(operation, input),
        }
    }

    /// Flush buffered bytes to the output.
    pub(crate) fn finish(mut self) -> Result<()> {
        self.inner
            .flush()
            .map_err(|e| OxiHuffError::file("write", self.path, e))
    }

    fn track<T>(&mut self, result: io::Result<T>) -> io::Result<T> {
        if result.is_err() {
            self.failed = true;
        }
        result
    }
}

impl<W: Write> Write for OutputWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let result = self.inner.write(buf);
        self.track(result)
    }

    fn flush(&mut self) -> io::Result<()> {
        let result = self.inner.flush();
        self.track(result)
    }
}
