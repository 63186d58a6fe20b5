//! SHA-256 file digests.
//!
//! Used to check that a decompressed file matches its original. The payload
//! format itself carries no checksum.

use crate::error::{OxiHuffError, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 8192;

/// SHA-256 digest and length of a byte stream.
///
/// # Example
///
/// ```
/// use oxihuff_core::FileDigest;
///
/// let digest = FileDigest::from_reader(&b"abc"[..]).unwrap();
/// assert_eq!(digest.len(), 3);
/// assert_eq!(
///     digest.to_string(),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDigest {
    sha256: [u8; 32],
    len: u64,
}

impl FileDigest {
    /// Stream a reader to its end.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; READ_BUFFER_SIZE];
        let mut len = 0u64;
        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buffer[..n]);
            len += n as u64;
        }
        Ok(Self {
            sha256: hasher.finalize().into(),
            len,
        })
    }

    /// Digest the file at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| OxiHuffError::file("open", path, e))?;
        Self::from_reader(file).map_err(|e| OxiHuffError::file("read", path, e))
    }

    /// Raw SHA-256 bytes.
    pub fn sha256(&self) -> &[u8; 32] {
        &self.sha256
    }

    /// Number of bytes digested.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.len
    }
}

/// Lowercase hex of the SHA-256.
impl fmt::Display for FileDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.sha256 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        let empty = FileDigest::from_reader(io::empty()).unwrap();
        assert_eq!(empty.len(), 0);
        assert_eq!(
            empty.to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        let abc = FileDigest::from_reader(&b"abc"[..]).unwrap();
        assert_eq!(abc.sha256()[..4], [0xba, 0x78, 0x16, 0xbf]);
    }

    #[test]
    fn test_streams_past_buffer() {
        let data = vec![0x5Au8; 20_000];
        let digest = FileDigest::from_reader(&data[..]).unwrap();
        assert_eq!(digest.len(), 20_000);
        let expected: [u8; 32] = Sha256::digest(&data).into();
        assert_eq!(digest.sha256(), &expected);

        let mut changed = data.clone();
        changed[15_000] ^= 1;
        assert_ne!(FileDigest::from_reader(&changed[..]).unwrap(), digest);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abc.txt");
        std::fs::write(&path, b"abc").unwrap();
        assert_eq!(
            FileDigest::from_path(&path).unwrap(),
            FileDigest::from_reader(&b"abc"[..]).unwrap()
        );

        let err = FileDigest::from_path(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, OxiHuffError::File { operation: "open", .. }));
    }
}
