//! Symbol frequency counting.

use crate::config::CodecConfig;
use crate::groups::GroupReader;
use crate::symbol::SymbolKey;
use log::debug;
use oxihuff_core::{OxiHuffError, Result};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Occurrence count of every distinct symbol in an input.
///
/// The sum of all counts always equals [`total`](Self::total).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<SymbolKey, u64>,
    total: u64,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `group`.
    pub fn record(&mut self, group: &[u8]) -> Result<()> {
        match self.counts.get_mut(group) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(SymbolKey::new(group)?, 1);
            }
        }
        self.total += 1;
        Ok(())
    }

    /// Count `count` occurrences of `symbol`.
    pub fn add(&mut self, symbol: SymbolKey, count: u64) {
        if count == 0 {
            return;
        }
        match self.counts.entry(symbol) {
            Entry::Occupied(mut e) => *e.get_mut() += count,
            Entry::Vacant(e) => {
                e.insert(count);
            }
        }
        self.total += count;
    }

    /// Occurrence count of a symbol, if it was seen.
    pub fn get(&self, symbol: &[u8]) -> Option<u64> {
        self.counts.get(symbol).copied()
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no symbol was seen.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbol occurrences.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Iterate over `(symbol, count)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&SymbolKey, u64)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    /// Entries in ascending symbol order.
    pub fn sorted(&self) -> Vec<(&SymbolKey, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl FromIterator<(SymbolKey, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (SymbolKey, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.add(symbol, count);
        }
        table
    }
}

/// First compression pass: tallies symbol groups.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyScanner {
    config: CodecConfig,
}

impl FrequencyScanner {
    /// Create a scanner for the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Scan a reader to its end.
    pub fn scan_reader<R: Read>(&self, reader: R) -> Result<FrequencyTable> {
        let mut table = FrequencyTable::new();
        let mut groups = GroupReader::new(reader, &self.config)?;
        groups.for_each_group(|group| table.record(group))?;

        debug!(
            "scanned {} symbols ({} distinct, width {})",
            table.total(),
            table.len(),
            self.config.group_width
        );
        Ok(table)
    }

    /// Scan a file.
    pub fn scan_path(&self, path: impl AsRef<Path>) -> Result<FrequencyTable> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| OxiHuffError::file("open", path, e))?;
        self.scan_reader(file).map_err(|e| e.with_file("scan", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(bytes: &[u8]) -> SymbolKey {
        SymbolKey::new(bytes).unwrap()
    }

    #[test]
    fn test_byte_frequencies() {
        let scanner = FrequencyScanner::new(CodecConfig::BYTE);
        let table = scanner.scan_reader(&[0x41u8, 0x41, 0x41, 0x42][..]).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 4);
        assert_eq!(table.get(&[0x41]), Some(3));
        assert_eq!(table.get(&[0x42]), Some(1));
    }

    #[test]
    fn test_trailing_group_counted() {
        let scanner = FrequencyScanner::new(CodecConfig::new(2));
        let table = scanner.scan_reader(&b"ababa"[..]).unwrap();

        assert_eq!(table.total(), 3);
        assert_eq!(table.get(b"ab"), Some(2));
        assert_eq!(table.get(b"a"), Some(1));
        assert_eq!(table.iter().map(|(_, c)| c).sum::<u64>(), table.total());
    }

    #[test]
    fn test_counts_across_buffers() {
        let data = b"xyz".repeat(100);
        let config = CodecConfig::new(3).with_buffer_ceiling(7);
        let table = FrequencyScanner::new(config).scan_reader(&data[..]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(b"xyz"), Some(100));
    }

    #[test]
    fn test_missing_file() {
        let scanner = FrequencyScanner::new(CodecConfig::BYTE);
        let err = scanner
            .scan_path("/nonexistent/oxihuff/input.bin")
            .unwrap_err();
        assert!(matches!(err, OxiHuffError::File { operation: "open", .. }));
    }

    /// Yields `good` bytes of `a`, then fails.
    struct FailingReader {
        good: usize,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.good == 0 {
                return Err(std::io::Error::other("device went away"));
            }
            let n = buf.len().min(self.good);
            buf[..n].fill(b'a');
            self.good -= n;
            Ok(n)
        }
    }

    #[test]
    fn test_read_error_mid_scan() {
        let config = CodecConfig::new(2).with_buffer_ceiling(4);
        let err = FrequencyScanner::new(config)
            .scan_reader(FailingReader { good: 10 })
            .unwrap_err();
        match err {
            OxiHuffError::Io(e) => assert_eq!(e.to_string(), "device went away"),
            other => panic!("expected I/O error, got {:?}", other),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_read_error_names_path() {
        // Opening a directory succeeds on Linux, reading it does not
        let dir = tempfile::tempdir().unwrap();
        let err = FrequencyScanner::new(CodecConfig::BYTE)
            .scan_path(dir.path())
            .unwrap_err();
        match err {
            OxiHuffError::File {
                operation, path, ..
            } => {
                assert_eq!(operation, "scan");
                assert_eq!(path, dir.path());
            }
            other => panic!("expected file error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_iter_and_sorted() {
        let table: FrequencyTable = [(key(b"b"), 2), (key(b"a"), 5), (key(b"b"), 1)]
            .into_iter()
            .collect();
        assert_eq!(table.total(), 8);
        let sorted = table.sorted();
        assert_eq!(sorted[0], (&key(b"a"), 5));
        assert_eq!(sorted[1], (&key(b"b"), 3));
    }
}
