//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use log::warn;
use oxihuff_core::{OxiHuffError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Extension of compressed files.
pub const COMPRESSED_EXTENSION: &str = "hc";

/// Create a spinner with standard styling.
pub fn create_spinner(message: String, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} [{elapsed_precise}] {msg}")
            .expect("progress bar template is valid"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Parse a group width argument: a positive integer.
pub fn parse_group_width(text: &str) -> std::result::Result<usize, String> {
    match text.parse::<usize>() {
        Ok(0) => Err("group width must be at least 1".to_string()),
        Ok(width) => Ok(width),
        Err(_) => Err(format!("`{}` is not a positive integer", text)),
    }
}

fn file_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            OxiHuffError::invalid_argument(format!("{} has no usable file name", path.display()))
        })
}

/// Default output of `compress`: `Compressed.<k>.<name>.hc` beside the input.
pub fn compressed_path(input: &Path, group_width: usize) -> Result<PathBuf> {
    let name = file_name(input)?;
    Ok(input.with_file_name(format!(
        "Compressed.{}.{}.{}",
        group_width, name, COMPRESSED_EXTENSION
    )))
}

/// Default output of `decompress`: `Decompressed.<name>` beside the input,
/// where `<name>` is the input name without the `Compressed.<k>.` prefix
/// and the `.hc` extension.
pub fn decompressed_path(input: &Path) -> Result<PathBuf> {
    let mut name = file_name(input)?;
    if let Some(stem) = name.strip_suffix(".hc") {
        name = stem;
    }
    if let Some(rest) = name.strip_prefix("Compressed.") {
        if let Some((width, original)) = rest.split_once('.') {
            if !width.is_empty() && width.bytes().all(|b| b.is_ascii_digit()) && !original.is_empty()
            {
                name = original;
            }
        }
    }
    Ok(input.with_file_name(format!("Decompressed.{}", name)))
}

/// Compressed size relative to the original (0 for an empty original).
pub fn compression_ratio(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        0.0
    } else {
        compressed as f64 / original as f64
    }
}

/// Format a size with a binary unit.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// Delete a partially written output after a failed run.
pub fn remove_partial_output<T>(result: Result<T>, output: &Path) -> Result<T> {
    if result.is_err() {
        match fs::remove_file(output) {
            Ok(()) => warn!("removed partial output {}", output.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove {}: {}", output.display(), e),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_group_width() {
        assert_eq!(parse_group_width("3"), Ok(3));
        assert!(parse_group_width("0").is_err());
        assert!(parse_group_width("-2").is_err());
        assert!(parse_group_width("two").is_err());
    }

    #[test]
    fn test_compressed_path() {
        let path = compressed_path(Path::new("data/photo.bmp"), 3).unwrap();
        assert_eq!(path, PathBuf::from("data/Compressed.3.photo.bmp.hc"));
    }

    #[test]
    fn test_decompressed_path() {
        let path = decompressed_path(Path::new("data/Compressed.3.photo.bmp.hc")).unwrap();
        assert_eq!(path, PathBuf::from("data/Decompressed.photo.bmp"));

        let path = decompressed_path(Path::new("other.hc")).unwrap();
        assert_eq!(path, PathBuf::from("Decompressed.other"));

        let path = decompressed_path(Path::new("Compressed.x.y")).unwrap();
        assert_eq!(path, PathBuf::from("Decompressed.Compressed.x.y"));
    }

    #[test]
    fn test_path_without_name() {
        assert!(compressed_path(Path::new("/"), 1).is_err());
        assert!(decompressed_path(Path::new("..")).is_err());
    }

    #[test]
    fn test_ratio_and_size() {
        assert_eq!(compression_ratio(0, 10), 0.0);
        assert_eq!(compression_ratio(200, 50), 0.25);
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn test_remove_partial_output() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("partial.hc");
        fs::write(&output, b"half").unwrap();

        let failed: Result<()> = Err(OxiHuffError::unexpected_eof(1));
        assert!(remove_partial_output(failed, &output).is_err());
        assert!(!output.exists());

        fs::write(&output, b"done").unwrap();
        assert!(remove_partial_output(Ok(()), &output).is_ok());
        assert!(output.exists());
    }
}
