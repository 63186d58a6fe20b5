//! End-to-end tests for the `oxihuff` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn oxihuff(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oxihuff"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run oxihuff")
}

#[test]
fn test_compress_decompress_verify() {
    let dir = TempDir::new().unwrap();
    let data = b"abcabcabcabcxyz".repeat(50);
    fs::write(dir.path().join("sample.txt"), &data).unwrap();

    let out = oxihuff(&["compress", "sample.txt", "3", "-q"], dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Compression execution time"));
    assert!(stdout.contains("Compression ratio"));
    assert!(dir.path().join("Compressed.3.sample.txt.hc").exists());

    let out = oxihuff(&["d", "Compressed.3.sample.txt.hc", "-q"], dir.path());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fs::read(dir.path().join("Decompressed.sample.txt")).unwrap(),
        data
    );

    let out = oxihuff(
        &["verify", "sample.txt", "Decompressed.sample.txt"],
        dir.path(),
    );
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let digests: Vec<&str> = stdout
        .lines()
        .take(2)
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(digests.len(), 2);
    assert_eq!(digests[0].len(), 64);
    assert_eq!(digests[0], digests[1]);
    assert!(stdout.contains("OK: files are identical"));
}

#[test]
fn test_json_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.bin"), b"AAAB").unwrap();

    let out = oxihuff(&["compress", "in.bin", "1", "-o", "in.hc", "--json"], dir.path());
    assert!(out.status.success());
    let stats: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(stats["total_symbols"], 4);
    assert_eq!(stats["distinct_symbols"], 2);
    assert_eq!(stats["original_size"], 4);

    let out = oxihuff(&["info", "in.hc", "--json"], dir.path());
    assert!(out.status.success());
    let info: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(info["group_width"], 1);
    assert_eq!(info["payload_size"], 1);
}

#[test]
fn test_verify_mismatch_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a"), b"one").unwrap();
    fs::write(dir.path().join("b"), b"two").unwrap();

    let out = oxihuff(&["verify", "a", "b"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).starts_with("Error:"));
}

#[test]
fn test_failed_decompress_removes_output() {
    let dir = TempDir::new().unwrap();
    // Header promises 9 symbols, the payload byte holds 8
    fs::write(dir.path().join("broken.hc"), b"2\n9\n1\n0,97\n1,98\n\x0F").unwrap();

    let out = oxihuff(&["decompress", "broken.hc", "-o", "restored", "-q"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("restored").exists());
}

#[test]
fn test_invalid_group_width() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.bin"), b"data").unwrap();

    let out = oxihuff(&["compress", "in.bin", "0"], dir.path());
    assert!(!out.status.success());
    assert!(!dir.path().join("Compressed.0.in.bin.hc").exists());
}

#[test]
fn test_output_over_input_is_refused() {
    let dir = TempDir::new().unwrap();
    let data = b"precious bytes".to_vec();
    fs::write(dir.path().join("f.bin"), &data).unwrap();

    let out = oxihuff(&["compress", "f.bin", "1", "-o", "f.bin", "-q"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("same file"));
    assert_eq!(fs::read(dir.path().join("f.bin")).unwrap(), data);

    let out = oxihuff(&["compress", "f.bin", "1", "-o", "f.hc", "-q"], dir.path());
    assert!(out.status.success());
    let packed = fs::read(dir.path().join("f.hc")).unwrap();

    let out = oxihuff(&["decompress", "f.hc", "-o", "./f.hc", "-q"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(dir.path().join("f.hc")).unwrap(), packed);
}
