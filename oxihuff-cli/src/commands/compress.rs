//! Compress command implementation.

use crate::utils::{
    compressed_path, compression_ratio, create_spinner, format_size, remove_partial_output,
};
use oxihuff_codec::{CodecConfig, compress_file, ensure_distinct_paths};
use oxihuff_core::OxiHuffError;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// JSON statistics of a compression run.
#[derive(Debug, Serialize)]
struct CompressStatsJson {
    input: String,
    output: String,
    group_width: usize,
    distinct_symbols: usize,
    total_symbols: u64,
    original_size: u64,
    compressed_size: u64,
    header_size: u64,
    ratio: f64,
    seconds: f64,
}

pub fn cmd_compress(
    input: &Path,
    group_width: usize,
    output: Option<&Path>,
    json: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => compressed_path(input, group_width)?,
    };
    let original_size = fs::metadata(input)
        .map_err(|e| OxiHuffError::file("open", input, e))?
        .len();
    // Checked here so a refused run never reaches the cleanup below
    ensure_distinct_paths(input, &output)?;

    let spinner = create_spinner(format!("Compressing {}", input.display()), !json && !quiet);
    let start = Instant::now();
    let result = compress_file(input, &output, &CodecConfig::new(group_width));
    let elapsed = start.elapsed();
    spinner.finish_and_clear();

    let summary = remove_partial_output(result, &output)?;
    let compressed_size = summary.compressed_bytes();
    let ratio = compression_ratio(original_size, compressed_size);

    if json {
        let stats = CompressStatsJson {
            input: input.display().to_string(),
            output: output.display().to_string(),
            group_width,
            distinct_symbols: summary.symbol_count,
            total_symbols: summary.total_symbols,
            original_size,
            compressed_size,
            header_size: summary.header_bytes,
            ratio,
            seconds: elapsed.as_secs_f64(),
        };
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if !quiet {
        println!("Compressed {} -> {}", input.display(), output.display());
        println!(
            "  Symbols: {} of {} bytes ({} distinct)",
            summary.total_symbols, group_width, summary.symbol_count
        );
    }
    println!(
        "Compression execution time: {:.3} seconds",
        elapsed.as_secs_f64()
    );
    println!(
        "Original file size: {} bytes ({})",
        original_size,
        format_size(original_size)
    );
    println!(
        "New file size: {} bytes ({}, header {} bytes)",
        compressed_size,
        format_size(compressed_size),
        summary.header_bytes
    );
    println!("Compression ratio: {:.4}", ratio);

    Ok(())
}
