//! Decompress command implementation.

use crate::utils::{create_spinner, decompressed_path, format_size, remove_partial_output};
use oxihuff_codec::{decompress_file, ensure_distinct_paths};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// JSON statistics of a decompression run.
#[derive(Debug, Serialize)]
struct DecompressStatsJson {
    input: String,
    output: String,
    group_width: usize,
    total_symbols: u64,
    output_size: u64,
    seconds: f64,
}

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
    json: bool,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => decompressed_path(input)?,
    };
    ensure_distinct_paths(input, &output)?;

    let spinner = create_spinner(format!("Decompressing {}", input.display()), !json && !quiet);
    let start = Instant::now();
    let result = decompress_file(input, &output);
    let elapsed = start.elapsed();
    spinner.finish_and_clear();

    let summary = remove_partial_output(result, &output)?;

    if json {
        let stats = DecompressStatsJson {
            input: input.display().to_string(),
            output: output.display().to_string(),
            group_width: summary.group_width,
            total_symbols: summary.total_symbols,
            output_size: summary.payload.output_bytes,
            seconds: elapsed.as_secs_f64(),
        };
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    if !quiet {
        println!(
            "Decompressed {} -> {} ({})",
            input.display(),
            output.display(),
            format_size(summary.payload.output_bytes)
        );
    }
    println!(
        "Decompression execution time: {:.3} seconds",
        elapsed.as_secs_f64()
    );

    Ok(())
}
