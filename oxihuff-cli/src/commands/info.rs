//! Info command implementation.

use crate::utils::format_size;
use oxihuff_codec::read_header;
use oxihuff_core::OxiHuffError;
use serde::Serialize;
use std::path::Path;

/// JSON description of a compressed file header.
#[derive(Debug, Serialize)]
struct HeaderInfoJson {
    file: String,
    size: u64,
    group_width: usize,
    distinct_symbols: usize,
    total_symbols: u64,
    header_size: u64,
    payload_size: u64,
    longest_codeword: usize,
}

pub fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let header = read_header(input)?;
    let size = std::fs::metadata(input)
        .map_err(|e| OxiHuffError::file("open", input, e))?
        .len();
    let header_size = header.encoded_len();
    let payload_size = size.saturating_sub(header_size);
    let longest_codeword = header
        .codewords()
        .iter()
        .map(|(_, code)| code.len())
        .max()
        .unwrap_or(0);

    if json {
        let info = HeaderInfoJson {
            file: input.display().to_string(),
            size,
            group_width: header.group_width(),
            distinct_symbols: header.symbol_count(),
            total_symbols: header.total_symbols(),
            header_size,
            payload_size,
            longest_codeword,
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Compressed File Information");
    println!("===========================");
    println!("File: {}", input.display());
    println!("Size: {} bytes ({})", size, format_size(size));
    println!();
    println!("Header:");
    println!("  Group width: {} bytes", header.group_width());
    println!("  Distinct symbols: {}", header.symbol_count());
    println!("  Total symbols: {}", header.total_symbols());
    println!("  Longest codeword: {} bits", longest_codeword);
    println!("  Header size: {} bytes", header_size);
    println!("  Payload size: {} bytes", payload_size);

    Ok(())
}
