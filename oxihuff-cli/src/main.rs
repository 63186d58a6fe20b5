//! OxiHuff CLI - Huffman compression over multi-byte symbols
//!
//! Compresses a file by treating every group of `k` bytes as one symbol.

mod commands;
mod utils;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{cmd_compress, cmd_decompress, cmd_info, cmd_verify};
use std::io;
use std::path::PathBuf;
use utils::parse_group_width;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(
    author,
    version,
    about = "Pure Rust Huffman compressor over fixed-width byte groups"
)]
#[command(long_about = "
OxiHuff compresses a file with a Huffman code built over groups of k bytes.
Larger groups capture repeated multi-byte patterns at the cost of a larger
header.

Examples:
  oxihuff compress photo.bmp 3
  oxihuff compress data.bin 2 -o data.hc
  oxihuff decompress Compressed.3.photo.bmp.hc
  oxihuff info Compressed.3.photo.bmp.hc
  oxihuff verify photo.bmp Decompressed.photo.bmp
")]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Hide progress output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Bytes per symbol (k >= 1)
        #[arg(value_parser = parse_group_width)]
        group_width: usize,

        /// Output file (default: Compressed.<k>.<name>.hc beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output statistics as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// Compressed file
        input: PathBuf,

        /// Output file (default: Decompressed.<name> beside the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output statistics as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Show the header of a compressed file
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Check that two files have identical contents (SHA-256)
    Verify {
        /// First file
        left: PathBuf,

        /// Second file
        right: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            group_width,
            output,
            json,
        } => cmd_compress(&input, group_width, output.as_deref(), json, cli.quiet),
        Commands::Decompress {
            input,
            output,
            json,
        } => cmd_decompress(&input, output.as_deref(), json, cli.quiet),
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Verify { left, right } => cmd_verify(&left, &right),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "oxihuff", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
