//! The `cli` module defines the command-line surface of the `ar-address-parser` binary.
use std::path::PathBuf;

use clap::Parser;

/// The `Cli` struct provides the command-line interface for the `ar-address-parser` binary.
///
/// With no flags, the binary reads address lines from stdin, one per line, and writes each
/// parsed [`crate::AddressResult`] as a line of JSON to stdout, until EOF. Passing `--source`
/// switches to batch mode: every row of the named column in a CSV file is parsed in parallel
/// and the results are written to `--output`.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a source CSV for batch mode. Omit to read address lines from stdin instead.
    #[arg(short = 's', long, help = "Path to a source CSV of address lines.")]
    pub source: Option<PathBuf>,
    /// Name of the CSV column holding address lines. Required in batch mode.
    #[arg(short = 'c', long, help = "Column holding the address line.")]
    pub column: Option<String>,
    /// Path for batch-mode CSV output.
    #[arg(
        short = 'o',
        long,
        default_value = "output.csv",
        help = "Path for batch output records."
    )]
    pub output: PathBuf,
}
