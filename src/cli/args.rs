//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Replug - Convert codeplug data between formats for different radios
#[derive(Parser, Debug)]
#[command(name = "replug")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a vendor CSV export directory into the neutral JSON document
    Decode {
        /// Radio model (see `replug list`)
        radio: String,

        /// Directory containing the vendor CSV export
        input: PathBuf,

        /// Output JSON file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip the validation pass after decoding
        #[arg(long, default_value = "false")]
        no_validate: bool,
    },

    /// Encode a neutral JSON codeplug into a vendor CSV import directory
    Encode {
        /// Radio model (see `replug list`)
        radio: String,

        /// Neutral JSON codeplug file
        input: PathBuf,

        /// Output directory (must not already exist)
        output: PathBuf,
    },

    /// Validate a neutral JSON codeplug
    Validate {
        /// Neutral JSON codeplug file
        input: PathBuf,
    },

    /// List supported radio models
    List,
}
