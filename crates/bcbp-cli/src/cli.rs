//! CLI argument definitions for bcbp

use std::path::PathBuf;

use bcbp::CalendarDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bcbp")]
#[command(about = "IATA boarding pass barcode codec", long_about = None, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a barcode payload and print it as JSON
    #[command(visible_alias = "d")]
    Decode {
        /// Barcode payload (reads stdin if not provided)
        payload: Option<String>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Encode a JSON record into a barcode payload
    #[command(visible_alias = "e")]
    Encode {
        /// JSON input file (reads stdin if not provided)
        input: Option<PathBuf>,
    },

    /// Print a human-readable summary of a barcode payload
    #[command(visible_alias = "i")]
    Inspect {
        /// Barcode payload (reads stdin if not provided)
        payload: Option<String>,

        /// Date used to resolve day-of-year dates (YYYY-MM-DD, defaults to today)
        #[arg(long, env = "BCBP_REFERENCE_DATE")]
        reference_date: Option<CalendarDate>,
    },

    /// Decode a barcode payload and run semantic validation
    #[command(visible_alias = "v")]
    Validate {
        /// Barcode payload (reads stdin if not provided)
        payload: Option<String>,
    },
}
