//! Command-line interface definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "goldtrack", version, about = "Gold purchase dashboard client")]
pub struct Cli {
    /// Override the API server base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Subcommand to run; omit for the interactive session
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current gold price
    Price {
        /// Bypass the server-side cache
        #[arg(long)]
        refresh: bool,
    },
    /// Show the historical price for a date (YYYY-MM-DD)
    Historical { date: String },
    /// Show the purchase ledger with profit/loss summary
    List {
        /// Bypass the server-side cache
        #[arg(long)]
        refresh: bool,
    },
    /// Add a purchase
    Add {
        /// Purchase date (YYYY-MM-DD)
        date: String,
        /// Price paid, SAR per gram
        price: String,
        /// Weight in grams
        grams: String,
        /// Optional description
        #[arg(default_value = "")]
        description: String,
    },
    /// Delete a purchase by id
    Delete { id: String },
    /// Force refresh the price and the ledger
    Refresh,
    /// Import purchases from a CSV file
    Import { file: PathBuf },
    /// Export purchases to a CSV file
    Export {
        /// Destination path; defaults to the server's suggested name
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Check API server health
    Health,
}
