use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bull call spread scanner: pair strike-adjacent calls from the BYMA
/// options board and chart their payoff at expiration.
#[derive(Parser)]
#[command(name = "bull-spread", version, about)]
pub struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Where quotes and spot prices come from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// JSON settings file (spread parameters and sources)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Quote page URL (default: https://bolsar.info/opciones.php)
    #[arg(long)]
    pub url: Option<String>,

    /// Read the quote page from a saved HTML file instead of the network
    #[arg(long, conflicts_with = "url")]
    pub html: Option<PathBuf>,

    /// JSON map of spot prices, e.g. {"GGAL": 4520.5}, instead of Yahoo Finance
    #[arg(long)]
    pub prices: Option<PathBuf>,
}

/// Selector parameters. Unset flags keep the configured value.
#[derive(Args, Debug, Clone)]
pub struct SpreadArgs {
    /// Contracts per leg (default 10)
    #[arg(long)]
    pub lot_size: Option<u32>,

    /// Max price of the sold leg per unit of strike difference, in % (default 30)
    #[arg(long)]
    pub max_percentage_difference: Option<f64>,

    /// Bought strike must be at most spot times this (default 1.05)
    #[arg(long)]
    pub spot_multiplier: Option<f64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch the board, select bull spreads and write one chart per pair
    Report {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        spread: SpreadArgs,

        /// Directory for the SVG charts
        #[arg(long, short = 'o', default_value = "charts")]
        output_dir: PathBuf,

        /// Also write the report as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,

        /// Skip the ASCII charts on stdout
        #[arg(long)]
        no_ascii: bool,

        /// Print the full enriched quote table
        #[arg(long)]
        show_quotes: bool,
    },

    /// Serve the interactive parameter form over HTTP
    Serve {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        spread: SpreadArgs,

        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value = "8080")]
        port: u16,
    },

    /// Decode instrument codes into type, strike and expiration
    Decode {
        /// Codes such as GFGC2380OC
        #[arg(required = true)]
        codes: Vec<String>,
    },

    /// Write the enriched quote table as CSV
    Export {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        spread: SpreadArgs,

        /// Output file (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}
