//! Command-line interface definition for PhoneFinder
//!
//! Each subcommand plays one page interaction against the configured
//! catalog service.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// PhoneFinder - phone search and assistant chat client
#[derive(Parser, Debug, Clone)]
#[command(name = "phonefinder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Keep page storage in a sled database at this path
    #[arg(long)]
    pub storage_path: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List the brands offered by the catalog
    Brands,

    /// Show the catalog price bounds
    PriceRange,

    /// Search the catalog with the given filters
    Search {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the rendered results markup instead of a table
        #[arg(long)]
        html: bool,
    },

    /// Search, then hand one result to the details view
    Select {
        /// Position of the result in the search output
        index: usize,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the phone handed to the details view
    Details {
        /// Print the details markup instead of text
        #[arg(long)]
        html: bool,
    },

    /// Start an interactive chat with the assistant
    Chat,
}

/// Filter controls, given as the page would receive them
///
/// Numeric constraints are raw text, exactly as typed into the form.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Brand to restrict to
    #[arg(short, long)]
    pub brand: Option<String>,

    /// Lower price handle (defaults to the catalog minimum)
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Upper price handle (defaults to the catalog maximum)
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum battery capacity in mAh
    #[arg(long, default_value = "")]
    pub min_battery: String,

    /// Minimum RAM in MB
    #[arg(long, default_value = "")]
    pub min_ram: String,

    /// Minimum rear camera resolution in MP
    #[arg(long, default_value = "")]
    pub min_camera: String,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
