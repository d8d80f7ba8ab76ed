//! CLI definition using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dealership_app::app::SearchQuery;
use dealership_types::{BackendKind, OutputFormat};

#[derive(Parser)]
#[command(name = "dealership")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Car dealership inventory and contract tracker")]
#[command(long_about = None)]
pub struct Cli {
    /// Runs the interactive shell when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Storage backend (memory, file, sqlite). Uses config value if not specified.
    #[arg(long, short = 'b', global = true)]
    pub backend: Option<BackendKind>,

    /// Directory holding the inventory, contracts, and database files
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive menu
    Shell,

    /// List available vehicles
    List(SearchArgs),

    /// List recorded contracts with pricing
    Contracts,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set storage backend
        #[arg(long)]
        set_backend: Option<BackendKind>,

        /// Set data directory
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// Set dealership id used by the sqlite backend
        #[arg(long)]
        set_dealership_id: Option<i64>,

        /// Set dealership name
        #[arg(long)]
        set_name: Option<String>,

        /// Set dealership address
        #[arg(long)]
        set_address: Option<String>,

        /// Set dealership phone number
        #[arg(long)]
        set_phone: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Search criteria; omitted options match everything
#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    #[arg(long)]
    pub min_price: Option<f64>,

    #[arg(long)]
    pub max_price: Option<f64>,

    /// Make contains this text (case-insensitive)
    #[arg(long)]
    pub make: Option<String>,

    /// Model contains this text (case-insensitive)
    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub min_year: Option<i32>,

    #[arg(long)]
    pub max_year: Option<i32>,

    #[arg(long)]
    pub color: Option<String>,

    #[arg(long)]
    pub min_odometer: Option<u32>,

    #[arg(long)]
    pub max_odometer: Option<u32>,

    /// Body type contains this text (case-insensitive)
    #[arg(long = "type")]
    pub vehicle_type: Option<String>,

    #[arg(long)]
    pub vin: Option<u32>,
}

impl From<SearchArgs> for SearchQuery {
    fn from(args: SearchArgs) -> Self {
        SearchQuery {
            min_price: args.min_price,
            max_price: args.max_price,
            make: args.make,
            model: args.model,
            min_year: args.min_year,
            max_year: args.max_year,
            color: args.color,
            min_odometer: args.min_odometer,
            max_odometer: args.max_odometer,
            vehicle_type: args.vehicle_type,
            vin: args.vin,
        }
    }
}
