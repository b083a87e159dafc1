//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs,
    completions::CompletionsArgs,
    delete::DeleteArgs,
    export::ExportArgs,
    list::ListArgs,
    show::ShowArgs,
    txn::TxnArgs,
    update::UpdateArgs,
};

#[derive(Parser)]
#[command(name = "stn")]
#[command(author, version, about = "Stationery stock tracker")]
#[command(long_about = "Track on-hand stationery stock in a plain CSV file: add items, issue and receive stock, and spot items that need reordering.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Inventory CSV file (default: from config, else ./stationery_inventory.csv)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the inventory file if it does not exist
    Init,

    /// List items with filtering
    List(ListArgs),

    /// Show distinct item count, total quantity and low-stock count
    Summary,

    /// Show one item and its transaction history
    Show(ShowArgs),

    /// Add a new item
    Add(AddArgs),

    /// Update an existing item
    Update(UpdateArgs),

    /// Issue stock (decrease quantity)
    Issue(TxnArgs),

    /// Receive stock (increase quantity)
    Receive(TxnArgs),

    /// Delete an item
    Delete(DeleteArgs),

    /// Write a timestamped backup of the inventory
    Export(ExportArgs),

    /// List the categories and locations in use
    Facets,

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (tsv for list, pretty for show)
    #[default]
    Auto,
    /// YAML format
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (same layout as the inventory file)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
