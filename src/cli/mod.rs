//! Command-line parsing for the gross margin simulator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the calculation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "margin", version, about = "Per-unit gross margin simulator with tiered volume discounts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one simulation and print the margin breakdown.
    Sim(SimArgs),
    /// Print the built-in product catalog.
    Catalog,
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying simulation pipeline as `margin sim`, but
    /// renders results in a terminal UI using Ratatui.
    Tui(SimArgs),
}

/// Common options for simulating.
///
/// The value-parser ranges perform the caller-side clamping the calculator
/// itself does not: rebate is an integer percent in [0, 20] (converted to a
/// fraction downstream), volume is in [1, 50].
#[derive(Debug, Parser, Clone)]
pub struct SimArgs {
    /// Product to simulate (by catalog name).
    #[arg(short = 'p', long, default_value = "Product A")]
    pub product: String,

    /// Rebate percentage (integer percent, 0-20).
    #[arg(short = 'r', long, default_value_t = 0, value_parser = clap::value_parser!(i64).range(0..=20))]
    pub rebate: i64,

    /// Purchase volume (1-50).
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(i64).range(1..=50))]
    pub volume: i64,

    /// Export the per-volume breakdown to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full simulation (inputs + breakdown + curve) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}
