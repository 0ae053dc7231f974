//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the simulation pipeline against the sample catalog
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, SimArgs};
use crate::data::Catalog;
use crate::domain::SimConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `margin` binary.
pub fn run() -> Result<(), AppError> {
    // We want `margin` and `margin -p "Product B"` to behave like `margin tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Sim(args) => handle_sim(args),
        Command::Catalog => handle_catalog(),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_sim(args: SimArgs) -> Result<(), AppError> {
    let config = sim_config_from_args(&args);
    let catalog = Catalog::sample();
    let run = pipeline::run_sim(&config, &catalog)?;

    println!("{}", crate::report::format_simulation(&run));

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_simulation_csv(path, &run)?;
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_simulation_json(path, &run)?;
    }

    Ok(())
}

fn handle_catalog() -> Result<(), AppError> {
    let catalog = Catalog::sample();
    print!("{}", crate::report::format_catalog(&catalog));
    Ok(())
}

fn handle_tui(args: SimArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

pub fn sim_config_from_args(args: &SimArgs) -> SimConfig {
    SimConfig {
        product: args.product.clone(),
        rebate_percent: args.rebate,
        volume: args.volume,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Rewrite argv so `margin` defaults to `margin tui`.
///
/// Rules:
/// - `margin`                       -> `margin tui`
/// - `margin -p "Product B" ...`    -> `margin tui -p "Product B" ...`
/// - `margin --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "sim" | "catalog" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
