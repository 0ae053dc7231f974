//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during a simulation
//! - exported to JSON/CSV
//! - reloaded later for comparisons

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Static reference data for one product.
///
/// Created once at startup (either the built-in sample catalog or an injected
/// fixture) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub category: String,
    pub department: String,
    /// Unit list price (non-negative by construction of the catalog).
    pub unit_price: f64,
}

/// One bracket of the volume-discount schedule.
///
/// A volume qualifies for the bracket when `volume <= max_volume`. Brackets
/// are evaluated in ascending threshold order, first match wins; a volume
/// beyond every bracket gets no discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub max_volume: i64,
    pub rate: f64,
}

/// Transient inputs for one margin calculation.
///
/// Range enforcement (`rebate_rate` in [0, 1], `volume` in [1, 50]) is the
/// caller's responsibility: the CLI does it with clap value parsers and the
/// TUI clamps while editing. The calculator itself accepts any finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginInput {
    pub unit_price: f64,
    /// Rebate as a fraction (0.10 = 10%), not a percent.
    pub rebate_rate: f64,
    pub volume: i64,
}

/// Per-unit margin breakdown.
///
/// Deductions are reported as negated magnitudes, so
/// `gross_margin == price + rebate + volume_discount` (each field is
/// truncated toward zero independently at the formatting step; the identity
/// is exact whenever the unit price is integral).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginResult {
    pub price: i64,
    /// Rebate deduction (<= 0 for non-negative inputs).
    pub rebate: i64,
    /// Volume-discount deduction (<= 0 for non-negative inputs).
    pub volume_discount: i64,
    pub gross_margin: i64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults) or from the TUI settings
/// panel.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Product name to look up in the catalog.
    pub product: String,
    /// Rebate as an integer percent in [0, 20], mirroring the input slider.
    pub rebate_percent: i64,
    /// Purchase volume in [1, 50].
    pub volume: i64,

    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

impl SimConfig {
    /// Rebate percent converted to the fraction the calculator expects.
    pub fn rebate_rate(&self) -> f64 {
        self.rebate_percent as f64 / 100.0
    }
}

/// A saved simulation file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationFile {
    pub tool: String,
    pub product: ProductRecord,
    pub rebate_rate: f64,
    pub volume: i64,
    pub result: MarginResult,
    pub curve: MarginGrid,
}

/// Gross margin evaluated over a volume range (for plotting/export).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginGrid {
    pub volume: Vec<i64>,
    pub gross_margin: Vec<i64>,
}
