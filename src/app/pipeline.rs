//! Shared "simulation pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! catalog lookup -> margin computation -> volume curve
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::Catalog;
use crate::domain::{MarginInput, MarginResult, ProductRecord, SimConfig};
use crate::error::AppError;
use crate::margin;

/// Volume range covered by the input surface (and the chart/export curve).
pub const VOLUME_MIN: i64 = 1;
pub const VOLUME_MAX: i64 = 50;

/// All computed outputs of a single simulation run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub product: ProductRecord,
    pub input: MarginInput,
    pub result: MarginResult,
    /// Breakdown across the full volume range at the configured rebate.
    pub curve: Vec<(i64, MarginResult)>,
}

/// Execute the simulation pipeline against a catalog.
pub fn run_sim(config: &SimConfig, catalog: &Catalog) -> Result<RunOutput, AppError> {
    // 1) Resolve the selected product.
    let product = catalog.get(&config.product).cloned().ok_or_else(|| {
        let known: Vec<&str> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        AppError::new(
            2,
            format!(
                "Unknown product '{}'. Known products: {}",
                config.product,
                known.join(", ")
            ),
        )
    })?;

    let input = MarginInput {
        unit_price: product.unit_price,
        rebate_rate: config.rebate_rate(),
        volume: config.volume,
    };

    // 2) Compute the breakdown for the requested volume.
    let result = margin::compute(input.unit_price, input.rebate_rate, input.volume);

    // 3) Evaluate the curve across the input range for plotting/export.
    let curve = margin::margin_curve(input.unit_price, input.rebate_rate, VOLUME_MIN, VOLUME_MAX);

    Ok(RunOutput {
        product,
        input,
        result,
        curve,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(product: &str, rebate_percent: i64, volume: i64) -> SimConfig {
        SimConfig {
            product: product.to_string(),
            rebate_percent,
            volume,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn run_sim_known_product() {
        let catalog = Catalog::sample();
        let run = run_sim(&config("Product A", 5, 5), &catalog).unwrap();

        assert_eq!(run.product.name, "Product A");
        assert_eq!(run.result.price, 1200);
        assert_eq!(run.result.rebate, -60);
        assert_eq!(run.result.volume_discount, -60);
        assert_eq!(run.result.gross_margin, 1080);
        assert_eq!(run.curve.len(), (VOLUME_MAX - VOLUME_MIN + 1) as usize);
    }

    #[test]
    fn run_sim_unknown_product_is_usage_error() {
        let catalog = Catalog::sample();
        let err = run_sim(&config("Product Z", 0, 1), &catalog).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn curve_matches_point_result() {
        let catalog = Catalog::sample();
        let run = run_sim(&config("Product B", 10, 15), &catalog).unwrap();
        let (v, at_volume) = run.curve[(15 - VOLUME_MIN) as usize];
        assert_eq!(v, 15);
        assert_eq!(at_volume, run.result);
    }
}
