//! Export a simulation to CSV or JSON.
//!
//! The CSV export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per evaluated volume, so the discount brackets are visible
//! in the data itself. The JSON export is the "portable" representation of a
//! full simulation (inputs + breakdown + curve), with the schema defined by
//! `domain::SimulationFile`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::domain::{MarginGrid, SimulationFile};
use crate::error::AppError;

/// Write the per-volume breakdown to a CSV file.
pub fn write_simulation_csv(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(
        file,
        "product,category,department,rebate_rate,volume,price,rebate,volume_discount,gross_margin,selected"
    )
    .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (volume, result) in &run.curve {
        let selected = if *volume == run.input.volume { 1 } else { 0 };
        writeln!(
            file,
            "{},{},{},{:.4},{},{},{},{},{},{}",
            run.product.name,
            run.product.category,
            run.product.department,
            run.input.rebate_rate,
            volume,
            result.price,
            result.rebate,
            result.volume_discount,
            result.gross_margin,
            selected,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

/// Write the full simulation (inputs + breakdown + curve) to a JSON file.
pub fn write_simulation_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create simulation JSON '{}': {e}", path.display()),
        )
    })?;

    let sim = simulation_file(run);

    serde_json::to_writer_pretty(file, &sim)
        .map_err(|e| AppError::new(2, format!("Failed to write simulation JSON: {e}")))?;

    Ok(())
}

/// Read a simulation JSON file.
pub fn read_simulation_json(path: &Path) -> Result<SimulationFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to open simulation JSON '{}': {e}", path.display()),
        )
    })?;
    let sim: SimulationFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid simulation JSON: {e}")))?;
    Ok(sim)
}

fn simulation_file(run: &RunOutput) -> SimulationFile {
    let (volume, gross_margin) = run
        .curve
        .iter()
        .map(|(v, r)| (*v, r.gross_margin))
        .unzip();

    SimulationFile {
        tool: "margin".to_string(),
        product: run.product.clone(),
        rebate_rate: run.input.rebate_rate,
        volume: run.input.volume,
        result: run.result,
        curve: MarginGrid {
            volume,
            gross_margin,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_sim;
    use crate::data::Catalog;
    use crate::domain::SimConfig;

    fn sample_run() -> RunOutput {
        let config = SimConfig {
            product: "Product A".to_string(),
            rebate_percent: 5,
            volume: 5,
            export_csv: None,
            export_json: None,
        };
        run_sim(&config, &Catalog::sample()).unwrap()
    }

    #[test]
    fn simulation_file_shape() {
        let run = sample_run();
        let sim = simulation_file(&run);

        assert_eq!(sim.tool, "margin");
        assert_eq!(sim.product.name, "Product A");
        assert_eq!(sim.volume, 5);
        assert_eq!(sim.result.gross_margin, 1080);
        assert_eq!(sim.curve.volume.len(), sim.curve.gross_margin.len());
        assert_eq!(sim.curve.volume.first().copied(), Some(1));
        assert_eq!(sim.curve.volume.last().copied(), Some(50));
    }

    #[test]
    fn csv_then_json_round_trip() {
        let run = sample_run();
        let dir = std::env::temp_dir();
        let csv_path = dir.join("margin_sim_test_export.csv");
        let json_path = dir.join("margin_sim_test_export.json");

        write_simulation_csv(&csv_path, &run).unwrap();
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        // Header + one row per evaluated volume.
        assert_eq!(csv.lines().count(), 1 + run.curve.len());
        assert!(csv.lines().nth(5).unwrap().ends_with(",1"), "volume 5 row should be marked selected");

        write_simulation_json(&json_path, &run).unwrap();
        let sim = read_simulation_json(&json_path).unwrap();
        assert_eq!(sim.result, run.result);
        assert_eq!(sim.product, run.product);

        let _ = std::fs::remove_file(csv_path);
        let _ = std::fs::remove_file(json_path);
    }
}
