//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the calculation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::app::pipeline::RunOutput;
use crate::data::Catalog;

/// Format the full simulation report: run summary + breakdown table +
/// product details.
pub fn format_simulation(run: &RunOutput) -> String {
    let mut out = String::new();

    out.push_str("=== margin - Gross Margin Simulation ===\n");
    out.push_str(&format!("Product: {}\n", run.product.name));
    out.push_str(&format!(
        "Rebate: {:.0}% | Volume: {}\n",
        run.input.rebate_rate * 100.0,
        run.input.volume,
    ));
    out.push('\n');

    out.push_str(&format_breakdown_table(run));

    out.push_str("\nProduct details:\n");
    out.push_str(&format!("- Category: {}\n", run.product.category));
    out.push_str(&format!("- Department: {}\n", run.product.department));

    out
}

/// The four-row labeled breakdown (Price, Rebate, Volume Discount, Gross Margin).
fn format_breakdown_table(run: &RunOutput) -> String {
    let rows = [
        ("Price", run.result.price),
        ("Rebate", run.result.rebate),
        ("Volume Discount", run.result.volume_discount),
        ("Gross Margin", run.result.gross_margin),
    ];

    let mut out = String::new();
    out.push_str(&format!("{:<16} {:>8}\n", "Metric", "Value"));
    out.push_str(&format!("{:-<16} {:-<8}\n", "", ""));
    for (label, value) in rows {
        out.push_str(&format!("{label:<16} {value:>8}\n"));
    }
    out
}

/// Format the product catalog as an aligned table.
pub fn format_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{:<12} {:<12} {:<16} {:>8}\n",
        "product", "category", "department", "price"
    ));
    out.push_str(&format!(
        "{:-<12} {:-<12} {:-<16} {:-<8}\n",
        "", "", "", ""
    ));

    for p in catalog.products() {
        out.push_str(&format!(
            "{:<12} {:<12} {:<16} {:>8.0}\n",
            p.name, p.category, p.department, p.unit_price
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_sim;
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
    fn simulation_report_has_all_rows() {
        let report = format_simulation(&sample_run());

        for needle in [
            "Product: Product A",
            "Rebate: 5% | Volume: 5",
            "Price",
            "Rebate",
            "Volume Discount",
            "Gross Margin",
            "1080",
            "- Category: Medical",
            "- Department: IT",
        ] {
            assert!(report.contains(needle), "missing '{needle}' in:\n{report}");
        }
    }

    #[test]
    fn deductions_render_negative() {
        let report = format_simulation(&sample_run());
        assert!(report.contains("-60"), "deductions should be negative:\n{report}");
    }

    #[test]
    fn catalog_table_lists_every_product() {
        let catalog = Catalog::sample();
        let table = format_catalog(&catalog);
        for p in catalog.products() {
            assert!(table.contains(&p.name), "missing '{}' in:\n{table}", p.name);
        }
        assert!(table.contains("1200"));
    }
}
