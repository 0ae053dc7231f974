//! Immutable product catalog.
//!
//! The catalog is plain injectable data rather than global state so tests and
//! future front-ends can substitute their own product tables. Lookup is by
//! product name; iteration order is the insertion order of the source rows.

use crate::domain::ProductRecord;
use crate::error::AppError;

/// An ordered, immutable collection of products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<ProductRecord>,
}

impl Catalog {
    /// Build a catalog from explicit records (e.g., a test fixture).
    ///
    /// Rejects empty input and non-finite/negative prices so the rest of the
    /// pipeline can rely on well-formed reference data.
    pub fn new(products: Vec<ProductRecord>) -> Result<Self, AppError> {
        if products.is_empty() {
            return Err(AppError::new(2, "Catalog must contain at least one product."));
        }
        for p in &products {
            if !p.unit_price.is_finite() || p.unit_price < 0.0 {
                return Err(AppError::new(
                    2,
                    format!("Invalid unit price for product '{}': {}", p.name, p.unit_price),
                ));
            }
        }
        Ok(Self { products })
    }

    /// The built-in sample catalog (8 products).
    pub fn sample() -> Self {
        let rows = [
            ("Product A", "Medical", "IT", 1200.0),
            ("Product B", "Medical", "Intensive Care", 800.0),
            ("Product C", "Furniture", "Ortopedics", 350.0),
            ("Product D", "Medical", "Audio", 250.0),
            ("Product E", "Wearables", "Intensive Care", 300.0),
            ("Product F", "Medical", "IT", 500.0),
            ("Product G", "Furniture", "Ortopedics", 120.0),
            ("Product H", "Medical", "Intensive Care", 400.0),
        ];

        let products = rows
            .into_iter()
            .map(|(name, category, department, unit_price)| ProductRecord {
                name: name.to_string(),
                category: category.to_string(),
                department: department.to_string(),
                unit_price,
            })
            .collect();

        Self { products }
    }

    /// Look up a product by name (exact match, then case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ProductRecord> {
        let name = name.trim();
        self.products
            .iter()
            .find(|p| p.name == name)
            .or_else(|| {
                self.products
                    .iter()
                    .find(|p| p.name.eq_ignore_ascii_case(name))
            })
    }

    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Index of a product by name, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.products.iter().position(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_catalog_contents() {
        let catalog = Catalog::sample();
        assert_eq!(catalog.len(), 8);

        let a = catalog.get("Product A").unwrap();
        assert_eq!(a.category, "Medical");
        assert_eq!(a.department, "IT");
        assert!((a.unit_price - 1200.0).abs() < 1e-12);

        let g = catalog.get("Product G").unwrap();
        assert_eq!(g.category, "Furniture");
        assert!((g.unit_price - 120.0).abs() < 1e-12);
    }

    #[test]
    fn lookup_is_case_insensitive_fallback() {
        let catalog = Catalog::sample();
        assert!(catalog.get("product b").is_some());
        assert!(catalog.get("  Product C ").is_some());
        assert!(catalog.get("Product Z").is_none());
    }

    #[test]
    fn rejects_bad_fixture() {
        assert!(Catalog::new(vec![]).is_err());

        let bad = vec![ProductRecord {
            name: "X".to_string(),
            category: "Test".to_string(),
            department: "Test".to_string(),
            unit_price: -1.0,
        }];
        assert!(Catalog::new(bad).is_err());
    }

    #[test]
    fn accepts_custom_fixture() {
        let catalog = Catalog::new(vec![ProductRecord {
            name: "Widget".to_string(),
            category: "Test".to_string(),
            department: "QA".to_string(),
            unit_price: 10.0,
        }])
        .unwrap();
        assert_eq!(catalog.position("Widget"), Some(0));
    }
}
