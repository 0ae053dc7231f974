//! Formatted terminal output for simulations and the product catalog.

pub mod format;

pub use format::{format_catalog, format_simulation};
