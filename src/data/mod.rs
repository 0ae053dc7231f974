//! Static product reference data.

pub mod catalog;

pub use catalog::Catalog;
