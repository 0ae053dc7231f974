//! Domain types used throughout the simulation pipeline.
//!
//! This module defines:
//!
//! - static product reference data (`ProductRecord`)
//! - simulation inputs (`SimConfig`, `MarginInput`)
//! - calculation outputs (`MarginResult`, `DiscountTier`)

pub mod types;

pub use types::*;
