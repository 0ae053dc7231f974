//! Optional file exports (CSV and JSON).

pub mod export;
