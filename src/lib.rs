//! Campus energy cost and peak-factor surcharge calculator.

pub mod cli;
pub mod config;
pub mod fixtures;
/// Spreadsheet snapshot loading and row normalization.
pub mod ingest;
pub mod insights;
pub mod observability;
pub mod staffing;
/// Consumption processor, campus summarizer, and view filters.
pub mod tariff;

/// File exports.
pub mod io {
    pub mod export;
}

#[cfg(feature = "api")]
pub mod api;
