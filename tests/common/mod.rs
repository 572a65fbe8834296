//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use campus_energy::tariff::types::{RawReading, TariffConfig};

/// Absolute tolerance for money and unit comparisons.
pub const EPS: f64 = 1e-9;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

/// A reading with the given date, meter, and window units on campus `140-H`.
pub fn reading(date: &str, meter: &str, units: [f64; 3]) -> RawReading {
    RawReading {
        date: date.to_string(),
        campus: "140-H".to_string(),
        block: "H".to_string(),
        meter_number: meter.to_string(),
        location: "GF".to_string(),
        units_7_8: units[0],
        units_8_9: units[1],
        units_9_10am_next: units[2],
        remarks: "Normal".to_string(),
    }
}

/// Same as [`reading`] on an explicit campus.
pub fn campus_reading(date: &str, campus: &str, meter: &str, units: [f64; 3]) -> RawReading {
    RawReading {
        campus: campus.to_string(),
        ..reading(date, meter, units)
    }
}

/// Default tariff (71 per unit) with every meter in `readings` peak-eligible.
pub fn default_tariff(readings: &[RawReading]) -> TariffConfig {
    TariffConfig::all_meters(71.0, readings)
}

/// Path under the crate root, for checked-in sample files.
pub fn manifest_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Unique scratch path in the system temp directory.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("campus-energy-{}-{name}", std::process::id()))
}
