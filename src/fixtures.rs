//! Seeded demo data used when no reading or staffing source is configured.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::staffing::StaffingRow;
use crate::tariff::types::RawReading;

/// Dates covered by the winter demo set.
pub const DEMO_DATES: [&str; 8] = [
    "2025-12-29",
    "2025-12-30",
    "2025-12-31",
    "2026-01-01",
    "2026-01-02",
    "2026-01-03",
    "2026-01-04",
    "2026-01-05",
];

/// A one-week May window for exercising the summer tariff.
pub const SUMMER_DEMO_DATES: [&str; 8] = [
    "2026-05-04",
    "2026-05-05",
    "2026-05-06",
    "2026-05-07",
    "2026-05-08",
    "2026-05-09",
    "2026-05-10",
    "2026-05-11",
];

/// `(meter_number, location)` pairs installed at each demo campus.
const CAMPUS_METERS: [(&str, &[(&str, &str)]); 2] = [
    ("140-H", &[("AL-214422", "GF"), ("AL-151959", "FF")]),
    (
        "141-D",
        &[
            ("SCJ84858", "GF - West"),
            ("SCJ84852", "GF - East"),
            ("SCJ84854", "FF - IT"),
        ],
    ),
];

/// Winter demo readings: eight days, two campuses, five meters.
pub fn demo_readings(seed: u64) -> Vec<RawReading> {
    demo_readings_for(&DEMO_DATES, seed)
}

/// Demo readings for arbitrary dates. Deterministic for a given seed.
pub fn demo_readings_for(dates: &[&str], seed: u64) -> Vec<RawReading> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut readings = Vec::with_capacity(dates.len() * 5);
    for date in dates {
        for (campus, meters) in CAMPUS_METERS {
            let block = campus.split('-').nth(1).unwrap_or("D");
            for (meter_number, location) in meters {
                readings.push(RawReading {
                    date: (*date).to_string(),
                    campus: campus.to_string(),
                    block: block.to_string(),
                    meter_number: (*meter_number).to_string(),
                    location: (*location).to_string(),
                    units_7_8: f64::from(rng.random_range(10..45_u32)),
                    units_8_9: f64::from(rng.random_range(10..40_u32)),
                    units_9_10am_next: f64::from(rng.random_range(50..230_u32)),
                    remarks: "Normal".to_string(),
                });
            }
        }
    }
    readings
}

/// Demo staffing plan.
pub fn demo_staffing() -> Vec<StaffingRow> {
    [
        ("1", "Janitorial Services (Cleaning Staff)", 25.0, 12.0),
        ("2", "Security Personnel (Gate & Floors)", 18.0, 9.0),
        ("3", "Reception & Helpdesk", 6.0, 3.0),
        ("4", "Catering & Kitchen Utility", 13.0, 6.0),
    ]
    .into_iter()
    .map(|(no, description, existing_staff, target_staff)| StaffingRow {
        no: no.to_string(),
        description: description.to_string(),
        existing_staff,
        target_staff,
    })
    .collect()
}
