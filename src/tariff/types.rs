//! Core tariff types: raw readings, tariff configuration, and costed records.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Peak-factor multiplier over the base rate (a 25% surcharge).
pub const PEAK_MULTIPLIER: f64 = 1.25;

/// Length of the 21:00–10:00 overnight measurement window, in hours.
pub const OVERNIGHT_BLOCK_HOURS: f64 = 13.0;

/// One meter's readings for one day, split into three fixed clock windows.
///
/// Unit quantities are expected to be non-negative; ingestion clamps them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    /// Calendar day as `YYYY-MM-DD`.
    pub date: String,
    /// Campus (facility) identifier.
    pub campus: String,
    /// Block within the campus.
    pub block: String,
    /// Meter identifier, unique within a day.
    #[serde(alias = "meterNumber")]
    pub meter_number: String,
    /// Floor or area served by the meter.
    pub location: String,
    /// Units consumed 19:00–20:00.
    pub units_7_8: f64,
    /// Units consumed 20:00–21:00.
    pub units_8_9: f64,
    /// Units consumed 21:00 through 10:00 the following day.
    pub units_9_10am_next: f64,
    /// Free-text operator remarks.
    pub remarks: String,
}

/// Operator-editable tariff settings, passed fresh into every processing pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TariffConfig {
    /// Currency per unit.
    pub base_rate: f64,
    /// Meters for which the peak-factor surcharge applies at all.
    pub peak_enabled_meters: BTreeSet<String>,
}

impl TariffConfig {
    /// Creates a tariff with an explicit eligible-meter set.
    pub fn new(base_rate: f64, peak_enabled_meters: BTreeSet<String>) -> Self {
        Self {
            base_rate,
            peak_enabled_meters,
        }
    }

    /// Creates a tariff where every meter present in `readings` is peak-eligible.
    pub fn all_meters(base_rate: f64, readings: &[RawReading]) -> Self {
        let meters = readings.iter().map(|r| r.meter_number.clone()).collect();
        Self::new(base_rate, meters)
    }

    /// Returns `true` if the surcharge applies to `meter_number`.
    pub fn is_peak_enabled(&self, meter_number: &str) -> bool {
        self.peak_enabled_meters.contains(meter_number)
    }
}

/// Base cost and peak surcharge for one clock window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WindowCost {
    /// Units at the base rate.
    pub base: f64,
    /// Peak-factor surcharge on top of `base`.
    pub surcharge: f64,
}

impl WindowCost {
    /// Base plus surcharge.
    pub fn total(&self) -> f64 {
        self.base + self.surcharge
    }
}

/// A fully costed reading. Created once per processing pass and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionRecord {
    /// Source reading, carried through unchanged.
    #[serde(flatten)]
    pub reading: RawReading,
    /// April through October.
    pub is_summer_tariff: bool,
    /// Saturday or Sunday.
    pub is_weekend: bool,
    /// 19:00–20:00 window cost.
    pub cost_7_8: WindowCost,
    /// 20:00–21:00 window cost.
    pub cost_8_9: WindowCost,
    /// Overnight window cost, surcharge prorated by season.
    pub cost_9_10am: WindowCost,
    pub total_units: f64,
    pub total_base_cost: f64,
    pub total_peak_surcharge: f64,
    /// `total_base_cost + total_peak_surcharge`.
    pub total_cost: f64,
    /// Units exposed to peak pricing; zero for meters without the surcharge.
    pub peak_units: f64,
    /// Full English weekday name.
    pub day_of_week: String,
    /// Display date such as `"29 Dec 2025"`.
    pub formatted_date: String,
}

impl ConsumptionRecord {
    pub fn campus(&self) -> &str {
        &self.reading.campus
    }

    pub fn date(&self) -> &str {
        &self.reading.date
    }

    pub fn meter_number(&self) -> &str {
        &self.reading.meter_number
    }
}
