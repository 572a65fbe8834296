//! Per-reading cost and peak-surcharge computation.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::calendar::{ReadingDay, Season};
use super::types::{
    ConsumptionRecord, OVERNIGHT_BLOCK_HOURS, PEAK_MULTIPLIER, RawReading, TariffConfig,
    WindowCost,
};

/// Costs every reading under the given base rate and eligible-meter set.
///
/// Pure and order-preserving: one record per reading, in input order.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use campus_energy::tariff::processor::process;
/// use campus_energy::tariff::types::RawReading;
///
/// let reading = RawReading {
///     date: "2026-01-15".into(),
///     campus: "140-H".into(),
///     block: "H".into(),
///     meter_number: "AL-214422".into(),
///     location: "GF".into(),
///     units_7_8: 20.0,
///     units_8_9: 20.0,
///     units_9_10am_next: 130.0,
///     remarks: String::new(),
/// };
/// let meters: BTreeSet<String> = ["AL-214422".to_string()].into();
/// let records = process(&[reading], 71.0, &meters);
/// assert!((records[0].total_cost - 12957.5).abs() < 1e-9);
/// ```
pub fn process(
    readings: &[RawReading],
    base_rate: f64,
    peak_enabled_meters: &BTreeSet<String>,
) -> Vec<ConsumptionRecord> {
    debug!(
        readings = readings.len(),
        base_rate,
        peak_meters = peak_enabled_meters.len(),
        "processing readings"
    );
    readings
        .iter()
        .map(|r| process_reading(r, base_rate, peak_enabled_meters.contains(&r.meter_number)))
        .collect()
}

impl TariffConfig {
    /// Costs `readings` under this tariff. See [`process`].
    pub fn apply(&self, readings: &[RawReading]) -> Vec<ConsumptionRecord> {
        process(readings, self.base_rate, &self.peak_enabled_meters)
    }
}

/// Costs a single reading.
///
/// # Arguments
///
/// * `reading` - Source reading
/// * `base_rate` - Currency per unit
/// * `peak_enabled` - Whether the meter carries the peak-factor surcharge
pub fn process_reading(reading: &RawReading, base_rate: f64, peak_enabled: bool) -> ConsumptionRecord {
    let day = ReadingDay::from_raw(&reading.date);
    if day.date.is_none() {
        warn!(
            date = %reading.date,
            meter = %reading.meter_number,
            "unparseable reading date, billing as winter weekday"
        );
    }

    let split = |units: f64| {
        let base = units * base_rate;
        WindowCost {
            base,
            surcharge: if peak_enabled {
                base * (PEAK_MULTIPLIER - 1.0)
            } else {
                0.0
            },
        }
    };
    let cost_7_8 = split(reading.units_7_8);
    let cost_8_9 = split(reading.units_8_9);

    // Only part of the overnight block overlaps the true peak window.
    let peak_ratio = day.season.overnight_peak_hours() / OVERNIGHT_BLOCK_HOURS;
    let peak_units_overnight = reading.units_9_10am_next * peak_ratio;
    let cost_9_10am = WindowCost {
        base: reading.units_9_10am_next * base_rate,
        surcharge: if peak_enabled {
            peak_units_overnight * base_rate * (PEAK_MULTIPLIER - 1.0)
        } else {
            0.0
        },
    };

    let total_units = reading.units_7_8 + reading.units_8_9 + reading.units_9_10am_next;
    let total_base_cost = cost_7_8.base + cost_8_9.base + cost_9_10am.base;
    let total_peak_surcharge = cost_7_8.surcharge + cost_8_9.surcharge + cost_9_10am.surcharge;
    let peak_units = if peak_enabled {
        reading.units_7_8 + reading.units_8_9 + peak_units_overnight
    } else {
        0.0
    };

    ConsumptionRecord {
        reading: reading.clone(),
        is_summer_tariff: day.season == Season::Summer,
        is_weekend: day.is_weekend,
        cost_7_8,
        cost_8_9,
        cost_9_10am,
        total_units,
        total_base_cost,
        total_peak_surcharge,
        total_cost: total_base_cost + total_peak_surcharge,
        peak_units,
        day_of_week: day.day_of_week,
        formatted_date: day.formatted,
    }
}
