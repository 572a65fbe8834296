//! Holds a reading snapshot and its costed records, recomputed explicitly
//! whenever the tariff changes.

use std::sync::Arc;

use tracing::info;

use super::filter::ReadingFilter;
use super::summary::{CampusSummary, EnergyTotals, summarize};
use super::types::{ConsumptionRecord, RawReading, TariffConfig};

/// Readings, tariff, and the records they produce.
///
/// Records are published as shared immutable snapshots. Changing the tariff
/// swaps in a new snapshot; snapshots handed out earlier never change.
///
/// # Examples
///
/// ```
/// use campus_energy::fixtures::demo_readings;
/// use campus_energy::tariff::dashboard::Dashboard;
/// use campus_energy::tariff::types::TariffConfig;
///
/// let readings = demo_readings(42);
/// let tariff = TariffConfig::all_meters(71.0, &readings);
/// let mut dashboard = Dashboard::new(readings, tariff);
///
/// let before = dashboard.records();
/// dashboard.toggle_meter_peak("AL-214422");
/// assert_ne!(before.as_ref(), dashboard.records().as_ref());
/// ```
#[derive(Debug, Clone)]
pub struct Dashboard {
    readings: Vec<RawReading>,
    tariff: TariffConfig,
    records: Arc<[ConsumptionRecord]>,
}

impl Dashboard {
    pub fn new(readings: Vec<RawReading>, tariff: TariffConfig) -> Self {
        let records = Arc::from(tariff.apply(&readings));
        Self {
            readings,
            tariff,
            records,
        }
    }

    pub fn readings(&self) -> &[RawReading] {
        &self.readings
    }

    pub fn tariff(&self) -> &TariffConfig {
        &self.tariff
    }

    /// Current record snapshot.
    pub fn records(&self) -> Arc<[ConsumptionRecord]> {
        Arc::clone(&self.records)
    }

    /// Sets the base rate and recomputes.
    pub fn set_base_rate(&mut self, base_rate: f64) {
        self.tariff.base_rate = base_rate;
        self.recompute();
    }

    /// Flips peak eligibility for `meter_number` and recomputes.
    ///
    /// Returns the meter's new eligibility.
    pub fn toggle_meter_peak(&mut self, meter_number: &str) -> bool {
        let enabled = if self.tariff.peak_enabled_meters.remove(meter_number) {
            false
        } else {
            self.tariff
                .peak_enabled_meters
                .insert(meter_number.to_string());
            true
        };
        self.recompute();
        enabled
    }

    /// Replaces the whole tariff and recomputes.
    pub fn set_tariff(&mut self, tariff: TariffConfig) {
        self.tariff = tariff;
        self.recompute();
    }

    /// Replaces the reading snapshot and recomputes.
    ///
    /// Eligibility resets to every meter in the new snapshot, so earlier
    /// toggles do not carry over. The base rate is kept.
    pub fn replace_readings(&mut self, readings: Vec<RawReading>) {
        self.tariff = TariffConfig::all_meters(self.tariff.base_rate, &readings);
        self.readings = readings;
        self.recompute();
    }

    /// Records passing `filter`.
    pub fn filtered(&self, filter: &ReadingFilter) -> Vec<ConsumptionRecord> {
        filter.apply(&self.records)
    }

    /// Campus summaries over the records passing `filter`.
    pub fn summaries(&self, filter: &ReadingFilter) -> Vec<CampusSummary> {
        summarize(&self.filtered(filter))
    }

    /// Headline totals over the records passing `filter`.
    pub fn totals(&self, filter: &ReadingFilter) -> EnergyTotals {
        EnergyTotals::from_records(&self.filtered(filter))
    }

    fn recompute(&mut self) {
        self.records = Arc::from(self.tariff.apply(&self.readings));
        info!(
            records = self.records.len(),
            base_rate = self.tariff.base_rate,
            peak_meters = self.tariff.peak_enabled_meters.len(),
            "recomputed consumption records"
        );
    }
}
