//! Campus roll-ups and headline totals computed from costed records.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::types::ConsumptionRecord;

/// Per-campus totals and peak-surcharge exposure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampusSummary {
    pub campus: String,
    pub total_units: f64,
    pub total_cost: f64,
    pub total_peak_surcharge: f64,
    /// Share of `total_cost` attributable to the peak surcharge, in percent.
    pub peak_exposure: f64,
}

impl CampusSummary {
    fn new(campus: &str) -> Self {
        Self {
            campus: campus.to_string(),
            total_units: 0.0,
            total_cost: 0.0,
            total_peak_surcharge: 0.0,
            peak_exposure: 0.0,
        }
    }
}

impl fmt::Display for CampusSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:>12.2} units  {:>14.2} cost  {:>12.2} PF  {:>6.2}%",
            self.campus,
            self.total_units,
            self.total_cost,
            self.total_peak_surcharge,
            self.peak_exposure
        )
    }
}

/// Groups records by exact campus string and sums their totals.
///
/// Returns one entry per distinct campus, in order of first appearance.
pub fn summarize(records: &[ConsumptionRecord]) -> Vec<CampusSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<CampusSummary> = Vec::new();

    for r in records {
        let slot = *index.entry(r.campus()).or_insert_with(|| {
            summaries.push(CampusSummary::new(r.campus()));
            summaries.len() - 1
        });
        let s = &mut summaries[slot];
        s.total_units += r.total_units;
        s.total_cost += r.total_cost;
        s.total_peak_surcharge += r.total_peak_surcharge;
    }

    for s in &mut summaries {
        s.peak_exposure = peak_exposure(s.total_peak_surcharge, s.total_cost);
    }
    summaries
}

/// Surcharge as a percentage of cost; zero when there is no cost.
pub fn peak_exposure(surcharge: f64, cost: f64) -> f64 {
    if cost == 0.0 {
        0.0
    } else {
        surcharge / cost * 100.0
    }
}

/// Headline totals over a (typically filtered) record set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EnergyTotals {
    pub units: f64,
    pub cost: f64,
    /// Total peak-factor surcharge.
    pub pf: f64,
}

impl EnergyTotals {
    pub fn from_records(records: &[ConsumptionRecord]) -> Self {
        records.iter().fold(Self::default(), |acc, r| Self {
            units: acc.units + r.total_units,
            cost: acc.cost + r.total_cost,
            pf: acc.pf + r.total_peak_surcharge,
        })
    }

    pub fn peak_exposure(&self) -> f64 {
        peak_exposure(self.pf, self.cost)
    }
}

impl fmt::Display for EnergyTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Energy Totals ---")?;
        writeln!(f, "Units consumed:        {:.2}", self.units)?;
        writeln!(f, "Total cost:            {:.2}", self.cost)?;
        writeln!(f, "PF surcharge:          {:.2}", self.pf)?;
        write!(f, "Peak exposure:         {:.2}%", self.peak_exposure())
    }
}
