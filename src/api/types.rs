//! API response and query types.

use serde::{Deserialize, Serialize};

use crate::tariff::calendar::{is_weekday_name, parse_calendar_date};
use crate::tariff::filter::{ALL, ReadingFilter};
use crate::tariff::summary::EnergyTotals;

/// Filter query shared by the view endpoints.
///
/// `days` and `hidden` are comma-separated lists.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    /// Campus name or `All`.
    pub campus: Option<String>,
    /// `YYYY-MM-DD` or `All`.
    pub date: Option<String>,
    /// Weekday names, e.g. `Monday,Friday`.
    pub days: Option<String>,
    /// Campuses to hide.
    pub hidden: Option<String>,
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|p| !p.is_empty())
}

impl ViewQuery {
    /// Converts the query into a filter; omitted parameters mean no restriction.
    ///
    /// # Errors
    ///
    /// Returns a message naming the bad parameter for an unparseable date or
    /// an unknown weekday name.
    pub fn to_filter(&self) -> Result<ReadingFilter, String> {
        let mut filter = ReadingFilter::default();
        if let Some(campus) = &self.campus {
            filter = filter.with_campus(campus);
        }
        if let Some(date) = &self.date {
            if date != ALL && parse_calendar_date(date).is_none() {
                return Err(format!("`date` must be {ALL} or YYYY-MM-DD, got \"{date}\""));
            }
            filter = filter.with_date(date);
        }
        if let Some(days) = &self.days {
            if let Some(bad) = split_list(days).find(|d| !is_weekday_name(d)) {
                return Err(format!("`days` contains unknown weekday \"{bad}\""));
            }
            filter = filter.with_days(split_list(days));
        }
        if let Some(hidden) = &self.hidden {
            for campus in split_list(hidden) {
                filter = filter.hide_campus(campus);
            }
        }
        Ok(filter)
    }
}

/// Headline totals with the derived peak-exposure percentage.
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub units: f64,
    pub cost: f64,
    pub pf: f64,
    pub peak_exposure: f64,
    /// Number of records behind the totals.
    pub records: usize,
}

impl TotalsResponse {
    pub fn new(totals: EnergyTotals, records: usize) -> Self {
        Self {
            units: totals.units,
            cost: totals.cost,
            pf: totals.pf,
            peak_exposure: totals.peak_exposure(),
            records,
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
