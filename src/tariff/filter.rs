//! Downstream view stage: filtering, date/campus pickers, and the meter directory.
//!
//! Everything here reads processor output and allocates new collections; no
//! input is ever mutated.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use super::calendar::DAYS_OF_WEEK;
use super::types::{ConsumptionRecord, RawReading};

/// Selector value meaning "no restriction".
pub const ALL: &str = "All";

/// Which records a view shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingFilter {
    /// Campus to show, or `None` for all campuses.
    pub campus: Option<String>,
    /// Raw `YYYY-MM-DD` date to show, or `None` for all dates.
    pub date: Option<String>,
    /// Weekday names to show.
    pub days: BTreeSet<String>,
    /// Campuses switched off in the view.
    pub hidden_campuses: BTreeSet<String>,
}

impl Default for ReadingFilter {
    fn default() -> Self {
        Self {
            campus: None,
            date: None,
            days: DAYS_OF_WEEK.iter().map(|d| d.to_string()).collect(),
            hidden_campuses: BTreeSet::new(),
        }
    }
}

impl ReadingFilter {
    /// Restricts to one campus; `"All"` clears the restriction.
    pub fn with_campus(mut self, campus: &str) -> Self {
        self.campus = selection(campus);
        self
    }

    /// Restricts to one date; `"All"` clears the restriction.
    pub fn with_date(mut self, date: &str) -> Self {
        self.date = selection(date);
        self
    }

    pub fn with_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days = days.into_iter().map(Into::into).collect();
        self
    }

    pub fn hide_campus(mut self, campus: &str) -> Self {
        self.hidden_campuses.insert(campus.to_string());
        self
    }

    /// Returns `true` if `record` passes every criterion.
    pub fn matches(&self, record: &ConsumptionRecord) -> bool {
        let campus_match = self.campus.as_deref().is_none_or(|c| c == record.campus());
        let date_match = self.date.as_deref().is_none_or(|d| d == record.date());
        let day_match = self.days.contains(&record.day_of_week);
        let campus_on = !self.hidden_campuses.contains(record.campus());
        campus_match && date_match && day_match && campus_on
    }

    /// Returns the matching records as a new vector.
    pub fn apply(&self, records: &[ConsumptionRecord]) -> Vec<ConsumptionRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

fn selection(value: &str) -> Option<String> {
    if value == ALL {
        None
    } else {
        Some(value.to_string())
    }
}

/// A selectable date with its calendar labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateOption {
    pub raw: String,
    pub formatted: String,
    pub day_of_week: String,
    pub is_weekend: bool,
}

/// Sorted unique dates present in `records`.
pub fn available_dates(records: &[ConsumptionRecord]) -> Vec<DateOption> {
    let mut by_date: BTreeMap<&str, &ConsumptionRecord> = BTreeMap::new();
    for r in records {
        by_date.entry(r.date()).or_insert(r);
    }
    by_date
        .into_iter()
        .map(|(raw, r)| DateOption {
            raw: raw.to_string(),
            formatted: r.formatted_date.clone(),
            day_of_week: r.day_of_week.clone(),
            is_weekend: r.is_weekend,
        })
        .collect()
}

/// Sorted unique campuses present in `readings`.
pub fn available_campuses(readings: &[RawReading]) -> Vec<String> {
    readings
        .iter()
        .map(|r| r.campus.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A meter as shown in the peak-toggle panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeterEntry {
    pub meter_number: String,
    pub campus: String,
    pub location: String,
}

/// Unique meters in first-seen order, labelled from their first reading.
pub fn meter_directory(readings: &[RawReading]) -> Vec<MeterEntry> {
    let mut seen = HashSet::new();
    readings
        .iter()
        .filter(|r| seen.insert(r.meter_number.as_str()))
        .map(|r| MeterEntry {
            meter_number: r.meter_number.clone(),
            campus: r.campus.clone(),
            location: r.location.clone(),
        })
        .collect()
}

/// Groups meters by campus; meters with no campus land under `"Other"`.
pub fn group_by_campus(meters: &[MeterEntry]) -> BTreeMap<String, Vec<MeterEntry>> {
    let mut groups: BTreeMap<String, Vec<MeterEntry>> = BTreeMap::new();
    for m in meters {
        let campus = if m.campus.is_empty() {
            "Other".to_string()
        } else {
            m.campus.clone()
        };
        groups.entry(campus).or_default().push(m.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tariff::processor::process_reading;

    fn reading(date: &str, campus: &str, meter: &str) -> RawReading {
        RawReading {
            date: date.to_string(),
            campus: campus.to_string(),
            block: String::new(),
            meter_number: meter.to_string(),
            location: "GF".to_string(),
            units_7_8: 10.0,
            units_8_9: 10.0,
            units_9_10am_next: 100.0,
            remarks: String::new(),
        }
    }

    fn records() -> Vec<ConsumptionRecord> {
        [
            reading("2025-12-29", "140-H", "AL-1"),
            reading("2025-12-29", "141-D", "SCJ-1"),
            reading("2026-01-03", "140-H", "AL-1"),
            reading("2026-01-03", "141-D", "SCJ-1"),
        ]
        .iter()
        .map(|r| process_reading(r, 71.0, true))
        .collect()
    }

    #[test]
    fn default_filter_keeps_everything() {
        let all = records();
        assert_eq!(ReadingFilter::default().apply(&all).len(), 4);
    }

    #[test]
    fn campus_and_date_selection() {
        let all = records();
        let f = ReadingFilter::default()
            .with_campus("141-D")
            .with_date("2026-01-03");
        let out = f.apply(&all);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].meter_number(), "SCJ-1");

        let f = ReadingFilter::default().with_campus(ALL).with_date(ALL);
        assert_eq!(f.apply(&all).len(), 4);
    }

    #[test]
    fn weekday_selection_drops_saturday() {
        let all = records();
        let f = ReadingFilter::default().with_days(["Monday"]);
        let out = f.apply(&all);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|r| r.day_of_week == "Monday"));
    }

    #[test]
    fn hidden_campus_is_excluded() {
        let all = records();
        let out = ReadingFilter::default().hide_campus("140-H").apply(&all);
        assert!(out.iter().all(|r| r.campus() == "141-D"));
    }

    #[test]
    fn filtering_leaves_input_untouched() {
        let all = records();
        let before = all.clone();
        let _ = ReadingFilter::default().with_campus("140-H").apply(&all);
        assert_eq!(all, before);
    }

    #[test]
    fn dates_are_sorted_and_labelled() {
        let dates = available_dates(&records());
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0].raw, "2025-12-29");
        assert_eq!(dates[0].formatted, "29 Dec 2025");
        assert_eq!(dates[1].day_of_week, "Saturday");
        assert!(dates[1].is_weekend);
    }

    #[test]
    fn directory_and_grouping() {
        let readings = vec![
            reading("2025-12-29", "141-D", "SCJ-1"),
            reading("2025-12-29", "", "X-9"),
            reading("2025-12-30", "141-D", "SCJ-1"),
        ];
        assert_eq!(available_campuses(&readings), vec!["", "141-D"]);

        let meters = meter_directory(&readings);
        assert_eq!(meters.len(), 2);
        assert_eq!(meters[0].meter_number, "SCJ-1");

        let groups = group_by_campus(&meters);
        assert_eq!(groups.get("Other").map(Vec::len), Some(1));
        assert_eq!(groups.get("141-D").map(Vec::len), Some(1));
    }
}
