//! TOML-based dashboard configuration and preset definitions.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::fixtures::{DEMO_DATES, SUMMER_DEMO_DATES, demo_readings_for};
use crate::staffing::FinancialPeriod;
use crate::tariff::calendar::{DAYS_OF_WEEK, is_weekday_name, parse_calendar_date};
use crate::tariff::filter::{ALL, ReadingFilter, available_dates};
use crate::tariff::types::{ConsumptionRecord, RawReading, TariffConfig};

/// `[filter] date` value selecting the earliest date in the snapshot.
pub const FIRST_DATE: &str = "first";

/// `[tariff] peak_meters` keyword selecting every meter in the snapshot.
pub const ALL_METERS: &str = "all";

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults matching the `demo` preset. Load from TOML with
/// [`AppConfig::from_toml_file`] or pick a preset with [`AppConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Base rate and peak-eligible meters.
    #[serde(default)]
    pub tariff: TariffSection,
    /// Initial report view.
    #[serde(default)]
    pub filter: FilterSection,
    /// Staffing comparison parameters.
    #[serde(default)]
    pub staffing: StaffingSection,
    /// Snapshot sources.
    #[serde(default)]
    pub data: DataSection,
}

/// Either the `"all"` keyword or an explicit meter list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PeakMeters {
    Keyword(String),
    Meters(Vec<String>),
}

impl Default for PeakMeters {
    fn default() -> Self {
        Self::Keyword(ALL_METERS.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffSection {
    /// Currency per unit (must be > 0).
    pub base_rate: f64,
    pub peak_meters: PeakMeters,
    /// Removed from the eligible set after `"all"` expansion.
    pub disabled_meters: Vec<String>,
}

impl Default for TariffSection {
    fn default() -> Self {
        Self {
            base_rate: 71.0,
            peak_meters: PeakMeters::default(),
            disabled_meters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterSection {
    /// Campus name or `"All"`.
    pub campus: String,
    /// `YYYY-MM-DD`, `"All"`, or `"first"`.
    pub date: String,
    /// Weekday names to include.
    pub days: Vec<String>,
    pub hidden_campuses: Vec<String>,
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            campus: ALL.to_string(),
            date: FIRST_DATE.to_string(),
            days: DAYS_OF_WEEK.iter().map(|d| d.to_string()).collect(),
            hidden_campuses: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaffingSection {
    /// Average monthly salary per head (must be >= 0).
    pub avg_salary: f64,
    pub period: FinancialPeriod,
}

impl Default for StaffingSection {
    fn default() -> Self {
        Self {
            avg_salary: 75_000.0,
            period: FinancialPeriod::Monthly,
        }
    }
}

/// Which week the demo generator covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoSeason {
    #[default]
    Winter,
    Summer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataSection {
    /// Readings snapshot (`.csv` or `.json`); demo data when unset.
    pub readings: Option<PathBuf>,
    /// Staffing snapshot (`.csv` or `.json`); demo rows when unset.
    pub staffing: Option<PathBuf>,
    /// Seed for the demo generator.
    pub seed: u64,
    pub demo_season: DemoSeason,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            readings: None,
            staffing: None,
            seed: 42,
            demo_season: DemoSeason::Winter,
        }
    }
}

impl DataSection {
    /// Seeded demo readings for the configured season.
    pub fn demo_readings(&self) -> Vec<RawReading> {
        match self.demo_season {
            DemoSeason::Winter => demo_readings_for(&DEMO_DATES, self.seed),
            DemoSeason::Summer => demo_readings_for(&SUMMER_DEMO_DATES, self.seed),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"tariff.base_rate"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl AppConfig {
    /// Returns the demo configuration: every meter peak-eligible, first date selected.
    pub fn demo() -> Self {
        Self::default()
    }

    /// Returns the flat preset: no meter carries the peak-factor surcharge.
    pub fn flat() -> Self {
        Self {
            tariff: TariffSection {
                peak_meters: PeakMeters::Meters(Vec::new()),
                ..TariffSection::default()
            },
            ..Self::default()
        }
    }

    /// Returns the summer-audit preset: a May week across all campuses and dates.
    pub fn summer_audit() -> Self {
        Self {
            filter: FilterSection {
                date: ALL.to_string(),
                ..FilterSection::default()
            },
            data: DataSection {
                demo_season: DemoSeason::Summer,
                ..DataSection::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "flat", "summer_audit"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "flat" => Ok(Self::flat()),
            "summer_audit" => Ok(Self::summer_audit()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let t = &self.tariff;
        if !(t.base_rate.is_finite() && t.base_rate > 0.0) {
            errors.push(ConfigError::new("tariff.base_rate", "must be finite and > 0"));
        }
        match &t.peak_meters {
            PeakMeters::Keyword(k) if k != ALL_METERS => errors.push(ConfigError::new(
                "tariff.peak_meters",
                format!("must be \"{ALL_METERS}\" or a list of meter numbers, got \"{k}\""),
            )),
            _ => {}
        }

        let f = &self.filter;
        for day in &f.days {
            if !is_weekday_name(day) {
                errors.push(ConfigError::new(
                    "filter.days",
                    format!("\"{day}\" is not a weekday name"),
                ));
            }
        }
        if f.date != ALL && f.date != FIRST_DATE && parse_calendar_date(&f.date).is_none() {
            errors.push(ConfigError::new(
                "filter.date",
                format!(
                    "must be \"{ALL}\", \"{FIRST_DATE}\", or a YYYY-MM-DD date, got \"{}\"",
                    f.date
                ),
            ));
        }

        let s = &self.staffing;
        if !(s.avg_salary.is_finite() && s.avg_salary >= 0.0) {
            errors.push(ConfigError::new("staffing.avg_salary", "must be finite and >= 0"));
        }

        errors
    }

    /// Builds the tariff for a reading snapshot.
    pub fn resolve_tariff(&self, readings: &[RawReading]) -> TariffConfig {
        let t = &self.tariff;
        let mut meters: BTreeSet<String> = match &t.peak_meters {
            PeakMeters::Keyword(_) => readings.iter().map(|r| r.meter_number.clone()).collect(),
            PeakMeters::Meters(list) => list.iter().cloned().collect(),
        };
        for m in &t.disabled_meters {
            meters.remove(m);
        }
        TariffConfig::new(t.base_rate, meters)
    }

    /// Builds the initial view filter. `"first"` resolves to the earliest
    /// date in `records`, or to all dates when there are none.
    pub fn resolve_filter(&self, records: &[ConsumptionRecord]) -> ReadingFilter {
        let f = &self.filter;
        let date = if f.date == FIRST_DATE {
            available_dates(records)
                .into_iter()
                .next()
                .map_or_else(|| ALL.to_string(), |d| d.raw)
        } else {
            f.date.clone()
        };
        let mut filter = ReadingFilter::default()
            .with_campus(&f.campus)
            .with_date(&date)
            .with_days(f.days.iter().cloned());
        for campus in &f.hidden_campuses {
            filter = filter.hide_campus(campus);
        }
        filter
    }
}
