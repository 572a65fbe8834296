use serde::Deserialize;
use tracing::debug;

use crate::staffing::StaffingRow;
use crate::tariff::types::RawReading;

/// Location assigned to readings that arrive without one.
pub const UNKNOWN_LOCATION: &str = "Unknown Area";

/// A loosely typed sheet cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SheetValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl SheetValue {
    /// Renders the cell as text; whole numbers print without a fraction.
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Reads the cell as a number, `None` if it has no numeric prefix.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(_) => None,
            Self::Text(s) => parse_number_prefix(s),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0.0,
            Self::Bool(b) => !b,
            Self::Text(s) => s.is_empty(),
        }
    }
}

/// Parses the longest leading decimal number in `s`, ignoring leading
/// whitespace; `"12.5 kWh"` reads as `12.5` and `"1e3"` as `1000`.
pub fn parse_number_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    // An exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

fn text_or(cell: Option<&SheetValue>, default: &str) -> String {
    match cell {
        Some(v) if !v.is_blank() => v.to_text(),
        _ => default.to_string(),
    }
}

/// Parse failures, missing, non-finite, and negative cells all read as 0.
fn units(cell: Option<&SheetValue>) -> f64 {
    cell.and_then(SheetValue::to_number)
        .filter(|n| n.is_finite())
        .map_or(0.0, |n| n.max(0.0))
}

/// Upper-cases, trims, and joins whitespace runs with `-`: `" 140 h "` becomes `"140-H"`.
pub fn normalize_campus(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_uppercase()
}

/// One row of the readings tab, as exported by the sheet backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SheetReadingRow {
    pub date: Option<SheetValue>,
    pub campus: Option<SheetValue>,
    pub block: Option<SheetValue>,
    #[serde(rename = "meterNumber", alias = "meter_number")]
    pub meter_number: Option<SheetValue>,
    pub location: Option<SheetValue>,
    pub units_7_8: Option<SheetValue>,
    pub units_8_9: Option<SheetValue>,
    pub units_9_10am_next: Option<SheetValue>,
    pub remarks: Option<SheetValue>,
}

impl SheetReadingRow {
    /// Normalizes the row into a reading. Does not apply the meter-number filter.
    pub fn normalize(self) -> RawReading {
        RawReading {
            date: text_or(self.date.as_ref(), ""),
            campus: normalize_campus(&text_or(self.campus.as_ref(), "")),
            block: text_or(self.block.as_ref(), "").trim().to_uppercase(),
            meter_number: text_or(self.meter_number.as_ref(), "")
                .trim()
                .to_uppercase(),
            location: text_or(self.location.as_ref(), UNKNOWN_LOCATION),
            units_7_8: units(self.units_7_8.as_ref()),
            units_8_9: units(self.units_8_9.as_ref()),
            units_9_10am_next: units(self.units_9_10am_next.as_ref()),
            remarks: text_or(self.remarks.as_ref(), ""),
        }
    }
}

/// Normalizes rows and drops those whose meter number is shorter than two characters.
pub fn normalize_readings(rows: Vec<SheetReadingRow>) -> Vec<RawReading> {
    rows.into_iter()
        .map(SheetReadingRow::normalize)
        .filter(|r| {
            let keep = r.meter_number.chars().count() > 1;
            if !keep {
                debug!(meter = %r.meter_number, date = %r.date, "dropping row without a usable meter number");
            }
            keep
        })
        .collect()
}

/// One row of the staffing tab.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SheetStaffingRow {
    pub no: Option<SheetValue>,
    pub description: Option<SheetValue>,
    pub existing_setup: Option<SheetValue>,
    pub single_shift_estimation: Option<SheetValue>,
}

impl SheetStaffingRow {
    pub fn normalize(self) -> StaffingRow {
        StaffingRow {
            no: text_or(self.no.as_ref(), ""),
            description: text_or(self.description.as_ref(), ""),
            existing_staff: units(self.existing_setup.as_ref()),
            target_staff: units(self.single_shift_estimation.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Option<SheetValue> {
        Some(SheetValue::Text(s.to_string()))
    }

    #[test]
    fn number_prefix_parsing() {
        assert_eq!(parse_number_prefix("12.5 kWh"), Some(12.5));
        assert_eq!(parse_number_prefix("  7"), Some(7.0));
        assert_eq!(parse_number_prefix(".5"), Some(0.5));
        assert_eq!(parse_number_prefix("-3"), Some(-3.0));
        assert_eq!(parse_number_prefix("4."), Some(4.0));
        assert_eq!(parse_number_prefix("abc"), None);
        assert_eq!(parse_number_prefix(""), None);
        assert_eq!(parse_number_prefix("."), None);
    }

    #[test]
    fn number_prefix_accepts_exponents() {
        assert_eq!(parse_number_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_number_prefix("2.5E-1 kWh"), Some(0.25));
        assert_eq!(parse_number_prefix("4e+2"), Some(400.0));
        assert_eq!(parse_number_prefix("7e"), Some(7.0));
        assert_eq!(parse_number_prefix("7e-"), Some(7.0));
        assert_eq!(parse_number_prefix("3 e2"), Some(3.0));
        assert_eq!(parse_number_prefix("e3"), None);
    }

    #[test]
    fn campus_normalization() {
        assert_eq!(normalize_campus(" 140 h "), "140-H");
        assert_eq!(normalize_campus("141\t\td"), "141-D");
        assert_eq!(normalize_campus(""), "");
    }

    #[test]
    fn missing_cells_use_defaults() {
        let r = SheetReadingRow {
            meter_number: text(" al-1 "),
            ..SheetReadingRow::default()
        }
        .normalize();
        assert_eq!(r.meter_number, "AL-1");
        assert_eq!(r.location, UNKNOWN_LOCATION);
        assert_eq!(r.date, "");
        assert_eq!(r.units_7_8, 0.0);
        assert_eq!(r.remarks, "");
    }

    #[test]
    fn negative_and_non_numeric_units_read_as_zero() {
        let r = SheetReadingRow {
            meter_number: text("AL-1"),
            units_7_8: Some(SheetValue::Number(-4.0)),
            units_8_9: text("n/a"),
            units_9_10am_next: Some(SheetValue::Bool(true)),
            ..SheetReadingRow::default()
        }
        .normalize();
        assert_eq!(r.units_7_8, 0.0);
        assert_eq!(r.units_8_9, 0.0);
        assert_eq!(r.units_9_10am_next, 0.0);
    }

    #[test]
    fn numeric_cells_render_as_text() {
        let r = SheetReadingRow {
            meter_number: Some(SheetValue::Number(84858.0)),
            block: Some(SheetValue::Number(3.0)),
            ..SheetReadingRow::default()
        }
        .normalize();
        assert_eq!(r.meter_number, "84858");
        assert_eq!(r.block, "3");
    }

    #[test]
    fn short_meter_numbers_are_dropped() {
        let rows = vec![
            SheetReadingRow {
                meter_number: text("A"),
                ..SheetReadingRow::default()
            },
            SheetReadingRow::default(),
            SheetReadingRow {
                meter_number: text("AB"),
                ..SheetReadingRow::default()
            },
        ];
        let readings = normalize_readings(rows);
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].meter_number, "AB");
    }
}
