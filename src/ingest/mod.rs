//! Normalization of spreadsheet rows into readings and staffing rows.
//!
//! The sheet backend hands over loosely typed cells: numbers may arrive as
//! strings, text may arrive as numbers, and any cell may be missing. Numeric
//! cells that fail to parse become 0; they are never reported as faults.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

/// Sheet-row normalization for meter readings and staffing rows.
pub mod sheet;

pub use sheet::{SheetReadingRow, SheetStaffingRow, SheetValue};

use crate::staffing::StaffingRow;
use crate::tariff::types::RawReading;

/// Failure to read a snapshot file.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot read \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV in \"{path}\": {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("invalid JSON in \"{path}\": {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported snapshot format \"{0}\" (expected .csv or .json)")]
    Format(String),
}

/// Body returned by the sheet backend: either rows or an error object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SheetPayload<T> {
    Rows(Vec<T>),
    Failure { error: String },
}

/// Loads and normalizes meter readings from a `.csv` or `.json` snapshot.
///
/// # Errors
///
/// Returns an `IngestError` if the file cannot be read or parsed. A backend
/// error object (`{"error": ...}`) is logged and yields no rows.
pub fn load_readings(path: &Path) -> Result<Vec<RawReading>, IngestError> {
    let rows: Vec<SheetReadingRow> = load_rows(path)?;
    let total = rows.len();
    let readings = sheet::normalize_readings(rows);
    info!(
        path = %path.display(),
        rows = total,
        kept = readings.len(),
        "loaded meter readings"
    );
    Ok(readings)
}

/// Loads and normalizes staffing rows from a `.csv` or `.json` snapshot.
///
/// # Errors
///
/// Returns an `IngestError` if the file cannot be read or parsed.
pub fn load_staffing(path: &Path) -> Result<Vec<StaffingRow>, IngestError> {
    let rows: Vec<SheetStaffingRow> = load_rows(path)?;
    let staffing: Vec<StaffingRow> = rows.into_iter().map(SheetStaffingRow::normalize).collect();
    info!(path = %path.display(), rows = staffing.len(), "loaded staffing rows");
    Ok(staffing)
}

fn load_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, IngestError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: display.clone(),
        source,
    })?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => parse_csv(file).map_err(|source| IngestError::Csv {
            path: display,
            source,
        }),
        Some("json") => parse_json(file).map_err(|source| IngestError::Json {
            path: display,
            source,
        }),
        other => Err(IngestError::Format(other.unwrap_or("").to_string())),
    }
}

/// Parses CSV rows whose headers match the sheet column names.
///
/// # Errors
///
/// Returns a `csv::Error` on malformed CSV.
pub fn parse_csv<T: DeserializeOwned>(reader: impl Read) -> Result<Vec<T>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    rdr.deserialize().collect()
}

/// Parses a JSON array of row objects, or a backend `{"error": ...}` object.
///
/// # Errors
///
/// Returns a `serde_json::Error` if the body is neither shape.
pub fn parse_json<T: DeserializeOwned>(reader: impl Read) -> Result<Vec<T>, serde_json::Error> {
    let payload: SheetPayload<T> = serde_json::from_reader(reader)?;
    match payload {
        SheetPayload::Rows(rows) => Ok(rows),
        SheetPayload::Failure { error } => {
            warn!(%error, "sheet backend reported an error");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_normalize() {
        let csv = "date,campus,block,meterNumber,location,units_7_8,units_8_9,units_9_10am_next,remarks\n\
                   2026-01-15,140 h,h,al-214422,GF,20,20.5,abc,ok\n\
                   2026-01-15,141-D,D,x,GF,1,1,1,\n";
        let rows: Vec<SheetReadingRow> = parse_csv(csv.as_bytes()).expect("csv should parse");
        let readings = sheet::normalize_readings(rows);
        assert_eq!(readings.len(), 1);
        let r = &readings[0];
        assert_eq!(r.campus, "140-H");
        assert_eq!(r.meter_number, "AL-214422");
        assert_eq!(r.units_8_9, 20.5);
        assert_eq!(r.units_9_10am_next, 0.0);
    }

    #[test]
    fn json_rows_normalize() {
        let json = r#"[
            {"date": "2026-01-15", "campus": " 141 d ", "meterNumber": "scj84858",
             "units_7_8": "12", "units_8_9": 8, "units_9_10am_next": null}
        ]"#;
        let rows: Vec<SheetReadingRow> = parse_json(json.as_bytes()).expect("json should parse");
        let readings = sheet::normalize_readings(rows);
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].campus, "141-D");
        assert_eq!(readings[0].location, "Unknown Area");
        assert_eq!(readings[0].units_7_8, 12.0);
        assert_eq!(readings[0].units_8_9, 8.0);
        assert_eq!(readings[0].units_9_10am_next, 0.0);
    }

    #[test]
    fn backend_error_yields_no_rows() {
        let rows: Result<Vec<SheetReadingRow>, _> =
            parse_json(r#"{"error": "sheet not found"}"#.as_bytes());
        assert!(rows.is_ok_and(|r| r.is_empty()));
    }

    #[test]
    fn malformed_json_is_an_error() {
        let rows: Result<Vec<SheetReadingRow>, _> = parse_json("{not json".as_bytes());
        assert!(rows.is_err());
    }

    #[test]
    fn staffing_csv_maps_sheet_columns() {
        let csv = "no,description,existing_setup,single_shift_estimation\n\
                   1,Janitorial,25,12\n\
                   2,Security,n/a,9\n";
        let rows: Vec<SheetStaffingRow> = parse_csv(csv.as_bytes()).expect("csv should parse");
        let staffing: Vec<StaffingRow> =
            rows.into_iter().map(SheetStaffingRow::normalize).collect();
        assert_eq!(staffing.len(), 2);
        assert_eq!(staffing[0].existing_staff, 25.0);
        assert_eq!(staffing[1].existing_staff, 0.0);
        assert_eq!(staffing[1].difference(), -9.0);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_rows::<SheetReadingRow>(Path::new("Cargo.toml"));
        assert!(matches!(err, Err(IngestError::Format(_))));
    }
}
