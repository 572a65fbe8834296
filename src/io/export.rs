//! CSV export for costed records and campus summaries.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::tariff::summary::CampusSummary;
use crate::tariff::types::ConsumptionRecord;

/// Column header for the record export.
const RECORD_HEADER: &str = "date,formatted_date,day_of_week,campus,block,meter_number,\
                             location,units_7_8,units_8_9,units_9_10am_next,total_units,\
                             peak_units,base_cost_7_8,peak_surcharge_7_8,base_cost_8_9,\
                             peak_surcharge_8_9,base_cost_9_10am,peak_surcharge_9_10am,\
                             total_base_cost,total_peak_surcharge,total_cost,\
                             is_summer_tariff,is_weekend,remarks";

/// Column header for the summary export.
const SUMMARY_HEADER: &str = "campus,total_units,total_cost,total_peak_surcharge,peak_exposure_pct";

/// Exports consumption records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per record, in input order.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_records_csv(records: &[ConsumptionRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_records_csv(records, io::BufWriter::new(file))
}

/// Writes consumption records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_records_csv(records: &[ConsumptionRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(RECORD_HEADER.split(',').map(str::trim))?;

    for r in records {
        let raw = &r.reading;
        wtr.write_record(&[
            raw.date.clone(),
            r.formatted_date.clone(),
            r.day_of_week.clone(),
            raw.campus.clone(),
            raw.block.clone(),
            raw.meter_number.clone(),
            raw.location.clone(),
            format!("{:.2}", raw.units_7_8),
            format!("{:.2}", raw.units_8_9),
            format!("{:.2}", raw.units_9_10am_next),
            format!("{:.2}", r.total_units),
            format!("{:.4}", r.peak_units),
            format!("{:.2}", r.cost_7_8.base),
            format!("{:.2}", r.cost_7_8.surcharge),
            format!("{:.2}", r.cost_8_9.base),
            format!("{:.2}", r.cost_8_9.surcharge),
            format!("{:.2}", r.cost_9_10am.base),
            format!("{:.2}", r.cost_9_10am.surcharge),
            format!("{:.2}", r.total_base_cost),
            format!("{:.2}", r.total_peak_surcharge),
            format!("{:.2}", r.total_cost),
            r.is_summer_tariff.to_string(),
            r.is_weekend.to_string(),
            raw.remarks.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports campus summaries to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_summaries_csv(summaries: &[CampusSummary], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_summaries_csv(summaries, io::BufWriter::new(file))
}

/// Writes campus summaries as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_summaries_csv(summaries: &[CampusSummary], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(SUMMARY_HEADER.split(','))?;

    for s in summaries {
        wtr.write_record(&[
            s.campus.clone(),
            format!("{:.2}", s.total_units),
            format!("{:.2}", s.total_cost),
            format!("{:.2}", s.total_peak_surcharge),
            format!("{:.2}", s.peak_exposure),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
