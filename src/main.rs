//! Campus energy report entry point: config, data loading, report, exports.

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info, warn};

use campus_energy::cli::Cli;
use campus_energy::config::{AppConfig, DataSection};
use campus_energy::fixtures::demo_staffing;
use campus_energy::ingest;
use campus_energy::insights::{AiAnalysis, InsightRequest, energy_insights};
use campus_energy::io::export::{export_records_csv, export_summaries_csv};
use campus_energy::observability::init_tracing;
use campus_energy::staffing::{StaffingMetrics, StaffingRow};
use campus_energy::tariff::filter::ReadingFilter;
use campus_energy::tariff::types::RawReading;
use campus_energy::tariff::{CampusSummary, Dashboard, EnergyTotals, summarize};

/// Loads the config: `--config` takes priority, then `--preset`, then `demo`.
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let cfg = if let Some(path) = &cli.config {
        AppConfig::from_toml_file(path)?
    } else {
        AppConfig::from_preset(cli.preset.as_deref().unwrap_or("demo"))?
    };
    Ok(cfg)
}

fn apply_overrides(cfg: &mut AppConfig, cli: &Cli) {
    if let Some(path) = &cli.readings {
        cfg.data.readings = Some(path.clone());
    }
    if let Some(path) = &cli.staffing {
        cfg.data.staffing = Some(path.clone());
    }
    if let Some(seed) = cli.seed {
        cfg.data.seed = seed;
    }
    if let Some(rate) = cli.base_rate {
        cfg.tariff.base_rate = rate;
    }
    if let Some(campus) = &cli.campus {
        cfg.filter.campus = campus.clone();
    }
    if let Some(date) = &cli.date {
        cfg.filter.date = date.clone();
    }
}

/// Reads the configured snapshot, falling back to demo data when unset or empty.
fn load_readings(data: &DataSection) -> Result<Vec<RawReading>> {
    if let Some(path) = &data.readings {
        let readings = ingest::load_readings(path)?;
        if !readings.is_empty() {
            return Ok(readings);
        }
        warn!(path = %path.display(), "readings snapshot is empty, using demo data");
    }
    Ok(data.demo_readings())
}

fn load_staffing(data: &DataSection) -> Result<Vec<StaffingRow>> {
    if let Some(path) = &data.staffing {
        let rows = ingest::load_staffing(path)?;
        if !rows.is_empty() {
            return Ok(rows);
        }
        warn!(path = %path.display(), "staffing snapshot is empty, using demo rows");
    }
    Ok(demo_staffing())
}

fn describe(filter: &ReadingFilter) -> String {
    let campus = filter.campus.as_deref().unwrap_or("All campuses");
    let date = filter.date.as_deref().unwrap_or("all dates");
    format!("{campus}, {date}, {} weekday(s)", filter.days.len())
}

fn print_report(
    filter: &ReadingFilter,
    totals: &EnergyTotals,
    summaries: &[CampusSummary],
    staffing: &StaffingMetrics,
    insights: &AiAnalysis,
) {
    println!("View: {}", describe(filter));
    println!();
    println!("{totals}");
    println!();
    println!("--- Campus Summary ---");
    if summaries.is_empty() {
        println!("(no records match the current view)");
    }
    for s in summaries {
        println!("{s}");
    }
    println!();
    println!("{staffing}");
    println!();
    println!("{insights}");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut cfg = load_config(&cli)?;
    apply_overrides(&mut cfg, &cli);

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            error!("{e}");
        }
        bail!("invalid configuration ({} error(s))", errors.len());
    }

    let readings = load_readings(&cfg.data)?;
    let staffing_rows = load_staffing(&cfg.data)?;

    let tariff = cfg.resolve_tariff(&readings);
    let dashboard = Dashboard::new(readings, tariff);
    let filter = cfg.resolve_filter(&dashboard.records());

    let records = dashboard.filtered(&filter);
    let summaries = summarize(&records);
    let totals = EnergyTotals::from_records(&records);
    let staffing = StaffingMetrics::compute(
        &staffing_rows,
        cfg.staffing.avg_salary,
        cfg.staffing.period,
    );
    let insights = energy_insights(None, &InsightRequest::from_snapshot(&dashboard.records()));
    info!(
        records = records.len(),
        campuses = summaries.len(),
        "report ready"
    );

    print_report(&filter, &totals, &summaries, &staffing, &insights);

    if let Some(path) = &cli.records_out {
        export_records_csv(&records, path)
            .with_context(|| format!("failed to write records to {}", path.display()))?;
        info!(path = %path.display(), rows = records.len(), "records written");
    }
    if let Some(path) = &cli.summary_out {
        export_summaries_csv(&summaries, path)
            .with_context(|| format!("failed to write summaries to {}", path.display()))?;
        info!(path = %path.display(), rows = summaries.len(), "summaries written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(campus_energy::api::AppState {
            dashboard,
            staffing,
            insights,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(campus_energy::api::serve(state, addr))
            .with_context(|| format!("API server on {addr} failed"))?;
    }

    #[cfg(not(feature = "api"))]
    if cli.serve {
        warn!("--serve needs the `api` feature; rebuild with --features api");
    }

    Ok(())
}
