use std::path::PathBuf;

use clap::Parser;

/// Campus energy cost and peak-factor exposure report.
///
/// Costs each meter's evening and overnight readings against the base rate
/// and the peak-factor surcharge, then rolls them up per campus.
#[derive(Parser, Debug)]
#[command(name = "campus-energy", version, long_about)]
pub struct Cli {
    /// Load configuration from a TOML file.
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub config: Option<PathBuf>,
    /// Use a built-in preset (demo, flat, summer_audit). Defaults to demo.
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,
    /// Readings snapshot (.csv or .json); overrides `[data] readings`.
    #[arg(long, value_name = "PATH")]
    pub readings: Option<PathBuf>,
    /// Staffing snapshot (.csv or .json); overrides `[data] staffing`.
    #[arg(long, value_name = "PATH")]
    pub staffing: Option<PathBuf>,
    /// Base rate in currency per unit.
    #[arg(long)]
    pub base_rate: Option<f64>,
    /// Campus to report on, or "All".
    #[arg(long)]
    pub campus: Option<String>,
    /// Date to report on (YYYY-MM-DD), "All", or "first".
    #[arg(long)]
    pub date: Option<String>,
    /// Seed for the demo data generator.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write the filtered consumption records to CSV.
    #[arg(long, value_name = "PATH")]
    pub records_out: Option<PathBuf>,
    /// Write the campus summaries to CSV.
    #[arg(long, value_name = "PATH")]
    pub summary_out: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG is set.
    #[arg(short, long)]
    pub verbose: bool,
    /// Serve the REST API after printing the report (needs the `api` feature).
    #[arg(long)]
    pub serve: bool,
    /// API server port.
    #[arg(long, default_value_t = 3000)]
    pub port: u16,
}
