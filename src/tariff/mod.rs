//! Energy cost and peak-factor surcharge calculator.

/// Season and weekday classification of reading dates.
pub mod calendar;
pub mod dashboard;
/// Filtering and picker data for report views.
pub mod filter;
pub mod processor;
/// Campus roll-ups and headline totals.
pub mod summary;
pub mod types;

pub use dashboard::Dashboard;
pub use filter::ReadingFilter;
pub use processor::process;
pub use summary::{CampusSummary, EnergyTotals, summarize};
pub use types::{ConsumptionRecord, RawReading, TariffConfig, WindowCost};
