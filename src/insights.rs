//! Free-text energy insights from an external text-generation service.
//!
//! The crate ships no network client. Callers plug one in through
//! [`InsightProvider`]; any failure or malformed reply degrades to
//! [`AiAnalysis::fallback`], so report generation never depends on it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::tariff::calendar::Season;
use crate::tariff::summary::{CampusSummary, summarize};
use crate::tariff::types::ConsumptionRecord;

/// Records sent to the provider are capped at this many.
pub const MAX_SAMPLE_RECORDS: usize = 10;

/// Structured analysis returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// One-line status summary.
    pub insight: String,
    /// Actionable points for floor and area managers.
    pub recommendations: Vec<String>,
    /// A single floor-specific saving tip.
    pub peak_savings_tip: String,
}

impl AiAnalysis {
    /// Static analysis used whenever the provider is unavailable.
    pub fn fallback() -> Self {
        Self {
            insight: "Load profile stable. Efficiency optimization possible during the \
                      6:30PM transition window."
                .to_string(),
            recommendations: vec![
                "Restrict AC usage in Admin blocks after 6:00 PM during Winter tariff.".to_string(),
                "Shift IT server heavy tasks to after 10:30 PM in Summer.".to_string(),
                "Optimize External lighting triggers to avoid early peak activation.".to_string(),
            ],
            peak_savings_tip: "GF West can save ~15% on peak billing by dimming non-essential \
                               lighting at exactly 6:30 PM."
                .to_string(),
        }
    }
}

impl fmt::Display for AiAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Insights ---")?;
        writeln!(f, "{}", self.insight)?;
        for (i, rec) in self.recommendations.iter().enumerate() {
            writeln!(f, "  {}. {rec}", i + 1)?;
        }
        write!(f, "Peak savings tip: {}", self.peak_savings_tip)
    }
}

/// Why a provider reply could not be used.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("insight provider failed: {0}")]
    Provider(String),
    #[error("malformed insight response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("insight response has no recommendations")]
    Empty,
}

/// A text-generation backend.
pub trait InsightProvider {
    /// Sends `prompt` and returns the raw reply, expected to be a JSON object
    /// with `insight`, `recommendations`, and `peakSavingsTip`.
    fn generate(&self, prompt: &str) -> Result<String, InsightError>;
}

/// Meter location and consumption, as shared with the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeterSample {
    pub loc: String,
    pub units: f64,
}

/// Input to the provider: campus summaries and a bounded record sample.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightRequest {
    pub summaries: Vec<CampusSummary>,
    pub sample: Vec<MeterSample>,
}

impl InsightRequest {
    /// Builds a request from the first [`MAX_SAMPLE_RECORDS`] records.
    pub fn new(summaries: &[CampusSummary], records: &[ConsumptionRecord]) -> Self {
        Self {
            summaries: summaries.to_vec(),
            sample: records
                .iter()
                .take(MAX_SAMPLE_RECORDS)
                .map(|r| MeterSample {
                    loc: r.reading.location.clone(),
                    units: r.total_units,
                })
                .collect(),
        }
    }

    /// Builds a request covering a whole processed snapshot, independent of
    /// whatever view filter the caller is showing.
    pub fn from_snapshot(records: &[ConsumptionRecord]) -> Self {
        Self::new(&summarize(records), records)
    }

    /// Renders the provider prompt.
    pub fn build_prompt(&self) -> String {
        let summaries = serde_json::to_string(&self.summaries).unwrap_or_else(|_| "[]".into());
        let sample = serde_json::to_string(&self.sample).unwrap_or_else(|_| "[]".into());
        format!(
            "Analyze campus energy consumption relative to Peak Factor (PF) trends.\n\
             Summer (Apr-Oct): {summer} Peak.\n\
             Winter (Nov-Mar): {winter} Peak.\n\
             \n\
             Data: {summaries}\n\
             Sample Meters (Locations/Floors): {sample}\n\
             \n\
             Task:\n\
             - Provide a \"Smart Status\" summary.\n\
             - List 3 actionable points for floor/area managers to save during peak hours.\n\
             - Provide 1 specific \"Peak Savings Tip\" for a specific floor based on the data provided.\n\
             \n\
             Respond in JSON with keys insight, recommendations, peakSavingsTip.",
            summer = Season::Summer.peak_window(),
            winter = Season::Winter.peak_window(),
        )
    }
}

/// Parses a provider reply.
///
/// # Errors
///
/// Returns `InsightError::Malformed` for invalid JSON or missing keys, and
/// `InsightError::Empty` when there are no recommendations.
pub fn parse_analysis(reply: &str) -> Result<AiAnalysis, InsightError> {
    let analysis: AiAnalysis = serde_json::from_str(reply.trim())?;
    if analysis.recommendations.is_empty() {
        return Err(InsightError::Empty);
    }
    Ok(analysis)
}

/// Asks `provider` for an analysis, falling back to the static one when no
/// provider is configured or on any error.
pub fn energy_insights(
    provider: Option<&dyn InsightProvider>,
    request: &InsightRequest,
) -> AiAnalysis {
    let Some(provider) = provider else {
        debug!("no insight provider configured");
        return AiAnalysis::fallback();
    };
    let prompt = request.build_prompt();
    debug!(
        campuses = request.summaries.len(),
        sample = request.sample.len(),
        "requesting energy insights"
    );
    match provider.generate(&prompt).and_then(|reply| parse_analysis(&reply)) {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!(error = %e, "using fallback insights");
            AiAnalysis::fallback()
        }
    }
}
