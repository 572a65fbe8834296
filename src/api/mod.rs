//! Read-only REST API over a processed reading snapshot.
//!
//! The record, summary, and totals endpoints accept the same filter query
//! (`campus`, `date`, `days`, `hidden`).
//!
//! - `/records`: costed consumption records
//! - `/summaries`: per-campus roll-ups
//! - `/totals`: headline units, cost, and PF surcharge
//! - `/dates`, `/campuses`, `/meters`: picker data
//! - `/staffing`: staffing cost comparison
//! - `/insights`: the current energy insight block

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::insights::AiAnalysis;
use crate::staffing::StaffingMetrics;
use crate::tariff::dashboard::Dashboard;

pub use types::{ErrorResponse, TotalsResponse, ViewQuery};

/// Immutable application state shared across all request handlers.
///
/// Built once after the report is computed and wrapped in `Arc`; handlers
/// only read it.
pub struct AppState {
    /// Readings, tariff, and the costed record snapshot.
    pub dashboard: Dashboard,
    pub staffing: StaffingMetrics,
    pub insights: AiAnalysis,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/records", get(handlers::get_records))
        .route("/summaries", get(handlers::get_summaries))
        .route("/totals", get(handlers::get_totals))
        .route("/dates", get(handlers::get_dates))
        .route("/campuses", get(handlers::get_campuses))
        .route("/meters", get(handlers::get_meters))
        .route("/staffing", get(handlers::get_staffing))
        .route("/insights", get(handlers::get_insights))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
