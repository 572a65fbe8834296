//! Request handlers for the API endpoints.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use super::AppState;
use super::types::{ErrorResponse, TotalsResponse, ViewQuery};
use crate::insights::AiAnalysis;
use crate::staffing::StaffingMetrics;
use crate::tariff::filter::{
    DateOption, MeterEntry, ReadingFilter, available_campuses, available_dates, group_by_campus,
    meter_directory,
};
use crate::tariff::summary::{CampusSummary, EnergyTotals};
use crate::tariff::types::ConsumptionRecord;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn parse_filter(query: &ViewQuery) -> Result<ReadingFilter, ApiError> {
    query
        .to_filter()
        .map_err(|error| (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })))
}

/// `GET /records` → 200 + filtered `ConsumptionRecord` JSON, or 400 on a bad query
pub async fn get_records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<Vec<ConsumptionRecord>>, ApiError> {
    let filter = parse_filter(&query)?;
    Ok(Json(state.dashboard.filtered(&filter)))
}

/// `GET /summaries` → 200 + `CampusSummary` list in first-seen campus order
pub async fn get_summaries(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<Vec<CampusSummary>>, ApiError> {
    let filter = parse_filter(&query)?;
    Ok(Json(state.dashboard.summaries(&filter)))
}

/// `GET /totals` → 200 + `TotalsResponse`
pub async fn get_totals(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<TotalsResponse>, ApiError> {
    let filter = parse_filter(&query)?;
    let records = state.dashboard.filtered(&filter);
    let totals = EnergyTotals::from_records(&records);
    Ok(Json(TotalsResponse::new(totals, records.len())))
}

/// `GET /dates` → 200 + sorted `DateOption` list over the whole snapshot
pub async fn get_dates(State(state): State<Arc<AppState>>) -> Json<Vec<DateOption>> {
    Json(available_dates(&state.dashboard.records()))
}

/// `GET /campuses` → 200 + sorted campus names
pub async fn get_campuses(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(available_campuses(state.dashboard.readings()))
}

/// `GET /meters` → 200 + meters grouped by campus
pub async fn get_meters(
    State(state): State<Arc<AppState>>,
) -> Json<BTreeMap<String, Vec<MeterEntry>>> {
    Json(group_by_campus(&meter_directory(state.dashboard.readings())))
}

/// `GET /staffing` → 200 + `StaffingMetrics`
pub async fn get_staffing(State(state): State<Arc<AppState>>) -> Json<StaffingMetrics> {
    Json(state.staffing.clone())
}

/// `GET /insights` → 200 + `AiAnalysis` computed when the report was built
pub async fn get_insights(State(state): State<Arc<AppState>>) -> Json<AiAnalysis> {
    Json(state.insights.clone())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::fixtures::{demo_readings, demo_staffing};
    use crate::staffing::FinancialPeriod;
    use crate::tariff::dashboard::Dashboard;
    use crate::tariff::types::TariffConfig;

    fn make_test_state() -> Arc<AppState> {
        let readings = demo_readings(42);
        let tariff = TariffConfig::all_meters(71.0, &readings);
        Arc::new(AppState {
            dashboard: Dashboard::new(readings, tariff),
            staffing: StaffingMetrics::compute(
                &demo_staffing(),
                75_000.0,
                FinancialPeriod::Monthly,
            ),
            insights: AiAnalysis::fallback(),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn records_returns_all_by_default() {
        let (status, json) = get_json("/records").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(40));
        assert_eq!(json[0]["formatted_date"], "29 Dec 2025");
        assert_eq!(json[0]["meter_number"], "AL-214422");
    }

    #[tokio::test]
    async fn records_filter_by_campus_and_date() {
        let (status, json) = get_json("/records?campus=141-D&date=2026-01-02").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn summaries_in_first_seen_order() {
        let (status, json) = get_json("/summaries").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json[0]["campus"], "140-H");
        assert_eq!(json[1]["campus"], "141-D");
    }

    #[tokio::test]
    async fn hidden_campus_is_excluded() {
        let (_, json) = get_json("/summaries?hidden=140-H").await;
        assert_eq!(json.as_array().map(Vec::len), Some(1));
        assert_eq!(json[0]["campus"], "141-D");
    }

    #[tokio::test]
    async fn totals_for_weekend_days() {
        let (status, json) = get_json("/totals?days=Saturday,Sunday").await;
        assert_eq!(status, StatusCode::OK);
        // 2026-01-03 and 2026-01-04, five meters each
        assert_eq!(json["records"], 10);
        assert!(json["peak_exposure"].as_f64().is_some_and(|p| p > 0.0));
    }

    #[tokio::test]
    async fn invalid_date_returns_400() {
        let (status, json) = get_json("/totals?date=not-a-date").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn pickers_and_side_panels() {
        let (_, dates) = get_json("/dates").await;
        assert_eq!(dates.as_array().map(Vec::len), Some(8));
        assert_eq!(dates[0]["day_of_week"], "Monday");

        let (_, campuses) = get_json("/campuses").await;
        assert_eq!(campuses, serde_json::json!(["140-H", "141-D"]));

        let (_, meters) = get_json("/meters").await;
        assert_eq!(meters["141-D"].as_array().map(Vec::len), Some(3));

        let (_, staffing) = get_json("/staffing").await;
        assert_eq!(staffing["diff"], 32.0);

        let (_, insights) = get_json("/insights").await;
        assert_eq!(insights["recommendations"].as_array().map(Vec::len), Some(3));
    }
}
