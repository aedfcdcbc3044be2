//! Summary and forecast handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use outlay_core::forecast::{Forecaster, DEFAULT_MONTHS_BACK};
use outlay_core::models::{Forecast, Period, PeriodSummary};

/// Query parameters for the summary endpoint
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Reporting period: day, week, month, or all (default: month)
    pub period: Option<String>,
}

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    /// Number of trailing months to fit against (default: 6)
    pub months: Option<usize>,
}

/// GET /api/summary - Spending totals for a period
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummaryQuery>,
) -> Result<Json<PeriodSummary>, AppError> {
    let period: Period = params
        .period
        .as_deref()
        .unwrap_or("month")
        .parse()
        .map_err(|_| AppError::bad_request("Invalid period. Use 'day', 'week', 'month', or 'all'"))?;

    let today = chrono::Utc::now().date_naive();
    let summary = state.db.period_summary(period, today)?;

    Ok(Json(summary))
}

/// GET /api/forecast - Next-month spending forecast
pub async fn get_forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastQuery>,
) -> Result<Json<Forecast>, AppError> {
    let months = params.months.unwrap_or(DEFAULT_MONTHS_BACK);
    let forecast = Forecaster::new(&state.db).predict_next_month(months)?;

    Ok(Json(forecast))
}
