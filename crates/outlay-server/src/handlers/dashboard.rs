//! Dashboard handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use outlay_core::forecast::{Forecaster, DEFAULT_MONTHS_BACK};
use outlay_core::models::{Expense, ExpenseFilter, Forecast, Period, PeriodSummary};

/// Number of recent expenses shown on the dashboard
const RECENT_EXPENSES: i64 = 5;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub summary: PeriodSummary,
    pub recent: Vec<Expense>,
    pub forecast: Forecast,
}

/// GET /api/dashboard - Current month summary, recent expenses, and forecast
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardResponse>, AppError> {
    let today = chrono::Utc::now().date_naive();

    let summary = state.db.period_summary(Period::Month, today)?;
    let recent = state.db.list_expenses(&ExpenseFilter {
        limit: Some(RECENT_EXPENSES),
        ..Default::default()
    })?;
    let forecast = Forecaster::new(&state.db).predict_next_month(DEFAULT_MONTHS_BACK)?;

    Ok(Json(DashboardResponse {
        summary,
        recent,
        forecast,
    }))
}
