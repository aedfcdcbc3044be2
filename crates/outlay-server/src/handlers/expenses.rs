//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use outlay_core::models::{Expense, ExpenseFilter};

/// Query parameters for listing expenses
#[derive(Debug, Deserialize)]
pub struct ExpenseQuery {
    /// Earliest date to include (YYYY-MM-DD)
    pub start: Option<String>,
    /// Latest date to include (YYYY-MM-DD)
    pub end: Option<String>,
    /// Category filter (case-insensitive)
    pub category: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    ExpenseFilter::DEFAULT_LIMIT
}

#[derive(Serialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub count: usize,
    pub limit: i64,
}

/// Request body for recording an expense
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Date (YYYY-MM-DD); defaults to today
    pub date: Option<String>,
    pub amount: f64,
    pub description: String,
    /// Explicit category; missing or empty runs the categorizer
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Serialize)]
pub struct CreateExpenseResponse {
    pub id: i64,
    pub category: String,
}

fn parse_date_param(value: &str, param: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::bad_request(&format!("Invalid '{}' date format (use YYYY-MM-DD)", param))
    })
}

/// GET /api/expenses - List expenses with optional filters
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExpenseQuery>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    // Input validation: clamp pagination parameters
    let limit = params.limit.max(1).min(MAX_PAGE_LIMIT);

    let start = params
        .start
        .as_deref()
        .map(|s| parse_date_param(s, "start"))
        .transpose()?;
    let end = params
        .end
        .as_deref()
        .map(|s| parse_date_param(s, "end"))
        .transpose()?;

    let filter = ExpenseFilter {
        start,
        end,
        category: params.category.clone(),
        limit: Some(limit),
    };
    let expenses = state.db.list_expenses(&filter)?;

    Ok(Json(ExpenseListResponse {
        count: expenses.len(),
        expenses,
        limit,
    }))
}

/// POST /api/expenses - Record an expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateExpenseRequest>,
) -> Result<Json<CreateExpenseResponse>, AppError> {
    let description = req.description.trim();
    if req.amount <= 0.0 || description.is_empty() {
        return Err(AppError::bad_request(
            "Please provide a valid amount and description.",
        ));
    }

    let date = match req.date.as_deref() {
        Some(value) if !value.is_empty() => parse_date_param(value, "date")?,
        _ => chrono::Utc::now().date_naive(),
    };

    let category = match req.category.as_deref().map(str::trim) {
        Some(explicit) if !explicit.is_empty() => explicit.to_string(),
        _ => {
            let rules = state
                .rules
                .read()
                .map_err(|_| AppError::internal("Rules lock poisoned"))?;
            rules.categorize(description).to_string()
        }
    };

    let id = state
        .db
        .record_expense(date, req.amount, description, &category)?;
    info!(id, %category, "Recorded expense via API");

    Ok(Json(CreateExpenseResponse { id, category }))
}
