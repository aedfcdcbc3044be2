//! Export handlers

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Response, StatusCode},
};
use tracing::info;

use crate::{AppError, AppState};

/// GET /api/export/expenses - Download the full ledger as CSV
pub async fn export_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Response<Body>, AppError> {
    let csv = state.db.export_expenses_csv()?;
    let rows = csv.lines().count().saturating_sub(1);
    info!("Exported {} expenses to CSV", rows);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"expenses.csv\"",
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::internal(&e.to_string()))
}
