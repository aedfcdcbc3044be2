//! Category rule handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppError, AppState};
use outlay_core::rules::CategoryRule;

/// Request body for adding or removing a keyword
#[derive(Debug, Deserialize)]
pub struct KeywordRequest {
    pub category: String,
    pub keyword: String,
}

#[derive(Serialize)]
pub struct AddKeywordResponse {
    pub added: bool,
}

#[derive(Serialize)]
pub struct RemoveKeywordResponse {
    pub removed: bool,
}

/// GET /api/rules - Ordered rule table
pub async fn list_rules(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryRule>>, AppError> {
    let rules = state
        .rules
        .read()
        .map_err(|_| AppError::internal("Rules lock poisoned"))?;

    Ok(Json(rules.rules().to_vec()))
}

/// POST /api/rules/keywords - Add a keyword to a category
pub async fn add_keyword(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KeywordRequest>,
) -> Result<Json<AddKeywordResponse>, AppError> {
    let category = req.category.trim();
    let keyword = req.keyword.trim();
    if category.is_empty() || keyword.is_empty() {
        return Err(AppError::bad_request("Category and keyword are required"));
    }

    let mut rules = state
        .rules
        .write()
        .map_err(|_| AppError::internal("Rules lock poisoned"))?;
    let added = rules.add_keyword(category, keyword);
    if added {
        rules.save()?;
        info!(%category, %keyword, "Added categorization keyword");
    }

    Ok(Json(AddKeywordResponse { added }))
}

/// DELETE /api/rules/keywords - Remove a keyword from a category
pub async fn remove_keyword(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KeywordRequest>,
) -> Result<Json<RemoveKeywordResponse>, AppError> {
    let category = req.category.trim();
    let keyword = req.keyword.trim();
    if category.is_empty() || keyword.is_empty() {
        return Err(AppError::bad_request("Category and keyword are required"));
    }

    let mut rules = state
        .rules
        .write()
        .map_err(|_| AppError::internal("Rules lock poisoned"))?;
    let removed = rules.remove_keyword(category, keyword);
    if removed {
        rules.save()?;
        info!(%category, %keyword, "Removed categorization keyword");
    }

    Ok(Json(RemoveKeywordResponse { removed }))
}
