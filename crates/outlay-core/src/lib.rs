//! Outlay Core Library
//!
//! Shared functionality for the Outlay expense tracker:
//! - Database access and migrations
//! - Keyword-rule categorization with a persisted, ordered rule table
//! - Least-squares next-month spending forecasts
//! - Regex-driven chat assistant
//! - CSV export and deterministic demo-data seeding

pub mod bot;
pub mod db;
pub mod error;
pub mod export;
pub mod forecast;
pub mod models;
pub mod rules;
pub mod seed;

pub use bot::ChatBot;
pub use db::Database;
pub use error::{Error, Result};
pub use export::export_csv;
pub use forecast::{fit, Forecaster, DEFAULT_MONTHS_BACK};
pub use models::{Expense, ExpenseFilter, Forecast, Period, PeriodSummary};
pub use rules::{default_rules, CategoryRule, CategoryRules, FALLBACK_CATEGORY};
pub use seed::{seed_expenses, DEFAULT_SEED_ENTRIES, DEFAULT_SEED_MONTHS};
