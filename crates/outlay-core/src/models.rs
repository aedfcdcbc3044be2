//! Domain models for Outlay

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
    pub category: String,
}

/// Filters for listing expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Earliest date to include (inclusive)
    pub start: Option<NaiveDate>,
    /// Latest date to include (inclusive)
    pub end: Option<NaiveDate>,
    /// Category name, matched case-insensitively
    pub category: Option<String>,
    /// Maximum number of rows to return
    pub limit: Option<i64>,
}

impl ExpenseFilter {
    /// Default row cap when no explicit limit is given
    pub const DEFAULT_LIMIT: i64 = 50;
}

/// Reporting period for spending summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    All,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    /// Inclusive date bounds for this period relative to `today`.
    ///
    /// `None` means unbounded: `All` covers every recorded expense.
    /// Week runs Monday through today; month runs from the 1st through today.
    pub fn bounds(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Self::Day => Some((today, today)),
            Self::Week => {
                let days_from_monday = today.weekday().num_days_from_monday() as u64;
                let monday = today
                    .checked_sub_days(Days::new(days_from_monday))
                    .unwrap_or(today);
                Some((monday, today))
            }
            Self::Month => Some((today.with_day(1).unwrap_or(today), today)),
            Self::All => None,
        }
    }
}

impl std::str::FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            _ => Err(Error::InvalidPeriod(s.to_string())),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Spending totals for a reporting period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub period: Period,
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
}

/// Next-month spending forecast
///
/// The per-category amounts are projected independently and are not
/// expected to sum exactly to the total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub total_next_month: f64,
    pub per_category_next_month: BTreeMap<String, f64>,
}

impl Forecast {
    /// Forecast for an empty ledger: zero total, no breakdown.
    pub fn zero() -> Self {
        Self {
            total_next_month: 0.0,
            per_category_next_month: BTreeMap::new(),
        }
    }
}
