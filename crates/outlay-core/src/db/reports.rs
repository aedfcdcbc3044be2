//! Period summaries and monthly aggregates

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::Database;
use crate::error::Result;
use crate::models::{Period, PeriodSummary};

impl Database {
    /// Spending totals for a period ending at `today`
    ///
    /// `today` is passed in rather than read from the clock so summaries are
    /// reproducible in tests and across timezones.
    pub fn period_summary(&self, period: Period, today: NaiveDate) -> Result<PeriodSummary> {
        let conn = self.conn()?;

        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();
        let where_clause = match period.bounds(today) {
            Some((start, end)) => {
                params.push(Box::new(start.to_string()));
                params.push(Box::new(end.to_string()));
                "WHERE date BETWEEN ? AND ?"
            }
            None => "",
        };
        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let total_sql = format!(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses {}",
            where_clause
        );
        let total: f64 = conn.query_row(&total_sql, params_refs.as_slice(), |row| row.get(0))?;

        let by_category_sql = format!(
            "SELECT category, SUM(amount) FROM expenses {} GROUP BY category",
            where_clause
        );
        let mut stmt = conn.prepare(&by_category_sql)?;
        let rows = stmt.query_map(params_refs.as_slice(), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;

        let mut by_category = BTreeMap::new();
        for row in rows {
            let (category, amount) = row?;
            by_category.insert(category, amount);
        }

        Ok(PeriodSummary {
            period,
            total,
            by_category,
        })
    }

    /// Total spend per month over the whole ledger, keyed by `YYYY-MM`
    ///
    /// Months with no expenses are absent, not zero. The map iterates in
    /// chronological order since month keys sort lexicographically.
    pub fn monthly_totals(&self) -> Result<BTreeMap<String, f64>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT substr(date, 1, 7) AS month, SUM(amount) FROM expenses GROUP BY month",
        )?;
        let rows =
            stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?;

        let mut totals = BTreeMap::new();
        for row in rows {
            let (month, amount) = row?;
            totals.insert(month, amount);
        }

        Ok(totals)
    }

    /// Per-category spend per month, keyed by `YYYY-MM` then category
    ///
    /// Sparse on both levels: a month appears only if something was spent in
    /// it, and a category appears under a month only if it saw spend that
    /// month. Densification is up to the caller.
    pub fn monthly_totals_by_category(&self) -> Result<BTreeMap<String, BTreeMap<String, f64>>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT substr(date, 1, 7) AS month, category, SUM(amount) FROM expenses \
             GROUP BY month, category",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut totals: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for row in rows {
            let (month, category, amount) = row?;
            totals.entry(month).or_default().insert(category, amount);
        }

        Ok(totals)
    }
}
