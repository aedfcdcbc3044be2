//! Expense insert and filtered listing

use chrono::NaiveDate;
use rusqlite::params;

use super::{parse_date, Database};
use crate::error::{Error, Result};
use crate::models::{Expense, ExpenseFilter};

impl Database {
    /// Insert an expense and return its generated id
    ///
    /// The ledger only models money going out, so the amount must be
    /// strictly positive.
    pub fn record_expense(
        &self,
        date: NaiveDate,
        amount: f64,
        description: &str,
        category: &str,
    ) -> Result<i64> {
        if amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "amount must be positive, got {}",
                amount
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO expenses (date, amount, description, category) VALUES (?, ?, ?, ?)",
            params![date.to_string(), amount, description, category],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List expenses, newest first, with optional filters
    pub fn list_expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        // Build dynamic WHERE clause
        let mut conditions = Vec::new();
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = filter.start {
            conditions.push("date >= ?");
            params.push(Box::new(start.to_string()));
        }

        if let Some(end) = filter.end {
            conditions.push("date <= ?");
            params.push(Box::new(end.to_string()));
        }

        if let Some(category) = &filter.category {
            conditions.push("category = ? COLLATE NOCASE");
            params.push(Box::new(category.clone()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT id, date, amount, description, category
            FROM expenses
            {}
            ORDER BY date DESC, id DESC
            LIMIT ?
            "#,
            where_clause
        );

        params.push(Box::new(
            filter.limit.unwrap_or(ExpenseFilter::DEFAULT_LIMIT),
        ));

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let expenses = stmt
            .query_map(params_refs.as_slice(), |row| {
                let date: String = row.get(1)?;
                Ok(Expense {
                    id: row.get(0)?,
                    date: parse_date(&date),
                    amount: row.get(2)?,
                    description: row.get(3)?,
                    category: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Total number of recorded expenses
    pub fn count_expenses(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))?;
        Ok(count)
    }
}
