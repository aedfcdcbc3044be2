//! Expense command implementations (add, list)

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use outlay_core::db::Database;
use outlay_core::models::ExpenseFilter;
use outlay_core::rules::CategoryRules;

use super::truncate;

/// Resolve a date argument to a concrete date
///
/// Accepts YYYY-MM-DD, "today", or "yesterday". A missing argument means
/// today.
pub fn parse_date_arg(value: Option<&str>) -> Result<NaiveDate> {
    let today = Utc::now().date_naive();

    match value {
        None => Ok(today),
        Some(raw) => match raw.to_lowercase().as_str() {
            "today" => Ok(today),
            "yesterday" => Ok(today - chrono::Duration::days(1)),
            other => NaiveDate::parse_from_str(other, "%Y-%m-%d")
                .context("Invalid date format (use YYYY-MM-DD, 'today', or 'yesterday')"),
        },
    }
}

pub fn cmd_add(
    db: &Database,
    rules: &CategoryRules,
    amount: f64,
    description: &str,
    date: Option<&str>,
    category: Option<&str>,
) -> Result<()> {
    let description = description.trim();
    if description.is_empty() {
        anyhow::bail!("Description must not be empty");
    }

    let date = parse_date_arg(date)?;
    let category = match category {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => rules.categorize(description).to_string(),
    };

    let id = db
        .record_expense(date, amount, description, &category)
        .context("Failed to record expense")?;

    println!(
        "✅ Added expense #{}: {:.2} {} - {} on {}",
        id, amount, category, description, date
    );

    Ok(())
}

pub fn cmd_list(
    db: &Database,
    start: Option<&str>,
    end: Option<&str>,
    category: Option<&str>,
    limit: i64,
) -> Result<()> {
    let start = start
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("Invalid --start date format (use YYYY-MM-DD)")?;
    let end = end
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("Invalid --end date format (use YYYY-MM-DD)")?;

    let filter = ExpenseFilter {
        start,
        end,
        category: category.map(|c| c.to_string()),
        limit: Some(limit.max(1)),
    };
    let expenses = db.list_expenses(&filter)?;

    if expenses.is_empty() {
        println!("No expenses found. Record one with:");
        println!("  outlay add 120 \"pizza night\"");
        return Ok(());
    }

    println!();
    println!("📋 Expenses");
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:>4} │ {:10} │ {:>10} │ {:13} │ {}",
        "ID", "Date", "Amount", "Category", "Description"
    );
    println!("   ─────┼────────────┼────────────┼───────────────┼──────────────────────");

    for expense in &expenses {
        println!(
            "   {:>4} │ {} │ {:>10.2} │ {:13} │ {}",
            expense.id,
            expense.date,
            expense.amount,
            truncate(&expense.category, 13),
            truncate(&expense.description, 40)
        );
    }

    let total: f64 = expenses.iter().map(|e| e.amount).sum();
    println!("   ─────┼────────────┼────────────┼───────────────┼──────────────────────");
    println!("   {} expenses shown, {:.2} total", expenses.len(), total);

    Ok(())
}
