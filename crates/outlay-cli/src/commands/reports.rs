//! Report command implementations (summary, predict, dashboard)

use anyhow::Result;
use chrono::Utc;
use outlay_core::db::Database;
use outlay_core::forecast::{Forecaster, DEFAULT_MONTHS_BACK};
use outlay_core::models::{ExpenseFilter, Period};

use super::truncate;

/// Print a category/amount table sorted by amount, largest first
fn print_category_table(by_category: &std::collections::BTreeMap<String, f64>, total: f64) {
    let mut categories: Vec<(&String, &f64)> = by_category.iter().collect();
    categories.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

    println!("   {:15} │ {:>10} │ {:>6}", "Category", "Amount", "%");
    println!("   ────────────────┼────────────┼────────");

    for (category, amount) in categories {
        let pct = if total > 0.0 {
            *amount / total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:15} │ {:>10.2} │ {:>5.1}%",
            truncate(category, 15),
            amount,
            pct
        );
    }
}

pub fn cmd_summary(db: &Database, period: &str) -> Result<()> {
    let period: Period = period.parse()?;
    let today = Utc::now().date_naive();
    let summary = db.period_summary(period, today)?;

    println!();
    println!("📊 Spending Summary ({})", summary.period.as_str());
    println!("   ─────────────────────────────────────────────────────────────");

    if summary.by_category.is_empty() {
        println!("   No spending found in this period.");
        return Ok(());
    }

    println!("   Total: {:.2}", summary.total);
    println!();
    print_category_table(&summary.by_category, summary.total);

    Ok(())
}

pub fn cmd_predict(db: &Database, months: usize) -> Result<()> {
    let forecast = Forecaster::new(db).predict_next_month(months)?;

    println!();
    println!("🔮 Next Month Forecast");
    println!("   Fitted against up to {} months of history", months);
    println!("   ─────────────────────────────────────────────────────────────");

    if forecast.total_next_month == 0.0 && forecast.per_category_next_month.is_empty() {
        println!("   Not enough history to forecast. Record some expenses first.");
        return Ok(());
    }

    println!("   Projected total: {:.2}", forecast.total_next_month);
    println!();
    print_category_table(&forecast.per_category_next_month, forecast.total_next_month);

    Ok(())
}

pub fn cmd_dashboard(db: &Database) -> Result<()> {
    let today = Utc::now().date_naive();
    let summary = db.period_summary(Period::Month, today)?;
    let recent = db.list_expenses(&ExpenseFilter {
        limit: Some(5),
        ..Default::default()
    })?;
    let forecast = Forecaster::new(db).predict_next_month(DEFAULT_MONTHS_BACK)?;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│          💰 Outlay Dashboard            │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  📊 This month: {:.2}", summary.total);

    let mut categories: Vec<(&String, &f64)> = summary.by_category.iter().collect();
    categories.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
    for (category, amount) in categories.iter().take(3) {
        println!("     {:15} {:>10.2}", truncate(category, 15), amount);
    }

    println!();
    if recent.is_empty() {
        println!("  No expenses recorded yet.");
    } else {
        println!("  🕘 Recent");
        for expense in &recent {
            println!(
                "     {} {:>9.2} {:12} {}",
                expense.date,
                expense.amount,
                truncate(&expense.category, 12),
                truncate(&expense.description, 28)
            );
        }
    }

    println!();
    println!("  🔮 Next month: {:.2}", forecast.total_next_month);
    println!();

    Ok(())
}
