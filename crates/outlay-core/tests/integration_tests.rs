//! Integration tests for outlay-core
//!
//! These tests exercise the full record → summarize → forecast workflow.

use chrono::NaiveDate;
use outlay_core::{
    bot::ChatBot,
    db::Database,
    forecast::Forecaster,
    models::{ExpenseFilter, Period},
    rules::CategoryRules,
    seed::seed_expenses,
};
use std::path::Path;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn default_rules_fixture() -> CategoryRules {
    CategoryRules::load_or_default(Path::new("/nonexistent/categories.json"))
}

// =============================================================================
// Ledger Workflow Tests
// =============================================================================

#[test]
fn test_full_ledger_workflow() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let rules = default_rules_fixture();

    // Three months of activity, categorized the way every entry point does it
    let entries = [
        (date(2025, 6, 5), 60.0, "Pizza from Domino's"),
        (date(2025, 6, 20), 40.0, "Uber ride to office"),
        (date(2025, 7, 3), 120.0, "Groceries from supermarket"),
        (date(2025, 7, 15), 80.0, "Electricity bill"),
        (date(2025, 8, 2), 200.0, "Amazon purchase"),
        (date(2025, 8, 10), 100.0, "Movie tickets"),
    ];
    for (day, amount, description) in entries {
        let category = rules.categorize(description);
        db.record_expense(day, amount, description, category)
            .expect("Failed to record expense");
    }

    // Reporting over the whole ledger
    let summary = db
        .period_summary(Period::All, date(2025, 8, 20))
        .expect("Failed to summarize");
    assert_eq!(summary.total, 600.0);
    assert_eq!(summary.by_category.get("Food"), Some(&180.0));
    assert_eq!(summary.by_category.get("Travel"), Some(&40.0));
    assert_eq!(summary.by_category.get("Bills"), Some(&80.0));
    assert_eq!(summary.by_category.get("Shopping"), Some(&200.0));
    assert_eq!(summary.by_category.get("Entertainment"), Some(&100.0));

    // Monthly series drives the forecaster: 100, 200, 300 extends to 400
    let totals = db.monthly_totals().expect("Failed to group by month");
    let months: Vec<&str> = totals.keys().map(|m| m.as_str()).collect();
    assert_eq!(months, vec!["2025-06", "2025-07", "2025-08"]);

    let forecast = Forecaster::new(&db)
        .predict_next_month(6)
        .expect("Failed to forecast");
    assert!((forecast.total_next_month - 400.0).abs() < 1e-6);

    // Export carries every row
    let csv = db.export_expenses_csv().expect("Failed to export");
    assert_eq!(csv.lines().count(), 7);
    assert!(csv.starts_with("id,date,amount,description,category"));
    assert!(csv.contains("Electricity bill"));
}

#[test]
fn test_category_filter_matches_categorizer_output() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let rules = default_rules_fixture();

    for description in ["Taxi fare", "Train ticket", "Pizza from Domino's"] {
        db.record_expense(
            date(2025, 8, 1),
            25.0,
            description,
            rules.categorize(description),
        )
        .expect("Failed to record expense");
    }

    let filter = ExpenseFilter {
        category: Some("travel".to_string()),
        ..Default::default()
    };
    let travel = db.list_expenses(&filter).expect("Failed to list");
    assert_eq!(travel.len(), 2);
    assert!(travel.iter().all(|e| e.category == "Travel"));
}

// =============================================================================
// Seeded Ledger Tests
// =============================================================================

#[test]
fn test_seeded_ledger_supports_reports_and_forecast() {
    let db = Database::in_memory().expect("Failed to create in-memory database");

    let added = seed_expenses(&db, 120, 6).expect("Failed to seed");
    assert_eq!(added, 120);
    assert_eq!(db.count_expenses().unwrap(), 120);

    let summary = db
        .period_summary(Period::All, chrono::Utc::now().date_naive())
        .expect("Failed to summarize");
    assert!(summary.total > 0.0);
    assert!(!summary.by_category.is_empty());

    let forecast = Forecaster::new(&db)
        .predict_next_month(6)
        .expect("Failed to forecast");
    assert!(forecast.total_next_month >= 0.0);
    assert!(!forecast.per_category_next_month.is_empty());
    assert!(forecast
        .per_category_next_month
        .values()
        .all(|amount| *amount >= 0.0));
}

// =============================================================================
// Chat Workflow Tests
// =============================================================================

#[test]
fn test_chat_add_flows_into_reports_and_export() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let rules = default_rules_fixture();
    let bot = ChatBot::new(&db, &rules).expect("Failed to build bot");

    let reply = bot.respond("spent 120 on pizza").expect("Bot failed");
    assert!(reply.contains("Food"));

    let today = chrono::Utc::now().date_naive();
    let summary = db
        .period_summary(Period::Day, today)
        .expect("Failed to summarize");
    assert_eq!(summary.total, 120.0);

    let biggest = bot.respond("biggest spend").expect("Bot failed");
    assert_eq!(biggest, "Biggest category this month: Food (120.00)");

    let csv = db.export_expenses_csv().expect("Failed to export");
    assert!(csv.contains("pizza"));
}
