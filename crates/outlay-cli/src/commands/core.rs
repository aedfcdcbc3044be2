//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` / `load_rules` - Shared utilities to open the database and rule table
//! - `cmd_init` - Initialize the database
//! - `cmd_seed` - Generate deterministic sample data

use std::path::Path;

use anyhow::{Context, Result};
use outlay_core::db::Database;
use outlay_core::rules::CategoryRules;
use outlay_core::seed::seed_expenses;

/// Open the expense database, creating file and schema on first use
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Load the category rule table, falling back to built-in defaults
pub fn load_rules(rules_path: &Path) -> CategoryRules {
    CategoryRules::load_or_default(rules_path)
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let count = db.count_expenses()?;

    println!("✅ Database initialized successfully!");
    if count > 0 {
        println!("   Existing expenses: {}", count);
    }
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: outlay add 120 \"pizza night\"");
    println!("  2. Start web UI: outlay serve");

    Ok(())
}

pub fn cmd_seed(db: &Database, entries: usize, months: u32) -> Result<()> {
    println!(
        "🌱 Seeding {} sample expenses over the last {} months...",
        entries, months
    );

    let added = seed_expenses(db, entries, months).context("Failed to seed sample data")?;
    let total = db.count_expenses()?;

    println!("✅ Added {} expenses ({} total in database)", added, total);
    println!();
    println!("Try:");
    println!("  outlay summary month");
    println!("  outlay predict");

    Ok(())
}
