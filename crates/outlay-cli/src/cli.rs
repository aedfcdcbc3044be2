//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Outlay - Track expenses, spot patterns, predict next month
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "Self-hosted personal expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "expenses.db", global = true)]
    pub db: PathBuf,

    /// Category rules file
    #[arg(long, default_value = "categories.json", global = true)]
    pub rules: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record an expense
    Add {
        /// Amount spent
        amount: f64,

        /// What the money went on (also drives categorization)
        description: String,

        /// Date: YYYY-MM-DD, "today", or "yesterday" (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Category (derived from the description if not given)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List recorded expenses, newest first
    List {
        /// Earliest date to include (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Latest date to include (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,

        /// Filter by category (case-insensitive)
        #[arg(short, long)]
        category: Option<String>,

        /// Maximum number of rows to show
        #[arg(short, long, default_value = "50")]
        limit: i64,
    },

    /// Spending summary for a period
    Summary {
        /// Period: day, week, month, or all
        #[arg(default_value = "month")]
        period: String,
    },

    /// Forecast next month's spending
    Predict {
        /// Months of history to fit against
        #[arg(long, default_value = "6")]
        months: usize,
    },

    /// Show this month at a glance (summary, recent expenses, forecast)
    Dashboard,

    /// Export all expenses to CSV
    Export {
        /// Output file (defaults to stdout)
        output: Option<PathBuf>,
    },

    /// Manage category keyword rules
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Talk to the expense bot (no message starts an interactive session)
    Chat {
        /// One-shot message, e.g. "spent 120 on pizza yesterday"
        message: Vec<String>,
    },

    /// Fill the database with deterministic sample data
    Seed {
        /// Number of expenses to generate
        #[arg(long, default_value = "200")]
        entries: usize,

        /// How many months back the dates spread over
        #[arg(long, default_value = "6")]
        months: u32,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// Add a keyword to a category (creates the category if new)
    Add {
        /// Category name, e.g. "Food"
        category: String,
        /// Keyword to match, stored lowercased
        keyword: String,
    },

    /// Remove a keyword from a category
    Remove {
        /// Category name
        category: String,
        /// Keyword to remove
        keyword: String,
    },

    /// Show which category a description would get
    Test {
        /// Description to categorize
        description: String,
    },
}
