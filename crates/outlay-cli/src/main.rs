//! Outlay CLI - Personal expense tracker
//!
//! Usage:
//!   outlay init                        Initialize database
//!   outlay add 120 "pizza night"       Record an expense
//!   outlay summary month               Spending summary for a period
//!   outlay predict                     Forecast next month's spend
//!   outlay serve --port 5000           Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            amount,
            description,
            date,
            category,
        } => {
            let db = commands::open_db(&cli.db)?;
            let rules = commands::load_rules(&cli.rules);
            commands::cmd_add(
                &db,
                &rules,
                amount,
                &description,
                date.as_deref(),
                category.as_deref(),
            )
        }
        Commands::List {
            start,
            end,
            category,
            limit,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(&db, start.as_deref(), end.as_deref(), category.as_deref(), limit)
        }
        Commands::Summary { period } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_summary(&db, &period)
        }
        Commands::Predict { months } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_predict(&db, months)
        }
        Commands::Dashboard => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_dashboard(&db)
        }
        Commands::Export { output } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_export(&db, output.as_deref())
        }
        Commands::Categories { action } => {
            let rules = commands::load_rules(&cli.rules);
            match action {
                None => commands::cmd_categories_list(&rules),
                Some(CategoriesAction::Add { category, keyword }) => {
                    commands::cmd_categories_add(rules, &category, &keyword)
                }
                Some(CategoriesAction::Remove { category, keyword }) => {
                    commands::cmd_categories_remove(rules, &category, &keyword)
                }
                Some(CategoriesAction::Test { description }) => {
                    commands::cmd_categories_test(&rules, &description)
                }
            }
        }
        Commands::Chat { message } => {
            let db = commands::open_db(&cli.db)?;
            let rules = commands::load_rules(&cli.rules);
            if message.is_empty() {
                commands::cmd_chat_repl(&db, &rules)
            } else {
                commands::cmd_chat_once(&db, &rules, &message.join(" "))
            }
        }
        Commands::Seed { entries, months } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_seed(&db, entries, months)
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            commands::cmd_serve(&cli.db, &cli.rules, &host, port, static_dir.as_deref()).await
        }
    }
}
