//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};

use super::{load_rules, open_db};

pub async fn cmd_serve(
    db_path: &Path,
    rules_path: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Outlay web server...");
    println!("   Database: {}", db_path.display());
    println!("   Rules: {}", rules_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("Static file path must be valid UTF-8"))
        .transpose()?;

    let db = open_db(db_path)?;
    let rules = load_rules(rules_path);

    outlay_server::serve(db, rules, host, port, static_dir_str).await?;

    Ok(())
}
