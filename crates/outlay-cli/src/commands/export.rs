//! Export command implementation

use std::path::Path;

use anyhow::{Context, Result};
use outlay_core::db::Database;
use outlay_core::export::export_csv;

pub fn cmd_export(db: &Database, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let written = export_csv(db, path).context("Failed to export CSV")?;
            let count = db.count_expenses()?;
            println!("✅ Exported {} expenses to {}", count, written.display());
        }
        None => {
            // No output file: write the CSV itself to stdout
            let csv = db.export_expenses_csv()?;
            print!("{}", csv);
        }
    }

    Ok(())
}
