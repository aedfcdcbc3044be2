//! CSV export for the expense ledger
//!
//! Produces the full ledger ordered oldest-first, either as an in-memory
//! string (HTTP download) or written to a file (CLI).

use std::fs;
use std::path::{Path, PathBuf};

use crate::db::Database;
use crate::error::{Error, Result};

const CSV_HEADER: [&str; 5] = ["id", "date", "amount", "description", "category"];

impl Database {
    /// Export all expenses to CSV, ordered by date then id
    pub fn export_expenses_csv(&self) -> Result<String> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, date, amount, description, category
             FROM expenses ORDER BY date ASC, id ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;
        for (id, date, amount, description, category) in rows {
            writer.write_record([
                id.to_string(),
                date,
                format!("{:.2}", amount),
                description,
                category,
            ])?;
        }

        let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Write the full ledger to `path` and return the absolute path
pub fn export_csv(db: &Database, path: &Path) -> Result<PathBuf> {
    let csv = db.export_expenses_csv()?;
    fs::write(path, &csv)?;
    let absolute = path.canonicalize()?;
    tracing::info!(path = %absolute.display(), "Exported expenses to CSV");
    Ok(absolute)
}
