//! Human-readable snapshots of the registration table: a flat CSV and a
//! per-FSA grouped listing. Both are written to temp paths and renamed into
//! place so readers never observe a partial write.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::database::models::Registration;

pub const FIELD_NAMES: [&str; 5] = ["username", "user_id", "fsa", "created_at", "id"];

/// Writes the flat CSV snapshot. Rows are expected pre-sorted by FSA.
pub fn write_flat_csv<W: Write>(writer: W, rows: &[Registration]) -> csv::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(FIELD_NAMES)?;
    for row in rows {
        let created_at = row.created_at.map(|t| t.to_string()).unwrap_or_default();
        let id = row.id.to_string();
        csv_writer.write_record([
            row.username.as_str(),
            row.user_id.as_str(),
            row.fsa.as_str(),
            created_at.as_str(),
            id.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the grouped listing: an `=== K1P ===` header per FSA followed by
/// one `@username` line per registration. Rows are expected pre-sorted by
/// FSA so each group is contiguous.
pub fn write_grouped<W: Write>(mut writer: W, rows: &[Registration]) -> std::io::Result<()> {
    let mut last_fsa = "";
    for row in rows {
        if row.fsa != last_fsa {
            writeln!(writer, "=== {} ===", row.fsa.to_uppercase())?;
            last_fsa = &row.fsa;
        }
        writeln!(writer, "@{}", row.username)?;
    }
    Ok(())
}

/// Snapshots both files into `output_dir` atomically. Returns the highest
/// exported row id so the caller can poll for rows inserted afterwards.
pub fn export_snapshot(output_dir: &Path, rows: &[Registration]) -> anyhow::Result<Option<i64>> {
    let temp_flat = output_dir.join("temp-results.csv");
    let flat = output_dir.join("results.csv");
    let temp_grouped = output_dir.join("temp-results-by-fsa.csv");
    let grouped = output_dir.join("results-by-fsa.csv");

    write_flat_csv(fs::File::create(&temp_flat)?, rows)?;
    write_grouped(fs::File::create(&temp_grouped)?, rows)?;
    fs::rename(&temp_flat, &flat)?;
    fs::rename(&temp_grouped, &grouped)?;

    Ok(rows.iter().map(|row| row.id).max())
}
