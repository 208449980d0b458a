//! Detailed report download: JSON saved with a date-stamped filename

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::error::Result;

/// `reporte-dashboard-YYYY-MM-DD.json`
pub fn report_filename(date: NaiveDate) -> String {
    format!("reporte-dashboard-{}.json", date.format("%Y-%m-%d"))
}

/// Write the report into `dir` atomically (temp file + rename) and return its path.
///
/// An existing report for the same day is overwritten.
pub fn save_report(dir: &Path, report: &serde_json::Value, date: NaiveDate) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let filename = report_filename(date);
    let path = dir.join(&filename);
    let temp = dir.join(format!("{}.tmp", filename));

    let json = serde_json::to_string_pretty(report)?;
    fs::write(&temp, json)?;
    fs::rename(&temp, &path)?;

    info!("detailed report saved to {}", path.display());
    Ok(path)
}
