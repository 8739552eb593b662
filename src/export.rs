// 💾 Report Export - Client report -> CSV tables
//
//   {client}_{suffix}_{date}.leaked_data.csv     one row per identity
//   {client}_{suffix}_{date}.breach_details.csv  only when details exist

use crate::error::Result;
use crate::report::ClientReport;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFiles {
    pub leaked_data: PathBuf,
    pub breach_details: Option<PathBuf>,
}

pub fn report_stem(client: &str, suffix: &str, date: NaiveDate) -> String {
    let safe: String = client
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' || c == ' ' { c } else { '_' })
        .collect();
    format!("{}_{}_{}", safe.trim(), suffix, date.format("%Y-%m-%d"))
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write both tables. Returns None (and writes nothing) for an empty report.
pub fn write_report(
    report: &ClientReport,
    out_dir: &Path,
    suffix: &str,
    date: NaiveDate,
) -> Result<Option<ExportedFiles>> {
    if report.is_empty() {
        return Ok(None);
    }

    std::fs::create_dir_all(out_dir)?;
    let stem = report_stem(&report.client, suffix, date);

    let leaked_data = out_dir.join(format!("{}.leaked_data.csv", stem));
    write_rows(&leaked_data, &report.rows())?;

    let breach_details = if report.details.is_empty() {
        None
    } else {
        let path = out_dir.join(format!("{}.breach_details.csv", stem));
        write_rows(&path, &report.detail_rows())?;
        Some(path)
    };

    Ok(Some(ExportedFiles {
        leaked_data,
        breach_details,
    }))
}
