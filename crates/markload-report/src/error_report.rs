//! Line-addressable validation error reports.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use markload_model::{ImportProfile, ValidationError};

use crate::common::into_string;

/// Build the error report CSV: one record per failed row, in partition
/// order, with the row's messages joined by `"; "`. Text cells are always
/// quoted so the report opens cleanly in spreadsheet tools.
pub fn build_error_report(errors: &[ValidationError]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .from_writer(Vec::new());
    writer
        .write_record(["row", "subject", "errors"])
        .context("write report header")?;
    for error in errors {
        writer
            .write_record([
                error.row.to_string(),
                error.subject.clone(),
                error.errors.join("; "),
            ])
            .context("write report row")?;
    }
    into_string(writer)
}

/// Deterministic error report filename: profile, owning entity, date.
#[must_use]
pub fn error_report_filename(profile: &ImportProfile, owner: &str, date: NaiveDate) -> String {
    format!(
        "{}_errors_{}_{}.csv",
        profile.name,
        owner,
        date.format("%Y-%m-%d")
    )
}

/// Write the error report under `dir`, creating the directory if needed.
pub fn write_error_report(
    dir: &Path,
    profile: &ImportProfile,
    owner: &str,
    date: NaiveDate,
    errors: &[ValidationError],
) -> Result<PathBuf> {
    let content = build_error_report(errors)?;
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(error_report_filename(profile, owner, date));
    std::fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
