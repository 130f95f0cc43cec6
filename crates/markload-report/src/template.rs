//! Pre-filled import templates.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;

use markload_model::{ImportProfile, Roster, RosterMember};

use crate::common::into_string;

/// Build the template CSV: one row per roster member with identifier
/// columns pre-filled and value columns left empty, so the user only types
/// the new data.
pub fn build_template(profile: &ImportProfile, roster: &Roster) -> Result<String> {
    if profile.template_columns.is_empty() {
        bail!("profile '{}' has no roster template", profile.name);
    }
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(profile.template_columns)
        .context("write template header")?;
    for member in roster.members() {
        let record: Vec<&str> = profile
            .template_columns
            .iter()
            .map(|column| prefill(column, member))
            .collect();
        writer.write_record(&record).context("write template row")?;
    }
    into_string(writer)
}

fn prefill<'a>(column: &str, member: &'a RosterMember) -> &'a str {
    match column {
        "student_id" => &member.id,
        "student_code" => &member.code,
        "student_name" => &member.name,
        _ => "",
    }
}

/// Deterministic template filename: profile, owning entity, date.
#[must_use]
pub fn template_filename(profile: &ImportProfile, owner: &str, date: NaiveDate) -> String {
    format!(
        "{}_template_{}_{}.csv",
        profile.name,
        owner,
        date.format("%Y-%m-%d")
    )
}

/// Write the template under `dir`, creating the directory if needed.
pub fn write_template(
    dir: &Path,
    profile: &ImportProfile,
    owner: &str,
    date: NaiveDate,
    roster: &Roster,
) -> Result<PathBuf> {
    let content = build_template(profile, roster)?;
    std::fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(template_filename(profile, owner, date));
    std::fs::write(&path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}
