//! Roster loading from a local CSV export.

use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use tracing::{debug, warn};

use markload_model::{Roster, RosterMember};

/// Read a roster CSV into a `Roster`.
///
/// Header names are matched case-insensitively and a UTF-8 BOM on the first
/// header is tolerated. `id` is required; `code` and `name` are optional.
/// Rows without an id are skipped with a warning rather than failing the
/// whole file.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("read roster: {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read roster headers: {}", path.display()))?
        .clone();

    let mut id_index = None;
    let mut code_index = None;
    let mut name_index = None;
    for (index, header) in headers.iter().enumerate() {
        match header.trim_matches('\u{feff}').trim().to_lowercase().as_str() {
            "id" | "student_id" => id_index.get_or_insert(index),
            "code" | "student_code" => code_index.get_or_insert(index),
            "name" | "student_name" => name_index.get_or_insert(index),
            _ => continue,
        };
    }
    let Some(id_index) = id_index else {
        bail!("roster {} has no 'id' column", path.display());
    };

    let mut members = Vec::new();
    let mut skipped = 0usize;
    for record in reader.records() {
        let record =
            record.with_context(|| format!("read roster record: {}", path.display()))?;
        let field = |index: Option<usize>| {
            index
                .and_then(|index| record.get(index))
                .unwrap_or("")
                .trim()
                .to_string()
        };
        let id = field(Some(id_index));
        if id.is_empty() {
            skipped += 1;
            continue;
        }
        members.push(RosterMember {
            id,
            code: field(code_index),
            name: field(name_index),
        });
    }
    if skipped > 0 {
        warn!(
            path = %path.display(),
            skipped,
            "roster rows without an id were skipped"
        );
    }
    debug!(path = %path.display(), members = members.len(), "roster loaded");
    Ok(Roster::new(members))
}
