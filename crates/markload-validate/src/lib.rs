//! Row validation for the markload pipeline.
//!
//! A pure per-row fold: every `RawRow` maps to exactly one `RowOutcome`,
//! source ordering is preserved in both partitions, and the only shared
//! state is the read-only roster borrowed for the duration of the fold.

mod rules;

use std::collections::BTreeMap;

use tracing::debug;

use markload_model::{
    ImportProfile, Partition, RawRow, RowOutcome, Roster, SubjectRule, ValidatedRow,
    ValidationError,
};

/// Validate a parsed row sequence against a profile and roster.
#[must_use]
pub fn validate_rows(rows: &[RawRow], profile: &ImportProfile, roster: &Roster) -> Partition {
    let mut partition = Partition::default();
    for row in rows {
        partition.push(validate_row(row, profile, roster));
    }
    debug!(
        profile = profile.name,
        valid = partition.valid_count(),
        invalid = partition.invalid_count(),
        "rows validated"
    );
    partition
}

/// Validate one row. Errors accumulate across fields; a row with any error
/// becomes a `ValidationError` carrying all of its messages.
#[must_use]
pub fn validate_row(row: &RawRow, profile: &ImportProfile, roster: &Roster) -> RowOutcome {
    let mut errors = Vec::new();
    let mut values = BTreeMap::new();

    let (subject_id, subject_label) = resolve_subject(row, profile, roster, &mut errors);

    for field in &profile.fields {
        match rules::check_field(row.value(field.column), field) {
            Ok(value) => {
                values.insert(field.column.to_string(), value);
            }
            Err(message) => errors.push(message),
        }
    }

    if errors.is_empty() {
        RowOutcome::Valid(ValidatedRow {
            ordinal: row.ordinal(),
            source_line: row.source_line(),
            subject_id,
            subject_label,
            values,
        })
    } else {
        RowOutcome::Invalid(ValidationError {
            row: row.source_line(),
            subject: subject_label,
            errors,
        })
    }
}

fn resolve_subject(
    row: &RawRow,
    profile: &ImportProfile,
    roster: &Roster,
    errors: &mut Vec<String>,
) -> (String, String) {
    match &profile.subject {
        SubjectRule::Roster {
            primary,
            secondary,
            entity,
            ..
        } => {
            let id = non_empty(row.value(primary));
            let code = non_empty(row.value(secondary));
            let label = id.or(code).unwrap_or("unknown").to_string();
            if id.is_none() && code.is_none() {
                errors.push(format!("Either {primary} or {secondary} is required"));
                return (String::new(), label);
            }
            match roster.resolve(id, code) {
                Some(member) => (member.id.clone(), label),
                None => {
                    errors.push(format!("{entity} not found in class"));
                    (String::new(), label)
                }
            }
        }
        SubjectRule::Key { column, label } => match non_empty(row.value(column)) {
            Some(value) => (value.to_string(), value.to_string()),
            None => {
                errors.push(format!("{label} is required"));
                (String::new(), "unknown".to_string())
            }
        },
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
