use std::collections::BTreeMap;

use serde::Serialize;

use crate::FieldValue;

/// A row that passed every rule for its import profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedRow {
    /// 1-based position in the parsed row sequence.
    pub ordinal: usize,
    /// 1-based source line.
    pub source_line: usize,
    /// Resolved subject identifier: the roster member's id, or the row's own
    /// key column for roster-free profiles.
    pub subject_id: String,
    /// Subject identifier as it appeared in the source.
    pub subject_label: String,
    /// Coerced field values keyed by column name.
    pub values: BTreeMap<String, FieldValue>,
}

/// A row that violated at least one domain rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    /// 1-based source line (CSV data line k reports as k+1; the header is line 1).
    pub row: usize,
    /// Best-effort subject identifier for the error report.
    pub subject: String,
    /// All messages collected for the row, in rule order.
    pub errors: Vec<String>,
}

/// Validation outcome for a single row.
///
/// Every `RawRow` maps to exactly one variant; no row is silently dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Valid(ValidatedRow),
    Invalid(ValidationError),
}

/// Ordered partition of row outcomes. Source ordering is preserved within
/// both lists so error reports are stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub valid: Vec<ValidatedRow>,
    pub invalid: Vec<ValidationError>,
}

impl Partition {
    pub fn push(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Valid(row) => self.valid.push(row),
            RowOutcome::Invalid(error) => self.invalid.push(error),
        }
    }

    #[must_use]
    pub fn valid_count(&self) -> usize {
        self.valid.len()
    }

    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.invalid.len()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.invalid.is_empty()
    }
}
