//! Shared data model for the markload import pipeline.

pub mod outcome;
pub mod profile;
pub mod roster;
pub mod row;
pub mod value;

pub use outcome::{Partition, RowOutcome, ValidatedRow, ValidationError};
pub use profile::{FieldKind, FieldRule, ImportProfile, SubjectRule, TEST_TYPES};
pub use roster::{Roster, RosterMember};
pub use row::{RawRow, normalize_key};
pub use value::FieldValue;

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn partition_preserves_order() {
        let mut partition = Partition::default();
        partition.push(RowOutcome::Invalid(ValidationError {
            row: 2,
            subject: "S001".to_string(),
            errors: vec!["Marks must be a valid number".to_string()],
        }));
        partition.push(RowOutcome::Valid(ValidatedRow {
            ordinal: 2,
            source_line: 3,
            subject_id: "11".to_string(),
            subject_label: "S002".to_string(),
            values: BTreeMap::new(),
        }));
        partition.push(RowOutcome::Invalid(ValidationError {
            row: 4,
            subject: "S003".to_string(),
            errors: vec!["Student not found in class".to_string()],
        }));
        assert_eq!(partition.total(), 3);
        assert_eq!(partition.valid_count(), 1);
        assert_eq!(partition.invalid_count(), 2);
        assert_eq!(partition.invalid[0].row, 2);
        assert_eq!(partition.invalid[1].row, 4);
        assert!(!partition.is_clean());
    }

    #[test]
    fn field_values_serialize_flat() {
        let mut values = BTreeMap::new();
        values.insert("marks_obtained".to_string(), FieldValue::Number(85.0));
        values.insert("absent".to_string(), FieldValue::Bool(false));
        values.insert("remarks".to_string(), FieldValue::Text(String::new()));
        values.insert("paid_on".to_string(), FieldValue::Null);
        let json = serde_json::to_value(&values).expect("serialize values");
        assert_eq!(json["marks_obtained"], 85.0);
        assert_eq!(json["absent"], false);
        assert_eq!(json["remarks"], "");
        assert!(json["paid_on"].is_null());
    }
}
