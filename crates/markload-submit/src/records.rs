use serde_json::{Map, Value};

use markload_model::{ImportProfile, ValidatedRow};

/// Serialize validated rows into flat backend records, injecting the owning
/// entity id and the resolved subject id that together form the natural key.
#[must_use]
pub fn build_records(
    rows: &[ValidatedRow],
    profile: &ImportProfile,
    owner_id: &str,
) -> Vec<Value> {
    rows.iter()
        .map(|row| {
            let mut record = Map::new();
            record.insert(
                profile.owner_column.to_string(),
                Value::String(owner_id.to_string()),
            );
            record.insert(
                profile.subject_column().to_string(),
                Value::String(row.subject_id.clone()),
            );
            for (column, value) in &row.values {
                record.insert(
                    column.clone(),
                    serde_json::to_value(value).unwrap_or(Value::Null),
                );
            }
            Value::Object(record)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use markload_model::FieldValue;

    use super::*;

    #[test]
    fn records_carry_the_natural_key() {
        let mut values = BTreeMap::new();
        values.insert("marks_obtained".to_string(), FieldValue::Null);
        values.insert("absent".to_string(), FieldValue::Bool(true));
        let rows = vec![ValidatedRow {
            ordinal: 1,
            source_line: 2,
            subject_id: "11".to_string(),
            subject_label: "S001".to_string(),
            values,
        }];
        let profile = ImportProfile::marks(100.0);
        let records = build_records(&rows, &profile, "test-42");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["test_id"], "test-42");
        assert_eq!(records[0]["student_id"], "11");
        assert_eq!(records[0]["absent"], true);
        assert!(records[0]["marks_obtained"].is_null());
    }
}
