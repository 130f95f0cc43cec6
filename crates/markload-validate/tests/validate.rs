//! End-to-end validation scenarios over parsed input.

use markload_ingest::{SourceFormat, parse};
use markload_model::{FieldValue, ImportProfile, Roster, RosterMember};
use markload_validate::validate_rows;

fn class_roster() -> Roster {
    Roster::new(vec![
        RosterMember {
            id: "11".to_string(),
            code: "S001".to_string(),
            name: "Asha Rao".to_string(),
        },
        RosterMember {
            id: "12".to_string(),
            code: "S002".to_string(),
            name: "Vikram Shah".to_string(),
        },
    ])
}

#[test]
fn marks_over_cap_are_rejected() {
    let content = "student_code,marks_obtained,absent\nS001,85,no\nS002,150,no\n";
    let outcome = parse(content, SourceFormat::Csv, "mark");
    assert!(outcome.errors.is_empty());

    let profile = ImportProfile::marks(100.0);
    let partition = validate_rows(&outcome.rows, &profile, &class_roster());

    assert_eq!(partition.valid_count(), 1);
    assert_eq!(partition.invalid_count(), 1);

    let valid = &partition.valid[0];
    assert_eq!(valid.subject_id, "11");
    assert_eq!(valid.subject_label, "S001");
    assert_eq!(
        valid.values.get("marks_obtained"),
        Some(&FieldValue::Number(85.0))
    );
    assert_eq!(valid.values.get("absent"), Some(&FieldValue::Bool(false)));

    let invalid = &partition.invalid[0];
    assert_eq!(invalid.row, 3);
    assert_eq!(invalid.subject, "S002");
    assert_eq!(invalid.errors, vec!["Marks cannot exceed 100".to_string()]);
}

#[test]
fn error_rows_use_source_line_numbers() {
    // Data line k reports as row k+1 because line 1 is the header.
    let content = "student_code,marks_obtained\nS001,ok\nS002,also bad\n";
    let outcome = parse(content, SourceFormat::Csv, "mark");
    let profile = ImportProfile::marks(100.0);
    let partition = validate_rows(&outcome.rows, &profile, &class_roster());

    assert_eq!(partition.invalid_count(), 2);
    assert_eq!(partition.invalid[0].row, 2);
    assert_eq!(partition.invalid[1].row, 3);
}

#[test]
fn a_row_accumulates_all_field_errors() {
    let content = "student_code,marks_obtained,absent\nS099,150,maybe\n";
    let outcome = parse(content, SourceFormat::Csv, "mark");
    let profile = ImportProfile::marks(100.0);
    let partition = validate_rows(&outcome.rows, &profile, &class_roster());

    assert_eq!(partition.invalid_count(), 1);
    let invalid = &partition.invalid[0];
    assert_eq!(invalid.subject, "S099");
    assert_eq!(
        invalid.errors,
        vec![
            "Student not found in class".to_string(),
            "Marks cannot exceed 100".to_string(),
            "Absent must be true/false, 1/0, or yes/no".to_string(),
        ]
    );
}

#[test]
fn missing_identifier_is_reported() {
    let content = "student_id,student_code,marks_obtained\n,,85\n";
    let outcome = parse(content, SourceFormat::Csv, "mark");
    let profile = ImportProfile::marks(100.0);
    let partition = validate_rows(&outcome.rows, &profile, &class_roster());

    assert_eq!(partition.invalid_count(), 1);
    let invalid = &partition.invalid[0];
    assert_eq!(invalid.subject, "unknown");
    assert_eq!(
        invalid.errors,
        vec!["Either student_id or student_code is required".to_string()]
    );
}

#[test]
fn primary_id_wins_over_code() {
    let content = "student_id,student_code,marks_obtained\n12,S001,40\n";
    let outcome = parse(content, SourceFormat::Csv, "mark");
    let profile = ImportProfile::marks(100.0);
    let partition = validate_rows(&outcome.rows, &profile, &class_roster());

    assert_eq!(partition.valid_count(), 1);
    assert_eq!(partition.valid[0].subject_id, "12");
    assert_eq!(partition.valid[0].subject_label, "12");
}

#[test]
fn optional_fields_take_defaults() {
    // Missing marks coerce to Null (not zero); missing remarks to "".
    let content = "student_code,marks_obtained\nS001,\n";
    let outcome = parse(content, SourceFormat::Csv, "mark");
    let profile = ImportProfile::marks(100.0);
    let partition = validate_rows(&outcome.rows, &profile, &class_roster());

    assert_eq!(partition.valid_count(), 1);
    let row = &partition.valid[0];
    assert_eq!(row.values.get("marks_obtained"), Some(&FieldValue::Null));
    assert_eq!(row.values.get("absent"), Some(&FieldValue::Bool(false)));
    assert_eq!(
        row.values.get("remarks"),
        Some(&FieldValue::Text(String::new()))
    );
}

#[test]
fn boolean_literals_normalize() {
    let content = "student_code,absent\nS001,TRUE\nS002,Yes\nS001,0\nS002,maybe\n";
    let outcome = parse(content, SourceFormat::Csv, "mark");
    let profile = ImportProfile::marks(100.0);
    let partition = validate_rows(&outcome.rows, &profile, &class_roster());

    assert_eq!(partition.valid_count(), 3);
    assert_eq!(
        partition.valid[0].values.get("absent"),
        Some(&FieldValue::Bool(true))
    );
    assert_eq!(
        partition.valid[1].values.get("absent"),
        Some(&FieldValue::Bool(true))
    );
    assert_eq!(
        partition.valid[2].values.get("absent"),
        Some(&FieldValue::Bool(false))
    );
    assert_eq!(partition.invalid_count(), 1);
    assert_eq!(partition.invalid[0].row, 5);
}

#[test]
fn bulk_test_import_validates_enum_and_required_fields() {
    let content = "name,test_type,max_marks,held_on\n\
                   Unit 1,quiz,50,2026-02-10\n\
                   Unit 2,midterm,50,\n\
                   ,exam,,2026-13-40\n";
    let outcome = parse(content, SourceFormat::Csv, "test");
    let profile = ImportProfile::tests(None);
    let partition = validate_rows(&outcome.rows, &profile, &Roster::default());

    assert_eq!(partition.valid_count(), 1);
    let valid = &partition.valid[0];
    assert_eq!(valid.subject_id, "Unit 1");
    assert_eq!(
        valid.values.get("test_type"),
        Some(&FieldValue::Text("quiz".to_string()))
    );

    assert_eq!(partition.invalid_count(), 2);
    assert_eq!(
        partition.invalid[0].errors,
        vec![
            "Test type must be one of: quiz, unit_test, assignment, exam, practice".to_string()
        ]
    );
    assert_eq!(
        partition.invalid[1].errors,
        vec![
            "Test name is required".to_string(),
            "Max marks is required".to_string(),
            "Test date must be a valid date (YYYY-MM-DD)".to_string(),
        ]
    );
}

#[test]
fn fee_rows_validate_amount_and_date() {
    let content = "student_code,amount_paid,paid_on\nS001,2500,2026-04-01\nS002,9999,2026-04-01\n";
    let outcome = parse(content, SourceFormat::Csv, "fee");
    let profile = ImportProfile::fees(Some(5000.0));
    let partition = validate_rows(&outcome.rows, &profile, &class_roster());

    assert_eq!(partition.valid_count(), 1);
    assert_eq!(
        partition.valid[0].values.get("amount_paid"),
        Some(&FieldValue::Number(2500.0))
    );
    assert_eq!(partition.invalid_count(), 1);
    assert_eq!(
        partition.invalid[0].errors,
        vec!["Amount cannot exceed 5000".to_string()]
    );
}

#[test]
fn partitions_preserve_source_order() {
    let content = "student_code,marks_obtained\nS001,10\nS099,10\nS002,20\nS098,20\n";
    let outcome = parse(content, SourceFormat::Csv, "mark");
    let profile = ImportProfile::marks(100.0);
    let partition = validate_rows(&outcome.rows, &profile, &class_roster());

    let valid_lines: Vec<usize> = partition.valid.iter().map(|row| row.source_line).collect();
    let invalid_lines: Vec<usize> = partition.invalid.iter().map(|error| error.row).collect();
    assert_eq!(valid_lines, vec![2, 4]);
    assert_eq!(invalid_lines, vec![3, 5]);
}
