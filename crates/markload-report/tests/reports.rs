use chrono::NaiveDate;

use markload_model::{ImportProfile, Roster, RosterMember, ValidationError};
use markload_report::{
    build_error_report, build_template, error_report_filename, template_filename, write_template,
};

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

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).expect("date")
}

#[test]
fn template_prefills_identifiers_and_leaves_values_empty() {
    let profile = ImportProfile::marks(100.0);
    let template = build_template(&profile, &class_roster()).expect("template");
    insta::assert_snapshot!(template, @r"
    student_id,student_code,student_name,marks_obtained,absent,remarks
    11,S001,Asha Rao,,,
    12,S002,Vikram Shah,,,
    ");
}

#[test]
fn roster_free_profile_has_no_template() {
    let profile = ImportProfile::tests(None);
    let error = build_template(&profile, &Roster::default()).expect_err("should fail");
    assert!(error.to_string().contains("no roster template"));
}

#[test]
fn error_report_joins_messages_with_semicolons() {
    let errors = vec![
        ValidationError {
            row: 3,
            subject: "S002".to_string(),
            errors: vec!["Marks cannot exceed 100".to_string()],
        },
        ValidationError {
            row: 5,
            subject: "S009".to_string(),
            errors: vec![
                "Student not found in class".to_string(),
                "Absent must be true/false, 1/0, or yes/no".to_string(),
            ],
        },
    ];
    let report = build_error_report(&errors).expect("report");
    insta::assert_snapshot!(report, @r#"
    "row","subject","errors"
    3,"S002","Marks cannot exceed 100"
    5,"S009","Student not found in class; Absent must be true/false, 1/0, or yes/no"
    "#);
}

#[test]
fn empty_error_report_is_just_the_header() {
    let report = build_error_report(&[]).expect("report");
    insta::assert_snapshot!(report, @r#""row","subject","errors""#);
}

#[test]
fn filenames_are_deterministic() {
    let profile = ImportProfile::marks(100.0);
    assert_eq!(
        template_filename(&profile, "test-42", report_date()),
        "marks_template_test-42_2026-03-14.csv"
    );
    assert_eq!(
        error_report_filename(&profile, "test-42", report_date()),
        "marks_errors_test-42_2026-03-14.csv"
    );
}

#[test]
fn write_template_creates_the_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("out");
    let profile = ImportProfile::fees(None);
    let path = write_template(&nested, &profile, "plan-7", report_date(), &class_roster())
        .expect("write template");
    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("fees_template_plan-7_2026-03-14.csv")
    );
    let content = std::fs::read_to_string(&path).expect("read template");
    assert!(content.starts_with("student_id,student_code,student_name,amount_paid,paid_on"));
}
