//! Import profiles: the declarative rule set for one import domain.
//!
//! The validator walks a profile's field rules instead of hard-coding
//! per-domain checks, so adding an import domain is a data change.

/// Allowed values for the bulk test import `test_type` column.
pub const TEST_TYPES: &[&str] = &["quiz", "unit_test", "assignment", "exam", "practice"];

/// How the subject (the per-row component of the natural key) is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectRule {
    /// Subject must resolve against the roster: a primary id column with a
    /// human-readable fallback column.
    Roster {
        primary: &'static str,
        secondary: &'static str,
        /// Entity noun for error messages ("Student").
        entity: &'static str,
        /// Column the resolved id is submitted under.
        id_column: &'static str,
    },
    /// Subject is a required free-text key on the row itself.
    Key {
        column: &'static str,
        label: &'static str,
    },
}

/// Validation rule kind for one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Finite number, not negative, optionally capped. Empty coerces to
    /// `Null` unless required.
    Numeric { max: Option<f64>, required: bool },
    /// Accepts true/false, 1/0, yes/no case-insensitively; empty takes the
    /// default.
    Boolean { default: bool },
    /// Case-insensitive membership in a fixed set; stored lowercased.
    Enum { allowed: &'static [&'static str] },
    /// `YYYY-MM-DD`; empty coerces to `Null` unless required.
    Date { required: bool },
    /// Free text; empty coerces to `""` unless required.
    Text { required: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub column: &'static str,
    /// Display label used in error messages ("Marks").
    pub label: &'static str,
    pub kind: FieldKind,
}

/// Declarative description of one import domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportProfile {
    /// Short name ("marks", "fees", "tests").
    pub name: &'static str,
    /// Entity noun for format-level messages ("mark", "fee", "test").
    pub entity: &'static str,
    /// Backend table receiving the upsert.
    pub table: &'static str,
    /// Conflict target for insert-or-update by natural key.
    pub natural_key: &'static [&'static str],
    /// Column carrying the owning entity's id on every record.
    pub owner_column: &'static str,
    pub subject: SubjectRule,
    pub fields: Vec<FieldRule>,
    /// Columns of the downloadable template, in order. Empty for profiles
    /// without a roster-derived template.
    pub template_columns: &'static [&'static str],
}

impl ImportProfile {
    /// Task/test mark submissions: one row per student, marks out of
    /// `max_marks`.
    #[must_use]
    pub fn marks(max_marks: f64) -> Self {
        Self {
            name: "marks",
            entity: "mark",
            table: "test_marks",
            natural_key: &["test_id", "student_id"],
            owner_column: "test_id",
            subject: SubjectRule::Roster {
                primary: "student_id",
                secondary: "student_code",
                entity: "Student",
                id_column: "student_id",
            },
            fields: vec![
                FieldRule {
                    column: "marks_obtained",
                    label: "Marks",
                    kind: FieldKind::Numeric {
                        max: Some(max_marks),
                        required: false,
                    },
                },
                FieldRule {
                    column: "absent",
                    label: "Absent",
                    kind: FieldKind::Boolean { default: false },
                },
                FieldRule {
                    column: "remarks",
                    label: "Remarks",
                    kind: FieldKind::Text { required: false },
                },
            ],
            template_columns: &[
                "student_id",
                "student_code",
                "student_name",
                "marks_obtained",
                "absent",
                "remarks",
            ],
        }
    }

    /// Fee payment rows: amount paid against a fee plan.
    #[must_use]
    pub fn fees(plan_total: Option<f64>) -> Self {
        Self {
            name: "fees",
            entity: "fee",
            table: "fee_payments",
            natural_key: &["plan_id", "student_id"],
            owner_column: "plan_id",
            subject: SubjectRule::Roster {
                primary: "student_id",
                secondary: "student_code",
                entity: "Student",
                id_column: "student_id",
            },
            fields: vec![
                FieldRule {
                    column: "amount_paid",
                    label: "Amount",
                    kind: FieldKind::Numeric {
                        max: plan_total,
                        required: false,
                    },
                },
                FieldRule {
                    column: "paid_on",
                    label: "Payment date",
                    kind: FieldKind::Date { required: false },
                },
                FieldRule {
                    column: "remarks",
                    label: "Remarks",
                    kind: FieldKind::Text { required: false },
                },
            ],
            template_columns: &[
                "student_id",
                "student_code",
                "student_name",
                "amount_paid",
                "paid_on",
                "remarks",
            ],
        }
    }

    /// Bulk test definitions for a class. Roster-free: the subject is the
    /// test name itself.
    #[must_use]
    pub fn tests(max_marks_cap: Option<f64>) -> Self {
        Self {
            name: "tests",
            entity: "test",
            table: "tests",
            natural_key: &["class_id", "name"],
            owner_column: "class_id",
            subject: SubjectRule::Key {
                column: "name",
                label: "Test name",
            },
            fields: vec![
                FieldRule {
                    column: "test_type",
                    label: "Test type",
                    kind: FieldKind::Enum {
                        allowed: TEST_TYPES,
                    },
                },
                FieldRule {
                    column: "max_marks",
                    label: "Max marks",
                    kind: FieldKind::Numeric {
                        max: max_marks_cap,
                        required: true,
                    },
                },
                FieldRule {
                    column: "held_on",
                    label: "Test date",
                    kind: FieldKind::Date { required: false },
                },
            ],
            template_columns: &[],
        }
    }

    /// Whether validation needs a roster to resolve subjects.
    #[must_use]
    pub fn requires_roster(&self) -> bool {
        matches!(self.subject, SubjectRule::Roster { .. })
    }

    /// Column the resolved subject id is submitted under.
    #[must_use]
    pub fn subject_column(&self) -> &'static str {
        match self.subject {
            SubjectRule::Roster { id_column, .. } => id_column,
            SubjectRule::Key { column, .. } => column,
        }
    }
}
