//! Downloadable artifacts for the markload pipeline: pre-filled templates
//! and line-addressable error reports. Both are built as in-memory CSV text;
//! only the `write_*` helpers touch the filesystem.

mod common;
mod error_report;
mod template;

pub use error_report::{build_error_report, error_report_filename, write_error_report};
pub use template::{build_template, template_filename, write_template};
