//! Format parsing: raw text to an ordered `RawRow` sequence.
//!
//! Syntax errors are collected as data, never returned as `Err`, so the
//! caller can render a complete report. A row that fails at the syntax level
//! is excluded from the output sequence and accounted for by its error
//! string; rows are never silently dropped.

use markload_model::RawRow;
use serde_json::Value;
use tracing::debug;

use crate::SourceFormat;

/// Parsed rows plus syntax-level errors (not domain errors).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub rows: Vec<RawRow>,
    pub errors: Vec<String>,
}

/// Parse raw file content in the declared format.
///
/// `entity` is the noun used in the JSON fatal message ("test" yields
/// "JSON must contain an array of test objects"). Pure function of its
/// input; empty or whitespace-only content yields no rows and a single
/// "File is empty" error.
#[must_use]
pub fn parse(content: &str, format: SourceFormat, entity: &str) -> ParseOutcome {
    let content = content.trim_start_matches('\u{feff}');
    if content.trim().is_empty() {
        return ParseOutcome {
            rows: Vec::new(),
            errors: vec!["File is empty".to_string()],
        };
    }
    let outcome = match format {
        SourceFormat::Csv => parse_csv(content),
        SourceFormat::Json => parse_json(content, entity),
        SourceFormat::Text => parse_text(content),
    };
    debug!(
        format = %format,
        rows = outcome.rows.len(),
        syntax_errors = outcome.errors.len(),
        "source parsed"
    );
    outcome
}

/// The naive comma-split CSV dialect uploaded files use: line 1 is the
/// header, values are trimmed and stripped of one pair of surrounding
/// quotes, and a line with the wrong value count is rejected whole.
fn parse_csv(content: &str) -> ParseOutcome {
    let mut rows = Vec::new();
    let mut errors = Vec::new();
    let mut lines = content.lines().enumerate();

    let Some((_, header_line)) = lines.next() else {
        return ParseOutcome { rows, errors };
    };
    let headers: Vec<String> = header_line
        .split(',')
        .map(|cell| strip_quotes(cell.trim()).trim().to_lowercase())
        .collect();

    for (index, line) in lines {
        let line_number = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        let values: Vec<&str> = line
            .split(',')
            .map(|cell| strip_quotes(cell.trim()))
            .collect();
        if values.len() != headers.len() {
            errors.push(format!("Line {line_number}: Incorrect number of columns"));
            continue;
        }
        let mut row = RawRow::new(rows.len() + 1, line_number);
        for (header, value) in headers.iter().zip(values) {
            row.insert(header, value);
        }
        rows.push(row);
    }
    ParseOutcome { rows, errors }
}

/// JSON content must be a top-level array of flat objects. Anything else is
/// a single fatal error: nothing can be salvaged from a malformed document.
fn parse_json(content: &str, entity: &str) -> ParseOutcome {
    let fatal = || ParseOutcome {
        rows: Vec::new(),
        errors: vec![format!("JSON must contain an array of {entity} objects")],
    };
    let Ok(value) = serde_json::from_str::<Value>(content) else {
        return fatal();
    };
    let Value::Array(items) = value else {
        return fatal();
    };

    let mut rows = Vec::new();
    let mut errors = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let position = index + 1;
        let Some(object) = item.as_object() else {
            errors.push(format!("Item {position}: Expected an object"));
            continue;
        };
        // JSON has no header line, so rows are addressed by array position.
        let mut row = RawRow::new(rows.len() + 1, position);
        for (key, value) in object {
            row.insert(key, json_scalar(value));
        }
        rows.push(row);
    }
    ParseOutcome { rows, errors }
}

fn json_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Key:value block format: blocks separated by blank lines, each line split
/// on the first `:`. Keys are lowercased, trimmed, and spaces become
/// underscores. A line without `:` rejects its whole block so the row
/// accounting stays exact.
fn parse_text(content: &str) -> ParseOutcome {
    struct TextBlock {
        first_line: usize,
        fields: Vec<(String, String)>,
        valid: bool,
    }

    fn flush(block: &mut Option<TextBlock>, rows: &mut Vec<RawRow>) {
        let Some(block) = block.take() else {
            return;
        };
        if !block.valid {
            return;
        }
        let mut row = RawRow::new(rows.len() + 1, block.first_line);
        for (key, value) in block.fields {
            row.insert(&key, value);
        }
        rows.push(row);
    }

    let mut rows = Vec::new();
    let mut errors = Vec::new();
    let mut block: Option<TextBlock> = None;

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        if line.trim().is_empty() {
            flush(&mut block, &mut rows);
            continue;
        }
        let block = block.get_or_insert_with(|| TextBlock {
            first_line: line_number,
            fields: Vec::new(),
            valid: true,
        });
        match line.split_once(':') {
            Some((key, value)) => {
                let key = key.trim().to_lowercase().replace(' ', "_");
                block.fields.push((key, value.trim().to_string()));
            }
            None => {
                errors.push(format!("Line {line_number}: Expected 'key: value'"));
                block.valid = false;
            }
        }
    }
    flush(&mut block, &mut rows);
    ParseOutcome { rows, errors }
}

/// Strip one pair of surrounding double quotes.
fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
