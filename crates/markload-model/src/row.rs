use std::collections::BTreeMap;

/// Normalize a column name for case-insensitive lookup.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A loosely-typed row produced by the format parser.
///
/// Keys are normalized (trimmed, lowercased) on insert so lookups are
/// case-insensitive. Each row carries its 1-based position in the parsed
/// sequence and the 1-based source line used for error reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    ordinal: usize,
    source_line: usize,
    fields: BTreeMap<String, String>,
}

impl RawRow {
    #[must_use]
    pub fn new(ordinal: usize, source_line: usize) -> Self {
        Self {
            ordinal,
            source_line,
            fields: BTreeMap::new(),
        }
    }

    /// 1-based position in the parsed row sequence.
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// 1-based line in the source file. For CSV the header is line 1, so the
    /// first data row reports as line 2, matching what the user sees when
    /// opening the original file.
    #[must_use]
    pub fn source_line(&self) -> usize {
        self.source_line
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.fields.insert(normalize_key(key), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&normalize_key(key)).map(String::as_str)
    }

    /// Field value with missing fields treated as empty.
    #[must_use]
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}
