use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One known entity an import row may reference (a student in a class).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterMember {
    /// Primary identifier in the backend.
    pub id: String,
    /// Human-readable code (admission number, roll code).
    #[serde(default)]
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
}

/// Read-only set of known entities, indexed for foreign-key resolution.
///
/// The pipeline only ever reads the roster; it is borrowed for the duration
/// of validation and never mutated.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    members: Vec<RosterMember>,
    by_id: BTreeMap<String, usize>,
    by_code: BTreeMap<String, usize>,
}

impl Roster {
    #[must_use]
    pub fn new(members: Vec<RosterMember>) -> Self {
        let mut by_id = BTreeMap::new();
        let mut by_code = BTreeMap::new();
        for (index, member) in members.iter().enumerate() {
            by_id.entry(member.id.trim().to_string()).or_insert(index);
            let code = member.code.trim();
            if !code.is_empty() {
                by_code.entry(code.to_uppercase()).or_insert(index);
            }
        }
        Self {
            members,
            by_id,
            by_code,
        }
    }

    /// Resolve a subject by primary id, falling back to the human-readable
    /// code. Id matching is exact after trimming; code matching is
    /// case-insensitive.
    #[must_use]
    pub fn resolve(&self, id: Option<&str>, code: Option<&str>) -> Option<&RosterMember> {
        if let Some(id) = id
            && let Some(&index) = self.by_id.get(id.trim())
        {
            return Some(&self.members[index]);
        }
        if let Some(code) = code
            && let Some(&index) = self.by_code.get(&code.trim().to_uppercase())
        {
            return Some(&self.members[index]);
        }
        None
    }

    #[must_use]
    pub fn members(&self) -> &[RosterMember] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
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
    fn resolves_by_id_before_code() {
        let roster = roster();
        let member = roster.resolve(Some("12"), Some("S001")).expect("member");
        assert_eq!(member.id, "12");
    }

    #[test]
    fn falls_back_to_code_case_insensitively() {
        let roster = roster();
        let member = roster.resolve(None, Some(" s001 ")).expect("member");
        assert_eq!(member.id, "11");
    }

    #[test]
    fn unknown_subject_is_none() {
        let roster = roster();
        assert!(roster.resolve(Some("99"), Some("S099")).is_none());
    }
}
