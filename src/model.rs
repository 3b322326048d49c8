//! Data model for the flattened area dictionary.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Category name whose records are office-level units.
pub const OFFICE_CATEGORY: &str = "offices";

/// One entry in the flattened dictionary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaRecord {
    pub code: String,
    /// Empty when the source node has no name.
    pub name: String,
    /// Top-level category the record was found under.
    pub group: String,
    /// The original node, untouched.
    pub raw: Value,
}

impl AreaRecord {
    pub fn is_office(&self) -> bool {
        self.group == OFFICE_CATEGORY
    }

    /// Direct parent code declared on the node itself.
    pub fn direct_parent(&self) -> Option<String> {
        crate::fields::parent_code(&self.raw)
    }

    /// `name (code)`, or just the code when the record is unnamed.
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            self.code.clone()
        } else {
            format!("{} ({})", self.name, self.code)
        }
    }
}

/// Read-only index over one loaded dictionary.
///
/// Built by [`crate::index::build`]; there are no mutation operations.
#[derive(Debug, Default)]
pub struct AreaIndex {
    pub(crate) records: Vec<AreaRecord>,
    /// code → position in `records`, last write wins.
    pub(crate) by_code: HashMap<String, usize>,
    /// child code → parent code derived from children lists, first write wins.
    pub(crate) parent_of: HashMap<String, String>,
}

impl AreaIndex {
    /// Records in dictionary iteration order.
    pub fn records(&self) -> &[AreaRecord] {
        &self.records
    }

    pub fn get(&self, code: &str) -> Option<&AreaRecord> {
        self.by_code.get(code).map(|&i| &self.records[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Parent recorded from some other node's children list.
    pub fn listed_parent(&self, code: &str) -> Option<&str> {
        self.parent_of.get(code).map(String::as_str)
    }

    /// Ancestor of `code`: the record's own parent field first, then the
    /// derived children-list mapping.
    pub fn parent_code(&self, code: &str) -> Option<String> {
        self.get(code)
            .and_then(AreaRecord::direct_parent)
            .or_else(|| self.listed_parent(code).map(str::to_string))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct codes.
    pub fn code_count(&self) -> usize {
        self.by_code.len()
    }

    /// Record counts per category, in first-seen order.
    pub fn group_counts(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for record in &self.records {
            match counts.iter_mut().find(|(g, _)| *g == record.group) {
                Some((_, n)) => *n += 1,
                None => counts.push((record.group.clone(), 1)),
            }
        }
        counts
    }
}
