//! Office resolver: walk ancestor links from any area code up to the
//! office-level record used as the forecast API key.

use crate::model::AreaIndex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Why a resolution stopped where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// An office-level record was reached.
    Ok,
    /// The parent chain revisits a code.
    Loop,
    /// A code on the chain is not in the index.
    NotFound,
    /// The chain ends without reaching an office.
    NoParent,
    /// No starting code was given.
    Unknown,
}

impl Reason {
    pub fn as_str(self) -> &'static str {
        match self {
            Reason::Ok => "ok",
            Reason::Loop => "loop",
            Reason::NotFound => "not_found",
            Reason::NoParent => "no_parent",
            Reason::Unknown => "unknown",
        }
    }

    /// Message shown to a user for this outcome.
    pub fn message(self) -> &'static str {
        match self {
            Reason::Ok => "Office resolved",
            Reason::Loop => "Parent chain loops back on itself",
            Reason::NotFound => "Area code is not in the dictionary",
            Reason::NoParent => "Parent chain ends before reaching an office",
            Reason::Unknown => "No area code given",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`resolve_office`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Office code, empty unless `reason` is [`Reason::Ok`].
    pub office: String,
    /// Codes visited, starting code first. A repeated code is not appended.
    pub path: Vec<String>,
    pub reason: Reason,
}

impl Resolution {
    fn failed(path: Vec<String>, reason: Reason) -> Self {
        Resolution {
            office: String::new(),
            path,
            reason,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.reason == Reason::Ok
    }
}

/// Resolve `code` to its owning office.
///
/// Never fails: dead ends, unknown codes and cycles are reported through
/// [`Resolution::reason`]. The visited set bounds the walk to one step per
/// distinct code plus the step that detects a repeat.
pub fn resolve_office(code: Option<&str>, index: &AreaIndex) -> Resolution {
    let mut visited: HashSet<String> = HashSet::new();
    let mut path: Vec<String> = Vec::new();
    let mut current = code.filter(|c| !c.is_empty()).map(str::to_string);

    while let Some(code) = current.take() {
        if !visited.insert(code.clone()) {
            return Resolution::failed(path, Reason::Loop);
        }
        path.push(code.clone());

        let Some(record) = index.get(&code) else {
            return Resolution::failed(path, Reason::NotFound);
        };

        if record.is_office() {
            return Resolution {
                office: record.code.clone(),
                path,
                reason: Reason::Ok,
            };
        }

        match index.parent_code(&code) {
            Some(parent) => current = Some(parent),
            None => return Resolution::failed(path, Reason::NoParent),
        }
    }

    Resolution::failed(path, Reason::Unknown)
}
