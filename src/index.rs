//! Area index builder: flattens the raw dictionary into an [`AreaIndex`].
//!
//! The raw document maps category name → (area code → node). Anything that
//! does not fit that shape is skipped rather than rejected.

use crate::fields;
use crate::model::{AreaIndex, AreaRecord};
use serde_json::{Map, Value};
use std::collections::hash_map::Entry;

/// Build the index for a fully loaded dictionary.
pub fn build(dict: &Value) -> AreaIndex {
    let mut index = AreaIndex::default();
    let Some(categories) = dict.as_object() else {
        tracing::warn!("dictionary root is not an object; index is empty");
        return index;
    };

    for (group, code, node) in object_nodes(categories) {
        let record = AreaRecord {
            code: code.clone(),
            name: fields::name(node),
            group: group.clone(),
            raw: node.clone(),
        };
        let pos = index.records.len();
        index.records.push(record);
        if index.by_code.insert(code.clone(), pos).is_some() {
            tracing::debug!(code = %code, group = %group, "duplicate area code, keeping last");
        }
    }

    for (_, code, node) in object_nodes(categories) {
        for child in fields::child_codes(node) {
            match index.parent_of.entry(child) {
                Entry::Vacant(slot) => {
                    slot.insert(code.clone());
                }
                Entry::Occupied(slot) if slot.get() != code => {
                    tracing::debug!(
                        child = %slot.key(),
                        kept = %slot.get(),
                        ignored = %code,
                        "child listed under more than one parent"
                    );
                }
                Entry::Occupied(_) => {}
            }
        }
    }

    tracing::debug!(
        records = index.records.len(),
        codes = index.by_code.len(),
        listed_children = index.parent_of.len(),
        "built area index"
    );
    index
}

/// Iterate `(category, code, node)` over every object node of every object
/// category, in document order.
fn object_nodes(
    categories: &Map<String, Value>,
) -> impl Iterator<Item = (&String, &String, &Value)> {
    categories
        .iter()
        .filter_map(|(group, entries)| entries.as_object().map(|entries| (group, entries)))
        .flat_map(|(group, entries)| {
            entries
                .iter()
                .filter(|(_, node)| node.is_object())
                .map(move |(code, node)| (group, code, node))
        })
}
