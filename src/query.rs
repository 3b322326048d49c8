//! Text search over the flattened record list.

use crate::model::{AreaIndex, AreaRecord};

/// Case-insensitive substring match on code or name.
///
/// A blank query matches everything. Results keep index order; `limit == 0`
/// means unlimited.
pub fn search<'a>(index: &'a AreaIndex, query: &str, limit: usize) -> Vec<&'a AreaRecord> {
    let needle = query.trim().to_lowercase();
    let hits = index
        .records()
        .iter()
        .filter(move |record| matches(record, &needle));
    if limit == 0 {
        hits.collect()
    } else {
        hits.take(limit).collect()
    }
}

/// Number of records `search` would return without a limit.
pub fn count_matches(index: &AreaIndex, query: &str) -> usize {
    let needle = query.trim().to_lowercase();
    index
        .records()
        .iter()
        .filter(|record| matches(record, &needle))
        .count()
}

fn matches(record: &AreaRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.code.to_lowercase().contains(needle)
        || record.name.to_lowercase().contains(needle)
}
