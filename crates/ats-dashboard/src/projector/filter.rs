use std::collections::HashSet;

use crate::records::Projectable;

use super::params::StatusFilter;

/// Keep records whose status passes `status` and whose searchable text contains
/// `search`, case-insensitively. Input order is preserved.
pub fn filter<R>(records: &[R], search: &str, status: &StatusFilter) -> Vec<R>
where
    R: Projectable + Clone,
{
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|record| status.matches(record.status()) && matches_search(*record, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be lower-cased.
pub fn matches_search<R: Projectable>(record: &R, needle: &str) -> bool {
    needle.is_empty() || record.any_field_contains(needle)
}

/// Distinct statuses in first-seen order, for populating a status selector.
pub fn observed_statuses<R: Projectable>(records: &[R]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(Projectable::status)
        .filter(|status| seen.insert(*status))
        .map(str::to_string)
        .collect()
}
