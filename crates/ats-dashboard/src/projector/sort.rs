use crate::records::{FieldValue, Projectable};

use super::params::SortDirection;

/// Stable sort by a named field.
///
/// Keys are extracted once per record. Records lacking the field sort as the
/// minimum value, so they lead ascending lists and trail descending ones.
pub fn sort<R>(records: &[R], key: &str, direction: SortDirection) -> Vec<R>
where
    R: Projectable + Clone,
{
    let mut keyed: Vec<(FieldValue, &R)> = records
        .iter()
        .map(|record| (record.field(key), record))
        .collect();

    keyed.sort_by(|(left, _), (right, _)| direction.apply(left.compare(right)));

    keyed.into_iter().map(|(_, record)| record.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projector::tests::{candidate, ids, job};

    #[test]
    fn numeric_fields_compare_numerically() {
        let mut small = job("1", "open", "a");
        small.openings = Some(9);
        let mut large = job("2", "open", "b");
        large.openings = Some(10);
        let sorted = sort(&[large, small], "openings", SortDirection::Ascending);
        assert_eq!(ids(&sorted), vec!["1", "2"]);
    }

    #[test]
    fn dates_compare_as_instants() {
        let mut early = job("1", "open", "a");
        early.created_at = Some("2024-01-05T23:00:00-05:00".to_string());
        let mut late = job("2", "open", "b");
        late.created_at = Some("2024-01-05 12:00:00".to_string());

        // The offset pushes the first posting to 04:00 UTC on the 6th.
        let sorted = sort(&[early, late], "created_at", SortDirection::Ascending);
        assert_eq!(ids(&sorted), vec!["2", "1"]);
    }

    #[test]
    fn descending_keeps_ties_in_input_order() {
        let records = vec![
            candidate("1", "Applied", Some(3.0)),
            candidate("2", "Applied", Some(5.0)),
            candidate("3", "Applied", Some(3.0)),
            candidate("4", "Applied", Some(5.0)),
        ];

        let ascending = sort(&records, "rating", SortDirection::Ascending);
        assert_eq!(ids(&ascending), vec!["1", "3", "2", "4"]);

        let descending = sort(&ascending, "rating", SortDirection::Descending);
        assert_eq!(ids(&descending), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn descending_matches_reverse_without_ties() {
        let records = vec![
            candidate("1", "Applied", Some(2.0)),
            candidate("2", "Applied", Some(4.0)),
            candidate("3", "Applied", Some(1.0)),
        ];
        let ascending = sort(&records, "rating", SortDirection::Ascending);
        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(
            sort(&ascending, "rating", SortDirection::Descending),
            reversed
        );
    }

    #[test]
    fn missing_fields_sort_as_minimum() {
        let records = vec![
            candidate("1", "Applied", Some(4.0)),
            candidate("2", "Applied", None),
            candidate("3", "Applied", Some(1.0)),
        ];
        let ascending = sort(&records, "rating", SortDirection::Ascending);
        assert_eq!(ids(&ascending), vec!["2", "3", "1"]);

        let descending = sort(&records, "rating", SortDirection::Descending);
        assert_eq!(ids(&descending), vec!["1", "3", "2"]);
    }

    #[test]
    fn unknown_key_keeps_input_order() {
        let records = vec![job("3", "open", "c"), job("1", "open", "a")];
        let sorted = sort(&records, "no_such_field", SortDirection::Descending);
        assert_eq!(ids(&sorted), vec!["3", "1"]);
    }

    #[test]
    fn text_sorts_ignoring_case() {
        let records = vec![
            job("1", "open", "backend"),
            job("2", "open", "Analyst"),
            job("3", "open", "Cloud"),
        ];
        let sorted = sort(&records, "title", SortDirection::Ascending);
        assert_eq!(ids(&sorted), vec!["2", "1", "3"]);
    }
}
