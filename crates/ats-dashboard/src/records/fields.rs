use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::domain::{EntityKind, RecordId};

/// Comparable view of a single record field.
///
/// Kinds order as `Missing < Number < Instant < Text` so a field that is absent
/// on some records always sorts as the minimum.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Missing,
    Number(f64),
    Instant(DateTime<Utc>),
    Text(String),
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

impl FieldValue {
    pub fn from_text(value: Option<&str>) -> Self {
        match value {
            Some(text) => Self::Text(text.to_string()),
            None => Self::Missing,
        }
    }

    pub fn from_number(value: Option<f64>) -> Self {
        match value {
            Some(number) if !number.is_nan() => Self::Number(number),
            _ => Self::Missing,
        }
    }

    /// Unparseable dates count as missing rather than falling back to text order.
    pub fn from_date_like(value: Option<&str>) -> Self {
        value
            .and_then(parse_instant)
            .map(Self::Instant)
            .unwrap_or(Self::Missing)
    }

    /// Numeric identifiers compare numerically so `"10"` follows `"9"`.
    pub fn from_identifier(id: &RecordId) -> Self {
        match id.as_str().parse::<f64>() {
            Ok(number) if number.is_finite() => Self::Number(number),
            _ => Self::Text(id.as_str().to_string()),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Number(_) => 1,
            Self::Instant(_) => 2,
            Self::Text(_) => 3,
        }
    }

    /// Ascending total order used by the projector's sort.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => left.total_cmp(right),
            (Self::Instant(left), Self::Instant(right)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) => fold_case(left)
                .cmp(fold_case(right))
                .then_with(|| left.cmp(right)),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Lower-cased characters without allocating a folded copy per comparison.
fn fold_case(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

/// Parse RFC 3339 timestamps, naive `date time` stamps (treated as UTC), or bare dates.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Field accessors the projector needs from a record.
///
/// A single generic projector runs over every entity through this trait rather
/// than one hand-written filter/sort per collection.
pub trait Projectable {
    const KIND: EntityKind;
    const SORTABLE_FIELDS: &'static [&'static str];

    fn record_id(&self) -> &RecordId;

    /// Stage or status label used for filtering and pipeline grouping.
    fn status(&self) -> &str;

    /// Primary display text (job title, person name, ...).
    fn title(&self) -> &str;

    /// Fields matched by free-text search. Missing values are empty strings.
    fn searchable_fields(&self) -> Vec<&str>;

    fn field(&self, key: &str) -> FieldValue;

    /// True when one searchable field contains `needle` on its own; matches
    /// never span two fields. `needle` must already be lower-cased.
    fn any_field_contains(&self, needle: &str) -> bool {
        self.searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }

    fn is_sortable_by(key: &str) -> bool
    where
        Self: Sized,
    {
        Self::SORTABLE_FIELDS.contains(&key)
    }
}

impl<T: Projectable> Projectable for &T {
    const KIND: EntityKind = T::KIND;
    const SORTABLE_FIELDS: &'static [&'static str] = T::SORTABLE_FIELDS;

    fn record_id(&self) -> &RecordId {
        (**self).record_id()
    }

    fn status(&self) -> &str {
        (**self).status()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn searchable_fields(&self) -> Vec<&str> {
        (**self).searchable_fields()
    }

    fn field(&self, key: &str) -> FieldValue {
        (**self).field(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_supported_date_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_instant("2024-05-01"), Some(expected));
        assert_eq!(parse_instant("2024-05-01T00:00:00Z"), Some(expected));
        assert_eq!(parse_instant("2024-05-01 00:00:00"), Some(expected));
        assert_eq!(
            parse_instant("2024-05-01T02:00:00+02:00"),
            Some(expected),
            "offsets normalize to UTC"
        );
        assert_eq!(parse_instant("next tuesday"), None);
        assert_eq!(parse_instant(""), None);
    }

    #[test]
    fn missing_sorts_below_every_kind() {
        let missing = FieldValue::Missing;
        assert_eq!(missing.compare(&FieldValue::Number(-1e9)), Ordering::Less);
        assert_eq!(
            missing.compare(&FieldValue::Text(String::new())),
            Ordering::Less
        );
        assert_eq!(missing.compare(&FieldValue::Missing), Ordering::Equal);
    }

    #[test]
    fn numbers_compare_numerically() {
        let nine = FieldValue::from_identifier(&RecordId::from("9"));
        let ten = FieldValue::from_identifier(&RecordId::from("10"));
        assert_eq!(nine.compare(&ten), Ordering::Less);
        assert_eq!(FieldValue::from_number(Some(f64::NAN)), FieldValue::Missing);
    }

    #[test]
    fn text_compares_case_insensitively_first() {
        let lower = FieldValue::Text("apple".to_string());
        let upper = FieldValue::Text("Banana".to_string());
        assert_eq!(lower.compare(&upper), Ordering::Less);

        let a = FieldValue::Text("Ada".to_string());
        let b = FieldValue::Text("ada".to_string());
        assert_ne!(a.compare(&b), Ordering::Equal, "order stays total");
    }

    #[test]
    fn folded_text_orders_prefixes_and_non_ascii() {
        let short = FieldValue::Text("ab".to_string());
        let long = FieldValue::Text("ABC".to_string());
        assert_eq!(short.compare(&long), Ordering::Less);
        assert_eq!(long.compare(&short), Ordering::Greater);

        let accented = FieldValue::Text("Émile".to_string());
        let plain = FieldValue::Text("émile".to_string());
        assert_eq!(accented.compare(&plain), Ordering::Less);
        assert_eq!(
            FieldValue::Text("ÉMILE".to_string()).compare(&FieldValue::Text("émilf".to_string())),
            Ordering::Less
        );
    }

    #[test]
    fn unparseable_dates_are_missing() {
        assert_eq!(
            FieldValue::from_date_like(Some("soon")),
            FieldValue::Missing
        );
        assert!(matches!(
            FieldValue::from_date_like(Some("2023-01-02")),
            FieldValue::Instant(_)
        ));
    }
}
