//! Field value types and the comparisons the pipeline runs on them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

/// How values of a sort key are ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    /// Case-insensitive text ordering
    #[default]
    Text,
    /// Values coerced to numbers first (`"19.99"` sorts as 19.99)
    Numeric,
    /// RFC 3339 strings, millisecond timestamps or native datetimes
    Date,
}

impl FieldValue {
    /// Convert a JSON value into a field value
    ///
    /// Arrays and objects have no scalar rendition and become `Null`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => FieldValue::String(s.clone()),
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n.as_f64().map_or(FieldValue::Null, FieldValue::Float),
            },
            Value::Null | Value::Array(_) | Value::Object(_) => FieldValue::Null,
        }
    }

    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Numeric coercion used by numeric sort keys and range criteria
    ///
    /// Strings are parsed after trimming. Non-finite results are rejected.
    pub fn as_number(&self) -> Option<f64> {
        let number = match self {
            FieldValue::Integer(i) => *i as f64,
            FieldValue::Float(f) => *f,
            FieldValue::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        number.is_finite().then_some(number)
    }

    /// Date coercion used by date sort keys
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            FieldValue::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            FieldValue::Integer(millis) => DateTime::from_timestamp_millis(*millis),
            _ => None,
        }
    }

    /// Plain text rendition, `None` for `Null`
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::Uuid(u) => Some(u.to_string()),
            FieldValue::DateTime(dt) => Some(dt.to_rfc3339()),
            FieldValue::Null => None,
        }
    }

    /// Lowercased text for substring search; `Null` searches as the empty string
    pub fn as_search_text(&self) -> String {
        self.as_text().unwrap_or_default().to_lowercase()
    }

    /// Loose equality used by equality criteria
    ///
    /// Numbers compare numerically against numeric strings (`"4"` equals `4`),
    /// everything else compares on its text rendition. `Null` never matches.
    pub fn matches(&self, expected: &FieldValue) -> bool {
        if self.is_null() || expected.is_null() {
            return false;
        }
        if self.is_numeric() || expected.is_numeric() {
            return match (self.as_number(), expected.as_number()) {
                (Some(a), Some(b)) => (a - b).abs() < f64::EPSILON,
                _ => false,
            };
        }
        self.as_text() == expected.as_text()
    }

    /// True when the value carries no usable constraint (null or blank text)
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Ascending comparison of two optional field values under a sort kind
///
/// Missing values, and values that cannot be coerced to the kind, sort lowest.
pub fn compare(a: Option<&FieldValue>, b: Option<&FieldValue>, kind: SortKind) -> Ordering {
    match kind {
        SortKind::Numeric => compare_present(
            a.and_then(FieldValue::as_number),
            b.and_then(FieldValue::as_number),
            f64::total_cmp,
        ),
        SortKind::Date => compare_present(
            a.and_then(FieldValue::as_datetime),
            b.and_then(FieldValue::as_datetime),
            Ord::cmp,
        ),
        SortKind::Text => compare_present(
            a.and_then(FieldValue::as_text).map(|s| s.to_lowercase()),
            b.and_then(FieldValue::as_text).map(|s| s.to_lowercase()),
            Ord::cmp,
        ),
    }
}

fn compare_present<K>(a: Option<K>, b: Option<K>, cmp: impl Fn(&K, &K) -> Ordering) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => cmp(&a, &b),
    }
}
