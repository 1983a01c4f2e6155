//! Sort stage: stable ordering by a single key

use crate::core::error::QueryError;
use crate::core::field::{self, FieldValue, SortKind};
use crate::core::item::{ListItem, snake_case};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The other direction
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Apply the direction to an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which key to sort by, in which direction, compared how
///
/// A spec without a key leaves the order untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SortSpec {
    pub key: Option<String>,
    pub direction: SortDirection,
    pub kind: SortKind,
}

impl SortSpec {
    /// No sorting
    pub fn none() -> Self {
        Self::default()
    }

    /// Sort by `key` ascending
    pub fn asc(key: &str, kind: SortKind) -> Self {
        Self {
            key: Some(snake_case(key)),
            direction: SortDirection::Asc,
            kind,
        }
    }

    /// Sort by `key` descending
    pub fn desc(key: &str, kind: SortKind) -> Self {
        Self {
            direction: SortDirection::Desc,
            ..Self::asc(key, kind)
        }
    }

    /// Split a sort expression into key and direction
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    pub fn parse_expr(expr: &str) -> Result<(String, SortDirection), QueryError> {
        let invalid = || QueryError::InvalidSort {
            expr: expr.to_string(),
        };

        let (key, direction) = match expr.split_once(':') {
            Some((key, dir)) => (key, dir.parse::<SortDirection>().map_err(|()| invalid())?),
            None => (expr, SortDirection::Asc),
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(invalid());
        }
        Ok((snake_case(key), direction))
    }

    /// Render as `key:direction`, `None` when unsorted
    pub fn to_expr(&self) -> Option<String> {
        self.key
            .as_ref()
            .map(|key| format!("{}:{}", key, self.direction))
    }
}

/// Return a sorted copy of `items`
///
/// The sort is stable: items with equal keys keep their input order in both
/// directions, since descending only reverses the ascending comparison.
pub fn sort<T: ListItem>(items: &[T], spec: &SortSpec) -> Vec<T> {
    let Some(key) = spec.key.as_deref() else {
        return items.to_vec();
    };

    // resolve each key once instead of on every comparison
    let mut keyed: Vec<(Option<FieldValue>, &T)> =
        items.iter().map(|item| (item.field_value(key), item)).collect();

    keyed.sort_by(|(a, _), (b, _)| {
        spec.direction
            .apply(field::compare(a.as_ref(), b.as_ref(), spec.kind))
    });

    tracing::trace!(key, direction = %spec.direction, count = items.len(), "sort applied");
    keyed.into_iter().map(|(_, item)| item.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::item::Record;

    fn ids(items: &[Record]) -> Vec<&str> {
        items.iter().map(|r| r.item_id()).collect()
    }

    fn priced() -> Vec<Record> {
        vec![
            Record::new("a").with("price", "19.99").with("name", "beta"),
            Record::new("b").with("price", 5.0).with("name", "Alpha"),
            Record::new("c").with("price", "100").with("name", "gamma"),
            Record::new("d").with("name", "delta"),
        ]
    }

    #[test]
    fn test_parse_expr() {
        assert_eq!(
            SortSpec::parse_expr("price:desc").expect("valid"),
            ("price".to_string(), SortDirection::Desc)
        );
        assert_eq!(
            SortSpec::parse_expr("createdAt").expect("valid"),
            ("created_at".to_string(), SortDirection::Asc)
        );
        assert!(SortSpec::parse_expr("price:sideways").is_err());
        assert!(SortSpec::parse_expr(":desc").is_err());
    }

    #[test]
    fn test_to_expr() {
        assert_eq!(
            SortSpec::desc("price", SortKind::Numeric).to_expr().as_deref(),
            Some("price:desc")
        );
        assert_eq!(SortSpec::none().to_expr(), None);
    }

    #[test]
    fn test_numeric_sort_coerces_strings() {
        let sorted = sort(&priced(), &SortSpec::asc("price", SortKind::Numeric));
        assert_eq!(ids(&sorted), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_desc_reverses_and_missing_goes_last() {
        let sorted = sort(&priced(), &SortSpec::desc("price", SortKind::Numeric));
        assert_eq!(ids(&sorted), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn test_text_sort_is_case_insensitive() {
        let sorted = sort(&priced(), &SortSpec::asc("name", SortKind::Text));
        assert_eq!(ids(&sorted), vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn test_no_key_keeps_order() {
        let data = priced();
        assert_eq!(sort(&data, &SortSpec::none()), data);
    }

    #[test]
    fn test_stable_for_equal_keys_in_both_directions() {
        let data = vec![
            Record::new("1").with("status", "active"),
            Record::new("2").with("status", "draft"),
            Record::new("3").with("status", "active"),
            Record::new("4").with("status", "draft"),
        ];
        let asc = sort(&data, &SortSpec::asc("status", SortKind::Text));
        let desc = sort(&data, &SortSpec::desc("status", SortKind::Text));
        assert_eq!(ids(&asc), vec!["1", "3", "2", "4"]);
        assert_eq!(ids(&desc), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_direction_toggle_and_parse() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Desc));
        assert!("up".parse::<SortDirection>().is_err());
    }
}
