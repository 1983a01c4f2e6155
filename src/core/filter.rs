//! Filter stage: free-text search, equality and range criteria

use crate::core::error::QueryError;
use crate::core::field::FieldValue;
use crate::core::item::{ListItem, snake_case};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Comparison operator of a range criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    Lt,
    Gte,
    Lte,
}

impl Comparison {
    /// Split `"price>="` into `("price", Gte)`
    fn split_key(key: &str) -> Option<(&str, Comparison)> {
        // two-char suffixes first so `>=` is not read as `>`
        [
            (">=", Comparison::Gte),
            ("<=", Comparison::Lte),
            (">", Comparison::Gt),
            ("<", Comparison::Lt),
        ]
        .into_iter()
        .find_map(|(suffix, op)| key.strip_suffix(suffix).map(|field| (field, op)))
    }

    fn holds(self, value: f64, bound: f64) -> bool {
        match self {
            Comparison::Gt => value > bound,
            Comparison::Lt => value < bound,
            Comparison::Gte => value >= bound,
            Comparison::Lte => value <= bound,
        }
    }
}

/// Numeric bound on a field
#[derive(Debug, Clone, PartialEq)]
pub struct RangeCriterion {
    pub field: String,
    pub op: Comparison,
    pub bound: f64,
}

/// The set of active filter criteria for a view
///
/// Criteria compose with logical AND. Blank values are never stored, so an
/// unset criterion and an empty one are the same thing.
///
/// # Example
/// ```rust,ignore
/// let mut criteria = FilterCriteria::new(["name", "sku"]);
/// criteria.set_search("lamp");
/// criteria.set_equals("category", "lighting");
/// criteria.set_range("price", Comparison::Lte, 50.0);
/// let visible = filter(&products, &criteria);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    search_fields: Vec<String>,
    search: Option<String>,
    equals: BTreeMap<String, FieldValue>,
    ranges: Vec<RangeCriterion>,
}

impl FilterCriteria {
    /// Create empty criteria whose free-text term searches the given fields
    pub fn new<I, S>(search_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            search_fields: search_fields
                .into_iter()
                .map(|f| snake_case(f.as_ref()))
                .collect(),
            ..Self::default()
        }
    }

    /// Parse criteria from a JSON filter object
    ///
    /// # Format
    /// - Free text: `{"search": "lamp"}` (or `"q"`)
    /// - Exact match: `{"status": "active", "rating": 5}`
    /// - Comparison: `{"price>": 10, "price<=": "99.5"}`
    pub fn from_json<I, S>(search_fields: I, filter: &Value) -> Result<Self, QueryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let object = filter.as_object().ok_or_else(|| QueryError::InvalidFilter {
            message: "expected a JSON object".to_string(),
        })?;

        let mut criteria = Self::new(search_fields);
        for (key, value) in object {
            if key == "search" || key == "q" {
                criteria.set_search(value.as_str().unwrap_or_default());
                continue;
            }
            if let Some((field, op)) = Comparison::split_key(key) {
                let bound = FieldValue::from_json(value).as_number().ok_or_else(|| {
                    QueryError::InvalidFilter {
                        message: format!("'{key}' needs a numeric bound, got {value}"),
                    }
                })?;
                criteria.set_range(field, op, bound);
                continue;
            }
            criteria.set_equals(key, FieldValue::from_json(value));
        }
        Ok(criteria)
    }

    /// Fields the free-text term is matched against
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Current free-text term, lowercased
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Set the free-text term; a blank term clears it
    pub fn set_search(&mut self, term: &str) {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_lowercase());
    }

    /// Builder-style [`set_search`](Self::set_search)
    pub fn with_search(mut self, term: &str) -> Self {
        self.set_search(term);
        self
    }

    /// Require `field` to equal `value`; a blank value removes the constraint
    pub fn set_equals(&mut self, field: &str, value: impl Into<FieldValue>) {
        let field = snake_case(field);
        let value = value.into();
        if value.is_blank() {
            self.equals.remove(&field);
        } else {
            self.equals.insert(field, value);
        }
    }

    /// Builder-style [`set_equals`](Self::set_equals)
    pub fn with_equals(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.set_equals(field, value);
        self
    }

    /// Current equality constraint on a field
    pub fn equals(&self, field: &str) -> Option<&FieldValue> {
        self.equals.get(&snake_case(field))
    }

    /// Add a numeric bound, replacing any bound with the same field and operator
    pub fn set_range(&mut self, field: &str, op: Comparison, bound: f64) {
        let field = snake_case(field);
        self.ranges.retain(|r| !(r.field == field && r.op == op));
        self.ranges.push(RangeCriterion { field, op, bound });
    }

    /// Active numeric bounds
    pub fn ranges(&self) -> &[RangeCriterion] {
        &self.ranges
    }

    /// Fields carrying an equality or range constraint
    pub fn constrained_fields(&self) -> impl Iterator<Item = &str> {
        self.equals
            .keys()
            .map(String::as_str)
            .chain(self.ranges.iter().map(|r| r.field.as_str()))
    }

    /// Drop every constraint on a field
    pub fn remove(&mut self, field: &str) {
        let field = snake_case(field);
        self.equals.remove(&field);
        self.ranges.retain(|r| r.field != field);
    }

    /// Drop every criterion, keeping the configured search fields
    pub fn clear(&mut self) {
        self.search = None;
        self.equals.clear();
        self.ranges.clear();
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.equals.is_empty() && self.ranges.is_empty()
    }

    /// True when at least one criterion is set
    pub fn is_active(&self) -> bool {
        !self.is_empty()
    }

    /// Whether a single item passes every criterion
    pub fn matches<T: ListItem>(&self, item: &T) -> bool {
        if let Some(term) = &self.search {
            let found = self.search_fields.iter().any(|field| {
                item.field_value(field)
                    .map(|v| v.as_search_text())
                    .unwrap_or_default()
                    .contains(term.as_str())
            });
            if !found {
                return false;
            }
        }

        let equal = self.equals.iter().all(|(field, expected)| {
            item.field_value(field)
                .is_some_and(|actual| actual.matches(expected))
        });
        if !equal {
            return false;
        }

        self.ranges.iter().all(|range| {
            item.field_value(&range.field)
                .and_then(|v| v.as_number())
                .is_some_and(|n| range.op.holds(n, range.bound))
        })
    }
}

/// Reduce `items` to those matching every criterion
///
/// Empty criteria borrow the input unchanged; otherwise a new collection is
/// returned in the original relative order.
pub fn filter<'a, T: ListItem>(items: &'a [T], criteria: &FilterCriteria) -> Cow<'a, [T]> {
    if criteria.is_empty() {
        return Cow::Borrowed(items);
    }

    let kept: Vec<T> = items
        .iter()
        .filter(|item| criteria.matches(*item))
        .cloned()
        .collect();

    tracing::trace!(before = items.len(), after = kept.len(), "filter applied");
    Cow::Owned(kept)
}
