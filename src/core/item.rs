//! Item traits defining what the pipeline needs from a record

use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Base trait for every record that flows through a list view.
///
/// The pipeline only needs two things from an item:
/// - a stable identifier
/// - dynamic access to the fields used by active filter/sort criteria
///
/// Implementations return `None` for fields they do not carry. Absent
/// fields are never an error: they fail equality criteria, search as the
/// empty string and sort lowest.
pub trait ListItem: Clone + Send + Sync + 'static {
    /// Stable identifier (the backend's `id` or `_id`)
    fn item_id(&self) -> &str;

    /// Get the value of a specific field by name
    ///
    /// Field names are given in snake_case; see [`snake_case`] for callers
    /// that accept camelCase names from the outside.
    fn field_value(&self, field: &str) -> Option<FieldValue>;
}

/// Convert a camelCase field name to snake_case (`createdAt` -> `created_at`)
///
/// Acronyms stay in one word: `SKU` -> `sku`, `productID` -> `product_id`.
pub fn snake_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    let mut prev: Option<char> = None;
    for ch in field.chars() {
        if ch.is_ascii_uppercase() {
            if prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
        prev = Some(ch);
    }
    out
}

/// A schemaless item: an identifier plus whatever scalar fields came with it
///
/// Useful for views over data that has no dedicated typed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,

    #[serde(flatten)]
    pub fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Create an empty record
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style field setter
    pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(snake_case(field), value.into());
        self
    }

    /// Build a record from a JSON object carrying `id` or `_id`
    ///
    /// Returns `None` for non-objects and objects without an identifier.
    /// Nested objects and arrays are dropped; field names are stored in
    /// snake_case.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = object
            .get("id")
            .or_else(|| object.get("_id"))
            .and_then(|v| FieldValue::from_json(v).as_text())?;

        let fields = object
            .iter()
            .filter(|(key, _)| key.as_str() != "id" && key.as_str() != "_id")
            .map(|(key, v)| (snake_case(key), FieldValue::from_json(v)))
            .filter(|(_, v)| !v.is_null())
            .collect();

        Some(Self { id, fields })
    }
}

impl ListItem for Record {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" | "_id" => Some(FieldValue::String(self.id.clone())),
            _ => self
                .fields
                .get(field)
                .or_else(|| self.fields.get(&snake_case(field)))
                .cloned(),
        }
    }
}
