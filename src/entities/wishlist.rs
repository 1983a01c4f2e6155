//! Wishlist entries: a product the customer saved, plus when they saved it

use super::RawId;
use crate::core::actions::{ActionKind, ActionTarget};
use crate::core::field::FieldValue;
use crate::core::item::{ListItem, snake_case};
use crate::entities::product::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A saved product
///
/// The backend sends either `{ "_id", "product": {...}, "addedAt" }` or the
/// product itself with an `addedAt` field mixed in; both normalise here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct WishlistEntry {
    pub id: String,
    pub product: Product,
    pub added_at: Option<DateTime<Utc>>,
}

impl WishlistEntry {
    pub fn new(product: Product) -> Self {
        Self {
            id: product.id.clone(),
            product,
            added_at: None,
        }
    }

    pub fn added_at(mut self, at: DateTime<Utc>) -> Self {
        self.added_at = Some(at);
        self
    }
}

impl TryFrom<Value> for WishlistEntry {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let object = value
            .as_object()
            .ok_or_else(|| "wishlist entry must be an object".to_string())?;

        let added_at = object
            .get("addedAt")
            .or_else(|| object.get("added_at"))
            .and_then(|v| serde_json::from_value(v.clone()).ok());

        let product = match object.get("product") {
            Some(nested) if nested.is_object() => serde_json::from_value::<Product>(nested.clone()),
            _ => serde_json::from_value::<Product>(value.clone()),
        }
        .map_err(|e| format!("invalid wishlist product: {e}"))?;

        let id = object
            .get("_id")
            .or_else(|| object.get("id"))
            .and_then(|v| serde_json::from_value::<RawId>(v.clone()).ok())
            .map_or_else(|| product.id.clone(), String::from);

        Ok(Self {
            id,
            product,
            added_at,
        })
    }
}

impl ListItem for WishlistEntry {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match snake_case(field).as_str() {
            "id" | "_id" => Some(FieldValue::String(self.id.clone())),
            "product_id" => Some(FieldValue::String(self.product.id.clone())),
            "added_at" => self.added_at.map(FieldValue::DateTime),
            "in_stock" => Some(FieldValue::Boolean(self.product.in_stock())),
            other => self.product.field_value(other),
        }
    }
}

impl ActionTarget for WishlistEntry {
    fn apply_action(&mut self, action: ActionKind) -> bool {
        // adding to cart leaves the entry as it is
        matches!(action, ActionKind::AddToCart)
    }
}
