//! Product records (admin products view, wishlist entries)

use super::{RawId, RawNumber, RawRef, RawStock, lenient};
use crate::core::actions::{ActionKind, ActionTarget};
use crate::core::field::FieldValue;
use crate::core::item::{ListItem, snake_case};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalogue product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawProduct")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub status: String,
    pub category: Option<String>,
    pub rating: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: None,
            price: None,
            stock: None,
            status: "active".to_string(),
            category: None,
            rating: None,
            created_at: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    pub fn in_stock(&self) -> bool {
        self.stock.is_some_and(|s| s > 0)
    }
}

impl ListItem for Product {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match snake_case(field).as_str() {
            "id" | "_id" => FieldValue::String(self.id.clone()),
            "name" => FieldValue::String(self.name.clone()),
            "sku" => self.sku.clone().into(),
            "price" => self.price.into(),
            "stock" => self.stock.into(),
            "status" => FieldValue::String(self.status.clone()),
            "category" => self.category.clone().into(),
            "rating" => self.rating.into(),
            "created_at" => self.created_at.map_or(FieldValue::Null, FieldValue::DateTime),
            _ => return None,
        };
        (!value.is_null()).then_some(value)
    }
}

impl ActionTarget for Product {
    fn apply_action(&mut self, action: ActionKind) -> bool {
        match action {
            ActionKind::ToggleStatus => {
                self.status = if self.is_active() { "inactive" } else { "active" }.to_string();
                true
            }
            _ => false,
        }
    }

    fn duplicated(&self) -> Option<Self> {
        Some(Self {
            id: Uuid::new_v4().to_string(),
            name: format!("{} (copy)", self.name),
            sku: self.sku.as_ref().map(|sku| format!("{sku}-COPY")),
            status: "inactive".to_string(),
            created_at: Some(Utc::now()),
            ..self.clone()
        })
    }
}

/// Product as the backend sends it
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    #[serde(alias = "_id")]
    id: RawId,
    #[serde(default, alias = "title", deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    sku: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    price: Option<RawNumber>,
    #[serde(default, alias = "countInStock", deserialize_with = "lenient")]
    stock: Option<RawStock>,
    #[serde(default, deserialize_with = "lenient")]
    status: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    category: Option<RawRef>,
    #[serde(default, deserialize_with = "lenient")]
    rating: Option<RawNumber>,
    #[serde(default, alias = "created_at", deserialize_with = "lenient")]
    created_at: Option<DateTime<Utc>>,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        Self {
            id: raw.id.into(),
            name: raw.name.unwrap_or_default(),
            sku: raw.sku,
            price: raw.price.as_ref().and_then(RawNumber::value),
            stock: raw.stock.as_ref().and_then(RawStock::quantity),
            status: raw.status.unwrap_or_else(|| "active".to_string()),
            category: raw.category.as_ref().and_then(RawRef::label),
            rating: raw.rating.as_ref().and_then(RawNumber::value),
            created_at: raw.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalises_backend_shapes() {
        let product: Product = serde_json::from_value(json!({
            "_id": "64f1",
            "name": "Desk Lamp",
            "price": "19.99",
            "stock": {"quantity": 4},
            "category": {"_id": "c1", "name": "Lighting"},
            "createdAt": "2024-05-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(product.id, "64f1");
        assert_eq!(product.price, Some(19.99));
        assert_eq!(product.stock, Some(4));
        assert_eq!(product.category.as_deref(), Some("Lighting"));
        assert_eq!(product.status, "active");
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_wrong_typed_fields_become_absent() {
        let product: Product = serde_json::from_value(json!({
            "id": 3,
            "name": "Mystery",
            "price": {"amount": 5},
            "createdAt": "last tuesday",
            "rating": null
        }))
        .unwrap();

        assert_eq!(product.id, "3");
        assert_eq!(product.price, None);
        assert_eq!(product.created_at, None);
        assert_eq!(product.field_value("price"), None);
        assert_eq!(product.field_value("rating"), None);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        assert!(serde_json::from_value::<Product>(json!({"name": "nameless"})).is_err());
    }

    #[test]
    fn test_field_value_accepts_camel_case() {
        let product = Product::new("p", "Chair");
        assert_eq!(product.field_value("name"), Some(FieldValue::from("Chair")));
        assert_eq!(product.field_value("createdAt"), None);
        assert_eq!(product.field_value("color"), None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Product::new("p", "Chair").with_price(5.0)).unwrap();
        assert_eq!(json["createdAt"], serde_json::Value::Null);
        assert_eq!(json["price"], 5.0);
    }

    #[test]
    fn test_toggle_status_and_duplicate() {
        let mut product = Product::new("p", "Chair");
        assert!(product.apply_action(ActionKind::ToggleStatus));
        assert_eq!(product.status, "inactive");
        assert!(!product.apply_action(ActionKind::Approve));

        let copy = product.duplicated().unwrap();
        assert_ne!(copy.id, product.id);
        assert_eq!(copy.name, "Chair (copy)");
    }
}
