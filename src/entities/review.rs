//! Product reviews awaiting moderation

use super::{RawId, RawNumber, RawRef, lenient};
use crate::core::actions::{ActionKind, ActionTarget};
use crate::core::field::FieldValue;
use crate::core::item::{ListItem, snake_case};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ReviewStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::Approved => "approved",
            ReviewStatus::Rejected => "rejected",
        }
    }

    /// Unknown values read as pending
    fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "approved" => ReviewStatus::Approved,
            "rejected" => ReviewStatus::Rejected,
            _ => ReviewStatus::Pending,
        }
    }
}

/// A customer review of a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawReview")]
pub struct Review {
    pub id: String,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub user_name: Option<String>,
    pub comment: String,
    pub rating: Option<f64>,
    pub status: ReviewStatus,
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn new(id: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            product_id: None,
            product_name: None,
            user_name: None,
            comment: comment.into(),
            rating: None,
            status: ReviewStatus::Pending,
            created_at: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_user(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }
}

impl ListItem for Review {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match snake_case(field).as_str() {
            "id" | "_id" => FieldValue::String(self.id.clone()),
            "product_id" => self.product_id.clone().into(),
            "product_name" => self.product_name.clone().into(),
            "user_name" => self.user_name.clone().into(),
            "comment" => FieldValue::String(self.comment.clone()),
            "rating" => self.rating.into(),
            "status" => FieldValue::from(self.status.as_str()),
            "created_at" => self.created_at.map_or(FieldValue::Null, FieldValue::DateTime),
            _ => return None,
        };
        (!value.is_null()).then_some(value)
    }
}

impl ActionTarget for Review {
    fn apply_action(&mut self, action: ActionKind) -> bool {
        match action {
            ActionKind::Approve => self.status = ReviewStatus::Approved,
            ActionKind::Reject => self.status = ReviewStatus::Rejected,
            _ => return false,
        }
        true
    }
}

/// Review as the backend sends it
///
/// `product` and `user` may be bare ids or populated objects; flat
/// `productName` / `userName` fields win when present.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReview {
    #[serde(alias = "_id")]
    id: RawId,
    #[serde(default, deserialize_with = "lenient")]
    product: Option<RawRef>,
    #[serde(default, deserialize_with = "lenient")]
    product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    user: Option<RawRef>,
    #[serde(default, deserialize_with = "lenient")]
    user_name: Option<String>,
    #[serde(default, alias = "text", deserialize_with = "lenient")]
    comment: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    rating: Option<RawNumber>,
    #[serde(default, deserialize_with = "lenient")]
    status: Option<String>,
    #[serde(default, alias = "created_at", deserialize_with = "lenient")]
    created_at: Option<DateTime<Utc>>,
}

impl From<RawReview> for Review {
    fn from(raw: RawReview) -> Self {
        let product_name = raw.product_name.or_else(|| match &raw.product {
            Some(RawRef::Object { name, .. }) => name.clone(),
            _ => None,
        });
        let user_name = raw
            .user_name
            .or_else(|| raw.user.as_ref().and_then(RawRef::label));

        Self {
            id: raw.id.into(),
            product_id: raw.product.as_ref().and_then(RawRef::id),
            product_name,
            user_name,
            comment: raw.comment.unwrap_or_default(),
            rating: raw.rating.as_ref().and_then(RawNumber::value),
            status: raw
                .status
                .as_deref()
                .map(ReviewStatus::parse_lenient)
                .unwrap_or_default(),
            created_at: raw.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_populated_references() {
        let review: Review = serde_json::from_value(json!({
            "_id": "r1",
            "product": {"_id": "p9", "name": "Desk Lamp"},
            "user": {"name": "Ada"},
            "comment": "Bright!",
            "rating": 5,
            "status": "APPROVED"
        }))
        .unwrap();

        assert_eq!(review.product_id.as_deref(), Some("p9"));
        assert_eq!(review.product_name.as_deref(), Some("Desk Lamp"));
        assert_eq!(review.user_name.as_deref(), Some("Ada"));
        assert_eq!(review.rating, Some(5.0));
        assert_eq!(review.status, ReviewStatus::Approved);
    }

    #[test]
    fn test_bare_references_and_flat_names() {
        let review: Review = serde_json::from_value(json!({
            "id": "r2",
            "product": "p9",
            "productName": "Desk Lamp",
            "userName": "Grace",
            "text": "Too dim",
            "status": "archived"
        }))
        .unwrap();

        assert_eq!(review.product_id.as_deref(), Some("p9"));
        assert_eq!(review.product_name.as_deref(), Some("Desk Lamp"));
        assert_eq!(review.user_name.as_deref(), Some("Grace"));
        assert_eq!(review.comment, "Too dim");
        assert_eq!(review.status, ReviewStatus::Pending);
    }

    #[test]
    fn test_status_field_is_text() {
        let review = Review::new("r", "ok");
        assert_eq!(review.field_value("status"), Some(FieldValue::from("pending")));
        assert_eq!(review.field_value("rating"), None);
    }

    #[test]
    fn test_moderation_actions() {
        let mut review = Review::new("r", "ok");
        assert!(review.apply_action(ActionKind::Approve));
        assert_eq!(review.status, ReviewStatus::Approved);
        assert!(review.apply_action(ActionKind::Reject));
        assert_eq!(review.status, ReviewStatus::Rejected);
        assert!(!review.apply_action(ActionKind::AddToCart));
        assert!(review.duplicated().is_none());
    }
}
