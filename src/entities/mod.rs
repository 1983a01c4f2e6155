//! Typed storefront records, normalised at the source boundary
//!
//! Backend payloads are inconsistent: ids come as `id` or `_id`, `stock` is a
//! number or `{ "quantity": n }`, `category` is a name or an object, numbers
//! arrive as strings. The raw shapes in this module absorb those variations
//! so the pipeline only ever sees one shape per record type. Fields that fail
//! to parse are dropped to `None` instead of failing the whole record.

pub mod product;
pub mod review;
pub mod wishlist;

pub use product::Product;
pub use review::{Review, ReviewStatus};
pub use wishlist::WishlistEntry;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a field, turning any shape mismatch into `None`
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Identifier sent as a string or a number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Number sent as a number or a numeric string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    pub(crate) fn value(&self) -> Option<f64> {
        let n = match self {
            RawNumber::Number(n) => *n,
            RawNumber::Text(s) => s.trim().parse().ok()?,
        };
        n.is_finite().then_some(n)
    }
}

/// Stock as a plain count or an inventory object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawStock {
    Count(RawNumber),
    Detailed { quantity: RawNumber },
}

impl RawStock {
    pub(crate) fn quantity(&self) -> Option<i64> {
        let n = match self {
            RawStock::Count(n) | RawStock::Detailed { quantity: n } => n.value()?,
        };
        Some(n.round() as i64)
    }
}

/// Reference to another record: a bare id/name or a populated object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawRef {
    Bare(RawId),
    Object {
        #[serde(default, alias = "_id")]
        id: Option<RawId>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl RawRef {
    /// Display label: the name if populated, else the bare value
    pub(crate) fn label(&self) -> Option<String> {
        match self {
            RawRef::Bare(id) => Some(id.clone().into()),
            RawRef::Object { name: Some(name), .. } => Some(name.clone()),
            RawRef::Object { id, .. } => id.clone().map(Into::into),
        }
    }

    /// Identifier if one is present
    pub(crate) fn id(&self) -> Option<String> {
        match self {
            RawRef::Bare(id) | RawRef::Object { id: Some(id), .. } => Some(id.clone().into()),
            RawRef::Object { id: None, .. } => None,
        }
    }
}
