//! View configuration loading and management

use crate::core::error::{ConfigError, QueryError};
use crate::core::field::SortKind;
use crate::core::item::snake_case;
use crate::core::paginate::DEFAULT_PAGE_SIZE;
use crate::core::sort::{SortDirection, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A sortable key of a view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortKeyConfig {
    /// Field name (snake_case)
    pub field: String,

    /// How the field's values are compared
    #[serde(default)]
    pub kind: SortKind,
}

/// Configuration for one list view
///
/// Each view supplies its own search fields, equality filters and sort keys
/// to the shared pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// View name, also its route segment (e.g., "products")
    pub name: String,

    /// Fields the free-text search term is matched against
    #[serde(default)]
    pub search_fields: Vec<String>,

    /// Fields accepting equality or range criteria
    #[serde(default)]
    pub filter_fields: Vec<String>,

    /// Keys the view can be sorted by
    #[serde(default)]
    pub sort_keys: Vec<SortKeyConfig>,

    /// Initial sort expression (e.g., "created_at:desc")
    #[serde(default)]
    pub default_sort: Option<String>,

    /// Initial rows per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Upper bound for client-requested page sizes
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_page_size() -> usize {
    100
}

impl ViewConfig {
    /// Create a view with no search, filter or sort keys
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            search_fields: Vec::new(),
            filter_fields: Vec::new(),
            sort_keys: Vec::new(),
            default_sort: None,
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }

    pub fn with_search_fields(mut self, fields: &[&str]) -> Self {
        self.search_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_filter_fields(mut self, fields: &[&str]) -> Self {
        self.filter_fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn with_sort_key(mut self, field: &str, kind: SortKind) -> Self {
        self.sort_keys.push(SortKeyConfig {
            field: field.to_string(),
            kind,
        });
        self
    }

    pub fn with_default_sort(mut self, expr: &str) -> Self {
        self.default_sort = Some(expr.to_string());
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Comparison kind of a sort key, `None` if the key is not sortable
    pub fn sort_kind(&self, key: &str) -> Option<SortKind> {
        let key = snake_case(key);
        self.sort_keys
            .iter()
            .find(|k| snake_case(&k.field) == key)
            .map(|k| k.kind)
    }

    /// Whether a field accepts equality or range criteria
    pub fn is_filterable(&self, field: &str) -> bool {
        let field = snake_case(field);
        self.filter_fields.iter().any(|f| snake_case(f) == field)
    }

    /// Build a sort spec for a key, validating it against the view
    pub fn sort_spec(&self, key: &str, direction: SortDirection) -> Result<SortSpec, QueryError> {
        let kind = self
            .sort_kind(key)
            .ok_or_else(|| QueryError::UnknownSortKey {
                view: self.name.clone(),
                key: key.to_string(),
            })?;
        Ok(SortSpec {
            key: Some(snake_case(key)),
            direction,
            kind,
        })
    }

    /// Parse and validate a `key:direction` sort expression
    pub fn parse_sort(&self, expr: &str) -> Result<SortSpec, QueryError> {
        let (key, direction) = SortSpec::parse_expr(expr)?;
        self.sort_spec(&key, direction)
    }

    /// Initial sort; unsorted when no default is configured
    ///
    /// An invalid default is caught by [`validate`](Self::validate) and
    /// falls back to unsorted here.
    pub fn default_sort_spec(&self) -> SortSpec {
        self.default_sort
            .as_deref()
            .and_then(|expr| self.parse_sort(expr).ok())
            .unwrap_or_default()
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, value: String, message: &str| ConfigError::InvalidValue {
            view: self.name.clone(),
            field: field.to_string(),
            value,
            message: message.to_string(),
        };

        let name_ok = self
            .name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase())
            && self
                .name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !name_ok {
            return Err(invalid(
                "name",
                self.name.clone(),
                "must start with a lowercase letter and contain only [a-z0-9_-]",
            ));
        }

        if self.page_size == 0 {
            return Err(invalid("page_size", "0".to_string(), "must be at least 1"));
        }
        if self.max_page_size < self.page_size {
            return Err(invalid(
                "max_page_size",
                self.max_page_size.to_string(),
                "must not be smaller than page_size",
            ));
        }

        if let Some(expr) = &self.default_sort {
            self.parse_sort(expr)
                .map_err(|e| invalid("default_sort", expr.clone(), &e.to_string()))?;
        }
        Ok(())
    }
}

/// Complete configuration for all list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListViewsConfig {
    /// List of view configurations
    pub views: Vec<ViewConfig>,
}

impl ListViewsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            file: file.clone(),
            message: e.to_string(),
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            file,
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), views = config.views.len(), "view config loaded");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Find a view by name
    pub fn view(&self, name: &str) -> Option<&ViewConfig> {
        self.views.iter().find(|v| v.name == name)
    }

    /// Find a view by name, or fail
    pub fn require_view(&self, name: &str) -> Result<&ViewConfig, ConfigError> {
        self.view(name).ok_or_else(|| ConfigError::UnknownView {
            name: name.to_string(),
        })
    }

    /// Validate every view and reject duplicate names
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for view in &self.views {
            view.validate()?;
            if !seen.insert(view.name.as_str()) {
                return Err(ConfigError::DuplicateView {
                    name: view.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// The storefront's views: admin products, admin reviews and wishlist
    pub fn default_config() -> Self {
        Self {
            views: vec![
                ViewConfig::new("products")
                    .with_search_fields(&["name", "id", "sku"])
                    .with_filter_fields(&["category", "status", "price", "stock"])
                    .with_sort_key("name", SortKind::Text)
                    .with_sort_key("price", SortKind::Numeric)
                    .with_sort_key("stock", SortKind::Numeric)
                    .with_sort_key("created_at", SortKind::Date)
                    .with_default_sort("created_at:desc"),
                ViewConfig::new("reviews")
                    .with_search_fields(&["comment", "user_name", "product_name"])
                    .with_filter_fields(&["status", "rating"])
                    .with_sort_key("created_at", SortKind::Date)
                    .with_sort_key("rating", SortKind::Numeric)
                    .with_default_sort("created_at:desc"),
                ViewConfig::new("wishlist")
                    .with_search_fields(&["name", "category"])
                    .with_filter_fields(&["category"])
                    .with_sort_key("name", SortKind::Text)
                    .with_sort_key("price", SortKind::Numeric)
                    .with_sort_key("added_at", SortKind::Date)
                    .with_default_sort("added_at:desc")
                    .with_page_size(12),
            ],
        }
    }
}
