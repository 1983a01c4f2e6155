//! In-memory implementation of DataSource and ItemActions for testing and development

use crate::core::{ActionKind, ActionTarget, DataSource, ItemActions};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory item store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Failures can be injected for the next fetch or for every action.
#[derive(Clone)]
pub struct InMemoryDataSource<T: ActionTarget> {
    items: Arc<RwLock<Vec<T>>>,
    cart: Arc<RwLock<Vec<String>>>,
    fetch_failure: Arc<RwLock<Option<String>>>,
    action_failure: Arc<RwLock<Option<String>>>,
}

impl<T: ActionTarget> InMemoryDataSource<T> {
    /// Create a new in-memory source holding `items`
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            cart: Arc::new(RwLock::new(Vec::new())),
            fetch_failure: Arc::new(RwLock::new(None)),
            action_failure: Arc::new(RwLock::new(None)),
        }
    }

    /// Replace the stored items
    pub fn set_items(&self, items: Vec<T>) -> Result<()> {
        *self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))? = items;
        Ok(())
    }

    /// Current stored items
    pub fn items(&self) -> Result<Vec<T>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(items.clone())
    }

    /// Ids added to the cart, in order
    pub fn cart(&self) -> Result<Vec<String>> {
        let cart = self
            .cart
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(cart.clone())
    }

    /// Make the next fetch fail with `message`
    pub fn fail_next_fetch(&self, message: &str) -> Result<()> {
        *self
            .fetch_failure
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))? =
            Some(message.to_string());
        Ok(())
    }

    /// Make every action fail with `message`, or succeed again with `None`
    pub fn fail_actions(&self, message: Option<&str>) -> Result<()> {
        *self
            .action_failure
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))? =
            message.map(str::to_string);
        Ok(())
    }

    fn position(items: &[T], id: &str) -> Result<usize> {
        items
            .iter()
            .position(|item| item.item_id() == id)
            .ok_or_else(|| anyhow!("Item not found: {}", id))
    }
}

impl<T: ActionTarget> Default for InMemoryDataSource<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl<T: ActionTarget> DataSource<T> for InMemoryDataSource<T> {
    async fn fetch(&self) -> Result<Vec<T>> {
        let failure = self
            .fetch_failure
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
            .take();
        if let Some(message) = failure {
            return Err(anyhow!(message));
        }
        self.items()
    }
}

#[async_trait]
impl<T: ActionTarget> ItemActions for InMemoryDataSource<T> {
    async fn perform(&self, action: ActionKind, id: &str) -> Result<()> {
        let failure = self
            .action_failure
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?
            .clone();
        if let Some(message) = failure {
            return Err(anyhow!(message));
        }

        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        let index = Self::position(&items, id)?;

        match action {
            ActionKind::Delete | ActionKind::RemoveFromWishlist => {
                items.remove(index);
            }
            ActionKind::Duplicate => {
                let copy = items[index]
                    .duplicated()
                    .ok_or_else(|| anyhow!("Item {} cannot be duplicated", id))?;
                items.insert(index + 1, copy);
            }
            ActionKind::AddToCart => {
                self.cart
                    .write()
                    .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?
                    .push(id.to_string());
            }
            ActionKind::Approve | ActionKind::Reject | ActionKind::ToggleStatus => {
                if !items[index].apply_action(action) {
                    return Err(anyhow!("Cannot {} item {}", action, id));
                }
            }
        }
        Ok(())
    }
}
