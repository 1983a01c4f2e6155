//! Mutation collaborators and the runner that keeps the list consistent

use crate::core::error::{ActionError, ListViewError};
use crate::core::item::ListItem;
use crate::core::notify::{Notification, Notifier};
use crate::core::source::SourceAdapter;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Domain actions a list row can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Approve,
    Reject,
    Delete,
    Duplicate,
    ToggleStatus,
    AddToCart,
    RemoveFromWishlist,
}

impl ActionKind {
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Approve,
        ActionKind::Reject,
        ActionKind::Delete,
        ActionKind::Duplicate,
        ActionKind::ToggleStatus,
        ActionKind::AddToCart,
        ActionKind::RemoveFromWishlist,
    ];

    /// Route segment / wire name
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Approve => "approve",
            ActionKind::Reject => "reject",
            ActionKind::Delete => "delete",
            ActionKind::Duplicate => "duplicate",
            ActionKind::ToggleStatus => "toggle-status",
            ActionKind::AddToCart => "add-to-cart",
            ActionKind::RemoveFromWishlist => "remove-from-wishlist",
        }
    }

    /// Verb phrase for notifications
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Approve => "approve",
            ActionKind::Reject => "reject",
            ActionKind::Delete => "delete",
            ActionKind::Duplicate => "duplicate",
            ActionKind::ToggleStatus => "change the status of",
            ActionKind::AddToCart => "add to cart",
            ActionKind::RemoveFromWishlist => "remove from wishlist",
        }
    }

    /// Whether success means the item leaves the list
    pub fn removes_item(self) -> bool {
        matches!(self, ActionKind::Delete | ActionKind::RemoveFromWishlist)
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ActionError::Unknown {
                action: s.to_string(),
            })
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service trait for mutations on list items
///
/// The list view only knows the signature; what an action does lives with
/// the implementation (usually a REST call).
#[async_trait]
pub trait ItemActions: Send + Sync {
    /// Perform an action on the item with the given id
    async fn perform(&self, action: ActionKind, id: &str) -> Result<()>;

    /// Whether this collaborator handles the action at all
    fn supports(&self, _action: ActionKind) -> bool {
        true
    }
}

/// Local application of actions, for sources that hold their items in memory
pub trait ActionTarget: ListItem {
    /// Apply an in-place action; `false` if the action does not apply
    fn apply_action(&mut self, action: ActionKind) -> bool;

    /// A copy with a fresh id, `None` if the item cannot be duplicated
    fn duplicated(&self) -> Option<Self> {
        None
    }
}

/// How the list is updated after a successful action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdatePolicy {
    /// Refetch the whole list
    #[default]
    Refetch,
    /// Splice removed items out locally; refetch for everything else
    Optimistic,
}

/// Runs actions and keeps the source and the user informed
///
/// A failed action leaves the source untouched and produces an error
/// notification. The list only changes after the action succeeded.
pub struct ActionRunner<T: ListItem> {
    source: Arc<SourceAdapter<T>>,
    actions: Arc<dyn ItemActions>,
    notifier: Arc<dyn Notifier>,
    policy: UpdatePolicy,
}

impl<T: ListItem> ActionRunner<T> {
    pub fn new(
        source: Arc<SourceAdapter<T>>,
        actions: Arc<dyn ItemActions>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            source,
            actions,
            notifier,
            policy: UpdatePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UpdatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn source(&self) -> &Arc<SourceAdapter<T>> {
        &self.source
    }

    /// Perform `action` on item `id`
    pub async fn run(&self, action: ActionKind, id: &str) -> Result<(), ListViewError> {
        if !self.actions.supports(action) {
            self.notifier.notify(Notification::warning(format!(
                "Cannot {} this item here",
                action.label()
            )));
            return Err(ActionError::Unsupported {
                action: action.to_string(),
            }
            .into());
        }

        if let Err(e) = self.actions.perform(action, id).await {
            tracing::warn!(%action, id, error = %e, "action failed");
            self.notifier.notify(Notification::error(format!(
                "Could not {} item: {}",
                action.label(),
                e
            )));
            return Err(ActionError::Failed {
                action: action.to_string(),
                id: id.to_string(),
                message: e.to_string(),
            }
            .into());
        }

        tracing::debug!(%action, id, "action applied");
        self.notifier.notify(Notification::success(success_message(action)));

        if self.policy == UpdatePolicy::Optimistic && action.removes_item() {
            self.source.remove_optimistic(id)?;
        } else if let Err(e) = self.source.refetch().await {
            // the refetch error is already recorded in the source snapshot
            tracing::debug!(error = %e, "refetch after action failed");
        }
        Ok(())
    }
}

fn success_message(action: ActionKind) -> &'static str {
    match action {
        ActionKind::Approve => "Review approved",
        ActionKind::Reject => "Review rejected",
        ActionKind::Delete => "Item deleted",
        ActionKind::Duplicate => "Item duplicated",
        ActionKind::ToggleStatus => "Status updated",
        ActionKind::AddToCart => "Added to cart",
        ActionKind::RemoveFromWishlist => "Removed from wishlist",
    }
}
