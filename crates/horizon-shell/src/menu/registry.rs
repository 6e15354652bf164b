//! The live, ordered set of top-level menu sections.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use horizon_shell_core::logging::targets;
use horizon_shell_core::{MenuNode, ValidationError, validate_forest, walker};
use parking_lot::RwLock;
use static_assertions::assert_impl_all;

/// Shared handle to one version of the top-level sequence.
pub type MenuItems = Arc<Vec<Arc<MenuNode>>>;

/// Owner of the top-level menu sequence.
///
/// The registry is the only mutable part of the menu: nodes themselves never
/// change once built. The sequence is copy-on-write. Readers take the current
/// version through [`items`](Self::items) and the lock is released before they
/// look at it, so walks and click actions may freely mutate the registry.
/// A walk never observes a half-applied mutation.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    items: RwLock<MenuItems>,
    generation: AtomicU64,
}

impl MenuRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding `items`, in order.
    pub fn with_items(items: Vec<Arc<MenuNode>>) -> Self {
        Self {
            items: RwLock::new(Arc::new(items)),
            generation: AtomicU64::new(0),
        }
    }

    /// The live top-level sequence.
    ///
    /// This is the registry's current store, shared rather than copied. A
    /// handle held across a mutation keeps the version it was taken from;
    /// call `items` again to see later changes.
    pub fn items(&self) -> MenuItems {
        self.items.read().clone()
    }

    /// Append a top-level entry. No validation is performed.
    ///
    /// Returns the shared handle, which is what [`remove_item`](Self::remove_item)
    /// compares against.
    pub fn add_item(&self, node: impl Into<Arc<MenuNode>>) -> Arc<MenuNode> {
        let node = node.into();
        let mut items = self.items.write();
        let items = Arc::make_mut(&mut items);
        items.push(node.clone());
        self.bump();
        tracing::debug!(
            target: targets::REGISTRY,
            text = node.text(),
            id = node.id(),
            len = items.len(),
            "added top-level menu item"
        );
        node
    }

    /// Remove the first top-level entry that is the very same node as `node`.
    ///
    /// Nodes with equal content but a different identity are left alone.
    /// Returns `false` (and changes nothing) if `node` is not present.
    pub fn remove_item(&self, node: &Arc<MenuNode>) -> bool {
        let mut items = self.items.write();
        let Some(index) = items.iter().position(|item| Arc::ptr_eq(item, node)) else {
            tracing::trace!(target: targets::REGISTRY, text = node.text(), "remove of absent item ignored");
            return false;
        };
        let items = Arc::make_mut(&mut items);
        items.remove(index);
        self.bump();
        tracing::debug!(
            target: targets::REGISTRY,
            text = node.text(),
            index,
            len = items.len(),
            "removed top-level menu item"
        );
        true
    }

    /// Remove the first top-level entry carrying `id`.
    pub fn remove_item_by_id(&self, id: &str) -> Option<Arc<MenuNode>> {
        let mut items = self.items.write();
        let index = items.iter().position(|item| item.id() == Some(id))?;
        let removed = Arc::make_mut(&mut items).remove(index);
        self.bump();
        tracing::debug!(target: targets::REGISTRY, id, index, "removed top-level menu item by id");
        Some(removed)
    }

    /// First node in pre-order, anywhere in the forest, matching `predicate`.
    pub fn find<P>(&self, predicate: P) -> Option<Arc<MenuNode>>
    where
        P: FnMut(&MenuNode) -> bool,
    {
        walker::find(&self.items(), predicate).cloned()
    }

    /// First node in pre-order carrying `id`.
    pub fn find_by_id(&self, id: &str) -> Option<Arc<MenuNode>> {
        walker::find_by_id(&self.items(), id).cloned()
    }

    /// Every node in pre-order matching `predicate`.
    pub fn filter<P>(&self, predicate: P) -> Vec<Arc<MenuNode>>
    where
        P: FnMut(&MenuNode) -> bool,
    {
        let items = self.items();
        walker::filter(&items, predicate)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Check the whole forest for structural problems.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_forest(&self.items())
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Check if there are no top-level entries.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Counter bumped by every successful mutation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }
}

assert_impl_all!(MenuRegistry: Send, Sync);
