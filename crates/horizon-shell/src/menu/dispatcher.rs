//! Command resolution and execution.
//!
//! [`CommandDispatcher::execute`] takes either a node the caller already
//! holds or a node id, and runs exactly one thing:
//!
//! 1. the node's click action, awaited, with its error handed back unchanged;
//! 2. otherwise its shortcut, through the [`ShortcutGateway`];
//! 3. otherwise nothing.
//!
//! An id that matches no node is not an error.

use std::fmt;
use std::sync::Arc;

use horizon_shell_core::logging::{span_names, targets};
use horizon_shell_core::{ActionError, MenuAction, MenuNode, ShortcutGateway};
use static_assertions::assert_impl_all;
use tracing::Instrument;

use super::registry::MenuRegistry;

/// What [`CommandDispatcher::execute`] was asked to run.
#[derive(Debug, Clone, Copy)]
pub enum CommandTarget<'a> {
    /// A node reference, used as is.
    Node(&'a Arc<MenuNode>),
    /// A node id, looked up in the registry.
    Id(&'a str),
}

impl<'a> From<&'a Arc<MenuNode>> for CommandTarget<'a> {
    fn from(node: &'a Arc<MenuNode>) -> Self {
        Self::Node(node)
    }
}

impl<'a> From<&'a str> for CommandTarget<'a> {
    fn from(id: &'a str) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a String> for CommandTarget<'a> {
    fn from(id: &'a String) -> Self {
        Self::Id(id)
    }
}

/// Which branch an `execute` call took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The click action ran to completion.
    Clicked,
    /// The shortcut was handed to the gateway.
    ShortcutExecuted,
    /// No node carries the requested id.
    Unresolved,
    /// The node has no action.
    Inert,
}

/// Resolves commands against a [`MenuRegistry`] and runs them.
///
/// The dispatcher keeps no state between calls. Concurrent calls are not
/// serialized, and an in-flight click action is never cancelled.
#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<MenuRegistry>,
    shortcuts: Arc<dyn ShortcutGateway>,
}

impl CommandDispatcher {
    /// Create a dispatcher over `registry`, delegating shortcuts to `shortcuts`.
    pub fn new(registry: Arc<MenuRegistry>, shortcuts: Arc<dyn ShortcutGateway>) -> Self {
        Self {
            registry,
            shortcuts,
        }
    }

    /// The registry ids are resolved against.
    pub fn registry(&self) -> &Arc<MenuRegistry> {
        &self.registry
    }

    /// Resolve `target` to a node.
    ///
    /// A node reference resolves to itself without touching the registry.
    pub fn resolve<'a>(&self, target: impl Into<CommandTarget<'a>>) -> Option<Arc<MenuNode>> {
        match target.into() {
            CommandTarget::Node(node) => Some(node.clone()),
            CommandTarget::Id(id) => self.registry.find_by_id(id),
        }
    }

    /// Execute the command identified by `target`.
    ///
    /// Completes only after the click action (if any) completes. A failing
    /// click action's error is returned exactly as the action produced it.
    pub async fn execute<'a>(
        &self,
        target: impl Into<CommandTarget<'a>>,
    ) -> Result<DispatchOutcome, ActionError> {
        let target = target.into();
        // The registry lock is released here, before anything is awaited.
        let Some(node) = self.resolve(target) else {
            if let CommandTarget::Id(id) = target {
                tracing::debug!(target: targets::DISPATCH, id, "no menu item with this id");
            }
            return Ok(DispatchOutcome::Unresolved);
        };

        match node.action() {
            MenuAction::Click(action) => {
                let span = tracing::debug_span!(
                    target: targets::DISPATCH,
                    span_names::DISPATCH,
                    id = node.id(),
                    text = node.text()
                );
                action.invoke().instrument(span).await?;
                Ok(DispatchOutcome::Clicked)
            }
            MenuAction::Shortcut(shortcut) => {
                tracing::trace!(
                    target: targets::DISPATCH,
                    id = node.id(),
                    shortcut = shortcut.name(),
                    "delegating to shortcut"
                );
                self.shortcuts.execute(shortcut);
                Ok(DispatchOutcome::ShortcutExecuted)
            }
            MenuAction::None => {
                tracing::trace!(target: targets::DISPATCH, id = node.id(), text = node.text(), "menu item is inert");
                Ok(DispatchOutcome::Inert)
            }
        }
    }

    /// Execute on the current thread, blocking until the command completes.
    pub fn execute_blocking<'a>(
        &self,
        target: impl Into<CommandTarget<'a>>,
    ) -> Result<DispatchOutcome, ActionError> {
        pollster::block_on(self.execute(target))
    }
}

impl fmt::Debug for CommandDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

assert_impl_all!(CommandDispatcher: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_shell_core::{ClickAction, Shortcut, ShortcutRef};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingGateway {
        executed: Mutex<Vec<String>>,
    }

    impl ShortcutGateway for RecordingGateway {
        fn get_by_name(&self, _name: &str) -> Option<ShortcutRef> {
            None
        }

        fn execute(&self, shortcut: &ShortcutRef) {
            self.executed.lock().push(shortcut.name().to_string());
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    fn dispatcher(items: Vec<Arc<MenuNode>>) -> (CommandDispatcher, Arc<RecordingGateway>) {
        let gateway = Arc::new(RecordingGateway::default());
        let registry = Arc::new(MenuRegistry::with_items(items));
        (CommandDispatcher::new(registry, gateway.clone()), gateway)
    }

    #[tokio::test]
    async fn test_click_is_awaited_once() {
        let hits = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicBool::new(false));
        let (h, f) = (hits.clone(), finished.clone());
        let node = Arc::new(MenuNode::new("Save").with_click(ClickAction::new(move || {
            let (h, f) = (h.clone(), f.clone());
            async move {
                h.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                f.store(true, Ordering::SeqCst);
                Ok(())
            }
        })));
        let (dispatcher, gateway) = dispatcher(vec![]);

        let outcome = dispatcher.execute(&node).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Clicked);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(finished.load(Ordering::SeqCst));
        assert!(gateway.executed.lock().is_empty());
    }

    #[tokio::test]
    async fn test_click_error_is_returned_unchanged() {
        let node = Arc::new(
            MenuNode::new("Save").with_click(ClickAction::from_fn(|| Err(DiskFull.into()))),
        );
        let (dispatcher, _) = dispatcher(vec![node.clone()]);

        let err = dispatcher.execute(&node).await.unwrap_err();
        assert!(err.downcast_ref::<DiskFull>().is_some());
        assert_eq!(err.to_string(), "disk full");
    }

    #[tokio::test]
    async fn test_shortcut_path() {
        let s1: ShortcutRef = Arc::new(Shortcut::new("S1", None));
        let node = Arc::new(MenuNode::new("New").with_shortcut(s1));
        let (dispatcher, gateway) = dispatcher(vec![]);

        let outcome = dispatcher.execute(&node).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::ShortcutExecuted);
        assert_eq!(*gateway.executed.lock(), ["S1"]);
    }

    #[tokio::test]
    async fn test_execute_by_id_searches_nested() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let file = Arc::new(MenuNode::submenu(
            "File",
            [MenuNode::new("Exit").with_id("file.exit").with_click(ClickAction::from_fn(
                move || {
                    h.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                },
            ))],
        ));
        let (dispatcher, _) = dispatcher(vec![file]);

        let outcome = dispatcher.execute("file.exit").await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Clicked);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_id_is_silent() {
        let (dispatcher, gateway) = dispatcher(vec![Arc::new(MenuNode::new("File"))]);

        let outcome = dispatcher.execute("does.not.exist").await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Unresolved);
        assert!(gateway.executed.lock().is_empty());
    }

    #[tokio::test]
    async fn test_inert_node() {
        let zoom = Arc::new(MenuNode::new("Zoom In").with_help_text("Ctrl + +"));
        let (dispatcher, gateway) = dispatcher(vec![]);

        assert_eq!(dispatcher.execute(&zoom).await.unwrap(), DispatchOutcome::Inert);
        assert!(gateway.executed.lock().is_empty());
    }

    #[tokio::test]
    async fn test_node_reference_bypasses_registry() {
        // The node is not in the registry at all.
        let s1: ShortcutRef = Arc::new(Shortcut::new("S1", None));
        let detached = Arc::new(MenuNode::new("Detached").with_id("x").with_shortcut(s1));
        let (dispatcher, gateway) = dispatcher(vec![]);

        assert_eq!(
            dispatcher.execute(&detached).await.unwrap(),
            DispatchOutcome::ShortcutExecuted
        );
        assert_eq!(dispatcher.execute("x").await.unwrap(), DispatchOutcome::Unresolved);
        assert_eq!(gateway.executed.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_action_may_mutate_registry() {
        let registry = Arc::new(MenuRegistry::new());
        let gateway: Arc<dyn ShortcutGateway> = Arc::new(RecordingGateway::default());
        let inner = registry.clone();
        registry.add_item(
            MenuNode::new("Add Tools")
                .with_id("add.tools")
                .with_click(ClickAction::from_fn(move || {
                    inner.add_item(MenuNode::new("Tools"));
                    Ok(())
                })),
        );
        let dispatcher = CommandDispatcher::new(registry.clone(), gateway);

        dispatcher.execute("add.tools").await.unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_execute_while_iterating_items() {
        let registry = Arc::new(MenuRegistry::new());
        let gateway: Arc<dyn ShortcutGateway> = Arc::new(RecordingGateway::default());
        for text in ["Window", "Tools"] {
            let inner = registry.clone();
            registry.add_item(MenuNode::new(text).with_click(ClickAction::from_fn(move || {
                inner.add_item(MenuNode::new("Extra"));
                Ok(())
            })));
        }
        let dispatcher = CommandDispatcher::new(registry.clone(), gateway);

        for node in registry.items().iter() {
            assert_eq!(dispatcher.execute(node).await.unwrap(), DispatchOutcome::Clicked);
        }
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_execute_blocking() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let node = Arc::new(MenuNode::new("Undo").with_id("edit.undo").with_click(
            ClickAction::from_fn(move || {
                h.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ));
        let (dispatcher, _) = dispatcher(vec![node]);
        let id = String::from("edit.undo");

        assert_eq!(dispatcher.execute_blocking(&id).unwrap(), DispatchOutcome::Clicked);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
