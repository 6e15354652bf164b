//! The menu node model.
//!
//! A [`MenuNode`] is one entry in the command tree: a command, a divider, or
//! a submenu container. Nodes are built once with the `with_*` builder
//! methods and are immutable afterwards; trees share nodes through `Arc` so
//! that a node reference handed to the UI stays valid and identity-comparable.
//!
//! # Example
//!
//! ```
//! use horizon_shell_core::node::{ClickAction, MenuNode};
//!
//! let file = MenuNode::new("File")
//!     .with_child(MenuNode::new("New").with_id("file.new"))
//!     .with_child(MenuNode::divider())
//!     .with_child(
//!         MenuNode::new("Save")
//!             .with_id("file.save")
//!             .with_icon("save-icon")
//!             .with_click(ClickAction::from_fn(|| Ok(()))),
//!     );
//!
//! assert_eq!(file.children().len(), 3);
//! assert!(file.children()[1].is_divider());
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use static_assertions::assert_impl_all;

use crate::error::ActionResult;
use crate::shortcut::ShortcutRef;

// ============================================================================
// Click Action
// ============================================================================

type ClickFn = dyn Fn() -> BoxFuture<'static, ActionResult> + Send + Sync;

/// A zero-argument, possibly asynchronous command attached to a menu entry.
///
/// Cloning is cheap; clones share the same underlying closure.
#[derive(Clone)]
pub struct ClickAction {
    run: Arc<ClickFn>,
}

impl ClickAction {
    /// Create an action from an async closure.
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ActionResult> + Send + 'static,
    {
        Self {
            run: Arc::new(move || action().boxed()),
        }
    }

    /// Create an action from a synchronous closure.
    pub fn from_fn<F>(action: F) -> Self
    where
        F: Fn() -> ActionResult + Send + Sync + 'static,
    {
        Self {
            run: Arc::new(move || futures_util::future::ready(action()).boxed()),
        }
    }

    /// Start the action. The returned future completes when the action does.
    pub fn invoke(&self) -> BoxFuture<'static, ActionResult> {
        (self.run)()
    }
}

impl fmt::Debug for ClickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClickAction(..)")
    }
}

// ============================================================================
// Menu Action
// ============================================================================

/// What happens when a menu entry is executed.
///
/// Modelling this as a sum type means an entry can never carry both a click
/// action and a shortcut reference.
#[derive(Clone, Debug, Default)]
pub enum MenuAction {
    /// Display-only entry (dividers, submenu containers, inert items).
    #[default]
    None,
    /// Run a click action and await it.
    Click(ClickAction),
    /// Delegate to the shortcut gateway.
    Shortcut(ShortcutRef),
}

impl MenuAction {
    /// Build a shortcut action from an optional lookup result.
    ///
    /// A missing shortcut yields [`MenuAction::None`], which leaves the entry
    /// inert rather than failing the menu build.
    pub fn from_shortcut(shortcut: Option<ShortcutRef>) -> Self {
        shortcut.map_or(MenuAction::None, MenuAction::Shortcut)
    }

    /// Check if this is [`MenuAction::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, MenuAction::None)
    }
}

// ============================================================================
// Menu Node
// ============================================================================

/// One entry in the command tree.
pub struct MenuNode {
    id: Option<String>,
    text: Option<String>,
    icon: Option<String>,
    help_text: Option<String>,
    action: MenuAction,
    is_divider: bool,
    children: Vec<Arc<MenuNode>>,
}

impl MenuNode {
    /// Create a new entry with the given display text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: Some(text.into()),
            icon: None,
            help_text: None,
            action: MenuAction::None,
            is_divider: false,
            children: Vec::new(),
        }
    }

    /// Create a divider (a purely visual separator).
    pub fn divider() -> Self {
        Self {
            id: None,
            text: None,
            icon: None,
            help_text: None,
            action: MenuAction::None,
            is_divider: true,
            children: Vec::new(),
        }
    }

    /// Create a submenu container with the given children.
    pub fn submenu<I, N>(text: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Arc<MenuNode>>,
    {
        Self::new(text).with_children(children)
    }

    // =========================================================================
    // Builder Pattern
    // =========================================================================

    /// Set the stable identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the icon token.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the help text (e.g. a key combination shown next to the label).
    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Attach a click action, replacing any previous action.
    pub fn with_click(mut self, action: ClickAction) -> Self {
        self.action = MenuAction::Click(action);
        self
    }

    /// Attach a shortcut reference, replacing any previous action.
    pub fn with_shortcut(mut self, shortcut: ShortcutRef) -> Self {
        self.action = MenuAction::Shortcut(shortcut);
        self
    }

    /// Set the action directly.
    pub fn with_action(mut self, action: MenuAction) -> Self {
        self.action = action;
        self
    }

    /// Append a child entry.
    pub fn with_child(mut self, child: impl Into<Arc<MenuNode>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several child entries.
    pub fn with_children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Arc<MenuNode>>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The stable identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The display label. `None` for dividers.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The icon token, if any.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// The help text, if any.
    pub fn help_text(&self) -> Option<&str> {
        self.help_text.as_deref()
    }

    /// The hint a UI shows next to the label: explicit help text, or the
    /// key sequence of the bound shortcut.
    pub fn display_hint(&self) -> Option<String> {
        match (&self.help_text, &self.action) {
            (Some(help), _) => Some(help.clone()),
            (None, MenuAction::Shortcut(shortcut)) => shortcut.help_text(),
            _ => None,
        }
    }

    /// The action run when this entry is executed.
    pub fn action(&self) -> &MenuAction {
        &self.action
    }

    /// The click action, if this entry has one.
    pub fn click_action(&self) -> Option<&ClickAction> {
        match &self.action {
            MenuAction::Click(action) => Some(action),
            _ => None,
        }
    }

    /// The shortcut reference, if this entry has one.
    pub fn shortcut_ref(&self) -> Option<&ShortcutRef> {
        match &self.action {
            MenuAction::Shortcut(shortcut) => Some(shortcut),
            _ => None,
        }
    }

    /// Check if this entry is a divider.
    pub fn is_divider(&self) -> bool {
        self.is_divider
    }

    /// Check if this entry has children.
    pub fn is_submenu(&self) -> bool {
        !self.children.is_empty()
    }

    /// The child entries, in display order.
    pub fn children(&self) -> &[Arc<MenuNode>] {
        &self.children
    }
}

impl fmt::Debug for MenuNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bare = self.id.is_none()
            && self.text.is_none()
            && self.icon.is_none()
            && self.help_text.is_none()
            && self.action.is_none()
            && self.children.is_empty();
        if self.is_divider && bare {
            return f.write_str("MenuNode::Divider");
        }
        f.debug_struct("MenuNode")
            .field("is_divider", &self.is_divider)
            .field("id", &self.id)
            .field("text", &self.text)
            .field("icon", &self.icon)
            .field("help_text", &self.help_text)
            .field("action", &self.action)
            .field("children", &self.children)
            .finish()
    }
}

assert_impl_all!(MenuNode: Send, Sync);
assert_impl_all!(ClickAction: Send, Sync);
