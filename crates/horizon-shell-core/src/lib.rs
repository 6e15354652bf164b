//! Core systems for Horizon Shell.
//!
//! This crate provides the foundational pieces of the Horizon Shell menu
//! system:
//!
//! - **Menu Model**: immutable [`MenuNode`] trees shared through `Arc`
//! - **Traversal**: pre-order walks with non-local early exit, plus
//!   [`find`](walker::find) and [`filter`](walker::filter)
//! - **Validation**: structural checks over a whole forest
//! - **Shortcuts**: key sequences, named shortcut bindings, and the
//!   [`ShortcutGateway`] capability
//!
//! The registry, the dispatcher, and the built-in main menu live in the
//! `horizon-shell` crate.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_shell_core::{walker, ClickAction, MenuNode};
//!
//! let forest = vec![
//!     Arc::new(MenuNode::submenu(
//!         "File",
//!         [
//!             MenuNode::new("New").with_id("file.new"),
//!             MenuNode::divider(),
//!             MenuNode::new("Exit")
//!                 .with_id("file.exit")
//!                 .with_click(ClickAction::from_fn(|| Ok(()))),
//!         ],
//!     )),
//!     Arc::new(MenuNode::new("Help").with_id("help")),
//! ];
//!
//! let dividers = walker::filter(&forest, |node| node.is_divider());
//! assert_eq!(dividers.len(), 1);
//!
//! let exit = walker::find_by_id(&forest, "file.exit").unwrap();
//! assert!(exit.click_action().is_some());
//! ```

mod error;
pub mod logging;
pub mod node;
pub mod shortcut;
pub mod validate;
pub mod walker;

pub use error::{ActionError, ActionResult, MenuError, Result, ValidationError, ValidationIssue};
pub use logging::{MenuTreeDebug, TreeFormatOptions, TreeStyle};
pub use node::{ClickAction, MenuAction, MenuNode};
pub use shortcut::{
    Key, KeyCombination, KeySequence, KeySequenceParseError, KeyboardModifiers, Shortcut,
    ShortcutGateway, ShortcutHandler, ShortcutRef,
};
pub use validate::validate_forest;
