//! Horizon Shell - the application shell's main menu.
//!
//! This is the main crate: it re-exports the core menu model from
//! `horizon-shell-core` and adds the pieces an application wires up at start:
//!
//! - [`MenuRegistry`](menu::MenuRegistry): the live top-level sections
//! - [`CommandDispatcher`](menu::CommandDispatcher): run a command by node or id
//! - [`ShortcutManager`](shortcut::ShortcutManager): the in-process shortcut gateway
//! - [`MainMenuService`](main_menu::MainMenuService): the built-in File, Edit,
//!   View and Help menu
//! - [`ShellConfig`](config::ShellConfig): key bindings and link settings
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_shell::prelude::*;
//!
//! let registry = Arc::new(MenuRegistry::new());
//! let shortcuts = Arc::new(ShortcutManager::new());
//! let dispatcher = CommandDispatcher::new(registry.clone(), shortcuts);
//!
//! registry.add_item(MenuNode::submenu(
//!     "File",
//!     [MenuNode::new("Exit")
//!         .with_id("file.exit")
//!         .with_click(ClickAction::from_fn(|| Ok(())))],
//! ));
//!
//! let outcome = dispatcher.execute_blocking("file.exit").unwrap();
//! assert_eq!(outcome, DispatchOutcome::Clicked);
//!
//! let outcome = dispatcher.execute_blocking("does.not.exist").unwrap();
//! assert_eq!(outcome, DispatchOutcome::Unresolved);
//! ```

pub use horizon_shell_core::*;

pub mod config;
pub mod main_menu;
pub mod menu;
pub mod prelude;
pub mod services;
pub mod shortcut;
