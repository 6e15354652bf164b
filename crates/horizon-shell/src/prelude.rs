//! Prelude module for Horizon Shell.
//!
//! ```ignore
//! use horizon_shell::prelude::*;
//! ```
//!
//! This provides access to:
//! - The menu model (`MenuNode`, `ClickAction`, `MenuAction`)
//! - Registry and dispatch (`MenuRegistry`, `CommandDispatcher`)
//! - Shortcuts (`ShortcutManager`, `ShortcutGateway`, `KeySequence`)
//! - The built-in main menu and its collaborators

// ============================================================================
// Menu Model
// ============================================================================

pub use crate::{ActionError, ActionResult, ClickAction, MenuAction, MenuError, MenuNode};
pub use crate::walker;

// ============================================================================
// Registry and Dispatch
// ============================================================================

pub use crate::menu::{CommandDispatcher, CommandTarget, DispatchOutcome, MenuItems, MenuRegistry};

// ============================================================================
// Shortcuts
// ============================================================================

pub use crate::shortcut::ShortcutManager;
pub use crate::{KeySequence, Shortcut, ShortcutGateway, ShortcutRef};

// ============================================================================
// Main Menu
// ============================================================================

pub use crate::config::ShellConfig;
pub use crate::main_menu::{MainMenuService, build_main_menu};
pub use crate::services::{
    Dialog, DialogService, LinkOpener, SettingsService, ShellServices, SystemLinkOpener,
    TextEditorService, WindowService,
};
