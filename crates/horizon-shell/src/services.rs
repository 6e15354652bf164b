//! Capabilities the main menu reaches for when a command runs.
//!
//! The menu itself never defines what a command does. Each entry's click
//! action calls into one of these narrow services, which the host application
//! implements and hands over as a [`ShellServices`] bundle.

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use horizon_shell_core::{ActionError, ActionResult, ShortcutGateway};
use static_assertions::assert_impl_all;

/// Control over the main application window.
pub trait WindowService: Send + Sync {
    /// Show or hide the developer tools.
    fn toggle_developer_tools(&self) -> ActionResult;

    /// Enter or leave full-screen mode.
    fn toggle_full_screen(&self) -> ActionResult;

    /// Close the window.
    fn close(&self) -> ActionResult;
}

/// Access to the settings window.
pub trait SettingsService: Send + Sync {
    /// Open the settings window, optionally at a named tab.
    fn open_settings_window(&self, tab: Option<String>) -> BoxFuture<'static, ActionResult>;
}

/// Dialogs the menu can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Dialog {
    /// The "check for updates" dialog.
    AppUpdate,
}

/// Opens and closes application dialogs.
pub trait DialogService: Send + Sync {
    /// Open `dialog` if it is closed, close it otherwise.
    fn toggle(&self, dialog: Dialog) -> BoxFuture<'static, ActionResult>;
}

/// Forwards commands to the active text editor.
pub trait TextEditorService: Send + Sync {
    /// Trigger an editor command such as `"undo"` or
    /// `"editor.action.commentLine"`.
    ///
    /// Implementations do nothing when no editor is active.
    fn trigger(&self, command: &str) -> ActionResult;
}

/// Opens external links.
pub trait LinkOpener: Send + Sync {
    /// Open `url` outside the application.
    fn open_url(&self, url: &str) -> ActionResult;
}

/// Error returned when the system cannot open a link.
#[derive(Debug, thiserror::Error)]
#[error("failed to open '{url}': {message}")]
pub struct LinkOpenError {
    /// The URL that was requested.
    pub url: String,
    /// Description of the failure.
    pub message: String,
}

/// [`LinkOpener`] backed by the system's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open_url(&self, url: &str) -> ActionResult {
        tracing::debug!(target: horizon_shell_core::logging::targets::DISPATCH, url, "opening link");
        open::that(url).map_err(|e| {
            ActionError::from(LinkOpenError {
                url: url.to_string(),
                message: e.to_string(),
            })
        })
    }
}

/// Every collaborator the built-in main menu needs.
#[derive(Clone)]
pub struct ShellServices {
    /// Shortcut lookup and execution.
    pub shortcuts: Arc<dyn ShortcutGateway>,
    /// Window control.
    pub window: Arc<dyn WindowService>,
    /// Settings window.
    pub settings: Arc<dyn SettingsService>,
    /// Dialogs.
    pub dialogs: Arc<dyn DialogService>,
    /// Active text editor.
    pub editor: Arc<dyn TextEditorService>,
    /// External links.
    pub links: Arc<dyn LinkOpener>,
}

impl ShellServices {
    /// Bundle the given services. Links open in the system browser.
    pub fn new(
        shortcuts: Arc<dyn ShortcutGateway>,
        window: Arc<dyn WindowService>,
        settings: Arc<dyn SettingsService>,
        dialogs: Arc<dyn DialogService>,
        editor: Arc<dyn TextEditorService>,
    ) -> Self {
        Self {
            shortcuts,
            window,
            settings,
            dialogs,
            editor,
            links: Arc::new(SystemLinkOpener),
        }
    }

    /// Replace the link opener.
    pub fn with_link_opener(mut self, links: Arc<dyn LinkOpener>) -> Self {
        self.links = links;
        self
    }
}

impl fmt::Debug for ShellServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellServices").finish_non_exhaustive()
    }
}

assert_impl_all!(ShellServices: Send, Sync);
assert_impl_all!(SystemLinkOpener: Send, Sync);
