//! The application's built-in main menu.
//!
//! [`build_main_menu`] produces the File, Edit, View and Help sections.
//! [`MainMenuService`] wraps them in a registry and a dispatcher and is what
//! the title bar talks to.
//!
//! Entries that refer to a named shortcut resolve it once, here. A name the
//! gateway does not know leaves the entry inert and logs a warning.

use std::sync::Arc;

use horizon_shell_core::logging::{span_names, targets};
use horizon_shell_core::{
    ActionError, ClickAction, MenuAction, MenuError, MenuNode, validate_forest, walker,
};

use crate::config::ShellConfig;
use crate::menu::{CommandDispatcher, CommandTarget, DispatchOutcome, MenuItems, MenuRegistry};
use crate::services::{Dialog, ShellServices};

// ============================================================================
// Editor Commands
// ============================================================================

/// An "Edit" entry that forwards to a text editor command.
struct EditorCommand {
    id: &'static str,
    text: &'static str,
    icon: Option<&'static str>,
    command: &'static str,
    help_text: Option<&'static str>,
}

const fn editor(
    id: &'static str,
    text: &'static str,
    icon: Option<&'static str>,
    command: &'static str,
    help_text: Option<&'static str>,
) -> EditorCommand {
    EditorCommand {
        id,
        text,
        icon,
        command,
        help_text,
    }
}

/// The "Edit" section, as groups separated by dividers.
const EDIT_GROUPS: &[&[EditorCommand]] = &[
    &[
        editor("edit.undo", "Undo", Some("undo-icon"), "undo", Some("Ctrl + Z")),
        editor("edit.redo", "Redo", Some("redo-icon"), "redo", Some("Ctrl + Shift + Z")),
    ],
    &[
        editor("edit.cut", "Cut", Some("cut-icon"), "editor.action.clipboardCutAction", None),
        editor("edit.copy", "Copy", Some("copy-icon"), "editor.action.clipboardCopyAction", None),
        editor("edit.delete", "Delete", Some("backspace-icon"), "deleteRight", None),
    ],
    &[editor("edit.selectAll", "Select All", None, "editor.action.selectAll", None)],
    &[
        editor("edit.find", "Find", Some("search-icon"), "actions.findWithSelection", Some("Ctrl + F")),
        editor("edit.replace", "Replace", None, "editor.action.startFindReplaceAction", Some("Ctrl + H")),
    ],
    &[
        editor(
            "edit.transform1",
            "Transform to Upper/Lower Case",
            None,
            "netpad.action.transformToUpperOrLowercase",
            Some("Ctrl + Shift + Y"),
        ),
        editor("edit.transform2", "Transform to Upper Case", None, "editor.action.transformToUppercase", None),
        editor("edit.transform3", "Transform to Lower Case", None, "editor.action.transformToLowercase", None),
        editor("edit.transform4", "Transform to Title Case", None, "editor.action.transformToTitlecase", None),
        editor("edit.transform5", "Transform to Kebab Case", None, "editor.action.transformToKebabcase", None),
        editor("edit.transform6", "Transform to Snake Case", None, "editor.action.transformToSnakecase", None),
    ],
    &[
        editor(
            "edit.toggleLineComment",
            "Toggle Line Comment",
            None,
            "editor.action.commentLine",
            Some("Ctrl + /"),
        ),
        editor(
            "edit.toggleBlockComment",
            "Toggle Block Comment",
            None,
            "editor.action.blockComment",
            Some("Ctrl + Shift + A"),
        ),
    ],
];

// ============================================================================
// Builder
// ============================================================================

/// Build the File, Edit, View and Help sections.
pub fn build_main_menu(services: &ShellServices, config: &ShellConfig) -> Vec<Arc<MenuNode>> {
    let span = tracing::debug_span!(target: targets::MENU_BUILD, span_names::MENU_BUILD);
    let _guard = span.enter();

    let builder = MainMenuBuilder { services, config };
    vec![
        Arc::new(builder.file_menu()),
        Arc::new(builder.edit_menu()),
        Arc::new(builder.view_menu()),
        Arc::new(builder.help_menu()),
    ]
}

struct MainMenuBuilder<'a> {
    services: &'a ShellServices,
    config: &'a ShellConfig,
}

impl MainMenuBuilder<'_> {
    fn file_menu(&self) -> MenuNode {
        let window = self.services.window.clone();
        MenuNode::submenu(
            "File",
            [
                self.shortcut_entry("file.new", "New", "New").with_icon("add-script-icon"),
                self.shortcut_entry("file.goToScript", "Go to Script", "Go to Script"),
                MenuNode::divider(),
                self.shortcut_entry("file.save", "Save", "Save").with_icon("save-icon"),
                self.shortcut_entry("file.saveAll", "Save All", "Save All").with_icon("save-icon"),
                self.shortcut_entry("file.properties", "Properties", "Script Properties")
                    .with_icon("properties-icon"),
                self.shortcut_entry("file.close", "Close", "Close").with_icon("close-icon"),
                MenuNode::divider(),
                self.shortcut_entry("file.settings", "Settings", "Settings").with_icon("settings-icon"),
                MenuNode::new("Exit")
                    .with_id("file.exit")
                    .with_click(ClickAction::from_fn(move || window.close())),
            ],
        )
    }

    fn edit_menu(&self) -> MenuNode {
        let mut menu = MenuNode::new("Edit");
        for (i, group) in EDIT_GROUPS.iter().enumerate() {
            if i > 0 {
                menu = menu.with_child(MenuNode::divider());
            }
            menu = menu.with_children(group.iter().map(|entry| self.editor_entry(entry)));
        }
        menu
    }

    fn view_menu(&self) -> MenuNode {
        let dev_tools = self.services.window.clone();
        let full_screen = self.services.window.clone();
        MenuNode::submenu(
            "View",
            [
                self.shortcut_entry("view.output", "Output", "Output").with_icon("output-icon"),
                self.shortcut_entry("view.explorer", "Explorer", "Explorer").with_icon("explorer-icon"),
                self.shortcut_entry("view.namespaces", "Namespaces", "Namespaces")
                    .with_icon("namespaces-icon"),
                MenuNode::divider(),
                self.shortcut_entry("view.reload", "Reload", "Reload"),
                MenuNode::new("Toggle Developer Tools")
                    .with_id("view.toggleDeveloperTools")
                    .with_help_text("Ctrl + Shift + I")
                    .with_click(ClickAction::from_fn(move || dev_tools.toggle_developer_tools())),
                MenuNode::divider(),
                // Zoom is handled by the host's own key bindings; these only
                // advertise them.
                MenuNode::new("Zoom In")
                    .with_id("view.zoomIn")
                    .with_icon("zoom-in-icon")
                    .with_help_text("Ctrl + +"),
                MenuNode::new("Zoom Out")
                    .with_id("view.zoomOut")
                    .with_icon("zoom-out-icon")
                    .with_help_text("Ctrl + -"),
                MenuNode::new("Reset Zoom")
                    .with_id("view.resetZoom")
                    .with_help_text("Ctrl + 0"),
                MenuNode::new("Toggle Full Screen")
                    .with_id("view.toggleFullScreen")
                    .with_help_text("F11")
                    .with_click(ClickAction::from_fn(move || full_screen.toggle_full_screen())),
            ],
        )
    }

    fn help_menu(&self) -> MenuNode {
        let settings = self.services.settings.clone();
        let about_tab = self.config.about_tab.clone();
        let dialogs = self.services.dialogs.clone();

        MenuNode::submenu(
            "Help",
            [
                MenuNode::new("About")
                    .with_id("help.about")
                    .with_icon("star-icon")
                    .with_click(ClickAction::new(move || {
                        settings.open_settings_window(Some(about_tab.clone()))
                    })),
                MenuNode::new("Check for Updates")
                    .with_id("help.checkForUpdates")
                    .with_icon("app-update-icon")
                    .with_click(ClickAction::new(move || dialogs.toggle(Dialog::AppUpdate))),
                self.link_entry("help.github", "GitHub", &self.config.links.repository_url),
                self.link_entry("help.searchIssues", "Search Issues", &self.config.links.issues_url),
            ],
        )
    }

    /// An entry bound to the shortcut registered under `name`.
    fn shortcut_entry(&self, id: &str, text: &str, name: &str) -> MenuNode {
        let shortcut = self.services.shortcuts.get_by_name(name);
        if shortcut.is_none() {
            tracing::warn!(
                target: targets::MENU_BUILD,
                id,
                shortcut = name,
                "shortcut not registered; menu item will do nothing"
            );
        }
        MenuNode::new(text)
            .with_id(id)
            .with_action(MenuAction::from_shortcut(shortcut))
    }

    fn editor_entry(&self, entry: &EditorCommand) -> MenuNode {
        let editor = self.services.editor.clone();
        let command = entry.command;
        let mut node = MenuNode::new(entry.text)
            .with_id(entry.id)
            .with_click(ClickAction::from_fn(move || editor.trigger(command)));
        if let Some(icon) = entry.icon {
            node = node.with_icon(icon);
        }
        if let Some(help_text) = entry.help_text {
            node = node.with_help_text(help_text);
        }
        node
    }

    fn link_entry(&self, id: &str, text: &str, url: &str) -> MenuNode {
        let links = self.services.links.clone();
        let url = url.to_string();
        MenuNode::new(text)
            .with_id(id)
            .with_icon("github-icon")
            .with_click(ClickAction::from_fn(move || links.open_url(&url)))
    }
}

// ============================================================================
// Main Menu Service
// ============================================================================

/// The main menu as the application sees it: the live sections plus command
/// execution.
#[derive(Debug, Clone)]
pub struct MainMenuService {
    registry: Arc<MenuRegistry>,
    dispatcher: CommandDispatcher,
}

impl MainMenuService {
    /// Build the main menu from `services` and `config`.
    ///
    /// Fails only when `config.validate_on_build` is set and the built menu
    /// has structural problems.
    pub fn new(services: &ShellServices, config: &ShellConfig) -> Result<Self, MenuError> {
        let items = build_main_menu(services, config);
        if config.validate_on_build {
            validate_forest(&items)?;
        }

        tracing::info!(
            target: targets::MENU_BUILD,
            sections = items.len(),
            nodes = walker::count(&items),
            "main menu built"
        );

        let registry = Arc::new(MenuRegistry::with_items(items));
        let dispatcher = CommandDispatcher::new(registry.clone(), services.shortcuts.clone());
        Ok(Self {
            registry,
            dispatcher,
        })
    }

    /// The live top-level sections.
    pub fn items(&self) -> MenuItems {
        self.registry.items()
    }

    /// Append a top-level section.
    pub fn add_item(&self, node: impl Into<Arc<MenuNode>>) -> Arc<MenuNode> {
        self.registry.add_item(node)
    }

    /// Remove a top-level section by identity. Absent nodes are ignored.
    pub fn remove_item(&self, node: &Arc<MenuNode>) -> bool {
        self.registry.remove_item(node)
    }

    /// Run the command for a node or node id.
    pub async fn execute<'a>(
        &self,
        target: impl Into<CommandTarget<'a>>,
    ) -> Result<DispatchOutcome, ActionError> {
        self.dispatcher.execute(target).await
    }

    /// Run the command for a node or node id, blocking the current thread.
    pub fn execute_blocking<'a>(
        &self,
        target: impl Into<CommandTarget<'a>>,
    ) -> Result<DispatchOutcome, ActionError> {
        self.dispatcher.execute_blocking(target)
    }

    /// The registry holding the sections.
    pub fn registry(&self) -> &Arc<MenuRegistry> {
        &self.registry
    }

    /// The dispatcher used by [`execute`](Self::execute).
    pub fn dispatcher(&self) -> &CommandDispatcher {
        &self.dispatcher
    }
}
