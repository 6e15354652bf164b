//! Logging and debugging facilities for Horizon Shell.
//!
//! This module provides:
//! - Stable `tracing` targets for every subsystem
//! - Debug visualization for menu forests
//!
//! # Tracing Integration
//!
//! Horizon Shell uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_shell::dispatch=trace")
//!         .init();
//! }
//! ```
//!
//! # Debug Visualization
//!
//! Use [`MenuTreeDebug`] to print the shape of a menu forest:
//!
//! ```
//! use std::sync::Arc;
//! use horizon_shell_core::logging::MenuTreeDebug;
//! use horizon_shell_core::node::MenuNode;
//!
//! let forest = vec![Arc::new(
//!     MenuNode::new("File")
//!         .with_child(MenuNode::new("New").with_id("file.new"))
//!         .with_child(MenuNode::divider()),
//! )];
//! let output = MenuTreeDebug::new().format_forest(&forest);
//! assert!(output.contains("New [file.new]"));
//! ```

use std::fmt::Write as FmtWrite;
use std::ops::ControlFlow;
use std::sync::Arc;

use crate::node::{MenuAction, MenuNode};
use crate::walker;

/// Span names used throughout Horizon Shell for tracing.
pub mod span_names {
    /// Command dispatch span.
    pub const DISPATCH: &str = "horizon_shell::dispatch";
    /// Main menu construction span.
    pub const MENU_BUILD: &str = "horizon_shell::menu_build";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Forest validation target.
    pub const VALIDATE: &str = "horizon_shell_core::validate";
    /// Registry mutation target.
    pub const REGISTRY: &str = "horizon_shell::registry";
    /// Command resolution and execution target.
    pub const DISPATCH: &str = "horizon_shell::dispatch";
    /// Shortcut registration and activation target.
    pub const SHORTCUT: &str = "horizon_shell::shortcut";
    /// Main menu construction target.
    pub const MENU_BUILD: &str = "horizon_shell::menu_build";
    /// Configuration loading target.
    pub const CONFIG: &str = "horizon_shell::config";
}

/// Style options for menu tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for menu tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node ids.
    pub show_ids: bool,
    /// Whether to show what kind of action a node carries.
    pub show_actions: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: true,
            show_actions: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_actions: true,
            ..Default::default()
        }
    }

    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_actions: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing menu forests.
#[derive(Debug, Clone, Default)]
pub struct MenuTreeDebug {
    options: TreeFormatOptions,
}

impl MenuTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format a whole forest, one tree per top-level entry.
    pub fn format_forest(&self, roots: &[Arc<MenuNode>]) -> String {
        let total = walker::count(roots);
        let mut output = String::new();
        let _ = writeln!(output, "Menu Tree ({total} total nodes):");

        if roots.is_empty() {
            output.push_str("  (empty)\n");
        } else {
            let _ = walker::walk_with_position::<(), _>(roots, |node, position| {
                self.format_node_into(node, &position.trail()[1..], &mut output);
                ControlFlow::Continue(())
            });
        }

        output
    }

    /// Format a single subtree.
    pub fn format_subtree(&self, root: &MenuNode) -> String {
        let mut output = String::new();
        self.format_node_into(root, &[], &mut output);
        let _ = walker::walk_with_position::<(), _>(root.children(), |node, position| {
            self.format_node_into(node, position.trail(), &mut output);
            ControlFlow::Continue(())
        });
        output
    }

    /// Write one line. `levels` holds a last-sibling flag for every level
    /// below the root, down to the node itself.
    fn format_node_into(&self, node: &MenuNode, levels: &[bool], output: &mut String) {
        if self.options.max_depth.is_some_and(|max| levels.len() > max) {
            return;
        }

        output.push_str(&self.build_prefix(levels));

        if node.is_divider() {
            output.push_str("---");
        } else {
            output.push_str(node.text().unwrap_or("(untitled)"));
        }

        if self.options.show_ids
            && let Some(id) = node.id()
        {
            let _ = write!(output, " [{id}]");
        }

        if self.options.show_actions {
            match node.action() {
                MenuAction::None => {}
                MenuAction::Click(_) => output.push_str(" (click)"),
                MenuAction::Shortcut(shortcut) => {
                    let _ = write!(output, " (shortcut: {})", shortcut.name());
                }
            }
        }

        output.push('\n');
    }

    /// Build the prefix string for a tree node.
    fn build_prefix(&self, levels: &[bool]) -> String {
        let Some((&is_last, ancestors)) = levels.split_last() else {
            return String::new();
        };

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+-- ", "`-- "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500} ", "\u{2514}\u{2500}\u{2500} "),
            TreeStyle::Compact => ("", "- ", "- "),
        };

        let mut prefix = String::new();
        for &ancestor_is_last in ancestors {
            if ancestor_is_last {
                prefix.extend(std::iter::repeat_n(' ', branch.chars().count()));
            } else {
                prefix.push_str(branch);
            }
            prefix.extend(std::iter::repeat_n(' ', self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ClickAction;
    use crate::shortcut::Shortcut;

    fn forest() -> Vec<Arc<MenuNode>> {
        vec![
            Arc::new(
                MenuNode::new("File")
                    .with_id("file")
                    .with_child(
                        MenuNode::new("New")
                            .with_id("file.new")
                            .with_shortcut(Arc::new(Shortcut::new("New", None))),
                    )
                    .with_child(MenuNode::divider())
                    .with_child(
                        MenuNode::new("Save")
                            .with_id("file.save")
                            .with_click(ClickAction::from_fn(|| Ok(()))),
                    ),
            ),
            Arc::new(MenuNode::new("Help")),
        ]
    }

    #[test]
    fn test_format_empty_forest() {
        let output = MenuTreeDebug::new().format_forest(&[]);
        assert!(output.contains("Menu Tree (0 total nodes)"));
        assert!(output.contains("(empty)"));
    }

    #[test]
    fn test_format_hierarchy() {
        let output = MenuTreeDebug::new().format_forest(&forest());
        assert!(output.contains("Menu Tree (5 total nodes)"));
        assert!(output.contains("File [file]"));
        assert!(output.contains("\u{251c}\u{2500}\u{2500} New [file.new]"));
        assert!(output.contains("\u{2514}\u{2500}\u{2500} Save [file.save]"));
        assert!(output.contains("---"));
    }

    #[test]
    fn test_format_minimal_hides_ids() {
        let debug = MenuTreeDebug::with_options(TreeFormatOptions::minimal());
        let output = debug.format_subtree(&forest()[0]);
        assert!(output.contains("Save"));
        assert!(!output.contains('['));
    }

    #[test]
    fn test_format_detailed_shows_actions() {
        let debug = MenuTreeDebug::with_options(TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::detailed()
        });
        let output = debug.format_subtree(&forest()[0]);
        assert!(output.contains("+-- New [file.new] (shortcut: New)"));
        assert!(output.contains("`-- Save [file.save] (click)"));
    }

    #[test]
    fn test_closed_branches_are_blank() {
        let roots = vec![Arc::new(
            MenuNode::new("View")
                .with_child(MenuNode::new("Panels").with_child(MenuNode::new("Output")))
                .with_child(MenuNode::new("Zoom").with_child(MenuNode::new("Reset"))),
        )];
        let debug = MenuTreeDebug::with_options(TreeFormatOptions {
            style: TreeStyle::Ascii,
            indent_size: 2,
            ..Default::default()
        });
        let output = debug.format_forest(&roots);
        assert!(output.contains("\n+-- Panels\n|  `-- Output\n"));
        assert!(output.contains("\n`-- Zoom\n   `-- Reset\n"));
    }

    #[test]
    fn test_deep_forest() {
        let mut node = MenuNode::new("leaf");
        for i in 0..1_000 {
            node = MenuNode::new(format!("level {i}")).with_child(node);
        }
        let output = MenuTreeDebug::new().format_forest(&[Arc::new(node)]);
        assert_eq!(output.lines().count(), 1_002);
    }

    #[test]
    fn test_max_depth() {
        let debug = MenuTreeDebug::with_options(TreeFormatOptions {
            max_depth: Some(0),
            ..Default::default()
        });
        let output = debug.format_subtree(&forest()[0]);
        assert_eq!(output, "File [file]\n");
    }
}
