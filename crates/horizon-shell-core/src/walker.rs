//! Depth-first traversal over a forest of menu nodes.
//!
//! [`walk`] visits nodes in pre-order: a node before its children, and all of
//! its children before its next sibling. The visitor returns
//! [`ControlFlow::Break`] to stop the *whole* traversal immediately, not just
//! the current subtree. [`find`] and [`filter`] are built on top of it.
//!
//! The walk is iterative: it keeps an explicit stack of sibling iterators, so
//! a break never has to unwind through nested calls.
//!
//! ```
//! use std::sync::Arc;
//! use horizon_shell_core::node::MenuNode;
//! use horizon_shell_core::walker;
//!
//! let forest = vec![
//!     Arc::new(MenuNode::new("File").with_child(MenuNode::new("Save").with_id("file.save"))),
//!     Arc::new(MenuNode::new("Help")),
//! ];
//!
//! let save = walker::find(&forest, |n| n.id() == Some("file.save")).unwrap();
//! assert_eq!(save.text(), Some("Save"));
//! ```

use std::ops::ControlFlow;
use std::slice;
use std::sync::Arc;

use crate::node::MenuNode;

/// Where a visited node sits in the forest.
///
/// Carries one flag per level from the root down to the node itself: `true`
/// when the node at that level is the last of its siblings.
#[derive(Debug, Clone, Copy)]
pub struct Position<'t> {
    trail: &'t [bool],
}

impl Position<'_> {
    /// Depth of the node. Roots are depth 0.
    pub fn depth(&self) -> usize {
        self.trail.len() - 1
    }

    /// Check if the node is the last of its siblings.
    pub fn is_last(&self) -> bool {
        self.trail[self.trail.len() - 1]
    }

    /// Last-sibling flags from the root down to the node, inclusive.
    pub fn trail(&self) -> &[bool] {
        self.trail
    }
}

/// Walk `roots` in pre-order, passing each node's [`Position`].
///
/// Returns the break value if the visitor stopped the walk, or
/// `ControlFlow::Continue(())` if every node was visited.
pub fn walk_with_position<'a, B, F>(roots: &'a [Arc<MenuNode>], mut visit: F) -> ControlFlow<B>
where
    F: FnMut(&'a Arc<MenuNode>, Position<'_>) -> ControlFlow<B>,
{
    let mut stack: Vec<slice::Iter<'a, Arc<MenuNode>>> = vec![roots.iter()];
    let mut trail: Vec<bool> = Vec::new();

    while let Some(siblings) = stack.last_mut() {
        let Some(node) = siblings.next() else {
            stack.pop();
            continue;
        };
        let is_last = siblings.len() == 0;

        trail.truncate(stack.len() - 1);
        trail.push(is_last);
        visit(node, Position { trail: &trail })?;

        if !node.children().is_empty() {
            stack.push(node.children().iter());
        }
    }

    ControlFlow::Continue(())
}

/// Walk `roots` in pre-order, passing each node's depth (roots are depth 0).
pub fn walk_with_depth<'a, B, F>(roots: &'a [Arc<MenuNode>], mut visit: F) -> ControlFlow<B>
where
    F: FnMut(&'a Arc<MenuNode>, usize) -> ControlFlow<B>,
{
    walk_with_position(roots, |node, position| visit(node, position.depth()))
}

/// Walk `roots` in pre-order, calling `visit` on every node until it breaks.
///
/// Returns the break value if the visitor stopped the walk, or
/// `ControlFlow::Continue(())` if every node was visited.
pub fn walk<'a, B, F>(roots: &'a [Arc<MenuNode>], mut visit: F) -> ControlFlow<B>
where
    F: FnMut(&'a Arc<MenuNode>) -> ControlFlow<B>,
{
    walk_with_depth(roots, |node, _| visit(node))
}

/// Return the first node in pre-order that satisfies `predicate`.
pub fn find<'a, P>(roots: &'a [Arc<MenuNode>], mut predicate: P) -> Option<&'a Arc<MenuNode>>
where
    P: FnMut(&MenuNode) -> bool,
{
    match walk(roots, |node| {
        if predicate(node.as_ref()) {
            ControlFlow::Break(node)
        } else {
            ControlFlow::Continue(())
        }
    }) {
        ControlFlow::Break(node) => Some(node),
        ControlFlow::Continue(()) => None,
    }
}

/// Return the first node carrying `id`.
pub fn find_by_id<'a>(roots: &'a [Arc<MenuNode>], id: &str) -> Option<&'a Arc<MenuNode>> {
    find(roots, |node| node.id() == Some(id))
}

/// Return every node that satisfies `predicate`, in pre-order.
pub fn filter<'a, P>(roots: &'a [Arc<MenuNode>], mut predicate: P) -> Vec<&'a Arc<MenuNode>>
where
    P: FnMut(&MenuNode) -> bool,
{
    let mut matches = Vec::new();
    let _ = walk::<(), _>(roots, |node| {
        if predicate(node.as_ref()) {
            matches.push(node);
        }
        ControlFlow::Continue(())
    });
    matches
}

/// Count every node in the forest, dividers included.
pub fn count(roots: &[Arc<MenuNode>]) -> usize {
    filter(roots, |_| true).len()
}
