//! Structural validation of a menu forest.
//!
//! Menu construction itself never validates: [`MenuNode`] builders accept any
//! shape. Callers that want to fail fast on malformed definitions run
//! [`validate_forest`] once the tree is built.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{ValidationError, ValidationIssue};
use crate::node::MenuNode;

/// Check the forest for duplicate ids, dividers with content, and entries
/// without text.
///
/// All issues are collected; the error lists them in pre-order.
pub fn validate_forest(roots: &[Arc<MenuNode>]) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    let mut seen: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut path = Vec::new();

    for (index, root) in roots.iter().enumerate() {
        path.push(index);
        check_node(root, &mut path, &mut seen, &mut issues);
        path.pop();
    }

    if issues.is_empty() {
        Ok(())
    } else {
        tracing::debug!(
            target: crate::logging::targets::VALIDATE,
            issues = issues.len(),
            "menu forest failed validation"
        );
        Err(ValidationError::new(issues))
    }
}

fn check_node<'a>(
    node: &'a MenuNode,
    path: &mut Vec<usize>,
    seen: &mut HashMap<&'a str, Vec<usize>>,
    issues: &mut Vec<ValidationIssue>,
) {
    if node.is_divider() {
        if node.text().is_some() || node.is_submenu() || !node.action().is_none() {
            issues.push(ValidationIssue::DividerWithContent { path: path.clone() });
        }
    } else if node.text().is_none() {
        issues.push(ValidationIssue::MissingText { path: path.clone() });
    }

    if let Some(id) = node.id() {
        match seen.get(id) {
            Some(first) => issues.push(ValidationIssue::DuplicateId {
                id: id.to_string(),
                first: first.clone(),
                duplicate: path.clone(),
            }),
            None => {
                seen.insert(id, path.clone());
            }
        }
    }

    for (index, child) in node.children().iter().enumerate() {
        path.push(index);
        check_node(child, path, seen, issues);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ClickAction;

    #[test]
    fn test_well_formed_forest_passes() {
        let roots = vec![
            Arc::new(MenuNode::submenu(
                "File",
                [
                    MenuNode::new("New").with_id("file.new"),
                    MenuNode::divider(),
                    MenuNode::new("Exit").with_id("file.exit"),
                ],
            )),
            Arc::new(MenuNode::submenu("View", [MenuNode::new("Zoom In")])),
        ];
        assert!(validate_forest(&roots).is_ok());
    }

    #[test]
    fn test_duplicate_ids_across_sections() {
        let roots = vec![
            Arc::new(MenuNode::submenu("File", [MenuNode::new("Find").with_id("find")])),
            Arc::new(MenuNode::submenu(
                "Edit",
                [MenuNode::divider(), MenuNode::new("Find").with_id("find")],
            )),
        ];
        let err = validate_forest(&roots).unwrap_err();
        assert_eq!(
            err.issues(),
            [ValidationIssue::DuplicateId {
                id: "find".into(),
                first: vec![0, 0],
                duplicate: vec![1, 1],
            }]
        );
    }

    #[test]
    fn test_divider_with_children_or_action() {
        let roots = vec![Arc::new(MenuNode::submenu(
            "File",
            [
                MenuNode::divider().with_child(MenuNode::new("Hidden")),
                MenuNode::divider().with_click(ClickAction::from_fn(|| Ok(()))),
            ],
        ))];
        let err = validate_forest(&roots).unwrap_err();
        assert_eq!(
            err.issues(),
            [
                ValidationIssue::DividerWithContent { path: vec![0, 0] },
                ValidationIssue::DividerWithContent { path: vec![0, 1] },
            ]
        );
    }

    #[test]
    fn test_issues_are_collected() {
        let roots = vec![
            Arc::new(MenuNode::divider().with_id("x").with_child(MenuNode::new("a"))),
            Arc::new(MenuNode::new("b").with_id("x")),
        ];
        let err = validate_forest(&roots).unwrap_err();
        assert_eq!(err.issues().len(), 2);
    }
}
