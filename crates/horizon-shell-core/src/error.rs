//! Error types for Horizon Shell.

use std::fmt;

use crate::shortcut::KeySequenceParseError;

/// Boxed error raised by a click action.
///
/// The dispatcher returns this value to its caller untouched, so callers can
/// downcast it back to whatever concrete error the action produced.
pub type ActionError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result of running a click action.
pub type ActionResult = std::result::Result<(), ActionError>;

/// The main error type for Horizon Shell operations.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// The menu forest failed structural validation.
    #[error("menu validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A key sequence string could not be parsed.
    #[error("invalid key sequence: {0}")]
    KeySequence(#[from] KeySequenceParseError),

    /// No shortcut is registered under the given name.
    #[error("unknown shortcut '{0}'")]
    UnknownShortcut(String),
}

impl MenuError {
    /// Create an unknown-shortcut error.
    pub fn unknown_shortcut(name: impl Into<String>) -> Self {
        Self::UnknownShortcut(name.into())
    }
}

/// One structural problem found in a menu forest.
///
/// `path` is the chain of child indices from the top-level sequence down to
/// the offending node, e.g. `[0, 2]` is the third child of the first root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    /// Two or more nodes share the same id.
    DuplicateId {
        /// The repeated id.
        id: String,
        /// Location of the first node carrying the id.
        first: Vec<usize>,
        /// Location of the later duplicate.
        duplicate: Vec<usize>,
    },
    /// A divider carries text, children, or an action.
    DividerWithContent {
        /// Location of the divider.
        path: Vec<usize>,
    },
    /// A non-divider node has no display text.
    MissingText {
        /// Location of the node.
        path: Vec<usize>,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId {
                id,
                first,
                duplicate,
            } => write!(
                f,
                "duplicate id '{id}' at {duplicate:?} (first seen at {first:?})"
            ),
            Self::DividerWithContent { path } => {
                write!(f, "divider at {path:?} carries text, children or an action")
            }
            Self::MissingText { path } => write!(f, "menu entry at {path:?} has no text"),
        }
    }
}

/// Aggregate of every issue found by a validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Create a validation error from a non-empty list of issues.
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// The issues that were found, in pre-order of discovery.
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// A specialized Result type for Horizon Shell operations.
pub type Result<T> = std::result::Result<T, MenuError>;
