//! Named keyboard shortcuts and the gateway used to execute them.
//!
//! This module provides:
//!
//! - [`KeySequence`]: a keyboard shortcut (up to 4 key combinations), parsed
//!   from strings like `"Ctrl+S"` or `"Ctrl+K, Ctrl+C"`
//! - [`Shortcut`]: a named binding with a key sequence, enabled state and the
//!   command currently bound to it
//! - [`ShortcutGateway`]: the capability menu nodes use to look shortcuts up
//!   by name and to execute them
//!
//! # Binding Lifetime
//!
//! Menu nodes capture a [`ShortcutRef`] when the menu is built. Rebinding the
//! handler of that same shortcut is visible to the node, but registering a
//! *new* shortcut under the same name is not: the node keeps the reference it
//! captured.
//!
//! ```
//! use horizon_shell_core::shortcut::{KeySequence, Shortcut};
//!
//! let save = Shortcut::new("Save", Some("Ctrl+S".parse().unwrap()));
//! assert_eq!(save.help_text().as_deref(), Some("Ctrl + S"));
//! assert!(!save.activate()); // nothing bound yet
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use static_assertions::assert_impl_all;

/// Maximum number of key combinations in a single sequence.
pub const MAX_KEY_SEQUENCE_LENGTH: usize = 4;

// =============================================================================
// Keys and Modifiers
// =============================================================================

/// A physical key that can take part in a shortcut.
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Plus, Minus, Equal, Slash, Backslash, Comma, Period,
    Semicolon, Quote, Backquote, BracketLeft, BracketRight,
    Escape, Enter, Tab, Space, Backspace, Delete, Insert,
    Home, End, PageUp, PageDown,
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
}

/// Display name of every key. Parsing matches these case-insensitively.
#[rustfmt::skip]
const KEY_NAMES: &[(Key, &str)] = &[
    (Key::A, "A"), (Key::B, "B"), (Key::C, "C"), (Key::D, "D"), (Key::E, "E"),
    (Key::F, "F"), (Key::G, "G"), (Key::H, "H"), (Key::I, "I"), (Key::J, "J"),
    (Key::K, "K"), (Key::L, "L"), (Key::M, "M"), (Key::N, "N"), (Key::O, "O"),
    (Key::P, "P"), (Key::Q, "Q"), (Key::R, "R"), (Key::S, "S"), (Key::T, "T"),
    (Key::U, "U"), (Key::V, "V"), (Key::W, "W"), (Key::X, "X"), (Key::Y, "Y"),
    (Key::Z, "Z"),
    (Key::Digit0, "0"), (Key::Digit1, "1"), (Key::Digit2, "2"), (Key::Digit3, "3"),
    (Key::Digit4, "4"), (Key::Digit5, "5"), (Key::Digit6, "6"), (Key::Digit7, "7"),
    (Key::Digit8, "8"), (Key::Digit9, "9"),
    (Key::F1, "F1"), (Key::F2, "F2"), (Key::F3, "F3"), (Key::F4, "F4"),
    (Key::F5, "F5"), (Key::F6, "F6"), (Key::F7, "F7"), (Key::F8, "F8"),
    (Key::F9, "F9"), (Key::F10, "F10"), (Key::F11, "F11"), (Key::F12, "F12"),
    (Key::Plus, "+"), (Key::Minus, "-"), (Key::Equal, "="), (Key::Slash, "/"),
    (Key::Backslash, "\\"), (Key::Comma, ","), (Key::Period, "."),
    (Key::Semicolon, ";"), (Key::Quote, "'"), (Key::Backquote, "`"),
    (Key::BracketLeft, "["), (Key::BracketRight, "]"),
    (Key::Escape, "Esc"), (Key::Enter, "Enter"), (Key::Tab, "Tab"),
    (Key::Space, "Space"), (Key::Backspace, "Backspace"), (Key::Delete, "Delete"),
    (Key::Insert, "Insert"), (Key::Home, "Home"), (Key::End, "End"),
    (Key::PageUp, "PageUp"), (Key::PageDown, "PageDown"),
    (Key::ArrowUp, "Up"), (Key::ArrowDown, "Down"),
    (Key::ArrowLeft, "Left"), (Key::ArrowRight, "Right"),
];

/// Alternate spellings accepted when parsing.
const KEY_ALIASES: &[(Key, &str)] = &[
    (Key::Plus, "plus"),
    (Key::Minus, "minus"),
    (Key::Equal, "equal"),
    (Key::Slash, "slash"),
    (Key::Backslash, "backslash"),
    (Key::Comma, "comma"),
    (Key::Period, "period"),
    (Key::Escape, "escape"),
    (Key::Enter, "return"),
    (Key::Delete, "del"),
    (Key::Insert, "ins"),
    (Key::PageUp, "pgup"),
    (Key::PageDown, "pgdn"),
];

impl Key {
    /// Human-readable name used in help text.
    pub fn name(self) -> &'static str {
        KEY_NAMES
            .iter()
            .find(|(key, _)| *key == self)
            .map_or("?", |(_, name)| *name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Modifier keys held during a key combination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyboardModifiers {
    /// Control key.
    pub control: bool,
    /// Alt/Option key.
    pub alt: bool,
    /// Shift key.
    pub shift: bool,
    /// Meta/Command/Super key.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        control: false,
        alt: false,
        shift: false,
        meta: false,
    };

    /// Control only.
    pub const CTRL: Self = Self {
        control: true,
        ..Self::NONE
    };

    /// Control and Shift.
    pub const CTRL_SHIFT: Self = Self {
        control: true,
        shift: true,
        ..Self::NONE
    };

    /// Alt only.
    pub const ALT: Self = Self {
        alt: true,
        ..Self::NONE
    };

    /// Check if no modifier is held.
    pub fn is_empty(self) -> bool {
        self == Self::NONE
    }

    fn names(self) -> impl Iterator<Item = &'static str> {
        [
            (self.control, "Ctrl"),
            (self.alt, "Alt"),
            (self.shift, "Shift"),
            (self.meta, "Meta"),
        ]
        .into_iter()
        .filter_map(|(held, name)| held.then_some(name))
    }
}

// =============================================================================
// Key Combination and Sequence
// =============================================================================

/// A single key combination (one key with modifiers), such as "Ctrl+S".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    /// The primary key.
    pub key: Key,
    /// The modifiers held with it.
    pub modifiers: KeyboardModifiers,
}

impl KeyCombination {
    /// Create a new key combination.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self { key, modifiers }
    }

    fn write_joined(&self, f: &mut impl fmt::Write, separator: &str) -> fmt::Result {
        for name in self.modifiers.names() {
            f.write_str(name)?;
            f.write_str(separator)?;
        }
        f.write_str(self.key.name())
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_joined(f, "+")
    }
}

/// A keyboard shortcut made of one to four key combinations.
///
/// Multi-combination sequences are chords: `"Ctrl+K, Ctrl+C"` means press
/// Ctrl+K, release, then press Ctrl+C.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeySequence {
    combinations: Vec<KeyCombination>,
}

impl KeySequence {
    /// Create a single-combination sequence.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            combinations: vec![KeyCombination::new(key, modifiers)],
        }
    }

    /// Create a sequence for a key without modifiers.
    pub fn key_only(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::NONE)
    }

    /// Create a Ctrl+key sequence.
    pub fn ctrl(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::CTRL)
    }

    /// Create a Ctrl+Shift+key sequence.
    pub fn ctrl_shift(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::CTRL_SHIFT)
    }

    /// Number of key combinations in the sequence.
    pub fn count(&self) -> usize {
        self.combinations.len()
    }

    /// The key combinations in order.
    pub fn combinations(&self) -> &[KeyCombination] {
        &self.combinations
    }

    /// Check if `other` is a prefix of this sequence or vice versa.
    pub fn overlaps(&self, other: &KeySequence) -> bool {
        self.combinations
            .iter()
            .zip(other.combinations.iter())
            .all(|(a, b)| a == b)
    }

    /// Render the sequence the way menu help text shows it, e.g.
    /// `"Ctrl + Shift + Z"`.
    pub fn help_text(&self) -> String {
        let mut out = String::new();
        for (i, combo) in self.combinations.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            // Writing to a String cannot fail.
            let _ = combo.write_joined(&mut out, " + ");
        }
        out
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, combo) in self.combinations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{combo}")?;
        }
        Ok(())
    }
}

/// Error type for parsing key sequences.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeySequenceParseError {
    /// The string is empty.
    #[error("empty key sequence")]
    Empty,
    /// No key was specified (only modifiers).
    #[error("no key specified (only modifiers)")]
    NoKey,
    /// More than one non-modifier key in a combination.
    #[error("more than one key in '{0}'")]
    MultipleKeys(String),
    /// Unknown key name.
    #[error("unknown key: {0}")]
    UnknownKey(String),
    /// Too many key combinations.
    #[error("too many key combinations (max 4)")]
    TooManyKeys,
}

impl FromStr for KeySequence {
    type Err = KeySequenceParseError;

    /// Parse a key sequence such as `"Ctrl+S"`, `"Ctrl + Shift + Z"`,
    /// `"Ctrl++"` or `"Ctrl+K, Ctrl+C"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeySequenceParseError::Empty);
        }

        let parts: Vec<&str> = split_combinations(s);
        if parts.len() > MAX_KEY_SEQUENCE_LENGTH {
            return Err(KeySequenceParseError::TooManyKeys);
        }

        let combinations = parts
            .into_iter()
            .map(parse_key_combination)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(KeySequence { combinations })
    }
}

/// Split on commas that separate combinations, keeping a lone `,` key.
fn split_combinations(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, ch) in s.char_indices() {
        if ch != ',' {
            continue;
        }
        let before = s[start..i].trim_end();
        // A comma directly after a '+' (or at the start) is the comma key.
        if before.is_empty() || before.ends_with('+') {
            continue;
        }
        parts.push(&s[start..i]);
        start = i + 1;
    }
    parts.push(&s[start..]);
    parts
}

fn parse_key_combination(s: &str) -> Result<KeyCombination, KeySequenceParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(KeySequenceParseError::Empty);
    }

    // A trailing '+' is the plus key itself ("Ctrl++", "Ctrl + +", "+").
    let (modifier_part, trailing_plus) = match s.strip_suffix('+') {
        Some(rest) => {
            let rest = rest.trim_end();
            (rest.strip_suffix('+').unwrap_or(rest), true)
        }
        None => (s, false),
    };

    let mut modifiers = KeyboardModifiers::NONE;
    let mut key = trailing_plus.then_some(Key::Plus);

    for part in modifier_part.split('+') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.control = true,
            "alt" | "option" => modifiers.alt = true,
            "shift" => modifiers.shift = true,
            "meta" | "cmd" | "command" | "win" | "super" => modifiers.meta = true,
            _ => {
                if key.is_some() {
                    return Err(KeySequenceParseError::MultipleKeys(s.to_string()));
                }
                key = Some(parse_key(part)?);
            }
        }
    }

    key.map(|k| KeyCombination::new(k, modifiers))
        .ok_or(KeySequenceParseError::NoKey)
}

fn parse_key(s: &str) -> Result<Key, KeySequenceParseError> {
    KEY_NAMES
        .iter()
        .chain(KEY_ALIASES)
        .find(|(_, name)| name.eq_ignore_ascii_case(s))
        .map(|(key, _)| *key)
        .ok_or_else(|| KeySequenceParseError::UnknownKey(s.to_string()))
}

// =============================================================================
// Shortcut
// =============================================================================

/// The command bound to a shortcut.
pub type ShortcutHandler = Arc<dyn Fn() + Send + Sync>;

/// Shared reference to a named shortcut, as captured by menu nodes.
pub type ShortcutRef = Arc<Shortcut>;

struct ShortcutState {
    key_sequence: Option<KeySequence>,
    enabled: bool,
    handler: Option<ShortcutHandler>,
}

/// A named shortcut binding.
///
/// The name is fixed for the lifetime of the shortcut; the key sequence,
/// enabled state and bound handler can change.
pub struct Shortcut {
    name: String,
    state: RwLock<ShortcutState>,
    generation: AtomicU64,
}

impl Shortcut {
    /// Create a new, unbound shortcut.
    pub fn new(name: impl Into<String>, key_sequence: Option<KeySequence>) -> Self {
        Self {
            name: name.into(),
            state: RwLock::new(ShortcutState {
                key_sequence,
                enabled: true,
                handler: None,
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// The shortcut's name, e.g. `"Save All"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the key sequence, if one is assigned.
    pub fn key_sequence(&self) -> Option<KeySequence> {
        self.state.read().key_sequence.clone()
    }

    /// Set the key sequence.
    pub fn set_key_sequence(&self, sequence: Option<KeySequence>) {
        self.state.write().key_sequence = sequence;
        self.bump();
    }

    /// Key sequence rendered as help text, e.g. `"Ctrl + S"`.
    pub fn help_text(&self) -> Option<String> {
        self.state
            .read()
            .key_sequence
            .as_ref()
            .map(KeySequence::help_text)
    }

    /// Check if the shortcut is enabled.
    pub fn is_enabled(&self) -> bool {
        self.state.read().enabled
    }

    /// Set whether the shortcut is enabled.
    pub fn set_enabled(&self, enabled: bool) {
        self.state.write().enabled = enabled;
        self.bump();
    }

    /// Builder pattern for enabled state.
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.set_enabled(enabled);
        self
    }

    /// Bind (or clear) the command run on activation.
    pub fn set_handler(&self, handler: Option<ShortcutHandler>) {
        self.state.write().handler = handler;
        self.bump();
    }

    /// Builder pattern for the bound command.
    pub fn with_handler<F>(self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.set_handler(Some(Arc::new(handler)));
        self
    }

    /// Check if a command is bound.
    pub fn is_bound(&self) -> bool {
        self.state.read().handler.is_some()
    }

    /// Get the generation counter (bumped on every change).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Run the bound command.
    ///
    /// Returns `false` when the shortcut is disabled or nothing is bound.
    /// The handler runs without the internal lock held, so it may rebind
    /// this shortcut.
    pub fn activate(&self) -> bool {
        let handler = {
            let state = self.state.read();
            if !state.enabled {
                return false;
            }
            state.handler.clone()
        };
        match handler {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    fn bump(&self) {
        self.generation.fetch_add(1, Ordering::Release);
    }
}

impl fmt::Debug for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("Shortcut")
            .field("name", &self.name)
            .field("key_sequence", &state.key_sequence)
            .field("enabled", &state.enabled)
            .field("bound", &state.handler.is_some())
            .finish()
    }
}

assert_impl_all!(Shortcut: Send, Sync);

// =============================================================================
// Gateway
// =============================================================================

/// Capability for looking up named shortcuts and executing them.
///
/// Menu construction calls [`get_by_name`](Self::get_by_name) once per
/// shortcut-bound entry; the dispatcher calls [`execute`](Self::execute) when
/// such an entry is invoked.
pub trait ShortcutGateway: Send + Sync {
    /// Look up a shortcut by name.
    fn get_by_name(&self, name: &str) -> Option<ShortcutRef>;

    /// Trigger whatever command is currently bound to `shortcut`.
    fn execute(&self, shortcut: &ShortcutRef);
}
