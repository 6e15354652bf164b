//! In-process shortcut registry.
//!
//! [`ShortcutManager`] owns the named shortcuts of an application and is the
//! default [`ShortcutGateway`] handed to the main menu.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use horizon_shell::shortcut::ShortcutManager;
//! use horizon_shell_core::ShortcutGateway;
//!
//! let manager = ShortcutManager::new();
//! let save = manager.register_str("Save", "Ctrl+S").unwrap();
//!
//! let saved = Arc::new(AtomicBool::new(false));
//! let flag = saved.clone();
//! manager.bind("Save", move || flag.store(true, Ordering::SeqCst)).unwrap();
//!
//! manager.execute(&save);
//! assert!(saved.load(Ordering::SeqCst));
//! ```

use std::sync::Arc;

use horizon_shell_core::logging::targets;
use horizon_shell_core::{KeySequence, MenuError, Result, Shortcut, ShortcutGateway, ShortcutRef};
use parking_lot::RwLock;
use static_assertions::assert_impl_all;

use crate::config::ShellConfig;

/// Registry of named shortcuts.
///
/// Names are unique. Registering an existing name replaces the entry in place;
/// menu entries built earlier keep the shortcut they captured, so rebinding
/// should go through [`bind`](Self::bind) rather than re-registration.
#[derive(Debug, Default)]
pub struct ShortcutManager {
    shortcuts: RwLock<Vec<ShortcutRef>>,
}

impl ShortcutManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager holding every key binding in `config`.
    pub fn from_config(config: &ShellConfig) -> Result<Self> {
        let manager = Self::new();
        for (name, keys) in &config.shortcuts {
            manager.register_str(name, keys)?;
        }
        Ok(manager)
    }

    /// Register a shortcut, replacing any existing one with the same name.
    pub fn register(&self, name: impl Into<String>, key_sequence: Option<KeySequence>) -> ShortcutRef {
        let shortcut = Arc::new(Shortcut::new(name, key_sequence));
        let mut shortcuts = self.shortcuts.write();

        match shortcuts.iter_mut().find(|s| s.name() == shortcut.name()) {
            Some(slot) => {
                tracing::debug!(target: targets::SHORTCUT, name = shortcut.name(), "replacing shortcut");
                *slot = shortcut.clone();
            }
            None => {
                tracing::debug!(target: targets::SHORTCUT, name = shortcut.name(), "registering shortcut");
                shortcuts.push(shortcut.clone());
            }
        }

        shortcut
    }

    /// Register a shortcut from a key sequence string such as `"Ctrl+S"`.
    pub fn register_str(&self, name: impl Into<String>, keys: &str) -> Result<ShortcutRef> {
        let sequence = keys.parse::<KeySequence>()?;
        Ok(self.register(name, Some(sequence)))
    }

    /// Remove a shortcut by name.
    pub fn unregister(&self, name: &str) -> Option<ShortcutRef> {
        let mut shortcuts = self.shortcuts.write();
        let index = shortcuts.iter().position(|s| s.name() == name)?;
        Some(shortcuts.remove(index))
    }

    /// Set the command run when the named shortcut is executed.
    pub fn bind<F>(&self, name: &str, handler: F) -> Result<ShortcutRef>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let shortcut = self
            .get_by_name(name)
            .ok_or_else(|| MenuError::unknown_shortcut(name))?;
        shortcut.set_handler(Some(Arc::new(handler)));
        Ok(shortcut)
    }

    /// Clear the command bound to the named shortcut.
    pub fn unbind(&self, name: &str) -> Result<()> {
        let shortcut = self
            .get_by_name(name)
            .ok_or_else(|| MenuError::unknown_shortcut(name))?;
        shortcut.set_handler(None);
        Ok(())
    }

    /// Find the enabled shortcut assigned exactly to `sequence`.
    pub fn shortcut_for(&self, sequence: &KeySequence) -> Option<ShortcutRef> {
        self.shortcuts
            .read()
            .iter()
            .find(|s| s.is_enabled() && s.key_sequence().as_ref() == Some(sequence))
            .cloned()
    }

    /// Find every shortcut whose key sequence equals `sequence` or is a
    /// chord prefix of it (or the other way round).
    pub fn find_conflicts(&self, sequence: &KeySequence) -> Vec<ShortcutRef> {
        self.shortcuts
            .read()
            .iter()
            .filter(|s| s.key_sequence().is_some_and(|other| other.overlaps(sequence)))
            .cloned()
            .collect()
    }

    /// Snapshot of all registered shortcuts, in registration order.
    pub fn shortcuts(&self) -> Vec<ShortcutRef> {
        self.shortcuts.read().clone()
    }

    /// Number of registered shortcuts.
    pub fn len(&self) -> usize {
        self.shortcuts.read().len()
    }

    /// Check if no shortcut is registered.
    pub fn is_empty(&self) -> bool {
        self.shortcuts.read().is_empty()
    }
}

impl ShortcutGateway for ShortcutManager {
    fn get_by_name(&self, name: &str) -> Option<ShortcutRef> {
        self.shortcuts
            .read()
            .iter()
            .find(|s| s.name() == name)
            .cloned()
    }

    fn execute(&self, shortcut: &ShortcutRef) {
        if shortcut.activate() {
            tracing::trace!(target: targets::SHORTCUT, name = shortcut.name(), "shortcut executed");
        } else {
            tracing::debug!(
                target: targets::SHORTCUT,
                name = shortcut.name(),
                enabled = shortcut.is_enabled(),
                "shortcut has nothing to run"
            );
        }
    }
}

assert_impl_all!(ShortcutManager: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_shell_core::Key;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
        let hits = Arc::new(AtomicUsize::new(0));
        let inner = hits.clone();
        (hits, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_register_and_lookup() {
        let manager = ShortcutManager::new();
        let save = manager.register_str("Save", "Ctrl+S").unwrap();

        let found = manager.get_by_name("Save").unwrap();
        assert!(Arc::ptr_eq(&found, &save));
        assert!(manager.get_by_name("Open").is_none());
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_register_invalid_keys() {
        let manager = ShortcutManager::new();
        let err = manager.register_str("Save", "Ctrl+Hyper").unwrap_err();
        assert!(matches!(err, MenuError::KeySequence(_)));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_reregistration_does_not_touch_captured_reference() {
        let manager = ShortcutManager::new();
        let original = manager.register_str("Close", "Ctrl+W").unwrap();
        let (old_hits, old_handler) = counter();
        manager.bind("Close", old_handler).unwrap();

        let replacement = manager.register_str("Close", "Ctrl+F4").unwrap();
        let (new_hits, new_handler) = counter();
        manager.bind("Close", new_handler).unwrap();

        assert_eq!(manager.len(), 1);
        assert!(!Arc::ptr_eq(&original, &replacement));

        // A node built before re-registration still holds `original`.
        manager.execute(&original);
        assert_eq!(old_hits.load(Ordering::SeqCst), 1);
        assert_eq!(new_hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rebinding_is_visible_through_existing_reference() {
        let manager = ShortcutManager::new();
        let reload = manager.register_str("Reload", "Ctrl+R").unwrap();

        let (first, first_handler) = counter();
        manager.bind("Reload", first_handler).unwrap();
        let (second, second_handler) = counter();
        manager.bind("Reload", second_handler).unwrap();

        manager.execute(&reload);
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_execute_disabled_or_unbound() {
        let manager = ShortcutManager::new();
        let output = manager.register_str("Output", "Ctrl+Shift+O").unwrap();
        manager.execute(&output);

        let (hits, handler) = counter();
        manager.bind("Output", handler).unwrap();
        output.set_enabled(false);
        manager.execute(&output);
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        manager.unbind("Output").unwrap();
        assert!(!output.is_bound());
    }

    #[test]
    fn test_bind_unknown() {
        let manager = ShortcutManager::new();
        let err = manager.bind("Nope", || {}).unwrap_err();
        assert!(matches!(err, MenuError::UnknownShortcut(ref name) if name == "Nope"));
        assert!(manager.unbind("Nope").is_err());
    }

    #[test]
    fn test_shortcut_for_and_conflicts() {
        let manager = ShortcutManager::new();
        manager.register_str("Save", "Ctrl+S").unwrap();
        manager.register_str("Comment", "Ctrl+K, Ctrl+C").unwrap();
        manager.register_str("Uncomment", "Ctrl+K, Ctrl+U").unwrap();
        manager.register("Zoom In", None);

        let save = manager.shortcut_for(&KeySequence::ctrl(Key::S)).unwrap();
        assert_eq!(save.name(), "Save");
        assert!(manager.shortcut_for(&KeySequence::ctrl(Key::K)).is_none());

        let conflicts = manager.find_conflicts(&KeySequence::ctrl(Key::K));
        let names: Vec<_> = conflicts.iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, ["Comment", "Uncomment"]);
    }

    #[test]
    fn test_unregister() {
        let manager = ShortcutManager::new();
        manager.register_str("Save", "Ctrl+S").unwrap();
        assert!(manager.unregister("Save").is_some());
        assert!(manager.unregister("Save").is_none());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = ShellConfig::default();
        let manager = ShortcutManager::from_config(&config).unwrap();
        assert_eq!(manager.len(), config.shortcuts.len());
        assert_eq!(
            manager.get_by_name("Settings").unwrap().key_sequence(),
            Some(KeySequence::ctrl(Key::Comma))
        );

        let bad = ShellConfig::default().with_shortcut("Save", "Ctrl+Hyper");
        assert!(ShortcutManager::from_config(&bad).is_err());
    }
}
