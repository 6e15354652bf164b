//! Shell configuration.
//!
//! [`ShellConfig`] carries everything the built-in main menu needs that is
//! not a collaborator: default key bindings, the settings tab opened by
//! "About", and the project links under "Help". It is plain data, loaded from
//! TOML:
//!
//! ```toml
//! validate_on_build = true
//! about_tab = "about"
//!
//! [links]
//! repository_url = "https://github.com/tareqimbasher/NetPad"
//! issues_url = "https://github.com/tareqimbasher/NetPad/issues"
//!
//! [shortcuts]
//! "Save" = "Ctrl+S"
//! "Save All" = "Ctrl+Shift+S"
//! ```
//!
//! Every field has a default, so a partial file only overrides what it names.
//! Unknown keys are rejected.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use horizon_shell_core::logging::targets;
use serde::{Deserialize, Serialize};

/// Errors raised while loading or saving a [`ShellConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("failed to access config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// External links shown in the "Help" menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinkConfig {
    /// Opened by "Help > GitHub".
    pub repository_url: String,
    /// Opened by "Help > Search Issues".
    pub issues_url: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            repository_url: "https://github.com/tareqimbasher/NetPad".to_string(),
            issues_url: "https://github.com/tareqimbasher/NetPad/issues".to_string(),
        }
    }
}

/// Configuration for the application shell menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Run structural validation when the main menu is built.
    pub validate_on_build: bool,
    /// Settings tab opened by "Help > About".
    pub about_tab: String,
    /// Links shown in the "Help" menu.
    pub links: LinkConfig,
    /// Default key bindings, by shortcut name.
    pub shortcuts: BTreeMap<String, String>,
}

/// Default key bindings for the shortcuts the main menu refers to.
const DEFAULT_SHORTCUTS: &[(&str, &str)] = &[
    ("New", "Ctrl+N"),
    ("Go to Script", "Ctrl+T"),
    ("Save", "Ctrl+S"),
    ("Save All", "Ctrl+Shift+S"),
    ("Script Properties", "F4"),
    ("Close", "Ctrl+W"),
    ("Settings", "Ctrl+,"),
    ("Output", "Ctrl+Shift+O"),
    ("Explorer", "Ctrl+Shift+E"),
    ("Namespaces", "Ctrl+Shift+N"),
    ("Reload", "Ctrl+R"),
];

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            validate_on_build: true,
            about_tab: "about".to_string(),
            links: LinkConfig::default(),
            shortcuts: DEFAULT_SHORTCUTS
                .iter()
                .map(|(name, keys)| (name.to_string(), keys.to_string()))
                .collect(),
        }
    }
}

impl ShellConfig {
    /// Parse a config from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            shortcuts = config.shortcuts.len(),
            "loaded shell config"
        );
        Ok(config)
    }

    /// Render the config as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the config to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::io(path, e))
    }

    /// Builder pattern for the validation flag.
    pub fn with_validate_on_build(mut self, validate: bool) -> Self {
        self.validate_on_build = validate;
        self
    }

    /// Builder pattern for a single key binding.
    pub fn with_shortcut(mut self, name: impl Into<String>, keys: impl Into<String>) -> Self {
        self.shortcuts.insert(name.into(), keys.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    use parking_lot::Mutex;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_logs_under_shell_target() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "about_tab = \"about\"").unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter("horizon_shell::config=debug")
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            ShellConfig::load(file.path()).unwrap();
        });

        let output = String::from_utf8(captured.0.lock().clone()).unwrap();
        assert!(output.contains("horizon_shell::config"));
        assert!(output.contains("loaded shell config"));
    }

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert!(config.validate_on_build);
        assert_eq!(config.about_tab, "about");
        assert_eq!(config.shortcuts.get("Save").map(String::as_str), Some("Ctrl+S"));
        assert_eq!(config.shortcuts.len(), DEFAULT_SHORTCUTS.len());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ShellConfig::from_toml_str(
            r#"
            about_tab = "info"

            [links]
            issues_url = "https://example.com/issues"
            "#,
        )
        .unwrap();

        assert_eq!(config.about_tab, "info");
        assert_eq!(config.links.issues_url, "https://example.com/issues");
        assert_eq!(
            config.links.repository_url,
            LinkConfig::default().repository_url
        );
        assert!(config.validate_on_build);
        assert_eq!(config.shortcuts, ShellConfig::default().shortcuts);
    }

    #[test]
    fn test_shortcut_table_replaces_defaults() {
        let config = ShellConfig::from_toml_str(
            r#"
            [shortcuts]
            "Save" = "Ctrl+Alt+S"
            "#,
        )
        .unwrap();
        assert_eq!(config.shortcuts.len(), 1);
        assert_eq!(config.shortcuts["Save"], "Ctrl+Alt+S");
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let err = ShellConfig::from_toml_str("validate_on_biuld = false").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        let err = ShellConfig::from_toml_str("[links]\nhomepage = \"x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ShellConfig::default()
            .with_validate_on_build(false)
            .with_shortcut("Zoom In", "Ctrl++");
        let text = config.to_toml_string().unwrap();
        assert_eq!(ShellConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "validate_on_build = false").unwrap();
        writeln!(file, "[shortcuts]").unwrap();
        writeln!(file, "\"Reload\" = \"F5\"").unwrap();

        let config = ShellConfig::load(file.path()).unwrap();
        assert!(!config.validate_on_build);
        assert_eq!(config.shortcuts["Reload"], "F5");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shell.toml");

        let config = ShellConfig::default().with_shortcut("Reload", "F5");
        config.save(&path).unwrap();
        assert_eq!(ShellConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShellConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
