//! Build configuration
//!
//! [`BuildConfig`] names the package, the canonical namespace root and the
//! versioned API directories. Every field has a default, so a TOML file only
//! needs the keys it overrides.

use crate::error::ConfigError;
use kexport_symbol::path::validate_segment;
use kexport_tree::{RootLayout, DEFAULT_HEADER};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one package generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Physical package directory name; must equal the disambiguated root
    pub package_name: String,
    /// Root segment of the public namespace
    pub canonical_root: String,
    /// Prefix applied to the canonical root in flat emission
    pub disambiguation_prefix: String,
    /// Directory holding the versioned API trees
    pub api_dir: String,
    /// Version directory for the current scheme
    pub current_version_dir: String,
    /// Version directory for the legacy scheme
    pub legacy_version_dir: String,
    /// Header line written to every generated init file
    pub header: String,
    /// Local names never exported
    pub symbols_to_skip: Vec<String>,
}

impl BuildConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// `Read` if the file cannot be read, `Parse` if it is not valid TOML for
    /// this schema, `Invalid` if a directory or root name is not an identifier.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// `Parse` or `Invalid`, as for [`BuildConfig::load`]
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// With package name
    #[inline]
    #[must_use]
    pub fn with_package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    /// With canonical root and its disambiguation prefix
    #[inline]
    #[must_use]
    pub fn with_root(mut self, canonical_root: impl Into<String>, prefix: impl Into<String>) -> Self {
        self.canonical_root = canonical_root.into();
        self.disambiguation_prefix = prefix.into();
        self
    }

    /// With skip list
    #[inline]
    #[must_use]
    pub fn with_symbols_to_skip(mut self, names: Vec<String>) -> Self {
        self.symbols_to_skip = names;
        self
    }

    /// Check that every name that becomes a path segment is an identifier
    /// and that the package directory matches the disambiguated root
    ///
    /// # Errors
    /// `Invalid` naming the first bad field, or `PackageMismatch`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("package_name", &self.package_name),
            ("canonical_root", &self.canonical_root),
            ("api_dir", &self.api_dir),
            ("current_version_dir", &self.current_version_dir),
            ("legacy_version_dir", &self.legacy_version_dir),
        ];
        for (field, value) in fields {
            validate_segment(value).map_err(|source| ConfigError::Invalid {
                field,
                value: value.clone(),
                source,
            })?;
        }

        let expected = self.layout().package_name();
        if self.package_name != expected {
            return Err(ConfigError::PackageMismatch {
                package_name: self.package_name.clone(),
                expected,
            });
        }
        Ok(())
    }

    /// Root layout for the emitter
    #[must_use]
    pub fn layout(&self) -> RootLayout {
        RootLayout::new(self.canonical_root.clone(), self.disambiguation_prefix.clone())
    }

    /// Root offset of the current-scheme tree: `api._v2.keras`
    #[must_use]
    pub fn current_offset(&self) -> Vec<String> {
        self.offset(&self.current_version_dir)
    }

    /// Root offset of the legacy-scheme tree: `api._v1.keras`
    #[must_use]
    pub fn legacy_offset(&self) -> Vec<String> {
        self.offset(&self.legacy_version_dir)
    }

    fn offset(&self, version_dir: &str) -> Vec<String> {
        vec![
            self.api_dir.clone(),
            version_dir.to_string(),
            self.canonical_root.clone(),
        ]
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            package_name: "tf_keras".to_string(),
            canonical_root: "keras".to_string(),
            disambiguation_prefix: "tf_".to_string(),
            api_dir: "api".to_string(),
            current_version_dir: "_v2".to_string(),
            legacy_version_dir: "_v1".to_string(),
            header: DEFAULT_HEADER.to_string(),
            symbols_to_skip: vec!["layer_test".to_string()],
        }
    }
}
