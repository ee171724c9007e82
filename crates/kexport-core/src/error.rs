//! Error types for kexport Core
//!
//! Provides error handling for:
//! - Configuration loading
//! - Symbol manifest reading and contract violations in it
//! - Registry admission, tree construction and emission failures

use kexport_symbol::{PathError, RegistryError};
use kexport_tree::{EmitError, TreeError};
use std::path::PathBuf;

/// Main kexport error type
#[derive(Debug, thiserror::Error)]
pub enum KexportError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Symbol manifest could not be read or violates the path contract
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Registry admission contract violation
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Export tree construction failed
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// Init-file emission failed
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),

    /// Other filesystem failure
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// File or directory being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl KexportError {
    /// Check if error comes from a programming-contract violation rather
    /// than the environment
    #[inline]
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::Registry(_) | Self::Tree(_) | Self::Manifest(ManifestError::InvalidExportPath { .. })
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File unreadable
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Not valid TOML for the schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A name that becomes a path segment is not an identifier
    #[error("invalid {field} '{value}': {source}")]
    Invalid {
        /// Field name
        field: &'static str,
        /// Value given
        value: String,
        /// Segment error
        #[source]
        source: PathError,
    },

    /// Package directory differs from the prefixed canonical root
    #[error("package_name '{package_name}' must be '{expected}'")]
    PackageMismatch {
        /// Value given
        package_name: String,
        /// Prefix plus canonical root
        expected: String,
    },
}

/// Symbol manifest errors
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// File unreadable
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Manifest file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Not a JSON manifest
    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),

    /// An export path of a symbol is malformed
    #[error("symbol {symbol}: invalid export path '{path}': {source}")]
    InvalidExportPath {
        /// Symbol declaring the path
        symbol: String,
        /// Path as declared
        path: String,
        /// Segment error
        #[source]
        source: PathError,
    },
}
