//! Exportable symbols and their declared export paths
//!
//! Provides [`SymbolId`] for stable symbol identity and [`Symbol`] for a
//! symbol together with its ancestor chain and both naming schemes.

use crate::path::{DottedPath, PathError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Stable identity of an exportable symbol
///
/// Derived from where the symbol physically lives after source relocation:
/// the defining module plus the local name within that module. Ordering is
/// by module path first, then local name.
///
/// # Example
/// ```
/// use kexport_symbol::SymbolId;
///
/// let id: SymbolId = "tf_keras.src.layers.core.dense.Dense".parse().unwrap();
/// assert_eq!(id.module().to_string(), "tf_keras.src.layers.core.dense");
/// assert_eq!(id.name(), "Dense");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SymbolId {
    /// Defining module, e.g. `tf_keras.src.layers.core.dense`
    module: DottedPath,

    /// Local name within the module, e.g. `Dense`
    name: String,
}

impl SymbolId {
    /// Create new symbol id
    ///
    /// # Errors
    /// Returns error if `name` is not an identifier
    pub fn new(module: DottedPath, name: impl Into<String>) -> Result<Self, PathError> {
        let name = name.into();
        crate::path::validate_segment(&name)?;
        Ok(Self { module, name })
    }

    /// Defining module path
    #[inline]
    #[must_use]
    pub fn module(&self) -> &DottedPath {
        &self.module
    }

    /// Local name within the defining module
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Display for SymbolId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

impl FromStr for SymbolId {
    type Err = PathError;

    /// Parse `module.path.Name`; the last segment is the local name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let full: DottedPath = s.parse()?;
        let module = full.parent().ok_or(PathError::Empty)?;
        Ok(Self {
            module,
            name: full.last().to_string(),
        })
    }
}

impl TryFrom<String> for SymbolId {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SymbolId> for String {
    fn from(id: SymbolId) -> Self {
        id.to_string()
    }
}

/// Naming scheme selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Current-scheme export paths
    Current,

    /// Legacy-scheme export paths
    Legacy,
}

impl Scheme {
    /// Both schemes, current first
    pub const ALL: [Scheme; 2] = [Scheme::Current, Scheme::Legacy];
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("current"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

/// An exportable unit of code with its declared export paths
///
/// Immutable once built. `ancestors` is the inheritance chain in resolution
/// order, nearest first, excluding the symbol itself; it is empty for
/// functions and for classes without tracked bases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    id: SymbolId,
    ancestors: Vec<SymbolId>,
    current_paths: BTreeSet<DottedPath>,
    legacy_paths: BTreeSet<DottedPath>,
}

impl Symbol {
    /// Create new symbol with no ancestors and no paths
    #[inline]
    #[must_use]
    pub fn new(id: SymbolId) -> Self {
        Self {
            id,
            ancestors: Vec::new(),
            current_paths: BTreeSet::new(),
            legacy_paths: BTreeSet::new(),
        }
    }

    /// With ancestor chain (nearest first)
    #[inline]
    #[must_use]
    pub fn with_ancestors(mut self, ancestors: Vec<SymbolId>) -> Self {
        self.ancestors = ancestors;
        self
    }

    /// With current-scheme export paths
    #[inline]
    #[must_use]
    pub fn with_current_paths(mut self, paths: impl IntoIterator<Item = DottedPath>) -> Self {
        self.current_paths = paths.into_iter().collect();
        self
    }

    /// With legacy-scheme export paths
    #[inline]
    #[must_use]
    pub fn with_legacy_paths(mut self, paths: impl IntoIterator<Item = DottedPath>) -> Self {
        self.legacy_paths = paths.into_iter().collect();
        self
    }

    /// Identity
    #[inline]
    #[must_use]
    pub fn id(&self) -> &SymbolId {
        &self.id
    }

    /// Ancestor chain, nearest first
    #[inline]
    #[must_use]
    pub fn ancestors(&self) -> &[SymbolId] {
        &self.ancestors
    }

    /// Export paths for one naming scheme
    #[inline]
    #[must_use]
    pub fn paths(&self, scheme: Scheme) -> &BTreeSet<DottedPath> {
        match scheme {
            Scheme::Current => &self.current_paths,
            Scheme::Legacy => &self.legacy_paths,
        }
    }

    /// True when neither scheme declares a path
    #[inline]
    #[must_use]
    pub fn has_no_paths(&self) -> bool {
        self.current_paths.is_empty() && self.legacy_paths.is_empty()
    }

    /// Same export metadata: identical current and legacy path sets
    #[inline]
    #[must_use]
    pub fn has_same_metadata(&self, other: &Symbol) -> bool {
        self.current_paths == other.current_paths && self.legacy_paths == other.legacy_paths
    }
}
