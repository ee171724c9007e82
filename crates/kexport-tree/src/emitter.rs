//! Package-init emission for an export tree
//!
//! Provides [`NamespaceEmitter`], which writes one `__init__.py` per namespace
//! node under a target root, optionally re-rooted under a version offset.

use crate::tree::{Entry, ExportTree, NamespaceNode};
use kexport_symbol::path::validate_segment;
use kexport_symbol::{DottedPath, PathError, SymbolId};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default header line written at the top of every generated file
pub const DEFAULT_HEADER: &str = "AUTOGENERATED. DO NOT EDIT.";

/// File name of a namespace package init
pub const INIT_FILE: &str = "__init__.py";

/// How namespace paths map onto the physical package
///
/// Namespaces rooted at `canonical_root` are served from a package whose
/// name is `disambiguation_prefix + canonical_root`, so the generated package
/// does not shadow the namespace used by bundled sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLayout {
    /// Root segment of the public namespace, e.g. `keras`
    pub canonical_root: String,

    /// Prefix turning the root segment into the package name, e.g. `tf_`
    pub disambiguation_prefix: String,
}

impl RootLayout {
    /// Create layout
    #[inline]
    #[must_use]
    pub fn new(canonical_root: impl Into<String>, disambiguation_prefix: impl Into<String>) -> Self {
        Self {
            canonical_root: canonical_root.into(),
            disambiguation_prefix: disambiguation_prefix.into(),
        }
    }

    /// Physical package name for the canonical root
    #[must_use]
    pub fn package_name(&self) -> String {
        format!("{}{}", self.disambiguation_prefix, self.canonical_root)
    }

    fn is_canonical(&self, path: &DottedPath) -> bool {
        path.first() == self.canonical_root
    }

    /// Importable location of a namespace: canonical root renamed to the package
    #[must_use]
    pub fn import_path(&self, path: &DottedPath) -> DottedPath {
        if self.is_canonical(path) {
            path.with_prefixed_first(&self.disambiguation_prefix)
        } else {
            path.clone()
        }
    }

    /// Directory segments of a namespace below the emission root
    ///
    /// Only flat emission renames the canonical root; offset emission is
    /// already placed inside the package.
    #[must_use]
    pub fn directory(&self, path: &DottedPath, root_offset: Option<&[String]>) -> PathBuf {
        let physical = match root_offset {
            None => self.import_path(path),
            Some(_) => path.clone(),
        };
        physical.iter().collect()
    }
}

impl Default for RootLayout {
    fn default() -> Self {
        Self::new("keras", "tf_")
    }
}

/// Files written by one emission pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    /// Init files in node order
    pub files: Vec<PathBuf>,
}

impl EmitReport {
    /// Number of init files written
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if nothing was written
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Writes namespace init files for an [`ExportTree`]
#[derive(Debug, Clone)]
pub struct NamespaceEmitter {
    layout: RootLayout,
    header: String,
}

impl NamespaceEmitter {
    /// Create emitter with the default header
    #[inline]
    #[must_use]
    pub fn new(layout: RootLayout) -> Self {
        Self {
            layout,
            header: DEFAULT_HEADER.to_string(),
        }
    }

    /// With custom header line
    #[inline]
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Root layout in use
    #[inline]
    #[must_use]
    pub fn layout(&self) -> &RootLayout {
        &self.layout
    }

    /// Write one init file per node of `tree` under `target_root`
    ///
    /// Directories are created as needed; existing init files are
    /// overwritten. A failure partway leaves earlier files in place.
    ///
    /// # Errors
    /// - `InvalidOffset` if any offset segment is not an identifier
    /// - `Io` if a directory or file cannot be written
    pub fn emit(
        &self,
        tree: &ExportTree,
        target_root: &Path,
        root_offset: Option<&[String]>,
    ) -> Result<EmitReport, EmitError> {
        if let Some(offset) = root_offset {
            for seg in offset {
                validate_segment(seg).map_err(|source| EmitError::InvalidOffset {
                    offset: offset.join("."),
                    source,
                })?;
            }
        }

        fs::create_dir_all(target_root).map_err(|source| EmitError::Io {
            path: target_root.to_path_buf(),
            source,
        })?;

        let mut report = EmitReport::default();
        for node in tree.nodes() {
            let dir = target_root.join(self.layout.directory(node.path(), root_offset));
            fs::create_dir_all(&dir).map_err(|source| EmitError::Io {
                path: dir.clone(),
                source,
            })?;

            let file = dir.join(INIT_FILE);
            let contents = self.render(node, root_offset);
            tracing::debug!("...writing {}", file.display());
            fs::write(&file, contents).map_err(|source| EmitError::Io {
                path: file.clone(),
                source,
            })?;
            report.files.push(file);
        }

        tracing::info!(
            "wrote {} {} namespaces under {}",
            report.len(),
            tree.scheme(),
            target_root.display()
        );
        Ok(report)
    }

    /// Render the init file contents for one node
    ///
    /// Statements are sorted by text and deduplicated.
    #[must_use]
    pub fn render(&self, node: &NamespaceNode, root_offset: Option<&[String]>) -> String {
        let offset = root_offset.unwrap_or(&[]);
        let lines: BTreeSet<String> = node
            .entries()
            .iter()
            .map(|entry| match entry {
                Entry::Leaf {
                    symbol,
                    export_name,
                } => leaf_statement(symbol, export_name),
                Entry::Module {
                    submodule,
                    located_at,
                } => {
                    let location = self.layout.import_path(located_at).splice_after_first(offset);
                    format!("from {location} import {submodule}")
                }
            })
            .collect();

        let body: Vec<String> = lines.into_iter().collect();
        format!("\"\"\"{}\"\"\"\n\n{}\n", self.header, body.join("\n"))
    }
}

fn leaf_statement(symbol: &SymbolId, export_name: &str) -> String {
    if export_name == symbol.name() {
        format!("from {} import {}", symbol.module(), symbol.name())
    } else {
        format!(
            "from {} import {} as {}",
            symbol.module(),
            symbol.name(),
            export_name
        )
    }
}

/// Errors for init-file emission
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// Root offset contains an invalid segment
    #[error("invalid root offset '{offset}': {source}")]
    InvalidOffset {
        /// Offset as given
        offset: String,
        /// Segment error
        #[source]
        source: PathError,
    },

    /// Filesystem failure
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Directory or file being written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}
