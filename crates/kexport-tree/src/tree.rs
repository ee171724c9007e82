//! Export tree: namespace path → namespace node
//!
//! Provides [`ExportTree`], built once per naming scheme from the admitted
//! symbols. Each node lists what its package-init must re-export.

use kexport_symbol::{DottedPath, Scheme, Symbol, SymbolId, SymbolRegistry};
use std::collections::{BTreeMap, BTreeSet};

/// One entry of a namespace node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// `export_name` resolves to `symbol` at this namespace
    Leaf {
        /// Symbol being re-exported
        symbol: SymbolId,
        /// Name it is exposed under
        export_name: String,
    },

    /// `submodule` must be importable at this namespace
    Module {
        /// Child package name
        submodule: String,
        /// Dotted namespace the child hangs off
        located_at: DottedPath,
    },
}

/// One directory-level package in the output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceNode {
    path: DottedPath,
    entries: Vec<Entry>,
    submodules: BTreeSet<String>,
}

impl NamespaceNode {
    fn new(path: DottedPath) -> Self {
        Self {
            path,
            entries: Vec::new(),
            submodules: BTreeSet::new(),
        }
    }

    /// Containing-namespace path of this node
    #[inline]
    #[must_use]
    pub fn path(&self) -> &DottedPath {
        &self.path
    }

    /// Entries in insertion order
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Leaf entries as `(symbol, export_name)` pairs
    pub fn leaves(&self) -> impl Iterator<Item = (&SymbolId, &str)> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Leaf {
                symbol,
                export_name,
            } => Some((symbol, export_name.as_str())),
            Entry::Module { .. } => None,
        })
    }

    /// Submodule names recorded at this node
    pub fn submodules(&self) -> impl Iterator<Item = &str> {
        self.submodules.iter().map(String::as_str)
    }

    fn push_leaf(&mut self, symbol: &SymbolId, export_name: &str) {
        let duplicate = self.leaves().any(|(s, n)| s == symbol && n == export_name);
        if duplicate {
            return;
        }
        if let Some((other, _)) = self.leaves().find(|(s, n)| *s != symbol && *n == export_name) {
            tracing::warn!(
                "{}.{} exported by both {} and {}",
                self.path,
                export_name,
                other,
                symbol
            );
        }
        self.entries.push(Entry::Leaf {
            symbol: symbol.clone(),
            export_name: export_name.to_string(),
        });
    }

    fn push_module(&mut self, submodule: &str, located_at: DottedPath) {
        if self.submodules.insert(submodule.to_string()) {
            self.entries.push(Entry::Module {
                submodule: submodule.to_string(),
                located_at,
            });
        }
    }
}

/// Mapping from containing-namespace path to namespace node
///
/// Nodes are created on demand while inserting paths and never removed.
/// Iteration is in namespace-path order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTree {
    scheme: Scheme,
    nodes: BTreeMap<DottedPath, NamespaceNode>,
}

impl ExportTree {
    /// Create empty tree for a scheme
    #[inline]
    #[must_use]
    pub fn new(scheme: Scheme) -> Self {
        Self {
            scheme,
            nodes: BTreeMap::new(),
        }
    }

    /// Build the tree for `scheme` from every admitted symbol
    ///
    /// # Errors
    /// `TopLevelExport` if any selected path has no containing namespace
    pub fn build(registry: &SymbolRegistry, scheme: Scheme) -> Result<Self, TreeError> {
        let mut tree = Self::new(scheme);
        for symbol in registry.all() {
            tree.insert_symbol(symbol)?;
        }
        tracing::debug!("{} tree: {} namespaces", scheme, tree.len());
        Ok(tree)
    }

    /// Insert every path of `symbol` under this tree's scheme
    ///
    /// # Errors
    /// `TopLevelExport` if any selected path has no containing namespace
    pub fn insert_symbol(&mut self, symbol: &Symbol) -> Result<(), TreeError> {
        for path in symbol.paths(self.scheme) {
            self.insert_path(symbol.id(), path)?;
        }
        Ok(())
    }

    /// Insert one export path for `symbol`
    ///
    /// For `s1.….sk` the leaf lands in `s1.….s(k-1)`, and every namespace
    /// `s1.….si` with `i < k-1` gets a module entry for `s(i+1)`.
    ///
    /// # Errors
    /// `TopLevelExport` if `path` has a single segment
    pub fn insert_path(&mut self, symbol: &SymbolId, path: &DottedPath) -> Result<(), TreeError> {
        let namespace = path.parent().ok_or_else(|| TreeError::TopLevelExport {
            symbol: symbol.to_string(),
            path: path.to_string(),
        })?;

        self.node_mut(&namespace).push_leaf(symbol, path.last());

        let segments = namespace.segments();
        for depth in 1..segments.len() {
            if let Some(ancestor) = namespace.prefix(depth) {
                self.node_mut(&ancestor)
                    .push_module(&segments[depth], ancestor.clone());
            }
        }
        Ok(())
    }

    fn node_mut(&mut self, path: &DottedPath) -> &mut NamespaceNode {
        self.nodes
            .entry(path.clone())
            .or_insert_with(|| NamespaceNode::new(path.clone()))
    }

    /// Scheme this tree was built for
    #[inline]
    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Lookup node by namespace path
    #[inline]
    #[must_use]
    pub fn get(&self, path: &DottedPath) -> Option<&NamespaceNode> {
        self.nodes.get(path)
    }

    /// All nodes in namespace-path order
    #[inline]
    pub fn nodes(&self) -> impl Iterator<Item = &NamespaceNode> {
        self.nodes.values()
    }

    /// Number of namespace nodes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Errors for tree construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Export path without a containing namespace
    #[error("export path '{path}' of {symbol} has no containing namespace")]
    TopLevelExport {
        /// Offending symbol
        symbol: String,
        /// Offending path
        path: String,
    },
}
