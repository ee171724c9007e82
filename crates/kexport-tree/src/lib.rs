//! kexport Namespace Tree
//!
//! Turns admitted symbols into a directory-shaped namespace tree and writes
//! the package-init files that realize it.
//!
//! # Overview
//!
//! - **ExportTree**: namespace path → node, built per naming scheme
//! - **NamespaceNode**: leaf re-exports plus submodule imports for one package
//! - **NamespaceEmitter**: sorted, deduplicated `__init__.py` per node, flat or
//!   re-rooted under a version offset
//!
//! # Example
//!
//! ```rust
//! use kexport_symbol::{Scheme, SymbolId};
//! use kexport_tree::{ExportTree, NamespaceEmitter, RootLayout};
//!
//! let dense: SymbolId = "tf_keras.src.layers.core.dense.Dense".parse().unwrap();
//! let mut tree = ExportTree::new(Scheme::Current);
//! tree.insert_path(&dense, &"keras.layers.Dense".parse().unwrap()).unwrap();
//!
//! let emitter = NamespaceEmitter::new(RootLayout::default());
//! let node = tree.get(&"keras.layers".parse().unwrap()).unwrap();
//! assert!(emitter.render(node, None).contains("import Dense"));
//! ```

#![warn(missing_docs)]

pub mod emitter;
pub mod tree;

// Re-exports
pub use emitter::{EmitError, EmitReport, NamespaceEmitter, RootLayout, DEFAULT_HEADER, INIT_FILE};
pub use tree::{Entry, ExportTree, NamespaceNode, TreeError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
