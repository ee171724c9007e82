//! kexport Symbol System
//!
//! Exportable symbols and the registry that decides which ones reach the
//! generated namespace.
//!
//! # Overview
//!
//! The symbol system provides:
//! - **DottedPath**: validated dotted export paths and module paths
//! - **Symbol**: a symbol with its ancestor chain and current/legacy paths
//! - **SymbolRegistry**: deduplicated, deterministic set of exportable symbols
//!
//! # Example
//!
//! ```rust
//! use kexport_symbol::{Admission, DottedPath, Symbol, SymbolRegistry};
//!
//! let path: DottedPath = "keras.layers.Dense".parse().unwrap();
//! let dense = Symbol::new("tf_keras.src.layers.core.dense.Dense".parse().unwrap())
//!     .with_current_paths([path.clone()])
//!     .with_legacy_paths([path]);
//!
//! let mut registry = SymbolRegistry::new();
//! assert_eq!(registry.admit(dense).unwrap(), Admission::Admitted);
//! assert_eq!(registry.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod path;
pub mod registry;
pub mod symbol;

// Re-exports
pub use path::{DottedPath, PathError};
pub use registry::{Admission, AdmissionSummary, RegistryError, SymbolRegistry};
pub use symbol::{Scheme, Symbol, SymbolId};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for symbol operations
    pub use crate::{Admission, DottedPath, Scheme, Symbol, SymbolId, SymbolRegistry};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
