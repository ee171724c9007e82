//! kexport Core - API package generation
//!
//! The pipeline that:
//! - Reads discovered symbols from a manifest
//! - Deduplicates them in a [`SymbolRegistry`](kexport_symbol::SymbolRegistry)
//! - Builds current and legacy export trees
//! - Emits the flat package plus the two versioned API trees
//! - Stamps the release version into the package
//!
//! # Example
//!
//! ```rust,no_run
//! use kexport_core::{BuildConfig, PackageBuilder, ReleaseChannel, SymbolManifest};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), kexport_core::KexportError> {
//! let manifest = SymbolManifest::load(Path::new("symbols.json"))?;
//! let builder = PackageBuilder::new(BuildConfig::new(), ReleaseChannel::Nightly);
//! let outcome = builder.build(&manifest, Path::new("/tmp/keras_build"))?;
//!
//! println!("built {} {}", outcome.distribution, outcome.version);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod orchestrator;
pub mod package;
pub mod release;

// Re-exports for convenience
pub use config::BuildConfig;
pub use discovery::{Discovery, DiscoveryStats, SymbolManifest, SymbolRecord, SymbolSource};
pub use error::{ConfigError, KexportError, ManifestError};
pub use orchestrator::{DualRootOrchestrator, GenerationReport, Pass};
pub use package::{PackageBuilder, PackageOutcome, FALLBACK_VERSION};
pub use release::{stamp_version, ReleaseChannel};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with kexport Core
    pub use crate::{
        BuildConfig, DualRootOrchestrator, KexportError, PackageBuilder, ReleaseChannel,
        SymbolManifest, SymbolSource,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
