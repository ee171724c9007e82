//! End-to-end package generation
//!
//! Linear pipeline: discovery → registry → export trees → three emission
//! passes → version stamp. Nothing is persisted between stages and there is
//! no retry; recovery is a re-run into a clean output directory.

use crate::config::BuildConfig;
use crate::discovery::{DiscoveryStats, SymbolSource};
use crate::error::KexportError;
use crate::orchestrator::{DualRootOrchestrator, GenerationReport};
use crate::release::{stamp_version, ReleaseChannel};
use chrono::{DateTime, Utc};
use kexport_symbol::{AdmissionSummary, SymbolRegistry};
use std::path::{Path, PathBuf};

/// Version used when the symbol source does not report one
pub const FALLBACK_VERSION: &str = "0.0.0";

/// Outcome of [`PackageBuilder::build`]
#[derive(Debug, Clone)]
pub struct PackageOutcome {
    /// Generated package directory
    pub package_dir: PathBuf,
    /// Final version string
    pub version: String,
    /// Distribution name for the channel
    pub distribution: String,
    /// Records dropped during discovery
    pub discovery: DiscoveryStats,
    /// Registry admission counts
    pub admission: AdmissionSummary,
    /// Files written per pass
    pub generation: GenerationReport,
}

/// Builds the namespace package for one release channel
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    orchestrator: DualRootOrchestrator,
    channel: ReleaseChannel,
}

impl PackageBuilder {
    /// Create builder
    #[must_use]
    pub fn new(config: BuildConfig, channel: ReleaseChannel) -> Self {
        Self {
            orchestrator: DualRootOrchestrator::new(config),
            channel,
        }
    }

    /// Run the pipeline into `out_dir`, stamping the version as of now
    ///
    /// # Errors
    /// The first contract violation or filesystem failure
    pub fn build(&self, source: &impl SymbolSource, out_dir: &Path) -> Result<PackageOutcome, KexportError> {
        self.build_at(source, out_dir, Utc::now())
    }

    /// Run the pipeline with an explicit build time
    ///
    /// # Errors
    /// The first contract violation or filesystem failure
    pub fn build_at(
        &self,
        source: &impl SymbolSource,
        out_dir: &Path,
        now: DateTime<Utc>,
    ) -> Result<PackageOutcome, KexportError> {
        let config = self.orchestrator.config();
        tracing::info!("# Compiling list of symbols to export ({})", self.channel);
        let discovery = source.discover(config)?;

        let mut registry = SymbolRegistry::new();
        let admission = registry.admit_all(discovery.symbols)?;
        tracing::info!(
            "registry: {} admitted, {} duplicates, {} overrides skipped",
            admission.admitted,
            admission.duplicates,
            admission.overridden
        );

        tracing::info!("# Writing out API files");
        let generation = self.orchestrator.generate(&registry, out_dir)?;

        let base = discovery.version.as_deref().unwrap_or(FALLBACK_VERSION);
        let version = self.channel.version(base, now);
        let package_dir = self.orchestrator.package_dir(out_dir);
        stamp_version(&package_dir, &version)?;

        Ok(PackageOutcome {
            package_dir,
            version,
            distribution: self.channel.distribution_name(&config.package_name),
            discovery: discovery.stats,
            admission,
            generation,
        })
    }
}
