//! Dual-root API generation
//!
//! Builds one export tree per naming scheme and emits three trees: the flat
//! package, the current-version tree and the legacy-version tree.

use crate::config::BuildConfig;
use crate::error::KexportError;
use kexport_symbol::{Scheme, SymbolRegistry};
use kexport_tree::{EmitReport, ExportTree, NamespaceEmitter, INIT_FILE};
use std::fs;
use std::path::{Path, PathBuf};

/// Which emission pass produced a set of files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Current scheme at the package root
    Flat,
    /// Current scheme under `api/<current_version_dir>`
    CurrentVersion,
    /// Legacy scheme under `api/<legacy_version_dir>`
    LegacyVersion,
}

/// Summary of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Per-pass emission reports in execution order
    pub passes: Vec<(Pass, EmitReport)>,
    /// Always-present empty init files at the top of the versioned roots
    pub scaffold: Vec<PathBuf>,
}

impl GenerationReport {
    /// Total number of files written
    #[must_use]
    pub fn files_written(&self) -> usize {
        self.passes.iter().map(|(_, r)| r.len()).sum::<usize>() + self.scaffold.len()
    }

    /// Report of one pass
    #[must_use]
    pub fn pass(&self, pass: Pass) -> Option<&EmitReport> {
        self.passes.iter().find(|(p, _)| *p == pass).map(|(_, r)| r)
    }
}

/// Drives tree building and the three emission passes
#[derive(Debug, Clone)]
pub struct DualRootOrchestrator {
    config: BuildConfig,
    emitter: NamespaceEmitter,
}

impl DualRootOrchestrator {
    /// Create orchestrator from configuration
    #[must_use]
    pub fn new(config: BuildConfig) -> Self {
        let emitter = NamespaceEmitter::new(config.layout()).with_header(config.header.clone());
        Self { config, emitter }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Package directory under an output root
    #[must_use]
    pub fn package_dir(&self, out_dir: &Path) -> PathBuf {
        out_dir.join(&self.config.package_name)
    }

    /// Generate all three API trees under `out_dir`
    ///
    /// The flat tree lands directly in `out_dir` (its canonical namespaces
    /// become `<package_name>/…`); the versioned trees land inside the
    /// package. Re-running over the same directory rewrites the same files.
    ///
    /// # Errors
    /// Tree construction or filesystem failures; nothing is rolled back.
    pub fn generate(
        &self,
        registry: &SymbolRegistry,
        out_dir: &Path,
    ) -> Result<GenerationReport, KexportError> {
        let current = ExportTree::build(registry, Scheme::Current)?;
        let legacy = ExportTree::build(registry, Scheme::Legacy)?;
        tracing::info!(
            "built export trees: {} current, {} legacy namespaces",
            current.len(),
            legacy.len()
        );

        let package_dir = self.package_dir(out_dir);
        let api_dir = package_dir.join(&self.config.api_dir);
        let current_root = api_dir.join(&self.config.current_version_dir);
        let legacy_root = api_dir.join(&self.config.legacy_version_dir);
        let current_offset = self.config.current_offset();
        let legacy_offset = self.config.legacy_offset();

        let mut report = GenerationReport::default();
        report
            .passes
            .push((Pass::Flat, self.emitter.emit(&current, out_dir, None)?));
        report.passes.push((
            Pass::CurrentVersion,
            self.emitter
                .emit(&current, &current_root, Some(current_offset.as_slice()))?,
        ));
        report.passes.push((
            Pass::LegacyVersion,
            self.emitter.emit(&legacy, &legacy_root, Some(legacy_offset.as_slice()))?,
        ));

        for dir in [&api_dir, &legacy_root, &current_root] {
            report.scaffold.push(write_empty_init(dir)?);
        }
        let package_init = package_dir.join(INIT_FILE);
        let flat_wrote_package_init = report
            .pass(Pass::Flat)
            .is_some_and(|flat| flat.files.contains(&package_init));
        if !flat_wrote_package_init {
            report.scaffold.push(write_empty_init(&package_dir)?);
        }

        tracing::info!("generated {} init files", report.files_written());
        Ok(report)
    }
}

fn write_empty_init(dir: &Path) -> Result<PathBuf, KexportError> {
    fs::create_dir_all(dir).map_err(|e| KexportError::io(dir, e))?;
    let file = dir.join(INIT_FILE);
    fs::write(&file, "").map_err(|e| KexportError::io(&file, e))?;
    Ok(file)
}
