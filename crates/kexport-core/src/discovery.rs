//! Symbol discovery from a JSON manifest
//!
//! Symbol discovery itself (loading the codebase and reading its export
//! annotations) happens outside this crate. Its output is a
//! [`SymbolManifest`]; this module turns manifest records into [`Symbol`]s,
//! skipping records that cannot be inspected and failing on malformed paths.

use crate::config::BuildConfig;
use crate::error::ManifestError;
use kexport_symbol::{DottedPath, Symbol, SymbolId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Source of candidate symbols for the registry
pub trait SymbolSource {
    /// Produce every exportable symbol, already filtered by `config`
    ///
    /// # Errors
    /// Contract violations in the source data (malformed export paths)
    fn discover(&self, config: &BuildConfig) -> Result<Discovery, ManifestError>;
}

/// Result of discovery
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Base version string reported by the codebase, if any
    pub version: Option<String>,
    /// Candidate symbols, each with at least one export path
    pub symbols: Vec<Symbol>,
    /// Records that were dropped
    pub stats: DiscoveryStats,
}

/// Counts of dropped records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryStats {
    /// Records that could not be inspected
    pub uninspectable: usize,
    /// Records on the skip list
    pub skipped: usize,
    /// Records without any export path
    pub unexported: usize,
}

/// Manifest written by the discovery step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymbolManifest {
    /// Base version of the codebase
    #[serde(default)]
    pub version: Option<String>,

    /// One record per candidate symbol; kept untyped so a single bad record
    /// does not reject the whole manifest
    #[serde(default)]
    pub symbols: Vec<Value>,
}

/// One manifest record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Defining module after source relocation
    #[serde(default)]
    pub module: Option<String>,
    /// Local name within the module
    #[serde(default)]
    pub name: Option<String>,
    /// Ancestor chain as `module.Name`, nearest first
    #[serde(default)]
    pub bases: Vec<String>,
    /// Current-scheme export paths
    #[serde(default)]
    pub api_names: Vec<String>,
    /// Legacy-scheme export paths
    #[serde(default)]
    pub api_names_v1: Vec<String>,
}

impl SymbolManifest {
    /// Read manifest from a JSON file
    ///
    /// # Errors
    /// `Read` or `Parse`
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parse manifest from JSON text
    ///
    /// # Errors
    /// `Parse` if the text is not a manifest object
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build a manifest from typed records
    #[must_use]
    pub fn from_records(version: Option<String>, records: &[SymbolRecord]) -> Self {
        Self {
            version,
            symbols: records
                .iter()
                .filter_map(|record| serde_json::to_value(record).ok())
                .collect(),
        }
    }
}

impl SymbolSource for SymbolManifest {
    fn discover(&self, config: &BuildConfig) -> Result<Discovery, ManifestError> {
        let mut discovery = Discovery {
            version: self.version.clone(),
            ..Discovery::default()
        };

        for (index, raw) in self.symbols.iter().enumerate() {
            let record: SymbolRecord = match serde_json::from_value(raw.clone()) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("[!] Could not inspect manifest record #{index}: {e}");
                    discovery.stats.uninspectable += 1;
                    continue;
                }
            };

            let Some(name) = record.name.as_deref() else {
                tracing::warn!("[!] Could not inspect manifest record #{index}: missing name");
                discovery.stats.uninspectable += 1;
                continue;
            };
            if config.symbols_to_skip.iter().any(|skip| skip == name) {
                tracing::debug!("skipping '{name}' (skip list)");
                discovery.stats.skipped += 1;
                continue;
            }

            let id = match record_identity(&record, name) {
                Ok(id) => id,
                Err(reason) => {
                    tracing::warn!("[!] Could not inspect symbol '{name}': {reason}");
                    discovery.stats.uninspectable += 1;
                    continue;
                }
            };
            let ancestors = match record
                .bases
                .iter()
                .map(|base| base.parse::<SymbolId>())
                .collect::<Result<Vec<_>, _>>()
            {
                Ok(ancestors) => ancestors,
                Err(e) => {
                    tracing::warn!("[!] Could not inspect bases of '{id}': {e}");
                    discovery.stats.uninspectable += 1;
                    continue;
                }
            };

            if record.api_names.is_empty() && record.api_names_v1.is_empty() {
                tracing::trace!("{id} declares no export paths");
                discovery.stats.unexported += 1;
                continue;
            }

            let current = parse_paths(&id, &record.api_names)?;
            let legacy = parse_paths(&id, &record.api_names_v1)?;
            tracing::debug!("...processing symbol '{id}'");
            discovery.symbols.push(
                Symbol::new(id)
                    .with_ancestors(ancestors)
                    .with_current_paths(current)
                    .with_legacy_paths(legacy),
            );
        }

        tracing::info!(
            "discovered {} exportable symbols ({} uninspectable, {} skipped, {} unexported)",
            discovery.symbols.len(),
            discovery.stats.uninspectable,
            discovery.stats.skipped,
            discovery.stats.unexported
        );
        Ok(discovery)
    }
}

impl SymbolSource for Vec<Symbol> {
    fn discover(&self, config: &BuildConfig) -> Result<Discovery, ManifestError> {
        let mut discovery = Discovery::default();
        for symbol in self {
            if config.symbols_to_skip.iter().any(|skip| skip == symbol.id().name()) {
                discovery.stats.skipped += 1;
            } else if symbol.has_no_paths() {
                discovery.stats.unexported += 1;
            } else {
                discovery.symbols.push(symbol.clone());
            }
        }
        Ok(discovery)
    }
}

fn record_identity(record: &SymbolRecord, name: &str) -> Result<SymbolId, String> {
    let module = record.module.as_deref().ok_or("missing module")?;
    let module: DottedPath = module.parse().map_err(|e| format!("module '{module}': {e}"))?;
    SymbolId::new(module, name).map_err(|e| format!("name: {e}"))
}

fn parse_paths(id: &SymbolId, raw: &[String]) -> Result<Vec<DottedPath>, ManifestError> {
    raw.iter()
        .map(|path| {
            path.parse().map_err(|source| ManifestError::InvalidExportPath {
                symbol: id.to_string(),
                path: path.clone(),
                source,
            })
        })
        .collect()
}
