//! Deduplicating registry of exportable symbols
//!
//! Provides [`SymbolRegistry`], which admits symbols that declare export paths
//! and drops subclasses that merely re-declare an ancestor's export metadata.

use crate::symbol::{Symbol, SymbolId};
use std::collections::BTreeMap;

/// Registry of admitted symbols, keyed by [`SymbolId`]
///
/// Admission is append-only: nothing is removed once admitted. Iteration is
/// in `SymbolId` order so downstream tree building is reproducible.
#[derive(Debug, Clone, Default)]
pub struct SymbolRegistry {
    symbols: BTreeMap<SymbolId, Symbol>,
}

/// Outcome of a single admission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Newly added
    Admitted,

    /// Same id and metadata were already admitted; no-op
    AlreadyAdmitted,

    /// Excluded as a non-exported override of an admitted ancestor
    Overridden {
        /// First ancestor in the chain carrying identical metadata
        ancestor: SymbolId,
    },
}

/// Counts from a bulk admission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdmissionSummary {
    /// Symbols added
    pub admitted: usize,
    /// Repeated registrations collapsed
    pub duplicates: usize,
    /// Overrides excluded
    pub overridden: usize,
}

impl SymbolRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            symbols: BTreeMap::new(),
        }
    }

    /// Admit one symbol
    ///
    /// The ancestor chain is checked in order against admitted symbols; the
    /// first ancestor with identical current and legacy path sets excludes
    /// the candidate.
    ///
    /// # Errors
    /// - `NoExportPaths` if the symbol declares no path in either scheme
    /// - `ConflictingRegistration` if the id is already admitted with
    ///   different metadata
    pub fn admit(&mut self, symbol: Symbol) -> Result<Admission, RegistryError> {
        if symbol.has_no_paths() {
            return Err(RegistryError::NoExportPaths {
                id: symbol.id().to_string(),
            });
        }

        if let Some(existing) = self.symbols.get(symbol.id()) {
            if existing.has_same_metadata(&symbol) {
                return Ok(Admission::AlreadyAdmitted);
            }
            return Err(RegistryError::ConflictingRegistration {
                id: symbol.id().to_string(),
            });
        }

        let overridden = symbol.ancestors().iter().find(|ancestor| {
            self.symbols
                .get(*ancestor)
                .is_some_and(|admitted| admitted.has_same_metadata(&symbol))
        });
        if let Some(ancestor) = overridden {
            tracing::debug!("skipping {}: override of {}", symbol.id(), ancestor);
            return Ok(Admission::Overridden {
                ancestor: ancestor.clone(),
            });
        }

        self.symbols.insert(symbol.id().clone(), symbol);
        Ok(Admission::Admitted)
    }

    /// Admit a batch of symbols independently of input order
    ///
    /// Candidates are admitted by ascending ancestor-chain length, then by
    /// id, so every ancestor is considered before its subclasses and ties
    /// break on defining-module path.
    ///
    /// # Errors
    /// Stops at the first contract violation (see [`SymbolRegistry::admit`]).
    pub fn admit_all(
        &mut self,
        symbols: impl IntoIterator<Item = Symbol>,
    ) -> Result<AdmissionSummary, RegistryError> {
        let mut candidates: Vec<Symbol> = symbols.into_iter().collect();
        candidates.sort_by(|a, b| {
            a.ancestors()
                .len()
                .cmp(&b.ancestors().len())
                .then_with(|| a.id().cmp(b.id()))
        });

        let mut summary = AdmissionSummary::default();
        for symbol in candidates {
            match self.admit(symbol)? {
                Admission::Admitted => summary.admitted += 1,
                Admission::AlreadyAdmitted => summary.duplicates += 1,
                Admission::Overridden { .. } => summary.overridden += 1,
            }
        }
        Ok(summary)
    }

    /// Lookup admitted symbol
    #[inline]
    #[must_use]
    pub fn get(&self, id: &SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Check if id is admitted
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &SymbolId) -> bool {
        self.symbols.contains_key(id)
    }

    /// All admitted symbols in id order
    #[inline]
    pub fn all(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    /// Number of admitted symbols
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// Errors for registry admission
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Symbol reached the registry without any export path
    #[error("symbol {id} declares no export paths")]
    NoExportPaths {
        /// Offending symbol
        id: String,
    },

    /// Same identity registered twice with different export metadata
    #[error("symbol {id} registered twice with different export paths")]
    ConflictingRegistration {
        /// Offending symbol
        id: String,
    },
}
