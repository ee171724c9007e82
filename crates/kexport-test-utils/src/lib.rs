//! Testing utilities for kexport workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use kexport_symbol::{DottedPath, Symbol, SymbolId, SymbolRegistry};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub fn symbol_id(s: &str) -> SymbolId {
    s.parse().unwrap()
}

pub fn dotted(s: &str) -> DottedPath {
    s.parse().unwrap()
}

pub fn dotted_all(list: &[&str]) -> Vec<DottedPath> {
    list.iter().map(|s| dotted(s)).collect()
}

pub fn exported_symbol(id: &str, current: &[&str], legacy: &[&str]) -> Symbol {
    Symbol::new(symbol_id(id))
        .with_current_paths(dotted_all(current))
        .with_legacy_paths(dotted_all(legacy))
}

pub fn subclass_symbol(id: &str, ancestors: &[&str], current: &[&str], legacy: &[&str]) -> Symbol {
    exported_symbol(id, current, legacy)
        .with_ancestors(ancestors.iter().map(|a| symbol_id(a)).collect())
}

/// `Dense` exported at `keras.layers.Dense`, plus an experimental alias in the
/// legacy scheme.
pub fn dense_symbol() -> Symbol {
    exported_symbol(
        "tf_keras.src.layers.core.dense.Dense",
        &["keras.layers.Dense"],
        &["keras.layers.Dense", "keras.layers.experimental.Dense"],
    )
}

/// A small but representative symbol set: classes, an alias, a function,
/// a redundant subclass and a legacy-only symbol.
pub fn sample_symbols() -> Vec<Symbol> {
    vec![
        exported_symbol(
            "tf_keras.src.engine.base_layer.Layer",
            &["keras.layers.Layer"],
            &["keras.layers.Layer"],
        ),
        subclass_symbol(
            "tf_keras.src.layers.core.dense.Dense",
            &["tf_keras.src.engine.base_layer.Layer"],
            &["keras.layers.Dense"],
            &["keras.layers.Dense", "keras.layers.experimental.Dense"],
        ),
        subclass_symbol(
            "tf_keras.src.engine.base_layer_v1.Layer",
            &["tf_keras.src.engine.base_layer.Layer"],
            &["keras.layers.Layer"],
            &["keras.layers.Layer"],
        ),
        exported_symbol(
            "tf_keras.src.engine.input_layer.Input",
            &["keras.Input", "keras.layers.Input"],
            &["keras.Input", "keras.layers.Input"],
        ),
        exported_symbol(
            "tf_keras.src.losses.mean_squared_error",
            &["keras.losses.mean_squared_error", "keras.losses.mse", "keras.metrics.mse"],
            &["keras.losses.mean_squared_error", "keras.losses.mse"],
        ),
        exported_symbol(
            "tf_keras.src.legacy.saving.load_v1",
            &[],
            &["keras.__internal__.legacy.saving.load_v1"],
        ),
    ]
}

pub fn sample_registry() -> SymbolRegistry {
    let mut registry = SymbolRegistry::new();
    registry.admit_all(sample_symbols()).unwrap();
    registry
}

/// Every file under `root`, keyed by `/`-separated relative path
pub fn read_tree(root: &Path) -> BTreeMap<String, String> {
    let mut files = BTreeMap::new();
    collect(root, root, &mut files);
    files
}

fn collect(root: &Path, dir: &Path, files: &mut BTreeMap<String, String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let rel = path
                .strip_prefix(root)
                .unwrap()
                .iter()
                .map(|c| c.to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            files.insert(rel, fs::read_to_string(&path).unwrap());
        }
    }
}
