use kexport_symbol::{DottedPath, Symbol, SymbolId, SymbolRegistry};
use proptest::prelude::*;

fn id(i: usize) -> SymbolId {
    format!("pkg.mod{i}.Sym{i}").parse().unwrap()
}

fn own_path(i: usize) -> DottedPath {
    format!("keras.layers.Sym{i}").parse().unwrap()
}

/// A class hierarchy rooted at symbol 0. Each later symbol picks a parent
/// among the earlier ones and either re-declares the parent's paths or
/// declares its own.
fn hierarchy_strategy() -> impl Strategy<Value = (Vec<Symbol>, Vec<bool>)> {
    prop::collection::vec((any::<usize>(), any::<bool>()), 0..8).prop_map(|links| {
        let mut ancestors: Vec<Vec<SymbolId>> = vec![Vec::new()];
        let mut paths: Vec<DottedPath> = vec![own_path(0)];
        let mut inherits = vec![false];

        for (i, (pick, same)) in links.into_iter().enumerate() {
            let index = i + 1;
            let parent = pick % index;
            let mut chain = vec![id(parent)];
            chain.extend(ancestors[parent].iter().cloned());
            ancestors.push(chain);
            paths.push(if same { paths[parent].clone() } else { own_path(index) });
            inherits.push(same);
        }

        let symbols = (0..paths.len())
            .map(|i| {
                Symbol::new(id(i))
                    .with_ancestors(ancestors[i].clone())
                    .with_current_paths([paths[i].clone()])
                    .with_legacy_paths([paths[i].clone()])
            })
            .collect();
        (symbols, inherits)
    })
}

fn admitted_ids(registry: &SymbolRegistry) -> Vec<SymbolId> {
    registry.all().map(|symbol| symbol.id().clone()).collect()
}

proptest! {
    #[test]
    fn dotted_path_display_parses_back(
        segments in prop::collection::vec("[a-z_][a-z0-9_]{0,6}", 1..6)
    ) {
        let path = DottedPath::new(segments).unwrap();
        let reparsed: DottedPath = path.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, path);
    }

    #[test]
    fn admission_ignores_input_order(
        (symbols, shuffled) in hierarchy_strategy()
            .prop_flat_map(|(symbols, _)| (Just(symbols.clone()), Just(symbols).prop_shuffle()))
    ) {
        let mut ordered = SymbolRegistry::new();
        let mut mixed = SymbolRegistry::new();
        let ordered_summary = ordered.admit_all(symbols).unwrap();
        let mixed_summary = mixed.admit_all(shuffled).unwrap();

        prop_assert_eq!(ordered_summary, mixed_summary);
        prop_assert_eq!(admitted_ids(&ordered), admitted_ids(&mixed));
    }

    #[test]
    fn only_symbols_with_their_own_paths_are_admitted((symbols, inherits) in hierarchy_strategy()) {
        let mut registry = SymbolRegistry::new();
        let summary = registry.admit_all(symbols).unwrap();

        let expected: Vec<SymbolId> = inherits
            .iter()
            .enumerate()
            .filter(|(_, same)| !**same)
            .map(|(i, _)| id(i))
            .collect();
        let mut admitted = admitted_ids(&registry);
        admitted.sort();
        let mut expected_sorted = expected.clone();
        expected_sorted.sort();

        prop_assert_eq!(admitted, expected_sorted);
        prop_assert_eq!(summary.admitted, expected.len());
        prop_assert_eq!(summary.overridden, inherits.len() - expected.len());
    }
}
