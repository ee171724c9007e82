use kexport_symbol::Scheme;
use kexport_test_utils::{read_tree, sample_registry};
use kexport_tree::{EmitError, ExportTree, NamespaceEmitter, RootLayout, INIT_FILE};
use pretty_assertions::assert_eq;
use std::fs;

fn offset(s: &str) -> Vec<String> {
    s.split('.').map(String::from).collect()
}

fn emitter() -> NamespaceEmitter {
    NamespaceEmitter::new(RootLayout::default())
}

#[test]
fn flat_emission_writes_prefixed_package() {
    let dir = tempfile::tempdir().unwrap();
    let tree = ExportTree::build(&sample_registry(), Scheme::Current).unwrap();

    let report = emitter().emit(&tree, dir.path(), None).unwrap();
    assert_eq!(report.len(), tree.len());

    let files = read_tree(dir.path());
    assert_eq!(
        files.keys().cloned().collect::<Vec<_>>(),
        vec![
            "tf_keras/__init__.py",
            "tf_keras/layers/__init__.py",
            "tf_keras/losses/__init__.py",
            "tf_keras/metrics/__init__.py",
        ]
    );
    assert_eq!(
        files["tf_keras/__init__.py"],
        "\"\"\"AUTOGENERATED. DO NOT EDIT.\"\"\"\n\n\
         from tf_keras import layers\n\
         from tf_keras import losses\n\
         from tf_keras import metrics\n\
         from tf_keras.src.engine.input_layer import Input\n"
    );
    assert_eq!(
        files["tf_keras/losses/__init__.py"],
        "\"\"\"AUTOGENERATED. DO NOT EDIT.\"\"\"\n\n\
         from tf_keras.src.losses import mean_squared_error\n\
         from tf_keras.src.losses import mean_squared_error as mse\n"
    );
}

#[test]
fn emission_is_byte_identical_across_runs() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();

    let tree_a = ExportTree::build(&sample_registry(), Scheme::Legacy).unwrap();
    let tree_b = ExportTree::build(&sample_registry(), Scheme::Legacy).unwrap();
    emitter().emit(&tree_a, first.path(), None).unwrap();
    emitter().emit(&tree_b, second.path(), None).unwrap();

    assert_eq!(read_tree(first.path()), read_tree(second.path()));
}

#[test]
fn version_offsets_differ_only_in_offset_segments() {
    let v1_root = tempfile::tempdir().unwrap();
    let v2_root = tempfile::tempdir().unwrap();
    let tree = ExportTree::build(&sample_registry(), Scheme::Legacy).unwrap();

    emitter()
        .emit(&tree, v1_root.path(), Some(offset("api._v1.keras").as_slice()))
        .unwrap();
    emitter()
        .emit(&tree, v2_root.path(), Some(offset("api._v2.keras").as_slice()))
        .unwrap();

    let v1 = read_tree(v1_root.path());
    let v2 = read_tree(v2_root.path());
    assert_eq!(v1.keys().collect::<Vec<_>>(), v2.keys().collect::<Vec<_>>());
    for (path, contents) in &v1 {
        assert_eq!(contents.replace("._v1.", "._v2."), v2[path]);
    }
    assert!(v1.contains_key("keras/__internal__/legacy/saving/__init__.py"));
    assert!(v1["keras/layers/__init__.py"]
        .contains("from tf_keras.api._v1.keras.layers import experimental\n"));
}

#[test]
fn emission_overwrites_existing_files_and_reuses_directories() {
    let dir = tempfile::tempdir().unwrap();
    let stale_dir = dir.path().join("tf_keras").join("layers");
    fs::create_dir_all(&stale_dir).unwrap();
    fs::write(stale_dir.join(INIT_FILE), "stale contents").unwrap();

    let tree = ExportTree::build(&sample_registry(), Scheme::Current).unwrap();
    emitter().emit(&tree, dir.path(), None).unwrap();
    let first = read_tree(dir.path());
    emitter().emit(&tree, dir.path(), None).unwrap();

    assert!(!first["tf_keras/layers/__init__.py"].contains("stale"));
    assert_eq!(first, read_tree(dir.path()));
}

#[test]
fn unwritable_target_root_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let tree = ExportTree::build(&sample_registry(), Scheme::Current).unwrap();
    let result = emitter().emit(&tree, &blocker.join("out"), None);

    match result {
        Err(EmitError::Io { path, .. }) => assert!(path.starts_with(&blocker)),
        other => panic!("expected io error, got {other:?}"),
    }
}
