use chrono::{DateTime, TimeZone, Utc};
use kexport_core::{
    BuildConfig, KexportError, ManifestError, PackageBuilder, Pass, ReleaseChannel, SymbolManifest,
};
use kexport_test_utils::read_tree;
use kexport_tree::TreeError;
use pretty_assertions::assert_eq;

const MANIFEST: &str = r#"{
  "version": "2.16.0",
  "symbols": [
    {
      "module": "tf_keras.src.engine.base_layer",
      "name": "Layer",
      "api_names": ["keras.layers.Layer"],
      "api_names_v1": ["keras.layers.Layer"]
    },
    {
      "module": "tf_keras.src.layers.core.dense",
      "name": "Dense",
      "bases": ["tf_keras.src.engine.base_layer.Layer"],
      "api_names": ["keras.layers.Dense"],
      "api_names_v1": ["keras.layers.Dense", "keras.layers.experimental.Dense"]
    },
    {
      "module": "tf_keras.src.engine.base_layer_v1",
      "name": "Layer",
      "bases": ["tf_keras.src.engine.base_layer.Layer"],
      "api_names": ["keras.layers.Layer"],
      "api_names_v1": ["keras.layers.Layer"]
    },
    {
      "module": "tf_keras.src.testing_infra.test_utils",
      "name": "layer_test",
      "api_names": ["keras.testing.layer_test"]
    },
    {
      "module": "tf_keras.src.utils.generic_utils",
      "name": "Progbar"
    },
    42
  ]
}"#;

const HEADER: &str = "\"\"\"AUTOGENERATED. DO NOT EDIT.\"\"\"\n\n";

fn at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 7, 5, 30, 0).unwrap()
}

fn manifest() -> SymbolManifest {
    SymbolManifest::from_json(MANIFEST).unwrap()
}

#[test]
fn nightly_build_generates_all_trees() {
    let dir = tempfile::tempdir().unwrap();
    let builder = PackageBuilder::new(BuildConfig::default(), ReleaseChannel::Nightly);

    let outcome = builder.build_at(&manifest(), dir.path(), at()).unwrap();
    assert_eq!(outcome.version, "2.16.0.dev2024030705");
    assert_eq!(outcome.distribution, "tf_keras-nightly");
    assert_eq!(outcome.package_dir, dir.path().join("tf_keras"));
    assert_eq!(outcome.discovery.uninspectable, 1);
    assert_eq!(outcome.discovery.skipped, 1);
    assert_eq!(outcome.discovery.unexported, 1);
    assert_eq!(outcome.admission.admitted, 2);
    assert_eq!(outcome.admission.overridden, 1);

    let files = read_tree(dir.path());
    assert_eq!(
        files["tf_keras/__init__.py"],
        format!("{HEADER}from tf_keras import layers\n\n\n__version__ = \"2.16.0.dev2024030705\"\n")
    );
    assert_eq!(
        files["tf_keras/layers/__init__.py"],
        format!(
            "{HEADER}from tf_keras.src.engine.base_layer import Layer\n\
             from tf_keras.src.layers.core.dense import Dense\n"
        )
    );
    assert_eq!(
        files["tf_keras/api/_v2/keras/__init__.py"],
        format!("{HEADER}from tf_keras.api._v2.keras import layers\n")
    );
    assert_eq!(
        files["tf_keras/api/_v1/keras/layers/__init__.py"],
        format!(
            "{HEADER}from tf_keras.api._v1.keras.layers import experimental\n\
             from tf_keras.src.engine.base_layer import Layer\n\
             from tf_keras.src.layers.core.dense import Dense\n"
        )
    );
    for scaffold in [
        "tf_keras/api/__init__.py",
        "tf_keras/api/_v1/__init__.py",
        "tf_keras/api/_v2/__init__.py",
    ] {
        assert_eq!(files[scaffold], "", "{scaffold}");
    }
    assert!(!files.contains_key("tf_keras/api/_v2/keras/layers/experimental/__init__.py"));
    assert!(!files.keys().any(|path| path.contains("testing")));
}

#[test]
fn rebuild_into_same_directory_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let builder = PackageBuilder::new(BuildConfig::default(), ReleaseChannel::Stable);

    let first_outcome = builder.build_at(&manifest(), dir.path(), at()).unwrap();
    let first = read_tree(dir.path());
    let second_outcome = builder.build_at(&manifest(), dir.path(), at()).unwrap();
    let second = read_tree(dir.path());

    assert_eq!(first, second);
    assert_eq!(first["tf_keras/__init__.py"].matches("__version__").count(), 1);
    assert_eq!(first_outcome.version, "2.16.0");
    assert_eq!(
        first_outcome.generation.pass(Pass::Flat),
        second_outcome.generation.pass(Pass::Flat)
    );
}

#[test]
fn legacy_only_rebuild_stamps_version_once() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = SymbolManifest::from_json(
        r#"{"version": "2.16.0",
            "symbols": [{"module": "m.core", "name": "f", "api_names_v1": ["keras.utils.f"]}]}"#,
    )
    .unwrap();
    let builder = PackageBuilder::new(BuildConfig::default(), ReleaseChannel::Stable);

    builder.build_at(&manifest, dir.path(), at()).unwrap();
    let first = read_tree(dir.path());
    builder.build_at(&manifest, dir.path(), at()).unwrap();
    let second = read_tree(dir.path());

    assert_eq!(first, second);
    assert_eq!(second["tf_keras/__init__.py"], "\n\n__version__ = \"2.16.0\"\n");
    assert!(second["tf_keras/api/_v1/keras/utils/__init__.py"].contains("from m.core import f\n"));
}

#[test]
fn release_candidate_uses_plain_distribution_name() {
    let dir = tempfile::tempdir().unwrap();
    let builder = PackageBuilder::new(
        BuildConfig::default(),
        ReleaseChannel::ReleaseCandidate("rc2".into()),
    );

    let outcome = builder.build_at(&manifest(), dir.path(), at()).unwrap();
    assert_eq!(outcome.version, "2.16.0rc2");
    assert_eq!(outcome.distribution, "tf_keras");
}

#[test]
fn manifest_without_version_uses_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = SymbolManifest::from_json(
        r#"{"symbols": [{"module": "m.core", "name": "f", "api_names": ["keras.utils.f"]}]}"#,
    )
    .unwrap();

    let outcome = PackageBuilder::new(BuildConfig::default(), ReleaseChannel::Stable)
        .build_at(&manifest, dir.path(), at())
        .unwrap();
    assert_eq!(outcome.version, kexport_core::FALLBACK_VERSION);
}

#[test]
fn malformed_export_path_aborts_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = SymbolManifest::from_json(
        r#"{"symbols": [{"module": "m.core", "name": "f", "api_names": ["keras..f"]}]}"#,
    )
    .unwrap();

    let result = PackageBuilder::new(BuildConfig::default(), ReleaseChannel::Stable)
        .build_at(&manifest, dir.path(), at());
    match result {
        Err(KexportError::Manifest(ManifestError::InvalidExportPath { path, .. })) => {
            assert_eq!(path, "keras..f");
        }
        other => panic!("expected invalid export path, got {other:?}"),
    }
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[test]
fn top_level_export_path_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let manifest = SymbolManifest::from_json(
        r#"{"symbols": [{"module": "m.core", "name": "f", "api_names": ["keras"]}]}"#,
    )
    .unwrap();

    let result = PackageBuilder::new(BuildConfig::default(), ReleaseChannel::Stable)
        .build_at(&manifest, dir.path(), at());
    assert!(matches!(
        result,
        Err(KexportError::Tree(TreeError::TopLevelExport { .. }))
    ));
}

#[test]
fn config_overrides_header_and_skip_list() {
    let dir = tempfile::tempdir().unwrap();
    let config = BuildConfig::from_toml(
        r#"
        header = "GENERATED"
        symbols_to_skip = []
        "#,
    )
    .unwrap();

    let outcome = PackageBuilder::new(config, ReleaseChannel::Stable)
        .build_at(&manifest(), dir.path(), at())
        .unwrap();
    assert_eq!(outcome.discovery.skipped, 0);

    let files = read_tree(dir.path());
    assert_eq!(
        files["tf_keras/api/_v2/keras/testing/__init__.py"],
        "\"\"\"GENERATED\"\"\"\n\n\
         from tf_keras.src.testing_infra.test_utils import layer_test\n"
    );
    assert!(files["tf_keras/__init__.py"].starts_with("\"\"\"GENERATED\"\"\""));
}
