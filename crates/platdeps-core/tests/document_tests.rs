//! Loading, validating and saving platform dependency documents.

use std::fs;
use std::path::PathBuf;

use platdeps_core::{Error, ErrorKind, ModelDocument, PlatformDependenciesModel};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

#[test]
fn test_load_basic_document() {
    let model = PlatformDependenciesModel::from_file(fixture_path("basic.json")).unwrap();

    assert_eq!(model.product_version().to_string(), "8.0.100");
    assert_eq!(model.product_version().sdk_feature_band(), 100);
    assert_eq!(
        model.dependency_usages().keys().collect::<Vec<_>>(),
        ["custom", "default"]
    );

    let rids: Vec<&str> = model.iter_platforms().map(|p| p.rid()).collect();
    assert_eq!(rids, ["root", "child", "grandchild"]);
}

#[test]
fn test_duplicate_rid_anywhere_in_tree() {
    let err = PlatformDependenciesModel::from_file(fixture_path("duplicate-platforms.json"))
        .unwrap_err();
    assert_eq!(err.to_string(), "Duplicate platforms were found with RID 'ubuntu'.");
}

#[test]
fn test_blank_file_names_its_path() {
    let path = fixture_path("empty-file.json");
    let err = PlatformDependenciesModel::from_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(matches!(&err, Error::EmptyDocument { path: p } if *p == path));
}

#[test]
fn test_override_with_wrong_type_is_unresolved() {
    let err = PlatformDependenciesModel::from_file(fixture_path("unresolved-override.json"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Platform dependency with type 'LinuxPackage' and ID 'icu-libs' overrides a dependency with type 'Library' and ID 'libicu' that doesn't exist in its platform hierarchy."
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.json");

    let err = PlatformDependenciesModel::from_file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().contains("missing.json"));
}

#[rstest]
#[case::usage_not_set(
    r#"{ "name": "dep1", "dependency-type": "LinuxPackage" }"#,
    "Usage must be set for platform dependencies that do not have an override set."
)]
#[case::undefined_usage(
    r#"{ "name": "dep1", "dependency-type": "LinuxPackage", "usage": "tests" }"#,
    "Platform dependency with type 'LinuxPackage' and ID 'dep1' references a dependency usage 'tests' that is undefined."
)]
#[case::override_not_found(
    r#"{ "name": "dep1", "overrides": { "id": "dep0", "dependency-type": "Executable" } }"#,
    "Platform dependency with type '' and ID 'dep1' overrides a dependency with type 'Executable' and ID 'dep0' that doesn't exist in its platform hierarchy."
)]
fn test_invalid_dependencies(#[case] dependency: &str, #[case] message: &str) {
    let text = format!(
        r#"{{
            "product-version": "1.0.0",
            "dependency-usages": {{ "default": "" }},
            "platforms": [
                {{
                    "rid": "linux",
                    "components": [
                        {{ "name": "runtime", "type": "SharedFramework", "dependencies": [{dependency}] }}
                    ]
                }}
            ]
        }}"#
    );
    let err = PlatformDependenciesModel::from_json_str(&text).unwrap_err();
    assert_eq!(err.to_string(), message);
}

#[test]
fn test_save_and_reload() {
    let original = PlatformDependenciesModel::from_file(fixture_path("basic.json")).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("saved.json");
    fs::write(&path, original.to_json_string().unwrap()).unwrap();

    let reloaded = PlatformDependenciesModel::from_file(&path).unwrap();
    assert_eq!(reloaded, original);

    let expected: ModelDocument =
        serde_json::from_str(&fs::read_to_string(fixture_path("basic.json")).unwrap()).unwrap();
    assert_eq!(reloaded.to_document().unwrap(), expected);
}
