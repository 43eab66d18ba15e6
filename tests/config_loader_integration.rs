//! Config loader integration tests

use ob_support::config::{ConfigLoader, CONFIG_PATH_ENV};
use ob_support::{HasReadOnlyAttributes, ReadOnlyPolicy};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;

#[test]
fn test_load_json_store_from_env_path() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("create temp config");
    write!(
        file,
        r#"{{"read_only": ["id"], "attributes": {{"id": 1, "name": "John"}}}}"#
    )
    .expect("write temp config");

    std::env::set_var(CONFIG_PATH_ENV, file.path());
    let loader = ConfigLoader::from_env();
    std::env::remove_var(CONFIG_PATH_ENV);

    assert_eq!(loader.path(), file.path());

    let mut store = loader.load_store().expect("load store");
    assert_eq!(store.keys(), vec!["id", "name"]);
    let policy = ReadOnlyPolicy::for_keys(["id"]);
    assert_eq!(store.read_only_attributes(), &policy);
    assert!(store.set("id", json!(2)).is_err());
    store.set("name", json!("Alice")).expect("name is writable");
    assert_eq!(store.to_json().unwrap(), json!({"id": 1, "name": "Alice"}));
}

#[test]
fn test_malformed_yaml_reports_path() {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("create temp config");
    writeln!(file, "attributes: [unclosed").expect("write temp config");

    let err = ConfigLoader::new(file.path()).load().unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse"));
    assert!(format!("{err:#}").contains("Invalid YAML attribute config"));
}
