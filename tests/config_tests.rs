//! Integration tests for loading routing configuration from files

use std::io::Write;
use storefront::prelude::*;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_config(
        r#"
route_collection_limit: 100
routes:
  product:
    field: slug
    prefix: /products
  taxon:
    field: permalink
    prefix: /t/
"#,
    );

    let config = RoutingConfig::from_yaml_file(file.path()).unwrap();

    assert_eq!(config.collection_limit(), Some(100));
    assert_eq!(config.routes.len(), 2);
    assert_eq!(config.route_for("taxon").unwrap().static_prefix(), "/t");
}

#[test]
fn test_missing_file() {
    let err = RoutingConfig::from_yaml_file("/nonexistent/routing.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn test_malformed_file_names_the_file() {
    let file = write_config("routes: [not, a, map");

    let err = RoutingConfig::from_yaml_file(file.path()).unwrap_err();

    match err {
        ConfigError::ParseError { file: Some(path), .. } => {
            assert_eq!(path, file.path().display().to_string());
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_route_without_field_is_rejected() {
    let file = write_config("routes:\n  product:\n    prefix: /products\n");
    assert!(RoutingConfig::from_yaml_file(file.path()).is_err());
}

#[test]
fn test_server_builder_loads_file() {
    let file = write_config("routes:\n  product:\n    field: slug\n    prefix: /products\n");

    let result = ServerBuilder::new()
        .with_config_file(file.path())
        .unwrap()
        .register_repository("product", InMemoryRepository::new())
        .with_locale_provider(StaticLocaleProvider::new(["en"], "en"))
        .build();

    assert!(result.is_ok());
}

#[test]
fn test_server_builder_reports_config_error() {
    let err = ServerBuilder::new()
        .with_config_file("/nonexistent/routing.yaml")
        .err()
        .unwrap();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[test]
fn test_merged_files_override_by_class() {
    let base = write_config(
        "routes:\n  product:\n    field: slug\n    prefix: /products\n  taxon:\n    field: code\n    prefix: /taxons\n",
    );
    let overrides = write_config("route_collection_limit: 5\nroutes:\n  product:\n    field: code\n    prefix: /p\n");

    let merged = RoutingConfig::merge(vec![
        RoutingConfig::from_yaml_file(base.path()).unwrap(),
        RoutingConfig::from_yaml_file(overrides.path()).unwrap(),
    ]);

    assert_eq!(merged.routes.keys().collect::<Vec<_>>(), vec!["product", "taxon"]);
    assert_eq!(merged.route_for("product").unwrap(), &RouteConfig::new("code", "/p"));
    assert_eq!(merged.collection_limit(), Some(5));
}
