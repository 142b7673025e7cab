//! File layer behaviour through the public builder API.

use std::io::Write;

use strata::{Config, ConfigError};
use tempfile::NamedTempFile;

fn create_temp(suffix: &str, content: &str) -> (NamedTempFile, String) {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    write!(file, "{}", content).unwrap();
    let path = file.path().to_str().unwrap().to_string();
    (file, path)
}

#[test]
fn test_optional_missing_file_resolves_empty() {
    let config = Config::builder()
        .file(|f| f.path("/nonexistent/app.toml").optional())
        .build()
        .unwrap();

    assert!(config.is_empty());
}

#[test]
fn test_required_missing_file_fails_with_layer_name() {
    let err = Config::builder()
        .file(|f| f.path("/nonexistent/app.toml"))
        .build()
        .unwrap_err();

    match err {
        ConfigError::SourceUnavailable { layer, path, .. } => {
            assert_eq!(layer, "/nonexistent/app.toml");
            assert_eq!(path, "/nonexistent/app.toml");
        }
        other => panic!("expected SourceUnavailable, got {other}"),
    }
}

#[test]
fn test_malformed_file_fails_with_parse_error() {
    let (_file, path) = create_temp(".toml", "this is not toml = = =");

    let err = Config::builder()
        .file(|f| f.path(path.as_str()).name("broken"))
        .build()
        .unwrap_err();

    match err {
        ConfigError::Parse { layer, message } => {
            assert_eq!(layer, "broken");
            assert!(!message.is_empty());
        }
        other => panic!("expected Parse, got {other}"),
    }
}

#[test]
fn test_json_and_toml_both_supported() {
    let (_toml_file, toml_path) = create_temp(".toml", "from_toml = 1\n");
    let (_json_file, json_path) = create_temp(".json", r#"{"from_json": 2}"#);

    let config = Config::builder()
        .file(|f| f.path(toml_path.as_str()))
        .file(|f| f.path(json_path.as_str()))
        .build()
        .unwrap();

    assert_eq!(config.get("from_toml"), Some("1"));
    assert_eq!(config.get("from_json"), Some("2"));
}

#[test]
fn test_fallback_paths_pick_first_existing() {
    let (_file, path) = create_temp(".toml", "picked = \"yes\"\n");

    let config = Config::builder()
        .file(|f| {
            f.path("/nonexistent/preferred.toml")
                .path(path.as_str())
                .optional()
        })
        .build()
        .unwrap();

    assert_eq!(config.get("picked"), Some("yes"));
}

#[test]
fn test_nested_tables_flatten_to_dotted_paths() {
    let (_file, path) = create_temp(
        ".toml",
        r#"
        [server]
        host = "0.0.0.0"

        [server.tls]
        cert = "/etc/cert.pem"
        "#,
    );

    let config = Config::builder()
        .file(|f| f.path(path.as_str()))
        .build()
        .unwrap();

    assert_eq!(config.get("server.host"), Some("0.0.0.0"));
    assert_eq!(config.get("server.tls.cert"), Some("/etc/cert.pem"));
    // Partial paths are not values.
    assert_eq!(config.get("server"), None);
}

#[test]
fn test_scalar_root_json_is_a_parse_error() {
    let (_file, path) = create_temp(".json", "42");

    let err = Config::builder()
        .file(|f| f.path(path.as_str()).name("scalar"))
        .build()
        .unwrap_err();

    match err {
        ConfigError::Parse { layer, message } => {
            assert_eq!(layer, "scalar");
            assert!(message.contains("scalar"));
        }
        other => panic!("expected Parse, got {other}"),
    }
}

#[test]
fn test_arrays_flatten_with_index_segments() {
    let (_file, path) = create_temp(".toml", "hosts = [\"a\", \"b\"]\n");

    let config = Config::builder()
        .file(|f| f.path(path.as_str()))
        .build()
        .unwrap();

    assert_eq!(config.get("hosts.0"), Some("a"));
    assert_eq!(config.get("hosts.1"), Some("b"));
}
