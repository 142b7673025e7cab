//! Tests demonstrating layered configuration from multiple sources: config
//! files and environment variables, under each conflict policy.

use std::io::Write;

use strata::{Config, ConfigError, ConflictPolicy, MockEnv};
use tempfile::NamedTempFile;

fn create_temp_toml(content: &str) -> (NamedTempFile, String) {
    let mut file = NamedTempFile::with_suffix(".toml").unwrap();
    write!(file, "{}", content).unwrap();
    let path = file.path().to_str().unwrap().to_string();
    (file, path)
}

#[test]
fn test_env_overrides_file_last_wins() {
    let (_file, path) = create_temp_toml(
        r#"
        host = "0.0.0.0"
        port = 3000

        [database]
        url = "postgres://localhost/mydb"
        max_connections = 20
        "#,
    );

    let env = MockEnv::from_pairs([
        ("APP_PORT", "4000"),
        ("APP_DATABASE__TIMEOUT_SECS", "60"),
    ]);

    let config = Config::builder()
        .file(|f| f.path(path.as_str()))
        .env(|e| e.prefix("APP_").provider(env))
        .policy(ConflictPolicy::LastWins)
        .build()
        .unwrap();

    // File only: host
    assert_eq!(config.get("host"), Some("0.0.0.0"));
    // Env overrides file: port
    assert_eq!(config.get("port"), Some("4000"));
    // File only: database.url
    assert_eq!(config.get("database.url"), Some("postgres://localhost/mydb"));
    // Env only: database.timeout_secs
    assert_eq!(config.get("database.timeout_secs"), Some("60"));

    // The port override was recorded with both attributions.
    let port_override = config
        .overrides()
        .iter()
        .find(|o| o.path.to_string() == "port")
        .expect("port override recorded");
    assert_eq!(port_override.winning_layer, "env");
    assert_eq!(port_override.winning_value, "4000");
    assert_eq!(port_override.losing_value, "3000");
}

#[test]
fn test_first_wins_keeps_file_value() {
    let (_file, path) = create_temp_toml("port = 3000\n");
    let env = MockEnv::from_pairs([("APP_PORT", "4000")]);

    let config = Config::builder()
        .file(|f| f.path(path.as_str()))
        .env(|e| e.prefix("APP_").provider(env))
        .policy(ConflictPolicy::FirstWins)
        .build()
        .unwrap();

    assert_eq!(config.get("port"), Some("3000"));
    assert_eq!(config.overrides().len(), 1);
    assert_eq!(config.overrides()[0].losing_layer, "env");
}

#[test]
fn test_error_on_conflict_reports_both_layers() {
    let (_file, path) = create_temp_toml("port = 3000\n");
    let env = MockEnv::from_pairs([("APP_PORT", "4000")]);

    let err = Config::builder()
        .file(|f| f.path(path.as_str()).name("base"))
        .env(|e| e.prefix("APP_").provider(env))
        .policy(ConflictPolicy::ErrorOnConflict)
        .build()
        .unwrap_err();

    match err {
        ConfigError::Conflict(conflict) => {
            assert_eq!(conflict.path.to_string(), "port");
            assert_eq!(conflict.first_value, "3000");
            assert_eq!(conflict.first_layer, "base");
            assert_eq!(conflict.second_value, "4000");
            assert_eq!(conflict.second_layer, "env");
        }
        other => panic!("expected Conflict, got {other}"),
    }
}

#[test]
fn test_agreeing_layers_never_conflict() {
    let (_file, path) = create_temp_toml("port = 4000\n");
    let env = MockEnv::from_pairs([("APP_PORT", "4000")]);

    let config = Config::builder()
        .file(|f| f.path(path.as_str()))
        .env(|e| e.prefix("APP_").provider(env))
        .policy(ConflictPolicy::ErrorOnConflict)
        .build()
        .unwrap();

    assert_eq!(config.get("port"), Some("4000"));
    assert!(config.overrides().is_empty());
}

#[test]
fn test_provenance_survives_merge() {
    let (_file, path) = create_temp_toml("host = \"filehost\"\n");
    let env = MockEnv::from_pairs([("APP_PORT", "9000")]);

    let config = Config::builder()
        .file(|f| f.path(path.as_str()))
        .env(|e| e.prefix("APP_").provider(env))
        .build()
        .unwrap();

    assert!(config.provenance("host").is_some_and(|p| p.is_file()));
    assert!(config.provenance("port").is_some_and(|p| p.is_env()));
    assert_eq!(config.origin("port"), Some("env"));
}

#[test]
fn test_rebuild_required_to_observe_changes() {
    // Config is an immutable snapshot: growing the environment after build
    // changes nothing until a new Config is built.
    let mut env = MockEnv::from_pairs([("APP_A", "1")]);

    let first = Config::builder()
        .env(|e| e.prefix("APP_").provider(env.clone()))
        .build()
        .unwrap();
    assert_eq!(first.len(), 1);

    env.set("APP_B", "2");
    assert_eq!(first.len(), 1);

    let second = Config::builder()
        .env(|e| e.prefix("APP_").provider(env))
        .build()
        .unwrap();
    assert_eq!(second.len(), 2);
}

#[test]
fn test_three_layer_precedence_chain() {
    let (_base_file, base) = create_temp_toml("a = \"base\"\nb = \"base\"\nc = \"base\"\n");
    let (_site_file, site) = create_temp_toml("b = \"site\"\nc = \"site\"\n");
    let env = MockEnv::from_pairs([("APP_C", "env")]);

    let config = Config::builder()
        .file(|f| f.path(base.as_str()).name("base"))
        .file(|f| f.path(site.as_str()).name("site"))
        .env(|e| e.prefix("APP_").provider(env))
        .build()
        .unwrap();

    assert_eq!(config.get("a"), Some("base"));
    assert_eq!(config.get("b"), Some("site"));
    assert_eq!(config.get("c"), Some("env"));
    assert_eq!(config.overrides().len(), 3);
}
