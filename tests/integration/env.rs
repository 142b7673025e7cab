//! Environment layer behaviour through the public builder API.

use strata::{Config, MockEnv};

#[test]
fn test_prefix_delimiter_convention() {
    let env = MockEnv::from_pairs([("APP_DB__HOST", "localhost")]);

    let config = Config::builder()
        .env(|e| e.prefix("APP_").delimiter("__").provider(env))
        .build()
        .unwrap();

    // APP_DB__HOST maps to db.host; the value is passed through untouched.
    assert_eq!(config.get("db.host"), Some("localhost"));
    assert_eq!(config.len(), 1);
}

#[test]
fn test_segments_fold_to_lower_case_by_default() {
    let env = MockEnv::from_pairs([("APP_SERVER__MAX_RETRIES", "3")]);

    let config = Config::builder()
        .env(|e| e.prefix("APP_").provider(env))
        .build()
        .unwrap();

    assert_eq!(config.get("server.max_retries"), Some("3"));
    assert_eq!(config.get("SERVER.MAX_RETRIES"), None);
}

#[test]
fn test_unrelated_variables_are_invisible() {
    let env = MockEnv::from_pairs([
        ("HOME", "/home/user"),
        ("PATH", "/usr/bin"),
        ("APPLES", "5"),
    ]);

    let config = Config::builder()
        .env(|e| e.prefix("APP_").provider(env))
        .build()
        .unwrap();

    assert!(config.is_empty());
}

#[test]
fn test_empty_environment_builds_empty_config() {
    let config = Config::builder()
        .env(|e| e.prefix("APP_").provider(MockEnv::new()))
        .build()
        .unwrap();

    assert!(config.is_empty());
    assert_eq!(config.get("anything"), None);
}
