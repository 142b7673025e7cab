//! Typed reads over a resolved configuration.

use std::net::IpAddr;

use strata::{Config, ConfigError, MockEnv};

fn config_from(pairs: &[(&str, &str)]) -> Config {
    Config::builder()
        .env(|e| e.prefix("APP_").provider(MockEnv::from_pairs(pairs.iter().copied())))
        .build()
        .unwrap()
}

#[test]
fn test_get_typed_integer() {
    let config = config_from(&[("APP_PORT", "42")]);
    assert_eq!(config.get_typed::<u16, _>("port").unwrap(), 42);
}

#[test]
fn test_get_typed_rejects_garbage() {
    let config = config_from(&[("APP_PORT", "abc")]);
    let err = config.get_typed::<u16, _>("port").unwrap_err();
    match err {
        ConfigError::InvalidValue { raw, target, .. } => {
            assert_eq!(raw, "abc");
            assert!(target.contains("u16"));
        }
        other => panic!("expected InvalidValue, got {other}"),
    }
}

#[test]
fn test_get_typed_is_recoverable() {
    // A failed typed read leaves the config usable; callers can fall back.
    let config = config_from(&[("APP_PORT", "not-a-port")]);
    let port = config.get_typed::<u16, _>("port").unwrap_or(8080);
    assert_eq!(port, 8080);
    assert_eq!(config.get("port"), Some("not-a-port"));
}

#[test]
fn test_get_typed_other_fromstr_types() {
    let config = config_from(&[
        ("APP_BIND", "127.0.0.1"),
        ("APP_DEBUG", "true"),
        ("APP_RATIO", "0.5"),
    ]);

    assert_eq!(
        config.get_typed::<IpAddr, _>("bind").unwrap(),
        "127.0.0.1".parse::<IpAddr>().unwrap()
    );
    assert!(config.get_typed::<bool, _>("debug").unwrap());
    assert_eq!(config.get_typed::<f64, _>("ratio").unwrap(), 0.5);
}

#[test]
fn test_get_typed_missing_path() {
    let config = config_from(&[]);
    assert!(matches!(
        config.get_typed::<u16, _>("port"),
        Err(ConfigError::Missing { .. })
    ));
}
