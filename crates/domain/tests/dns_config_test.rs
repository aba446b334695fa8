use iterdns_domain::config::{LogFormat, ResolverSettings};
use iterdns_domain::{CliOverrides, Config, ConfigError};
use std::io::Write;
use std::net::SocketAddr;

#[test]
fn test_resolver_default_values() {
    let settings = ResolverSettings::default();

    assert_eq!(settings.query_timeout_ms, 3000);
    assert_eq!(settings.upstream_port, 53);
    assert_eq!(settings.max_nested_depth, 4);
    assert_eq!(settings.fallback_rounds, 1);
    assert!(!settings.ipv6_targets);
}

#[test]
fn test_config_defaults_are_valid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.server.dns_port, 53);
    assert!(config.cache.enabled);
    assert_eq!(config.root_hints.path, "root-hints.json");
    assert!(config.root_hints.bootstrap_server.is_none());
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Text);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = Config::from_toml(
        r#"
        [resolver]
        query_timeout_ms = 500

        [logging]
        format = "json"
        "#,
    )
    .unwrap();

    assert_eq!(config.resolver.query_timeout_ms, 500);
    assert_eq!(config.resolver.fallback_rounds, 1);
    assert_eq!(config.server.dns_port, 53);
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let result = Config::from_toml("[resolver\nquery_timeout_ms = ");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_validate_rejects_zero_timeout() {
    let mut config = Config::default();
    config.resolver.query_timeout_ms = 0;

    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_unbounded_fallback() {
    let mut config = Config::default();
    config.resolver.fallback_rounds = 10;

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_nested_depth() {
    let mut config = Config::default();
    config.resolver.max_nested_depth = 0;

    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_bad_bootstrap_server() {
    let mut config = Config::default();
    config.root_hints.bootstrap_server = Some("not-an-address".to_string());

    assert!(config.validate().is_err());
}

#[test]
fn test_bootstrap_addr_accepts_bare_ip() {
    let mut config = Config::default();
    config.root_hints.bootstrap_server = Some("172.18.1.92".to_string());

    let addr = config.root_hints.bootstrap_addr(53).unwrap();
    assert_eq!(addr, Some("172.18.1.92:53".parse::<SocketAddr>().unwrap()));
}

#[test]
fn test_bootstrap_addr_keeps_explicit_port() {
    let mut config = Config::default();
    config.root_hints.bootstrap_server = Some("127.0.0.1:5300".to_string());

    let addr = config.root_hints.bootstrap_addr(53).unwrap();
    assert_eq!(addr, Some("127.0.0.1:5300".parse::<SocketAddr>().unwrap()));
}

#[test]
fn test_load_applies_cli_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\ndns_port = 5353\nbind_address = \"127.0.0.1\"").unwrap();

    let overrides = CliOverrides {
        dns_port: Some(5454),
        log_level: Some("debug".to_string()),
        refresh_root_hints: true,
        ..Default::default()
    };

    let config = Config::load(file.path().to_str(), overrides).unwrap();

    assert_eq!(config.server.dns_port, 5454);
    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.logging.level, "debug");
    assert!(config.root_hints.refresh_on_start);
}

#[test]
fn test_load_missing_file_is_read_error() {
    let result = Config::load(Some("/nonexistent/iterdns.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_save_then_load_preserves_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("iterdns.toml");
    let path = path.to_str().unwrap();

    let mut config = Config::default();
    config.resolver.max_nested_depth = 6;
    config.root_hints.bootstrap_server = Some("10.0.0.1:53".to_string());
    config.save(path).unwrap();

    let loaded = Config::from_file(path).unwrap();
    assert_eq!(loaded.resolver.max_nested_depth, 6);
    assert_eq!(
        loaded.root_hints.bootstrap_server.as_deref(),
        Some("10.0.0.1:53")
    );
}

#[test]
fn test_listen_address_brackets_ipv6() {
    let mut config = Config::default();
    config.server.bind_address = "::".to_string();
    config.server.dns_port = 5353;

    assert_eq!(config.server.listen_address(), "[::]:5353");
}
