//! Configuration validation tests
//!
//! Defaults, TOML deserialization and the checks run at startup.

use ::config::{File, FileFormat};
use redis_exporter::config::{Config, Mode, MAX_TIMEOUT_SECONDS};
use redis_exporter::error::ExporterError;
use secrecy::ExposeSecret;
use std::time::Duration;

fn from_toml(toml: &str) -> Config {
    ::config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()
        .expect("TOML should build")
        .try_deserialize()
        .expect("TOML should deserialize")
}

#[test]
fn test_defaults() {
    // Given: The default configuration
    let config = Config::default();

    // Then: It targets a local standalone node and listens on 9121
    assert_eq!(config.redis.addrs, vec!["localhost:6379"]);
    assert_eq!(config.redis.mode, Mode::Standalone);
    assert_eq!(config.redis.db, 0);
    assert_eq!(config.redis.client_name, "redis_exporter");
    assert!(config.redis.password.is_none());
    assert!(!config.redis.use_tls);
    assert_eq!(config.redis.timeout(), Duration::from_secs(1));
    assert_eq!(config.server.addr, "0.0.0.0");
    assert_eq!(config.server.port, 9121);
    assert_eq!(config.server.telemetry_path, "/metrics");
    assert!(config.collect.enable.is_empty());
    assert!(config.collect.disable.is_empty());
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = from_toml("");

    assert_eq!(config.redis.addrs, vec!["localhost:6379"]);
    assert_eq!(config.server.port, 9121);
}

#[test]
fn test_cluster_toml() {
    // Given: A cluster configuration with a password and overrides
    let config = from_toml(
        r#"
[redis]
addrs = ["10.0.0.1:7000", "10.0.0.2:7000"]
password = "s3cret"
mode = "cluster"
timeout_seconds = 2.5

[server]
port = 9200
telemetry_path = "/scrape"

[collect]
enable = ["maxmemory"]
disable = ["info.commandstats"]
"#,
    );

    // Then: Every value is picked up
    assert_eq!(config.redis.addrs.len(), 2);
    assert_eq!(config.redis.mode, Mode::Cluster);
    assert_eq!(
        config.redis.password.as_ref().map(|p| p.expose_secret().to_string()),
        Some("s3cret".to_string())
    );
    assert_eq!(config.redis.timeout(), Duration::from_millis(2500));
    assert_eq!(config.server.port, 9200);
    assert_eq!(config.server.telemetry_path, "/scrape");
    assert_eq!(config.collect.enable, vec!["maxmemory"]);
    assert_eq!(config.collect.disable, vec!["info.commandstats"]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_password_is_not_printed() {
    let config = from_toml("[redis]\npassword = \"s3cret\"");

    let debug = format!("{:?}", config.redis);

    assert!(!debug.contains("s3cret"));
}

#[test]
fn test_rejects_empty_addrs() {
    let mut config = Config::default();
    config.redis.addrs = vec![" ".to_string()];

    assert!(matches!(config.validate(), Err(ExporterError::Config(_))));
}

#[test]
fn test_rejects_non_positive_timeout() {
    for timeout in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let mut config = Config::default();
        config.redis.timeout_seconds = timeout;
        assert!(
            matches!(config.validate(), Err(ExporterError::Config(_))),
            "timeout {} should be rejected",
            timeout
        );
    }
}

#[test]
fn test_rejects_oversized_timeout() {
    // Given: Timeouts above the limit, one too large for a Duration
    for timeout in [MAX_TIMEOUT_SECONDS + 1.0, 1e19, 1e30] {
        let mut config = Config::default();
        config.redis.timeout_seconds = timeout;

        // When/Then: Validation rejects them
        assert!(
            matches!(config.validate(), Err(ExporterError::Config(_))),
            "timeout {} should be rejected",
            timeout
        );
    }
}

#[test]
fn test_accepts_timeout_at_limit() {
    let mut config = Config::default();
    config.redis.timeout_seconds = MAX_TIMEOUT_SECONDS;
    assert!(config.validate().is_ok());
    assert_eq!(config.redis.timeout(), Duration::from_secs(300));
}

#[test]
fn test_timeout_of_unvalidated_config_is_bounded() {
    // Given: Configs that skipped validation
    for timeout in [1e30, f64::INFINITY, f64::NAN, -5.0] {
        let mut config = Config::default();
        config.redis.timeout_seconds = timeout;

        // When: Reading the timeout
        let value = config.redis.timeout();

        // Then: It is a usable, bounded duration
        assert!(
            value > Duration::ZERO && value <= Duration::from_secs_f64(MAX_TIMEOUT_SECONDS),
            "timeout {} gave {:?}",
            timeout,
            value
        );
    }
}

#[test]
fn test_rejects_bad_telemetry_paths() {
    for path in ["metrics", "/", "/health", ""] {
        let mut config = Config::default();
        config.server.telemetry_path = path.to_string();
        assert!(
            matches!(config.validate(), Err(ExporterError::Config(_))),
            "telemetry path {:?} should be rejected",
            path
        );
    }
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = Config::load("config/does-not-exist.toml").expect("missing file is optional");

    assert_eq!(config.server.port, 9121);
}
