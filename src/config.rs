use crate::error::{ExporterError, Result};
use anyhow::Context;
use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

/// Path of the liveness endpoint, reserved by the HTTP server.
pub const HEALTH_PATH: &str = "/health";

/// Upper bound of any scrape timeout, configured or requested.
pub const MAX_TIMEOUT_SECONDS: f64 = 300.0;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub collect: CollectConfig,
}

/// How target addresses are resolved for each scrape.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Scrape the configured addresses as they are
    #[default]
    Standalone,
    /// Discover every node of the cluster through `CLUSTER NODES`
    Cluster,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    #[serde(default = "default_addrs")]
    pub addrs: Vec<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
    #[serde(default)]
    pub db: i64,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "default_client_name")]
    pub client_name: String,
    #[serde(default)]
    pub use_tls: bool,
    #[serde(default)]
    pub insecure_skip_verify: bool,
    /// Scrape deadline when Prometheus does not send one
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_addr")]
    pub addr: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_telemetry_path")]
    pub telemetry_path: String,
}

/// Scraper selection on top of each scraper's own default.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CollectConfig {
    /// Scrapers to turn on, e.g. `maxmemory`
    #[serde(default)]
    pub enable: Vec<String>,
    /// Scrapers to turn off, e.g. `info.commandstats`
    #[serde(default)]
    pub disable: Vec<String>,
}

fn default_addrs() -> Vec<String> {
    vec!["localhost:6379".to_string()]
}

fn default_client_name() -> String {
    "redis_exporter".to_string()
}

fn default_timeout_seconds() -> f64 {
    1.0
}

fn default_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    9121
}

fn default_telemetry_path() -> String {
    "/metrics".to_string()
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            addrs: default_addrs(),
            password: None,
            db: 0,
            mode: Mode::default(),
            client_name: default_client_name(),
            use_tls: false,
            insecure_skip_verify: false,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            port: default_port(),
            telemetry_path: default_telemetry_path(),
        }
    }
}

impl RedisConfig {
    /// The configured scrape timeout, clamped to [`MAX_TIMEOUT_SECONDS`].
    ///
    /// Values `validate()` would reject fall back to the default timeout.
    pub fn timeout(&self) -> Duration {
        let secs = if self.timeout_seconds.is_finite() && self.timeout_seconds > 0.0 {
            self.timeout_seconds.min(MAX_TIMEOUT_SECONDS)
        } else {
            default_timeout_seconds()
        };
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::from_secs(1))
    }
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        // Load environment variables from .env if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("REDIS_EXPORTER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("redis.addrs")
                    .with_list_parse_key("collect.enable")
                    .with_list_parse_key("collect.disable")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.redis.addrs.iter().all(|addr| addr.trim().is_empty()) {
            return Err(ExporterError::Config(
                "redis.addrs must name at least one address".to_string(),
            ));
        }
        let timeout = self.redis.timeout_seconds;
        if !(timeout.is_finite() && timeout > 0.0 && timeout <= MAX_TIMEOUT_SECONDS) {
            return Err(ExporterError::Config(format!(
                "redis.timeout_seconds must be in (0, {}], got {}",
                MAX_TIMEOUT_SECONDS, timeout
            )));
        }
        if !self.server.telemetry_path.starts_with('/') || self.server.telemetry_path == "/" {
            return Err(ExporterError::Config(format!(
                "server.telemetry_path must start with '/' and not be the root, got {:?}",
                self.server.telemetry_path
            )));
        }
        if self.server.telemetry_path == HEALTH_PATH {
            return Err(ExporterError::Config(format!(
                "server.telemetry_path cannot be {}",
                HEALTH_PATH
            )));
        }
        Ok(())
    }
}
