//! Redis Query Contract
//!
//! Scrapers only depend on [`StoreClient`], the handful of introspection
//! commands the exporter issues. [`RedisNode`] implements it on top of a
//! multiplexed `redis` connection; tests substitute an in-memory fake.
//!
//! # Deadlines
//!
//! A [`RedisNode`] is opened for one scrape request and carries that request's
//! deadline. Every command is raced against it, so a node that stops answering
//! cannot hold the scrape past the time Prometheus is willing to wait.
//!
//! # Connectors
//!
//! Target resolution opens nodes through a [`Connector`]; [`RedisConnector`] is
//! the production one.
//!
//! # Thread Safety
//!
//! `MultiplexedConnection` pipelines concurrent commands over one socket, so a
//! single node handle is shared by all scraper tasks of a cycle.

use crate::config::RedisConfig;
use crate::error::{ExporterError, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{FromRedisValue, IntoConnectionInfo};
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

/// Introspection commands consumed by the scrapers.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Address the node was reached at, used as the `addr` label
    fn addr(&self) -> &str;

    async fn ping(&self) -> Result<()>;

    /// `INFO <section>`
    async fn info(&self, section: &str) -> Result<String>;

    /// `CONFIG GET <param>`
    async fn config_get(&self, param: &str) -> Result<HashMap<String, String>>;

    /// `CLUSTER INFO`
    async fn cluster_info(&self) -> Result<String>;

    /// `CLUSTER NODES`
    async fn cluster_nodes(&self) -> Result<String>;
}

/// Shared handle to one target node for the duration of a scrape.
pub type Connection = Arc<dyn StoreClient>;

/// Opens [`Connection`]s for a scrape request.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, addr: &str, deadline: Instant) -> Result<Connection>;
}

/// Connects to real Redis servers with the `[redis]` settings.
pub struct RedisConnector {
    config: RedisConfig,
}

impl RedisConnector {
    pub fn new(config: RedisConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for RedisConnector {
    async fn connect(&self, addr: &str, deadline: Instant) -> Result<Connection> {
        let node = RedisNode::connect(addr, &self.config, deadline).await?;
        Ok(Arc::new(node))
    }
}

/// A live connection to one Redis server.
pub struct RedisNode {
    addr: String,
    conn: MultiplexedConnection,
    deadline: Instant,
}

impl RedisNode {
    /// Opens a connection to `addr` (`host:port`) that expires at `deadline`.
    ///
    /// Applies the configured password, database and TLS settings, then names
    /// the connection with `CLIENT SETNAME` (failure to do so is only logged).
    pub async fn connect(addr: &str, config: &RedisConfig, deadline: Instant) -> Result<Self> {
        let scheme = if config.use_tls { "rediss" } else { "redis" };
        let fragment = if config.use_tls && config.insecure_skip_verify {
            "#insecure"
        } else {
            ""
        };

        let mut info = format!("{}://{}/{}", scheme, addr, fragment).into_connection_info()?;
        info.redis.db = config.db;
        if let Some(password) = &config.password {
            info.redis.password = Some(password.expose_secret().to_string());
        }

        let client = redis::Client::open(info)?;
        debug!("Connecting to {}", addr);
        let conn = timeout_at(deadline, client.get_multiplexed_async_connection())
            .await
            .map_err(|_| ExporterError::Timeout(format!("connecting to {}", addr)))??;

        let node = Self {
            addr: addr.to_string(),
            conn,
            deadline,
        };

        if !config.client_name.is_empty() {
            let mut cmd = redis::cmd("CLIENT");
            cmd.arg("SETNAME").arg(&config.client_name);
            if let Err(e) = node.query::<()>(cmd).await {
                warn!("Failed to set client name on {}: {}", addr, e);
            }
        }

        Ok(node)
    }

    async fn query<T: FromRedisValue>(&self, cmd: redis::Cmd) -> Result<T> {
        let mut conn = self.conn.clone();
        match timeout_at(self.deadline, cmd.query_async(&mut conn)).await {
            Ok(reply) => Ok(reply?),
            Err(_) => Err(ExporterError::Timeout(format!(
                "{} did not answer before the scrape deadline",
                self.addr
            ))),
        }
    }
}

#[async_trait]
impl StoreClient for RedisNode {
    fn addr(&self) -> &str {
        &self.addr
    }

    async fn ping(&self) -> Result<()> {
        let _: String = self.query(redis::cmd("PING")).await?;
        Ok(())
    }

    async fn info(&self, section: &str) -> Result<String> {
        let mut cmd = redis::cmd("INFO");
        cmd.arg(section);
        self.query(cmd).await
    }

    async fn config_get(&self, param: &str) -> Result<HashMap<String, String>> {
        let mut cmd = redis::cmd("CONFIG");
        cmd.arg("GET").arg(param);
        self.query(cmd).await
    }

    async fn cluster_info(&self) -> Result<String> {
        let mut cmd = redis::cmd("CLUSTER");
        cmd.arg("INFO");
        self.query(cmd).await
    }

    async fn cluster_nodes(&self) -> Result<String> {
        let mut cmd = redis::cmd("CLUSTER");
        cmd.arg("NODES");
        self.query(cmd).await
    }
}
