//! Shared test fixtures: an in-memory Redis node and sample lookups.

#![allow(dead_code)]

use async_trait::async_trait;
use redis::ErrorKind;
use redis_exporter::error::{ExporterError, Result};
use redis_exporter::metrics::Sample;
use redis_exporter::store::{Connection, Connector, StoreClient};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Scripted stand-in for a Redis server.
#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    addr: String,
    sections: HashMap<String, String>,
    config: HashMap<String, String>,
    cluster_info: Option<String>,
    cluster_nodes: Option<String>,
    failing_sections: HashSet<String>,
    unreachable: bool,
    failing: bool,
    delay: Option<Duration>,
}

impl FakeStore {
    pub fn new(addr: &str) -> Self {
        Self {
            addr: addr.to_string(),
            ..Self::default()
        }
    }

    pub fn with_info(mut self, section: &str, reply: &str) -> Self {
        self.sections.insert(section.to_string(), reply.to_string());
        self
    }

    pub fn with_config(mut self, param: &str, value: &str) -> Self {
        self.config.insert(param.to_string(), value.to_string());
        self
    }

    pub fn with_cluster_info(mut self, reply: &str) -> Self {
        self.cluster_info = Some(reply.to_string());
        self
    }

    pub fn with_cluster_nodes(mut self, reply: &str) -> Self {
        self.cluster_nodes = Some(reply.to_string());
        self
    }

    /// `INFO <section>` fails, everything else answers.
    pub fn failing_section(mut self, section: &str) -> Self {
        self.failing_sections.insert(section.to_string());
        self
    }

    /// Every command, `PING` included, fails.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// `PING` answers, every other command fails.
    pub fn failing_queries(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Every command but `PING` answers after `delay`.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn connection(self) -> Connection {
        Arc::new(self)
    }

    async fn answer(&self) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.unreachable || self.failing {
            return Err(connection_refused());
        }
        Ok(())
    }
}

/// Hands out [`FakeStore`]s by address; unknown addresses refuse the connection.
#[derive(Debug, Clone, Default)]
pub struct FakeConnector {
    stores: HashMap<String, FakeStore>,
}

impl FakeConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: FakeStore) -> Self {
        self.stores.insert(store.addr.clone(), store);
        self
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn connect(&self, addr: &str, _deadline: Instant) -> Result<Connection> {
        match self.stores.get(addr) {
            Some(store) => Ok(store.clone().connection()),
            None => Err(connection_refused()),
        }
    }
}

fn connection_refused() -> ExporterError {
    ExporterError::Redis(redis::RedisError::from(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    )))
}

fn cluster_disabled() -> ExporterError {
    ExporterError::Redis(redis::RedisError::from((
        ErrorKind::ResponseError,
        "This instance has cluster support disabled",
    )))
}

#[async_trait]
impl StoreClient for FakeStore {
    fn addr(&self) -> &str {
        &self.addr
    }

    async fn ping(&self) -> Result<()> {
        if self.unreachable {
            return Err(connection_refused());
        }
        Ok(())
    }

    async fn info(&self, section: &str) -> Result<String> {
        self.answer().await?;
        if self.failing_sections.contains(section) {
            return Err(connection_refused());
        }
        Ok(self.sections.get(section).cloned().unwrap_or_default())
    }

    async fn config_get(&self, param: &str) -> Result<HashMap<String, String>> {
        self.answer().await?;
        Ok(self
            .config
            .get(param)
            .map(|value| HashMap::from([(param.to_string(), value.clone())]))
            .unwrap_or_default())
    }

    async fn cluster_info(&self) -> Result<String> {
        self.answer().await?;
        self.cluster_info.clone().ok_or_else(cluster_disabled)
    }

    async fn cluster_nodes(&self) -> Result<String> {
        self.answer().await?;
        self.cluster_nodes.clone().ok_or_else(cluster_disabled)
    }
}

/// Value of the sample named `fq_name` carrying exactly `labels`.
pub fn value_of(samples: &[Sample], fq_name: &str, labels: &[&str]) -> Option<f64> {
    samples
        .iter()
        .find(|s| s.desc.fq_name() == fq_name && s.label_values == labels)
        .map(|s| s.value)
}

/// Every sample named `fq_name`.
pub fn samples_named<'a>(samples: &'a [Sample], fq_name: &str) -> Vec<&'a Sample> {
    samples
        .iter()
        .filter(|s| s.desc.fq_name() == fq_name)
        .collect()
}
