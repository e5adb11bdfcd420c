//! Max Memory Scraper
//!
//! Reads the `maxmemory` configuration directive of every node.
//!
//! # Metrics Produced
//! - `redis_maxmemory_bytes` - Configured memory limit (0 = unlimited)
//!   - Labels: addr, mode, maxmemory_policy
//!
//! `mode` is the `redis_mode` field of `INFO server` and `maxmemory_policy` the
//! eviction policy from `CONFIG GET maxmemory-policy`. They are informational
//! labels: when either lookup fails the label reads `unknown` and the sample is
//! still emitted.

use super::Scraper;
use crate::error::Result;
use crate::metrics::{MetricDesc, MetricSink, ADDR_LABEL};
use crate::parser;
use crate::store::{Connection, StoreClient};
use async_trait::async_trait;
use tracing::warn;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone)]
pub struct MaxMemoryScraper {
    desc: MetricDesc,
}

impl MaxMemoryScraper {
    pub fn new() -> Self {
        Self {
            desc: MetricDesc::new(
                "maxmemory",
                "bytes",
                "Collect config maxmemory from each redis node.",
                &[ADDR_LABEL, "mode", "maxmemory_policy"],
            ),
        }
    }
}

impl Default for MaxMemoryScraper {
    fn default() -> Self {
        Self::new()
    }
}

async fn deployment_mode(conn: &dyn StoreClient) -> String {
    match conn.info("server").await {
        Ok(reply) => parser::parse_info(&reply)
            .remove("redis_mode")
            .unwrap_or_else(|| UNKNOWN.to_string()),
        Err(e) => {
            warn!("Failed to read redis_mode from {}: {}", conn.addr(), e);
            UNKNOWN.to_string()
        }
    }
}

async fn eviction_policy(conn: &dyn StoreClient) -> String {
    match conn.config_get("maxmemory-policy").await {
        Ok(mut config) => config
            .remove("maxmemory-policy")
            .unwrap_or_else(|| UNKNOWN.to_string()),
        Err(e) => {
            warn!("Failed to read maxmemory-policy from {}: {}", conn.addr(), e);
            UNKNOWN.to_string()
        }
    }
}

#[async_trait]
impl Scraper for MaxMemoryScraper {
    fn name(&self) -> &'static str {
        "maxmemory"
    }

    fn help(&self) -> &'static str {
        "Collect max memory from redis"
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    async fn scrape(&self, connections: &[Connection], sink: &MetricSink) -> Result<()> {
        for conn in connections {
            let addr = conn.addr();
            let config = conn.config_get("maxmemory").await?;

            let Some(raw) = config.get("maxmemory") else {
                warn!("CONFIG GET maxmemory returned nothing on {}", addr);
                continue;
            };
            let bytes = match raw.parse::<f64>() {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Failed to parse maxmemory value {:?} from {}: {}", raw, addr, e);
                    continue;
                }
            };

            let mode = deployment_mode(conn.as_ref()).await;
            let policy = eviction_policy(conn.as_ref()).await;
            sink.emit(&self.desc, bytes, &[addr, mode.as_str(), policy.as_str()]);
        }
        Ok(())
    }
}
