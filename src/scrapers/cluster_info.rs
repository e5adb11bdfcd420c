//! Cluster Health Scraper
//!
//! Scrapes `CLUSTER INFO` from every node. Switched on automatically when the
//! exporter runs in cluster mode.
//!
//! # Metrics Produced
//! - `redis_cluster_state` - 1 when the cluster state is `ok`, absent when it
//!   is `fail`
//!   - Labels: addr
//! - `redis_cluster_slots_*`, `redis_cluster_*_nodes_in_total` - Slot and node counts
//!   - Labels: addr
//! - `redis_cluster_stats_messages_*` - Cluster bus message counters
//!   - Labels: addr

use super::{emit_fields, Scraper};
use crate::catalog::{self, CatalogEntry};
use crate::error::Result;
use crate::metrics::MetricSink;
use crate::parser;
use crate::store::Connection;
use async_trait::async_trait;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ClusterInfoScraper {
    catalog: Vec<CatalogEntry>,
}

impl ClusterInfoScraper {
    pub fn new() -> Self {
        Self {
            catalog: catalog::from_static(catalog::CLUSTER),
        }
    }
}

impl Default for ClusterInfoScraper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Scraper for ClusterInfoScraper {
    fn name(&self) -> &'static str {
        "cluster.info"
    }

    fn help(&self) -> &'static str {
        "Collect cluster info from each redis node."
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn cluster_only(&self) -> bool {
        true
    }

    async fn scrape(&self, connections: &[Connection], sink: &MetricSink) -> Result<()> {
        for conn in connections {
            let reply = conn.cluster_info().await?;
            let fields = parser::parse_info(&reply);
            let emitted = emit_fields(&self.catalog, &fields, conn.addr(), sink);
            debug!("Emitted {} cluster fields from {}", emitted, conn.addr());
        }
        Ok(())
    }
}
