//! Scrapers
//!
//! Each scraper issues one kind of introspection query against every target
//! node of a scrape and turns the reply into samples.
//!
//! # Architecture
//!
//! Scrapers follow a consistent pattern:
//! - Query each connection in order
//! - Parse the reply with the dialect of that query ([`crate::parser`])
//! - Resolve fields against a static or discovered catalog ([`crate::catalog`])
//! - Emit one sample per catalog entry found in the reply, labeled with the node address
//!
//! # Error Handling
//!
//! A failing query aborts the scraper (remaining nodes are skipped) and is
//! reported by the [`Exporter`](crate::exporter::Exporter) as
//! `redis_exporter_scrape_success{collector="..."} 0`. Missing or non-numeric
//! fields only skip their own sample.

use crate::catalog::CatalogEntry;
use crate::config::{CollectConfig, Mode};
use crate::error::Result;
use crate::metrics::MetricSink;
use crate::parser::FieldMap;
use crate::store::Connection;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

pub mod cluster_info;
pub mod info;
pub mod maxmemory;

pub use cluster_info::ClusterInfoScraper;
pub use info::InfoScraper;
pub use maxmemory::MaxMemoryScraper;

/// One introspection query turned into metrics.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Stable identifier, used in configuration and as the `collector` label
    fn name(&self) -> &'static str;

    fn help(&self) -> &'static str;

    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Whether the scraper is switched on automatically in cluster mode
    fn cluster_only(&self) -> bool {
        false
    }

    /// Scrapes every connection in order, writing samples to `sink`.
    ///
    /// Returns the first query error; field-level problems are logged only.
    async fn scrape(&self, connections: &[Connection], sink: &MetricSink) -> Result<()>;
}

/// Every scraper the exporter knows about.
pub fn all() -> Vec<Arc<dyn Scraper>> {
    vec![
        Arc::new(InfoScraper::server()),
        Arc::new(InfoScraper::clients()),
        Arc::new(InfoScraper::memory()),
        Arc::new(InfoScraper::persistence()),
        Arc::new(InfoScraper::replication()),
        Arc::new(InfoScraper::stats()),
        Arc::new(InfoScraper::cpu()),
        Arc::new(InfoScraper::keyspace()),
        Arc::new(InfoScraper::commandstats()),
        Arc::new(ClusterInfoScraper::new()),
        Arc::new(MaxMemoryScraper::new()),
    ]
}

/// Picks the scrapers to run from the defaults, the deployment mode and the
/// `[collect]` overrides. `disable` wins over everything else.
pub fn select(collect: &CollectConfig, mode: Mode) -> Vec<Arc<dyn Scraper>> {
    let known = all();
    for name in collect.enable.iter().chain(&collect.disable) {
        if !known.iter().any(|scraper| scraper.name() == name) {
            warn!("Unknown scraper {:?} in [collect] configuration", name);
        }
    }

    known
        .into_iter()
        .filter(|scraper| {
            let name = scraper.name();
            let wanted = scraper.enabled_by_default()
                || (mode == Mode::Cluster && scraper.cluster_only())
                || collect.enable.iter().any(|n| n == name);
            wanted && !collect.disable.iter().any(|n| n == name)
        })
        .collect()
}

/// Emits one sample per catalog entry present in `fields`.
///
/// Returns the number of samples written.
pub(crate) fn emit_fields(
    catalog: &[CatalogEntry],
    fields: &FieldMap,
    addr: &str,
    sink: &MetricSink,
) -> usize {
    let mut emitted = 0;
    for entry in catalog {
        let Some(raw) = fields.get(&entry.field) else {
            warn!("Field {} missing from {}", entry.field, addr);
            continue;
        };

        match raw.parse::<f64>() {
            Ok(value) => {
                sink.emit(&entry.desc, value, &[addr]);
                emitted += 1;
            }
            Err(e) => warn!(
                "Failed to parse {} value {:?} from {}: {}",
                entry.field, raw, addr, e
            ),
        }
    }
    emitted
}
