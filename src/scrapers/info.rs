//! INFO Section Scraper
//!
//! Scrapes one `INFO <section>` per node.
//!
//! # Metrics Produced
//! - `redis_server_*` - One gauge per known field of the section
//!   - Labels: addr
//!
//! Sections `keyspace` and `commandstats` use the composite dialect and derive
//! their catalog from each reply (see [`crate::catalog::discover_keyspace`]).

use super::{emit_fields, Scraper};
use crate::catalog::{self, CatalogEntry, FieldSpec};
use crate::error::Result;
use crate::metrics::MetricSink;
use crate::parser::{self, FieldMap};
use crate::store::Connection;
use async_trait::async_trait;
use std::borrow::Cow;
use tracing::debug;

#[derive(Debug, Clone)]
enum Fields {
    Static(Vec<CatalogEntry>),
    Keyspace,
    CommandStats,
}

/// Scraper for a single `INFO` section.
#[derive(Debug, Clone)]
pub struct InfoScraper {
    section: &'static str,
    name: &'static str,
    help: &'static str,
    fields: Fields,
}

impl InfoScraper {
    pub fn server() -> Self {
        Self::fixed(
            "server",
            "info.server",
            "Collect info server from each redis server.",
            catalog::SERVER,
        )
    }

    pub fn clients() -> Self {
        Self::fixed(
            "clients",
            "info.clients",
            "Collect info clients from each redis server.",
            catalog::CLIENTS,
        )
    }

    pub fn memory() -> Self {
        Self::fixed(
            "memory",
            "info.memory",
            "Collect info memory from each redis server.",
            catalog::MEMORY,
        )
    }

    pub fn persistence() -> Self {
        Self::fixed(
            "persistence",
            "info.persistence",
            "Collect info persistence from each redis server.",
            catalog::PERSISTENCE,
        )
    }

    pub fn replication() -> Self {
        Self::fixed(
            "replication",
            "info.replication",
            "Collect info replication from each redis server.",
            catalog::REPLICATION,
        )
    }

    pub fn stats() -> Self {
        Self::fixed(
            "stats",
            "info.stats",
            "Collect info stats from each redis server.",
            catalog::STATS,
        )
    }

    pub fn cpu() -> Self {
        Self::fixed(
            "cpu",
            "info.cpu",
            "Collect info cpu from each redis server.",
            catalog::CPU,
        )
    }

    pub fn keyspace() -> Self {
        Self {
            section: "keyspace",
            name: "info.keyspace",
            help: "Collect info keyspace from each redis server.",
            fields: Fields::Keyspace,
        }
    }

    pub fn commandstats() -> Self {
        Self {
            section: "commandstats",
            name: "info.commandstats",
            help: "Collect info commandstats from each redis server.",
            fields: Fields::CommandStats,
        }
    }

    fn fixed(
        section: &'static str,
        name: &'static str,
        help: &'static str,
        specs: &'static [FieldSpec],
    ) -> Self {
        Self {
            section,
            name,
            help,
            fields: Fields::Static(catalog::from_static(specs)),
        }
    }

    /// Parses a reply with the section's dialect and returns the catalog to
    /// resolve it against. Fixed sections borrow the catalog built at
    /// construction; composite ones derive it from the reply.
    pub fn resolve(&self, reply: &str) -> (FieldMap, Cow<'_, [CatalogEntry]>) {
        match &self.fields {
            Fields::Static(entries) => {
                (parser::parse_info(reply), Cow::Borrowed(entries.as_slice()))
            }
            Fields::Keyspace => {
                let fields = parser::parse_composite(reply);
                let entries = catalog::discover_keyspace(&fields);
                (fields, Cow::Owned(entries))
            }
            Fields::CommandStats => {
                let fields = parser::parse_composite(reply);
                let entries = catalog::discover_commandstats(&fields);
                (fields, Cow::Owned(entries))
            }
        }
    }
}

#[async_trait]
impl Scraper for InfoScraper {
    fn name(&self) -> &'static str {
        self.name
    }

    fn help(&self) -> &'static str {
        self.help
    }

    async fn scrape(&self, connections: &[Connection], sink: &MetricSink) -> Result<()> {
        for conn in connections {
            let reply = conn.info(self.section).await?;
            let (fields, entries) = self.resolve(&reply);
            let emitted = emit_fields(&entries, &fields, conn.addr(), sink);
            debug!(
                "Emitted {} of {} {} fields from {}",
                emitted,
                entries.len(),
                self.section,
                conn.addr()
            );
        }
        Ok(())
    }
}
