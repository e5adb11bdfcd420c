//! Metric Catalog
//!
//! Associates raw field names of Redis replies with the metric each one is
//! exported as.
//!
//! # Static catalogs
//!
//! Fixed tables of [`FieldSpec`] records, one module per section:
//! [`server`], [`clients`], [`memory`], [`persistence`], [`replication`],
//! [`stats`], [`cpu`] (all `INFO`) and [`cluster`] (`CLUSTER INFO`).
//!
//! # Discovered catalogs
//!
//! `INFO keyspace` and `INFO commandstats` carry one line per database or per
//! command, so their fields are only known once a reply has been parsed.
//! [`discover_keyspace`] and [`discover_commandstats`] derive the catalog from
//! the parsed reply itself and return it to the caller; nothing is cached.

use crate::metrics::{MetricDesc, ADDR_LABEL};
use crate::parser::FieldMap;

pub mod clients;
pub mod cluster;
pub mod cpu;
pub mod memory;
pub mod persistence;
pub mod replication;
pub mod server;
pub mod stats;

pub use clients::CLIENTS;
pub use cluster::CLUSTER;
pub use cpu::CPU;
pub use memory::MEMORY;
pub use persistence::PERSISTENCE;
pub use replication::REPLICATION;
pub use server::SERVER;
pub use stats::STATS;

/// A statically declared field -> metric association.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: &'static str,
    pub subsystem: &'static str,
    pub name: &'static str,
    pub help: &'static str,
}

impl FieldSpec {
    pub fn desc(&self) -> MetricDesc {
        MetricDesc::new(self.subsystem, self.name, self.help, &[ADDR_LABEL])
    }
}

const fn server(field: &'static str, name: &'static str, help: &'static str) -> FieldSpec {
    FieldSpec {
        field,
        subsystem: "server",
        name,
        help,
    }
}

const fn cluster(field: &'static str, name: &'static str, help: &'static str) -> FieldSpec {
    FieldSpec {
        field,
        subsystem: "cluster",
        name,
        help,
    }
}

/// A resolved catalog entry, ready to be matched against a [`FieldMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub field: String,
    pub desc: MetricDesc,
}

impl From<&FieldSpec> for CatalogEntry {
    fn from(spec: &FieldSpec) -> Self {
        Self {
            field: spec.field.to_string(),
            desc: spec.desc(),
        }
    }
}

pub fn from_static(specs: &[FieldSpec]) -> Vec<CatalogEntry> {
    specs.iter().map(CatalogEntry::from).collect()
}

/// Builds the keyspace catalog from a parsed `INFO keyspace` reply.
///
/// `db0_keys` -> `redis_server_keyspace_db0_keys_in_total`,
/// `db0_avg_ttl` -> `redis_server_keyspace_db0_avg_ttl_in_milliseconds`.
pub fn discover_keyspace(fields: &FieldMap) -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = fields
        .keys()
        .map(|field| {
            let key = sanitize_metric_name(field);
            let (name, help) = if field.contains("keys") {
                (
                    format!("keyspace_{}_in_total", key),
                    "Number of keyspace keys in the redis db.".to_string(),
                )
            } else if field.contains("expires") {
                (
                    format!("keyspace_{}_in_total", key),
                    "Number of expire keys in the redis db.".to_string(),
                )
            } else if field.contains("avg_ttl") {
                (
                    format!("keyspace_{}_in_milliseconds", key),
                    "The average milliseconds to live of keys with an expiry in the redis db."
                        .to_string(),
                )
            } else {
                (
                    format!("keyspace_{}", key),
                    format!("The keyspace field {}.", field),
                )
            };

            CatalogEntry {
                field: field.clone(),
                desc: MetricDesc::new("server", name, help, &[ADDR_LABEL]),
            }
        })
        .collect();
    entries.sort_by(|a, b| a.field.cmp(&b.field));
    entries
}

/// Builds the command statistics catalog from a parsed `INFO commandstats` reply.
///
/// The metric is named after the field: `cmdstat_get_calls` ->
/// `redis_server_cmdstat_get_calls`.
pub fn discover_commandstats(fields: &FieldMap) -> Vec<CatalogEntry> {
    let mut entries: Vec<CatalogEntry> = fields
        .keys()
        .map(|field| CatalogEntry {
            field: field.clone(),
            desc: MetricDesc::new(
                "server",
                sanitize_metric_name(field),
                format!("The stats of {}.", field),
                &[ADDR_LABEL],
            ),
        })
        .collect();
    entries.sort_by(|a, b| a.field.cmp(&b.field));
    entries
}

/// Maps every character outside `[a-zA-Z0-9_]` to `_`.
///
/// Subcommand stats such as `cmdstat_client|list` would otherwise be rejected
/// by the registry.
pub fn sanitize_metric_name(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
