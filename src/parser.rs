//! Response Parsers
//!
//! Pure functions turning the text replies of `INFO`, `CLUSTER INFO` and
//! `CLUSTER NODES` into maps and address lists.
//!
//! # Dialects
//!
//! - **Flat** (`INFO <section>`, `CLUSTER INFO`): `key:value` per line, `#` headers.
//!   Status words are folded into gauges: `ok`/`up` become `"1"`, `down` becomes `"0"`.
//! - **Composite** (`INFO keyspace`, `INFO commandstats`):
//!   `db0:keys=5,expires=0,avg_ttl=0` flattens to `db0_keys`, `db0_expires`, `db0_avg_ttl`.
//! - **Node listing** (`CLUSTER NODES`): the second token of each line is `ip:port@cport`.

use crate::error::{ExporterError, Result};
use std::collections::HashMap;

/// Parsed fields of one reply, keyed by field name.
pub type FieldMap = HashMap<String, String>;

/// Parses the flat `key:value` dialect.
///
/// Lines without a `:` separator are skipped. Only the first `:` splits, so
/// values such as `executable:/usr/bin/redis-server` are kept intact.
pub fn parse_info(text: &str) -> FieldMap {
    data_lines(text)
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| (key.trim().to_string(), normalize_status(value.trim())))
        .collect()
}

/// Parses the composite `prefix:sub=val,...` dialect.
///
/// Each sub-key is stored as `prefix_sub`; the bare prefix never becomes a key.
pub fn parse_composite(text: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    for (prefix, items) in data_lines(text).filter_map(|line| line.split_once(':')) {
        let prefix = prefix.trim();
        for item in items.trim().split(',') {
            if let Some((sub, value)) = item.split_once('=') {
                fields.insert(
                    format!("{}_{}", prefix, sub.trim()),
                    value.trim().to_string(),
                );
            }
        }
    }
    fields
}

/// Extracts the `ip:port` of every node in a `CLUSTER NODES` listing.
///
/// A line that does not carry an `ip:port@cport` token in second position fails
/// the whole parse: a partial topology would silently drop nodes from the scrape.
pub fn parse_cluster_nodes(text: &str) -> Result<Vec<String>> {
    let mut addrs = Vec::new();
    for (index, line) in text.lines().map(str::trim).enumerate() {
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let endpoint = tokens.nth(1).ok_or_else(|| {
            ExporterError::Topology(format!(
                "node line {} has no address field: {:?}",
                index + 1,
                line
            ))
        })?;

        match endpoint.split_once('@') {
            Some((addr, _bus)) if !addr.is_empty() => addrs.push(addr.to_string()),
            _ => {
                return Err(ExporterError::Topology(format!(
                    "node line {} has a malformed address {:?}, expected ip:port@cport",
                    index + 1,
                    endpoint
                )))
            }
        }
    }
    Ok(addrs)
}

fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn normalize_status(value: &str) -> String {
    if value.eq_ignore_ascii_case("ok") || value.eq_ignore_ascii_case("up") {
        "1".to_string()
    } else if value.eq_ignore_ascii_case("down") {
        "0".to_string()
    } else {
        value.to_string()
    }
}
