//! Cluster topology resolution.

use crate::error::{ExporterError, Result};
use crate::parser::parse_cluster_nodes;
use crate::store::StoreClient;
use tracing::info;

/// Returns the `ip:port` of every node known to the cluster `seed` belongs to.
///
/// Fails if `CLUSTER NODES` fails, if the listing is malformed, or if it names
/// no node at all.
pub async fn resolve_cluster_nodes(seed: &dyn StoreClient) -> Result<Vec<String>> {
    let listing = seed.cluster_nodes().await?;
    let addrs = parse_cluster_nodes(&listing)?;

    if addrs.is_empty() {
        return Err(ExporterError::Topology(format!(
            "{} returned an empty node listing",
            seed.addr()
        )));
    }

    info!(
        "Resolved {} cluster nodes through {}",
        addrs.len(),
        seed.addr()
    );
    Ok(addrs)
}
