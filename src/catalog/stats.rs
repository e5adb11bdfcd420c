//! Fields of `INFO stats`.

use super::{server, FieldSpec};

pub static STATS: &[FieldSpec] = &[
    server(
        "total_connections_received",
        "connections_received_in_total",
        "Total number of connections accepted by the server.",
    ),
    server(
        "total_commands_processed",
        "commands_processed_in_total",
        "Total number of commands processed by the server.",
    ),
    server(
        "instantaneous_ops_per_sec",
        "commands_processed_per_second",
        "Number of commands processed per second.",
    ),
    server(
        "total_net_input_bytes",
        "total_net_input_bytes",
        "The total number of bytes read from the network.",
    ),
    server(
        "total_net_output_bytes",
        "total_net_output_bytes",
        "The total number of bytes written to the network.",
    ),
    server(
        "instantaneous_input_kbps",
        "instantaneous_input_kbps",
        "The network's read rate per second in KB/sec.",
    ),
    server(
        "instantaneous_output_kbps",
        "instantaneous_output_kbps",
        "The network's write rate per second in KB/sec.",
    ),
    server(
        "rejected_connections",
        "rejected_connections_in_total",
        "Number of connections rejected because of maxclients limit.",
    ),
    server("sync_full", "sync_full_in_total", "The number of full resyncs with replicas."),
    server(
        "sync_partial_ok",
        "sync_partial_ok_in_total",
        "The number of accepted partial resync requests.",
    ),
    server(
        "sync_partial_err",
        "sync_partial_err_in_total",
        "The number of denied partial resync requests.",
    ),
    server("expired_keys", "expired_keys_in_total", "Total number of key expiration events."),
    server(
        "expired_stale_perc",
        "expired_stale_percent",
        "The percentage of keys probably expired.",
    ),
    server(
        "expired_time_cap_reached_count",
        "expired_time_cap_reached_count",
        "The count of times that active expiry cycles have stopped early.",
    ),
    server(
        "evicted_keys",
        "evicted_keys_in_total",
        "Number of evicted keys due to maxmemory limit.",
    ),
    server(
        "keyspace_hits",
        "keyspace_hits_in_total",
        "Number of successful lookup of keys in the main dictionary.",
    ),
    server(
        "keyspace_misses",
        "keyspace_misses_in_total",
        "Number of failed lookup of keys in the main dictionary.",
    ),
    server(
        "pubsub_channels",
        "pubsub_channels_in_total",
        "Global number of pub/sub channels with client subscriptions.",
    ),
    server(
        "pubsub_patterns",
        "pubsub_patterns_in_total",
        "Global number of pub/sub pattern with client subscriptions.",
    ),
    server(
        "latest_fork_usec",
        "latest_fork_in_microseconds",
        "Duration of the latest fork operation in microseconds.",
    ),
    server(
        "migrate_cached_sockets",
        "migrate_cached_sockets_in_total",
        "The number of sockets open for migrate purposes",
    ),
    server(
        "slave_expires_tracked_keys",
        "slave_expires_tracked_keys_in_total",
        "The number of keys tracked for expiry purposes (applicable only to writable replicas).",
    ),
    server(
        "active_defrag_hits",
        "active_defrag_hits_in_total",
        "Number of value reallocations performed by active the defragmentation process.",
    ),
    server(
        "active_defrag_misses",
        "active_defrag_misses_in_total",
        "Number of aborted value reallocations started by the active defragmentation process.",
    ),
    server(
        "active_defrag_key_hits",
        "active_defrag_key_hits_in_total",
        "Number of keys that were actively defragmented.",
    ),
    server(
        "active_defrag_key_misses",
        "active_defrag_key_misses_in_total",
        "Number of keys that were skipped by the active defragmentation process.",
    ),
];
