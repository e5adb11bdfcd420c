//! Fields of `CLUSTER INFO`.

use super::{cluster, FieldSpec};

pub static CLUSTER: &[FieldSpec] = &[
    cluster("cluster_state", "state", "Flag redis cluster is active."),
    cluster(
        "cluster_slots_assigned",
        "slots_assigned_in_total",
        "Number of redis cluster slots assigned.",
    ),
    cluster("cluster_slots_ok", "slots_ok_in_total", "Number of redis cluster healthy slots."),
    cluster(
        "cluster_slots_pfail",
        "slots_pfail_in_total",
        "Number of redis cluster probably failed slots.",
    ),
    cluster("cluster_slots_fail", "slots_fail_in_total", "Number of redis cluster failed slots."),
    cluster(
        "cluster_known_nodes",
        "known_nodes_in_total",
        "Number of all the redis cluster nodes.",
    ),
    cluster("cluster_size", "master_nodes_in_total", "Number of all the master nodes."),
    cluster("cluster_current_epoch", "current_epoch_count", "The current epoch of redis cluster"),
    cluster("cluster_my_epoch", "my_epoch_count", "The current epoch of the current node."),
    cluster(
        "cluster_stats_messages_ping_sent",
        "stats_messages_ping_sent_in_bytes",
        "Total number of bytes that cluster stats messages ping sent.",
    ),
    cluster(
        "cluster_stats_messages_pong_sent",
        "stats_messages_pong_sent_in_bytes",
        "Total number of bytes that cluster stats messages pong sent.",
    ),
    cluster(
        "cluster_stats_messages_publish_sent",
        "stats_messages_publish_sent_in_bytes",
        "Total number of bytes that cluster stats messages publish sent.",
    ),
    cluster(
        "cluster_stats_messages_sent",
        "stats_messages_sent_in_bytes",
        "Total number of bytes that cluster stats messages sent.",
    ),
    cluster(
        "cluster_stats_messages_ping_received",
        "stats_messages_ping_received_in_bytes",
        "Total number of bytes that cluster stats messages ping received.",
    ),
    cluster(
        "cluster_stats_messages_pong_received",
        "stats_messages_pong_received_in_bytes",
        "Total number of bytes that cluster stats messages pong received.",
    ),
    cluster(
        "cluster_stats_messages_publish_received",
        "stats_messages_publish_received_in_bytes",
        "Total number of bytes that cluster stats messages publish received.",
    ),
    cluster(
        "cluster_stats_messages_received",
        "stats_messages_received_in_bytes",
        "Total number of bytes that cluster stats messages received.",
    ),
];
