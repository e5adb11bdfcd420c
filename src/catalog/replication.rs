//! Fields of `INFO replication`.

use super::{server, FieldSpec};

pub static REPLICATION: &[FieldSpec] = &[
    server("connected_slaves", "connected_slaves_in_total", "Number of connected replicas."),
    server(
        "repl_backlog_active",
        "repl_backlog_active_status",
        "Flag indicating replication backlog is active.",
    ),
    server(
        "repl_backlog_size",
        "repl_backlog_size_in_bytes",
        "Total size in bytes of the replication backlog buffer.",
    ),
    server(
        "repl_backlog_first_byte_offset",
        "repl_backlog_first_byte_offset",
        "The master offset of the replication backlog buffer.",
    ),
    server(
        "repl_backlog_histlen",
        "repl_backlog_histlen",
        "Size in bytes of the data in the replication backlog buffer.",
    ),
];
