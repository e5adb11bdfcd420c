//! Fields of `INFO persistence`.

use super::{server, FieldSpec};

pub static PERSISTENCE: &[FieldSpec] = &[
    server(
        "loading",
        "persistence_loading_status",
        "Flag indicating if the load of a dump file is on-going.(1: yes, 0: no)",
    ),
    server(
        "rdb_changes_since_last_save",
        "rdb_changes_since_last_save_in_total",
        "Number of changes since the last dump.",
    ),
    server(
        "rdb_last_save_time",
        "rdb_last_save_timestamp",
        "Epoch-based timestamp of last successful RDB save.",
    ),
    server(
        "rdb_last_bgsave_status",
        "rdb_last_bgsave_status",
        "Status of the last RDB save operation.",
    ),
    server(
        "rdb_last_bgsave_time_sec",
        "rdb_last_bgsave_used_seconds",
        "Duration of the last RDB save operation in seconds.",
    ),
    server(
        "rdb_current_bgsave_time_sec",
        "rdb_current_bgsave_used_seconds",
        "Duration of the on-going RDB save operation if any.",
    ),
    server(
        "rdb_last_cow_size",
        "rdb_last_cow_size_in_bytes",
        "The size in bytes of copy-on-write memory during the last RDB save operation",
    ),
    server("aof_enabled", "aof_enabled", "Flag indicating AOF logging is activated."),
    server(
        "aof_rewrite_in_progress",
        "aof_rewrite_in_progress_status",
        "Flag indicating a AOF rewrite operation is on-going.",
    ),
    server(
        "aof_rewrite_scheduled",
        "aof_rewrite_scheduled_status",
        "Flag indicating an AOF rewrite operation will be scheduled once the on-going RDB save is complete.",
    ),
    server(
        "aof_last_rewrite_time_sec",
        "aof_last_rewrite_time_in_seconds",
        "Duration of the last AOF rewrite operation in seconds.",
    ),
    server(
        "aof_current_rewrite_time_sec",
        "aof_current_rewrite_time_in_seconds",
        "Duration of the on-going AOF rewrite operation if any.",
    ),
    server(
        "aof_last_bgrewrite_status",
        "aof_last_bgrewrite_status",
        "Status of the last AOF rewrite operation.",
    ),
    server(
        "aof_last_write_status",
        "aof_last_write_status",
        "Status of the last write operation to the AOF.",
    ),
    server(
        "aof_last_cow_size",
        "aof_last_cow_size_in_bytes",
        "The size in bytes of copy-on-write memory during the last AOF rewrite operation.",
    ),
];
