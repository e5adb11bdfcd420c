//! Fields of `INFO memory`.

use super::{server, FieldSpec};

pub static MEMORY: &[FieldSpec] = &[
    server(
        "used_memory",
        "used_memory_in_bytes",
        "Total number of bytes allocated by Redis using its allocator (either standard libc, jemalloc, or an alternative allocator such as tcmalloc).",
    ),
    server(
        "used_memory_rss",
        "used_memory_rss_in_bytes",
        "Number of bytes that Redis allocated as seen by the operating system (a.k.a resident set size). This is the number reported by tools such as top(1) and ps(1).",
    ),
    server(
        "used_memory_peak",
        "used_memory_peak_in_bytes",
        "Peak memory consumed by Redis (in bytes).",
    ),
    server(
        "used_memory_overhead",
        "used_memory_overhead_in_bytes",
        "The sum in bytes of all overheads that the server allocated for managing its internal data structures.",
    ),
    server(
        "used_memory_startup",
        "used_memory_startup_in_bytes",
        "Initial amount of memory consumed by Redis at startup in bytes.",
    ),
    server(
        "used_memory_dataset",
        "used_memory_dataset_in_bytes",
        "The size in bytes of the dataset (used_memory_overhead subtracted from used_memory).",
    ),
    server(
        "allocator_allocated",
        "used_memory_allocator_allocated_in_bytes",
        "Total bytes allocated from the allocator, including internal-fragmentation. Normally the same as used_memory.",
    ),
    server(
        "allocator_active",
        "used_memory_allocator_active_in_bytes",
        "Total bytes in the allocator active pages, this includes external-fragmentation.",
    ),
    server(
        "allocator_resident",
        "used_memory_allocator_resident_in_bytes",
        "Total bytes resident (RSS) in the allocator, this includes pages that can be released to the OS (by MEMORY PURGE, or just waiting).",
    ),
    server(
        "total_system_memory",
        "host_total_system_memory_in_bytes",
        "The total amount of memory that the Redis host has.",
    ),
    server(
        "used_memory_lua",
        "used_memory_lua_in_bytes",
        "Number of bytes used by the Lua engine.",
    ),
    server(
        "used_memory_scripts",
        "used_memory_scripts_in_bytes",
        "Number of bytes used by cached Lua scripts.",
    ),
    server(
        "number_of_cached_scripts",
        "number_of_cached_scripts_in_total",
        "Number of cached Lua scripts.",
    ),
    server(
        "maxmemory",
        "maxmemory_in_bytes",
        "The value of the maxmemory configuration directive.",
    ),
    server(
        "allocator_frag_ratio",
        "allocator_frag_ratio",
        "Ratio between allocator_active and allocator_allocated. This is the true (external) fragmentation metric (not mem_fragmentation_ratio).",
    ),
    server(
        "allocator_frag_bytes",
        "allocator_frag_in_bytes",
        "Delta between allocator_active and allocator_allocated. See note about mem_fragmentation_bytes.",
    ),
    server(
        "allocator_rss_ratio",
        "allocator_rss_ratio",
        "Ratio between allocator_resident and allocator_active. This usually indicates pages that the allocator can and probably will soon release back to the OS.",
    ),
    server(
        "allocator_rss_bytes",
        "allocator_rss_in_bytes",
        "Delta between allocator_resident and allocator_active.",
    ),
    server(
        "rss_overhead_ratio",
        "rss_overhead_ratio",
        "Collect redis rss overhead ratio(the ratio of used_memory_rss and allocator_resident) from each redis server.",
    ),
    server(
        "rss_overhead_bytes",
        "rss_overhead_in_bytes",
        "Ratio between used_memory_rss (the process RSS) and allocator_resident. This includes RSS overheads that are not allocator or heap related.",
    ),
    server(
        "mem_fragmentation_ratio",
        "mem_fragmentation_ratio",
        "Ratio between used_memory_rss and used_memory. Note that this doesn't only includes fragmentation, but also other process overheads (see the allocator_* metrics), and also overheads like code, shared libraries, stack, etc.",
    ),
    server(
        "mem_fragmentation_bytes",
        "mem_fragmentation_in_bytes",
        "Delta between used_memory_rss and used_memory. Note that when the total fragmentation bytes is low (few megabytes), a high ratio (e.g. 1.5 and above) is not an indication of an issue.",
    ),
    server(
        "mem_not_counted_for_evict",
        "mem_not_counted_for_evict_in_bytes",
        "Used memory that's not counted for key eviction. This is basically transient replica and AOF buffers.",
    ),
    server(
        "mem_replication_backlog",
        "mem_replication_backlog_in_bytes",
        "Memory used by replication backlog.",
    ),
    server(
        "mem_clients_slaves",
        "mem_clients_slaves_in_bytes",
        "Memory used by replica clients - Starting Redis 7.0, replica buffers share memory with the replication backlog, so this field can show 0 when replicas don't trigger an increase of memory usage.",
    ),
    server("mem_clients_normal", "mem_clients_normal_in_bytes", "Memory used by normal clients."),
    server(
        "mem_aof_buffer",
        "mem_aof_buffer_in_bytes",
        "Transient memory used for AOF and AOF rewrite buffers.",
    ),
    server(
        "active_defrag_running",
        "active_defrag_running_in_total",
        "When activedefrag is enabled, this indicates whether defragmentation is currently active, and the CPU percentage it intends to utilize.",
    ),
    server(
        "lazyfree_pending_objects",
        "lazyfree_pending_objects_in_total",
        "The number of objects waiting to be freed (as a result of calling UNLINK, or FLUSHDB and FLUSHALL with the ASYNC option).",
    ),
];
