//! Fields of `INFO server`.

use super::{server, FieldSpec};

pub static SERVER: &[FieldSpec] = &[
    server("uptime_in_seconds", "uptime_in_seconds", "Number of seconds since Redis server start."),
    server("hz", "hz", "The server's current frequency setting."),
    server("configured_hz", "configured_hz", "The server's configured frequency setting."),
    server("lru_clock", "lru_clock", "Clock incrementing every minute, for LRU management."),
];
