//! Fields of `INFO clients`.

use super::{server, FieldSpec};

pub static CLIENTS: &[FieldSpec] = &[
    server(
        "connected_clients",
        "connected_clients_in_total",
        "Number of client connections (excluding connections from replicas).",
    ),
    server(
        "blocked_clients",
        "blocked_clients_in_total",
        "Number of clients pending on a blocking call (BLPOP, BRPOP, BRPOPLPUSH, BLMOVE, BZPOPMIN, BZPOPMAX).",
    ),
    server(
        "client_recent_max_input_buffer",
        "client_recent_max_input_buffer_in_bytes",
        "Biggest input buffer among current client connections.",
    ),
    server(
        "client_recent_max_output_buffer",
        "client_recent_max_output_buffer_in_bytes",
        "Biggest output buffer among current client connections.",
    ),
];
