//! Fields of `INFO cpu`.

use super::{server, FieldSpec};

pub static CPU: &[FieldSpec] = &[
    server(
        "used_cpu_sys",
        "sys_cpu_used_in_total",
        "System CPU consumed by the Redis server, which is the sum of system CPU consumed by all threads of the server process (main thread and background threads).",
    ),
    server(
        "used_cpu_user",
        "user_cpu_used_in_total",
        "User CPU consumed by the Redis server, which is the sum of user CPU consumed by all threads of the server process (main thread and background threads).",
    ),
    server(
        "used_cpu_sys_children",
        "used_cpu_sys_children_in_total",
        "System CPU consumed by the background processes.",
    ),
    server(
        "used_cpu_user_children",
        "used_cpu_user_children_in_total",
        "User CPU consumed by the background processes.",
    ),
];
