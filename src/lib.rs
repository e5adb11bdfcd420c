//! Redis Prometheus Exporter
//!
//! Scrapes Redis servers (standalone or cluster) on every Prometheus request and
//! exposes their `INFO`, `CLUSTER INFO` and `CONFIG GET maxmemory` fields as gauges.
//!
//! # Architecture
//!
//! ```text
//!                     ┌──────────────────────────────────────┐
//! ┌────────────┐ HTTP │ Exporter                             │  RESP   ┌───────┐
//! │ Prometheus │ ───► │ server ─► topology ─► store (conns)  │ ◄─────► │ Redis │
//! └────────────┘      │    │                                 │         └───────┘
//!                     │    └─► exporter ─► scrapers ─► sink  │
//!                     │                     │                │
//!                     │          parser ◄───┴───► catalog    │
//!                     └──────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`server`] - HTTP server, scrape deadline and target resolution
//! - [`exporter`] - Liveness check and concurrent scraper fan-out
//! - [`scrapers`] - One scraper per introspection query
//! - [`parser`] - Reply dialects (flat, composite, cluster node listing)
//! - [`catalog`] - Field-to-metric tables and discovery
//! - [`metrics`] - Metric descriptors, sample sink and text rendering
//! - [`store`] - Redis query contract and its `redis` crate implementation
//! - [`topology`] - Cluster node resolution
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use redis_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod exporter;
pub mod metrics;
pub mod parser;
pub mod scrapers;
pub mod server;
pub mod store;
pub mod topology;
