//! Prometheus Metric Descriptors, Sink and Rendering
//!
//! Scrapers never touch a Prometheus registry directly. They push [`Sample`]s
//! into a [`MetricSink`], an unbounded multi-producer channel shared by every
//! scraper task of one collection cycle. Once the cycle is over the samples are
//! drained and replayed into a fresh [`SampleRegistry`], which encodes them in
//! the Prometheus text format.
//!
//! # Metric Names
//!
//! Every metric uses the `redis_` namespace prefix. The fully-qualified name is
//! `redis_<subsystem>_<name>`, with empty parts skipped:
//!
//! - `redis_up` - Whether the liveness check of the cycle succeeded
//! - `redis_exporter_scrape_duration_seconds` - Scraper duration
//!   - Labels: collector
//! - `redis_exporter_scrape_success` - Scraper outcome (1=success, 0=failure)
//!   - Labels: collector
//! - `redis_exporter_build_info` - Exporter version (value is always 1)
//!   - Labels: version
//! - `redis_server_*`, `redis_cluster_*`, `redis_maxmemory_bytes` - Store fields
//!   - Labels: addr (plus mode, maxmemory_policy for maxmemory)
//!
//! All values are exposed as gauges.
//!
//! # Process Metrics
//!
//! [`ExporterMetrics`] lives as long as the server and is rendered next to each
//! cycle's samples:
//!
//! - `process_*` - CPU, memory, file descriptors and start time (Linux only)
//! - `promhttp_metric_handler_requests_total` - Scrapes served, by HTTP status
//!   - Labels: code

use prometheus::proto::MetricFamily;
use prometheus::{Encoder, GaugeVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub const NAMESPACE: &str = "redis";

/// Label carrying the address of the node a sample was read from.
pub const ADDR_LABEL: &str = "addr";

/// Identity of one emittable metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDesc {
    pub subsystem: String,
    pub name: String,
    pub help: String,
    pub labels: Vec<String>,
}

impl MetricDesc {
    pub fn new(
        subsystem: impl Into<String>,
        name: impl Into<String>,
        help: impl Into<String>,
        labels: &[&str],
    ) -> Self {
        Self {
            subsystem: subsystem.into(),
            name: name.into(),
            help: help.into(),
            labels: labels.iter().map(|label| label.to_string()).collect(),
        }
    }

    /// Fully-qualified metric name, e.g. `redis_server_used_memory_in_bytes`.
    pub fn fq_name(&self) -> String {
        [NAMESPACE, self.subsystem.as_str(), self.name.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// One gauge value emitted during a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub desc: MetricDesc,
    pub value: f64,
    pub label_values: Vec<String>,
}

/// Write side of the per-cycle sample channel.
///
/// Cheap to clone; each scraper task holds its own clone.
#[derive(Debug, Clone)]
pub struct MetricSink {
    tx: mpsc::UnboundedSender<Sample>,
}

/// Read side of the per-cycle sample channel.
#[derive(Debug)]
pub struct SampleReceiver {
    rx: mpsc::UnboundedReceiver<Sample>,
}

/// Creates the sample channel for one collection cycle.
pub fn sink() -> (MetricSink, SampleReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MetricSink { tx }, SampleReceiver { rx })
}

impl MetricSink {
    pub fn emit(&self, desc: &MetricDesc, value: f64, label_values: &[&str]) {
        let sample = Sample {
            desc: desc.clone(),
            value,
            label_values: label_values.iter().map(|v| v.to_string()).collect(),
        };
        if self.tx.send(sample).is_err() {
            debug!("Sample channel closed, dropping {}", desc.fq_name());
        }
    }
}

impl SampleReceiver {
    /// Takes every sample buffered so far without waiting for producers.
    pub fn drain(&mut self) -> Vec<Sample> {
        let mut samples = Vec::new();
        while let Ok(sample) = self.rx.try_recv() {
            samples.push(sample);
        }
        samples
    }
}

pub fn up_desc() -> MetricDesc {
    MetricDesc::new("", "up", "Whether the redis node is up.", &[])
}

pub fn scrape_duration_desc() -> MetricDesc {
    MetricDesc::new(
        "exporter",
        "scrape_duration_seconds",
        "Collector scrape duration.",
        &["collector"],
    )
}

pub fn scrape_success_desc() -> MetricDesc {
    MetricDesc::new(
        "exporter",
        "scrape_success",
        "Whether a collector scrape succeeded.",
        &["collector"],
    )
}

pub fn build_info_desc() -> MetricDesc {
    MetricDesc::new(
        "exporter",
        "build_info",
        "A metric with a constant '1' value labeled by the exporter version.",
        &["version"],
    )
}

/// The `redis_exporter_build_info` sample of this binary.
pub fn build_info_sample() -> Sample {
    Sample {
        desc: build_info_desc(),
        value: 1.0,
        label_values: vec![env!("CARGO_PKG_VERSION").to_string()],
    }
}

/// Prometheus registry holding the samples of a single cycle.
pub struct SampleRegistry {
    registry: Registry,
    families: HashMap<String, GaugeVec>,
}

impl SampleRegistry {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            families: HashMap::new(),
        }
    }

    /// Registers the descriptor on first use and sets the labeled value.
    ///
    /// Fails when the descriptor is not a valid Prometheus metric, or when it
    /// reuses an already registered name with a different label set.
    pub fn record(&mut self, sample: &Sample) -> anyhow::Result<()> {
        let gauge = match self.families.entry(sample.desc.fq_name()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let desc = &sample.desc;
                let labels: Vec<&str> = desc.labels.iter().map(String::as_str).collect();
                let gauge = GaugeVec::new(
                    Opts::new(desc.name.clone(), desc.help.clone())
                        .namespace(NAMESPACE)
                        .subsystem(desc.subsystem.clone()),
                    labels.as_slice(),
                )?;
                self.registry.register(Box::new(gauge.clone()))?;
                entry.insert(gauge)
            }
        };

        let values: Vec<&str> = sample.label_values.iter().map(String::as_str).collect();
        gauge
            .get_metric_with_label_values(values.as_slice())?
            .set(sample.value);
        Ok(())
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        self.render_with(Vec::new())
    }

    /// Renders this cycle's families followed by `extra`.
    pub fn render_with(&self, extra: Vec<MetricFamily>) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut metric_families = self.registry.gather();
        metric_families.extend(extra);
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

impl Default for SampleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes a cycle's samples; samples the registry rejects are logged and skipped.
pub fn render(samples: &[Sample]) -> anyhow::Result<String> {
    render_with(samples, Vec::new())
}

/// Like [`render`], appending families gathered elsewhere.
pub fn render_with(samples: &[Sample], extra: Vec<MetricFamily>) -> anyhow::Result<String> {
    let mut registry = SampleRegistry::new();
    for sample in samples {
        if let Err(e) = registry.record(sample) {
            warn!(
                "Dropping sample {}{:?}: {}",
                sample.desc.fq_name(),
                sample.label_values,
                e
            );
        }
    }
    registry.render_with(extra)
}

/// Metrics about the exporter process itself.
pub struct ExporterMetrics {
    registry: Registry,
    requests: IntCounterVec,
}

impl ExporterMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        let requests = IntCounterVec::new(
            Opts::new(
                "promhttp_metric_handler_requests_total",
                "Total number of scrapes by HTTP status code.",
            ),
            &["code"],
        )?;
        registry.register(Box::new(requests.clone()))?;

        Ok(Self { registry, requests })
    }

    /// Counts one served scrape.
    pub fn observe_request(&self, code: u16) {
        self.requests
            .with_label_values(&[code.to_string().as_str()])
            .inc();
    }

    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }
}
