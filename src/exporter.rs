//! Collection Cycle Orchestration
//!
//! The [`Exporter`] runs one collection cycle per scrape request:
//!
//! 1. Liveness check: `PING` every target node. If none answers, `redis_up` is 0
//!    and nothing else runs.
//! 2. Fan-out: one tokio task per enabled scraper. A scraper walks the nodes
//!    sequentially; scrapers run concurrently and share the node handles.
//! 3. Fan-in: the exporter waits for every task or for the request deadline,
//!    whichever comes first. Tasks still running at the deadline are aborted.
//!
//! Each scraper reports `redis_exporter_scrape_duration_seconds` and
//! `redis_exporter_scrape_success`, labeled `collector="<scraper name>"`. A
//! failing scraper never affects its siblings.

use crate::metrics::{
    scrape_duration_desc, scrape_success_desc, sink, up_desc, MetricSink, Sample,
};
use crate::scrapers::Scraper;
use crate::store::Connection;
use futures_util::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{timeout_at, Instant};
use tracing::{error, info_span, warn, Instrument};

/// `collector` label of the liveness check duration.
const LIVENESS_COLLECTOR: &str = "connection";

pub struct Exporter {
    scrapers: Vec<Arc<dyn Scraper>>,
}

impl Exporter {
    pub fn new(scrapers: Vec<Arc<dyn Scraper>>) -> Self {
        Self { scrapers }
    }

    pub fn scrapers(&self) -> &[Arc<dyn Scraper>] {
        &self.scrapers
    }

    /// Runs a full cycle and returns every sample it produced, `redis_up` included.
    pub async fn collect(&self, connections: &[Connection], deadline: Instant) -> Vec<Sample> {
        let (sink, mut samples) = sink();
        let up = self.scrape(connections, &sink, deadline).await;
        sink.emit(&up_desc(), up, &[]);
        drop(sink);
        samples.drain()
    }

    /// Runs the liveness check and every scraper, writing into `sink`.
    ///
    /// Returns the cycle liveness: 0.0 when the liveness check failed, 1.0 otherwise.
    pub async fn scrape(
        &self,
        connections: &[Connection],
        sink: &MetricSink,
        deadline: Instant,
    ) -> f64 {
        let started = Instant::now();
        if !liveness_check(connections, deadline).await {
            return 0.0;
        }
        sink.emit(
            &scrape_duration_desc(),
            started.elapsed().as_secs_f64(),
            &[LIVENESS_COLLECTOR],
        );

        let connections: Arc<[Connection]> = connections.into();
        let mut tasks = JoinSet::new();
        let mut pending = HashSet::new();

        for scraper in &self.scrapers {
            let scraper = Arc::clone(scraper);
            let connections = Arc::clone(&connections);
            let sink = sink.clone();
            let span = info_span!("scraper", name = scraper.name());

            pending.insert(scraper.name());
            tasks.spawn(run_scraper(scraper, connections, sink).instrument(span));
        }

        let fan_out = Instant::now();
        loop {
            match timeout_at(deadline, tasks.join_next()).await {
                Ok(Some(joined)) => record(joined, &mut pending, sink),
                Ok(None) => break,
                Err(_) => {
                    // Tasks may have finished since the last poll.
                    while let Some(joined) = tasks.try_join_next() {
                        record(joined, &mut pending, sink);
                    }
                    warn!(
                        "Scrape deadline reached with {} scrapers still running",
                        tasks.len()
                    );
                    tasks.abort_all();
                    break;
                }
            }
        }

        // Scrapers that panicked or were cut off by the deadline.
        let elapsed = fan_out.elapsed().as_secs_f64();
        for name in pending {
            warn!("Scraper {} did not complete", name);
            sink.emit(&scrape_duration_desc(), elapsed, &[name]);
            sink.emit(&scrape_success_desc(), 0.0, &[name]);
        }

        1.0
    }
}

/// Outcome of one scraper task.
struct Report {
    name: &'static str,
    success: f64,
    elapsed: f64,
}

async fn run_scraper(
    scraper: Arc<dyn Scraper>,
    connections: Arc<[Connection]>,
    sink: MetricSink,
) -> Report {
    let started = Instant::now();
    let success = match scraper.scrape(&connections, &sink).await {
        Ok(()) => 1.0,
        Err(e) => {
            error!("Error from scraper {}: {}", scraper.name(), e);
            0.0
        }
    };

    Report {
        name: scraper.name(),
        success,
        elapsed: started.elapsed().as_secs_f64(),
    }
}

/// Emits the duration and success of a joined task. Each scraper is recorded
/// at most once since it leaves `pending` here.
fn record(
    joined: Result<Report, JoinError>,
    pending: &mut HashSet<&'static str>,
    sink: &MetricSink,
) {
    match joined {
        Ok(report) => {
            if pending.remove(report.name) {
                sink.emit(&scrape_duration_desc(), report.elapsed, &[report.name]);
                sink.emit(&scrape_success_desc(), report.success, &[report.name]);
            }
        }
        Err(e) => error!("Scraper task failed: {}", e),
    }
}

/// Pings every node; succeeds when at least one answers before `deadline`.
async fn liveness_check(connections: &[Connection], deadline: Instant) -> bool {
    if connections.is_empty() {
        error!("No redis node to scrape");
        return false;
    }

    let pings = join_all(connections.iter().map(|conn| conn.ping()));
    let results = match timeout_at(deadline, pings).await {
        Ok(results) => results,
        Err(_) => {
            error!("Liveness check did not finish before the scrape deadline");
            return false;
        }
    };

    let mut alive = 0;
    for (conn, result) in connections.iter().zip(results) {
        match result {
            Ok(()) => alive += 1,
            Err(e) => error!("Error pinging redis {}: {}", conn.addr(), e),
        }
    }
    alive > 0
}
