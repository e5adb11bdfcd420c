//! Collection cycle tests
//!
//! Liveness check, concurrent scraper fan-out and the scrape deadline.

mod common;

use async_trait::async_trait;
use common::{samples_named, value_of, FakeStore};
use redis_exporter::error::Result;
use redis_exporter::exporter::Exporter;
use redis_exporter::metrics::{ExporterMetrics, MetricSink};
use redis_exporter::scrapers::{InfoScraper, Scraper};
use redis_exporter::server::render_scrape;
use redis_exporter::store::Connection;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

const SUCCESS: &str = "redis_exporter_scrape_success";
const DURATION: &str = "redis_exporter_scrape_duration_seconds";

fn deadline_in(secs: u64) -> Instant {
    Instant::now() + Duration::from_secs(secs)
}

fn healthy_node(addr: &str) -> FakeStore {
    FakeStore::new(addr)
        .with_info("server", "uptime_in_seconds:3600")
        .with_info("clients", "connected_clients:4")
        .with_info("memory", "used_memory:1048576")
}

struct PanickingScraper;

#[async_trait]
impl Scraper for PanickingScraper {
    fn name(&self) -> &'static str {
        "panicking"
    }

    fn help(&self) -> &'static str {
        "Always panics."
    }

    async fn scrape(&self, _connections: &[Connection], _sink: &MetricSink) -> Result<()> {
        panic!("scraper bug");
    }
}

#[tokio::test]
async fn test_one_failing_scraper_does_not_affect_siblings() {
    // Given: Three scrapers over a node where INFO memory fails
    let conn = healthy_node("localhost:6379")
        .failing_section("memory")
        .connection();
    let exporter = Exporter::new(vec![
        Arc::new(InfoScraper::server()),
        Arc::new(InfoScraper::clients()),
        Arc::new(InfoScraper::memory()),
    ]);

    // When: Running a cycle
    let samples = exporter.collect(&[conn], deadline_in(5)).await;

    // Then: The node is up and exactly one scraper reports failure
    assert_eq!(value_of(&samples, "redis_up", &[]), Some(1.0));
    let outcomes = samples_named(&samples, SUCCESS);
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes.iter().filter(|s| s.value == 0.0).count(), 1);
    assert_eq!(value_of(&samples, SUCCESS, &["info.memory"]), Some(0.0));
    assert_eq!(value_of(&samples, SUCCESS, &["info.server"]), Some(1.0));
    assert_eq!(value_of(&samples, SUCCESS, &["info.clients"]), Some(1.0));

    // Then: The healthy scrapers still produced their data
    assert_eq!(
        value_of(&samples, "redis_server_uptime_in_seconds", &["localhost:6379"]),
        Some(3600.0)
    );
    assert!(samples_named(&samples, "redis_server_used_memory_in_bytes").is_empty());
}

#[tokio::test]
async fn test_every_scraper_reports_duration() {
    let conn = healthy_node("localhost:6379").connection();
    let exporter = Exporter::new(vec![
        Arc::new(InfoScraper::server()),
        Arc::new(InfoScraper::clients()),
    ]);

    let samples = exporter.collect(&[conn], deadline_in(5)).await;

    let durations = samples_named(&samples, DURATION);
    // One per scraper plus the liveness check
    assert_eq!(durations.len(), 3);
    assert!(durations.iter().all(|s| s.value >= 0.0));
    assert!(value_of(&samples, DURATION, &["connection"]).is_some());
}

#[tokio::test]
async fn test_failed_liveness_check_skips_scrapers() {
    // Given: A single unreachable node
    let conn = FakeStore::new("localhost:6379").unreachable().connection();
    let exporter = Exporter::new(vec![
        Arc::new(InfoScraper::server()),
        Arc::new(InfoScraper::memory()),
    ]);

    // When: Running a cycle
    let samples = exporter.collect(&[conn], deadline_in(5)).await;

    // Then: Only redis_up 0 is produced
    assert_eq!(samples.len(), 1);
    assert_eq!(value_of(&samples, "redis_up", &[]), Some(0.0));
}

#[tokio::test]
async fn test_no_connection_is_down() {
    let exporter = Exporter::new(vec![Arc::new(InfoScraper::server())]);

    let samples = exporter.collect(&[], deadline_in(5)).await;

    assert_eq!(samples.len(), 1);
    assert_eq!(value_of(&samples, "redis_up", &[]), Some(0.0));
}

#[tokio::test]
async fn test_liveness_check_succeeds_when_any_node_answers() {
    // Given: One unreachable and one healthy node
    let down = FakeStore::new("10.0.0.1:6379").unreachable().connection();
    let up = healthy_node("10.0.0.2:6379").connection();
    let exporter = Exporter::new(vec![Arc::new(InfoScraper::clients())]);

    // When: Running a cycle
    let samples = exporter.collect(&[up, down], deadline_in(5)).await;

    // Then: The cycle is up; the scraper fails on the unreachable node
    assert_eq!(value_of(&samples, "redis_up", &[]), Some(1.0));
    assert_eq!(value_of(&samples, SUCCESS, &["info.clients"]), Some(0.0));
    assert_eq!(
        value_of(
            &samples,
            "redis_server_connected_clients_in_total",
            &["10.0.0.2:6379"]
        ),
        Some(4.0)
    );
}

#[tokio::test]
async fn test_deadline_marks_unfinished_scrapers_failed() {
    // Given: A node that answers PING at once but INFO only after 5 seconds
    let conn = healthy_node("localhost:6379")
        .slow(Duration::from_secs(5))
        .connection();
    let exporter = Exporter::new(vec![
        Arc::new(InfoScraper::server()),
        Arc::new(InfoScraper::memory()),
    ]);

    // When: Running a cycle with a 200ms deadline
    let started = Instant::now();
    let deadline = started + Duration::from_millis(200);
    let samples = exporter.collect(&[conn], deadline).await;

    // Then: The cycle returns at the deadline, not after the slow replies
    assert!(started.elapsed() < Duration::from_secs(2));

    // Then: Both scrapers are reported as failed with a duration
    assert_eq!(value_of(&samples, "redis_up", &[]), Some(1.0));
    assert_eq!(value_of(&samples, SUCCESS, &["info.server"]), Some(0.0));
    assert_eq!(value_of(&samples, SUCCESS, &["info.memory"]), Some(0.0));
    assert!(value_of(&samples, DURATION, &["info.server"]).is_some());
    assert!(samples_named(&samples, "redis_server_uptime_in_seconds").is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_scrapers_finishing_at_the_deadline_report_once() {
    // Given: Scrapers whose replies land right around the deadline
    let exporter = Exporter::new(vec![
        Arc::new(InfoScraper::server()),
        Arc::new(InfoScraper::clients()),
        Arc::new(InfoScraper::memory()),
    ]);

    for round in 0..50u64 {
        let delay = Duration::from_micros(4000 + (round % 5) * 500);
        let conn = healthy_node("localhost:6379").slow(delay).connection();

        // When: Running a cycle with a deadline close to the reply time
        let samples = exporter
            .collect(&[conn], Instant::now() + Duration::from_millis(5))
            .await;

        // Then: Every scraper reports exactly one success and one duration
        for name in ["info.server", "info.clients", "info.memory"] {
            let outcomes = samples_named(&samples, SUCCESS)
                .into_iter()
                .filter(|s| s.label_values == [name])
                .count();
            let durations = samples_named(&samples, DURATION)
                .into_iter()
                .filter(|s| s.label_values == [name])
                .count();
            assert_eq!(outcomes, 1, "round {}: {} success samples", round, name);
            assert_eq!(durations, 1, "round {}: {} duration samples", round, name);
        }
    }
}

#[tokio::test]
async fn test_panicking_scraper_is_reported_failed() {
    // Given: A panicking scraper next to a healthy one
    let conn = healthy_node("localhost:6379").connection();
    let exporter = Exporter::new(vec![
        Arc::new(PanickingScraper),
        Arc::new(InfoScraper::server()),
    ]);

    // When: Running a cycle
    let samples = exporter.collect(&[conn], deadline_in(5)).await;

    // Then: The panic is contained and reported as a failure
    assert_eq!(value_of(&samples, SUCCESS, &["panicking"]), Some(0.0));
    assert_eq!(value_of(&samples, SUCCESS, &["info.server"]), Some(1.0));
}

#[tokio::test]
async fn test_used_memory_end_to_end() {
    // Given: A node reporting used_memory:1048576
    let conn = FakeStore::new("localhost:6379")
        .with_info("memory", "# Memory\r\nused_memory:1048576\r\n")
        .connection();
    let exporter = Exporter::new(vec![Arc::new(InfoScraper::memory())]);

    // When: Scraping and rendering
    let process = ExporterMetrics::new().expect("exporter metrics should register");
    let output = render_scrape(&exporter, &process, &[conn], deadline_in(5))
        .await
        .expect("render should succeed");

    // Then: The exposition carries the gauge labeled with the node address
    assert!(output.contains("# TYPE redis_server_used_memory_in_bytes gauge"));
    assert!(
        output.contains("redis_server_used_memory_in_bytes{addr=\"localhost:6379\"} 1048576"),
        "unexpected output:\n{}",
        output
    );
    assert!(output.contains("redis_up 1"));
    assert!(output.contains("redis_exporter_scrape_success{collector=\"info.memory\"} 1"));
}

#[tokio::test]
async fn test_exporter_is_reusable_across_cycles() {
    // Given: One exporter and two nodes with different keyspaces
    let exporter = Exporter::new(vec![Arc::new(InfoScraper::keyspace())]);
    let first = FakeStore::new("localhost:6379")
        .with_info("keyspace", "db0:keys=1,expires=0,avg_ttl=0")
        .connection();
    let second = FakeStore::new("localhost:6379")
        .with_info("keyspace", "db7:keys=3,expires=0,avg_ttl=0")
        .connection();

    // When: Running two cycles
    let _ = exporter.collect(&[first], deadline_in(5)).await;
    let samples = exporter.collect(&[second], deadline_in(5)).await;

    // Then: The second cycle only reports what its own reply contained
    assert!(samples_named(&samples, "redis_server_keyspace_db0_keys_in_total").is_empty());
    assert_eq!(
        value_of(
            &samples,
            "redis_server_keyspace_db7_keys_in_total",
            &["localhost:6379"]
        ),
        Some(3.0)
    );
}
