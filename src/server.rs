//! HTTP Server and Per-Request Scrapes
//!
//! # Architecture
//!
//! - **HTTP Server**: Axum-based server exposing the telemetry path, `/health` and `/`
//! - **Per-Request Scrape**: Every request to the telemetry path opens connections
//!   to the target nodes, runs one [`Exporter`] cycle and renders the result.
//!   Nothing is cached between requests.
//! - **State Management**: Shared state (config, exporter) using Arc for thread-safety
//!
//! # Endpoints
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` (configurable) - Prometheus metrics in text format
//! - `GET /health` - Liveness of the exporter process itself
//!
//! # Scrape Deadline
//!
//! Prometheus announces how long it will wait through the
//! `X-Prometheus-Scrape-Timeout-Seconds` header. The whole request (connecting,
//! probing, scraping) is bounded by that value, or by `redis.timeout_seconds`
//! when the header is absent or invalid.
//!
//! # Error Handling
//!
//! Node and scraper failures are reported in-band (`redis_up`,
//! `redis_exporter_scrape_success`) with HTTP 200. Only a cluster topology that
//! cannot be resolved answers 503.

use crate::config::{Config, Mode, RedisConfig, HEALTH_PATH, MAX_TIMEOUT_SECONDS};
use crate::error::{ExporterError, Result};
use crate::exporter::Exporter;
use crate::metrics::{self, build_info_sample, ExporterMetrics};
use crate::scrapers;
use crate::store::{Connection, Connector, RedisConnector};
use crate::topology::resolve_cluster_nodes;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use futures_util::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// Header carrying the Prometheus scrape timeout, in seconds.
pub const SCRAPE_TIMEOUT_HEADER: &str = "X-Prometheus-Scrape-Timeout-Seconds";

#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    exporter: Arc<Exporter>,
    connector: Arc<dyn Connector>,
    process: Arc<ExporterMetrics>,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let selected = scrapers::select(&config.collect, config.redis.mode);
    for scraper in &selected {
        info!("Enabled scraper {}: {}", scraper.name(), scraper.help());
    }

    let state = AppState {
        config: Arc::new(config.clone()),
        exporter: Arc::new(Exporter::new(selected)),
        connector: Arc::new(RedisConnector::new(config.redis.clone())),
        process: Arc::new(ExporterMetrics::new()?),
    };

    // Build the router
    let app = Router::new()
        .route("/", get(root_handler))
        .route(&config.server.telemetry_path, get(metrics_handler))
        .route(HEALTH_PATH, get(health_handler))
        .with_state(state);

    // Start the server
    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(ExporterError::Io)?;

    info!("Metrics server listening on {}", addr);
    info!(
        "Metrics available at http://{}{}",
        addr, config.server.telemetry_path
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| ExporterError::Server(e.to_string()))?;

    Ok(())
}

/// Scrape timeout requested by Prometheus, or `default` when the header is
/// missing, unparsable or not positive. Requests above
/// [`MAX_TIMEOUT_SECONDS`] are clamped to it.
pub fn scrape_timeout(headers: &HeaderMap, default: Duration) -> Duration {
    let Some(value) = headers.get(SCRAPE_TIMEOUT_HEADER) else {
        return default;
    };

    let requested = value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs > 0.0)
        .and_then(|secs| Duration::try_from_secs_f64(secs.min(MAX_TIMEOUT_SECONDS)).ok());

    match requested {
        Some(timeout) => timeout,
        None => {
            error!(
                "Invalid {} header {:?}, using default timeout of {:?}",
                SCRAPE_TIMEOUT_HEADER, value, default
            );
            default
        }
    }
}

/// Deadline of a scrape starting now.
pub fn scrape_deadline(headers: &HeaderMap, default: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(scrape_timeout(headers, default))
        .or_else(|| now.checked_add(default))
        .unwrap_or(now)
}

/// Opens a connection to every target node of one scrape.
///
/// Standalone mode connects to the configured addresses; unreachable ones are
/// logged and left out (the liveness check reports them). Cluster mode resolves
/// the node set through the first address that answers and fails when no seed
/// answers, the listing is invalid, or no resolved node accepts a connection.
pub async fn open_connections(
    config: &RedisConfig,
    connector: &dyn Connector,
    deadline: Instant,
) -> Result<Vec<Connection>> {
    let addrs: Vec<String> = config
        .addrs
        .iter()
        .map(|addr| addr.trim())
        .filter(|addr| !addr.is_empty())
        .map(str::to_string)
        .collect();

    match config.mode {
        Mode::Standalone => Ok(connect_all(&addrs, connector, deadline).await),
        Mode::Cluster => {
            let seed = find_seed(&addrs, connector, deadline).await?;
            let nodes = resolve_cluster_nodes(&*seed).await?;
            let connections = connect_all(&nodes, connector, deadline).await;
            if connections.is_empty() {
                return Err(ExporterError::Topology(format!(
                    "none of the {} cluster nodes accepted a connection",
                    nodes.len()
                )));
            }
            Ok(connections)
        }
    }
}

async fn connect_all(
    addrs: &[String],
    connector: &dyn Connector,
    deadline: Instant,
) -> Vec<Connection> {
    let attempts = addrs.iter().map(|addr| connector.connect(addr, deadline));

    join_all(attempts)
        .await
        .into_iter()
        .zip(addrs)
        .filter_map(|(result, addr)| match result {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Failed to connect to redis {}: {}", addr, e);
                None
            }
        })
        .collect()
}

async fn find_seed(
    addrs: &[String],
    connector: &dyn Connector,
    deadline: Instant,
) -> Result<Connection> {
    for addr in addrs {
        let seed = match connector.connect(addr, deadline).await {
            Ok(seed) => seed,
            Err(e) => {
                warn!("Cluster seed {} unreachable: {}", addr, e);
                continue;
            }
        };
        match seed.ping().await {
            Ok(()) => return Ok(seed),
            Err(e) => warn!("Cluster seed {} did not answer PING: {}", addr, e),
        }
    }

    Err(ExporterError::Topology(format!(
        "no seed answered among {:?}",
        addrs
    )))
}

/// Runs one collection cycle over `connections` and renders it, build info and
/// process metrics included.
pub async fn render_scrape(
    exporter: &Exporter,
    process: &ExporterMetrics,
    connections: &[Connection],
    deadline: Instant,
) -> anyhow::Result<String> {
    let mut samples = exporter.collect(connections, deadline).await;
    samples.push(build_info_sample());
    metrics::render_with(&samples, process.gather())
}

async fn root_handler(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<html>
<head><title>Redis Exporter</title></head>
<body>
<h1>Redis Exporter v{}</h1>
<p><a href="{}">Metrics</a></p>
<p><a href="{}">Health</a></p>
</body>
</html>"#,
        env!("CARGO_PKG_VERSION"),
        state.config.server.telemetry_path,
        HEALTH_PATH
    ))
}

async fn metrics_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let response = scrape_response(&state, &headers).await;
    state.process.observe_request(response.status().as_u16());
    response
}

async fn scrape_response(state: &AppState, headers: &HeaderMap) -> Response {
    let deadline = scrape_deadline(headers, state.config.redis.timeout());

    let connections =
        match open_connections(&state.config.redis, state.connector.as_ref(), deadline).await {
            Ok(connections) => connections,
            Err(e) => {
                error!("Failed to resolve scrape targets: {}", e);
                return (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("Error resolving scrape targets: {}", e),
                )
                    .into_response();
            }
        };

    match render_scrape(&state.exporter, &state.process, &connections, deadline).await {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
