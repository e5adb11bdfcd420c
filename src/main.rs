use anyhow::Result;
use clap::Parser;
use redis_exporter::{
    config::{Config, Mode},
    server,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Redis addresses, comma separated (overrides config)
    #[arg(long, env = "REDIS_ADDR", value_delimiter = ',')]
    redis_addr: Option<Vec<String>>,

    /// Redis password (overrides config)
    #[arg(long, env = "REDIS_PASSWORD", hide_env_values = true)]
    redis_password: Option<String>,

    /// Deployment mode of the targets (overrides config)
    #[arg(long, env = "REDIS_MODE", value_enum)]
    mode: Option<Mode>,

    /// Port to listen on for metrics
    #[arg(short, long, env = "EXPORTER_PORT")]
    port: Option<u16>,

    /// Address to bind to
    #[arg(short, long, env = "EXPORTER_ADDR")]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Redis Exporter v{}", env!("CARGO_PKG_VERSION"));

    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(addrs) = args.redis_addr {
        config.redis.addrs = addrs;
    }
    if let Some(password) = args.redis_password {
        config.redis.password = Some(secrecy::SecretString::new(password.into()));
    }
    if let Some(mode) = args.mode {
        config.redis.mode = mode;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }
    config.validate()?;

    info!("Configuration loaded successfully");
    info!(
        "Redis targets: {:?} ({:?} mode)",
        config.redis.addrs, config.redis.mode
    );
    info!(
        "Metrics endpoint: http://{}:{}{}",
        config.server.addr, config.server.port, config.server.telemetry_path
    );

    // Start the metrics server
    if let Err(e) = server::start(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
