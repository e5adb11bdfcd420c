use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Cluster topology error: {0}")]
    Topology(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExporterError>;
