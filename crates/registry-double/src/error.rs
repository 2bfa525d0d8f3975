use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoubleError {
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid health check url {url:?}: {source}")]
    InvalidHealthCheckUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("health check request failed: {0}")]
    HealthCheck(#[from] reqwest::Error),

    #[error("server task failed: {0}")]
    ServerTask(#[from] tokio::task::JoinError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, DoubleError>;
