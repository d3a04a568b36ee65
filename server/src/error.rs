//! Host startup and proxy errors.

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("leptos configuration: {0}")]
    Leptos(String),
    #[error("http client build failed: {0}")]
    HttpClientBuild(String),
    #[error("backend request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("server I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
