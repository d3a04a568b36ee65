//! Errors that end the terminal session.
//!
//! Remote call failures and download write failures are not here: they are
//! printed as transcript errors and the session keeps going.

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http client build failed: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
