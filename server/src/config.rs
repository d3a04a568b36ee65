//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use crate::error::HostError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    pub backend_url: String,
    pub timeouts: Timeouts,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `SITECHAT_BACKEND_URL`: QA backend base URL, default `http://127.0.0.1:5000`
    /// - `SITECHAT_REQUEST_TIMEOUT_SECS`: default 120
    /// - `SITECHAT_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `SITECHAT_BACKEND_URL` is malformed.
    pub fn from_env() -> Result<Self, HostError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`HostConfig::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` or `SITECHAT_BACKEND_URL` is malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HostError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| HostError::Config(format!("invalid PORT '{raw}': {e}")))?,
            None => DEFAULT_PORT,
        };

        let backend_url = parse_backend_url(
            lookup("SITECHAT_BACKEND_URL").as_deref().unwrap_or(DEFAULT_BACKEND_URL),
        )?;

        let timeouts = Timeouts {
            request_secs: parse_u64_or(
                lookup("SITECHAT_REQUEST_TIMEOUT_SECS"),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            connect_secs: parse_u64_or(
                lookup("SITECHAT_CONNECT_TIMEOUT_SECS"),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        };

        Ok(Self { port, backend_url, timeouts })
    }
}

fn parse_u64_or(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok()).unwrap_or(default)
}

fn parse_backend_url(raw: &str) -> Result<String, HostError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = reqwest::Url::parse(trimmed)
        .map_err(|e| HostError::Config(format!("invalid SITECHAT_BACKEND_URL '{raw}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(HostError::Config(format!(
            "invalid SITECHAT_BACKEND_URL '{raw}': expected http or https"
        )));
    }
    Ok(trimmed.to_owned())
}
