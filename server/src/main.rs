mod config;
mod error;
mod routes;
mod state;
mod upstream;

use crate::config::HostConfig;
use crate::error::HostError;
use crate::upstream::Upstream;

#[tokio::main]
async fn main() -> Result<(), HostError> {
    // A missing .env file is normal outside development.
    let dotenv = dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    if let Some(path) = dotenv {
        tracing::info!(path = %path.display(), "loaded environment file");
    }

    let config = HostConfig::from_env()?;
    let upstream = Upstream::new(&config)?;
    tracing::info!(backend = upstream.base_url(), "QA backend configured");

    let state = state::AppState::new(upstream);
    let app = routes::leptos_app(state)?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!(port = config.port, "sitechat listening");
    axum::serve(listener, app).await?;
    Ok(())
}
