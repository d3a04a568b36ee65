mod backend;
mod command;
mod driver;
mod error;
mod render;

#[cfg(test)]
mod test_support;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::io::BufReader;
use tracing::Level;

use crate::backend::HttpBackend;
use crate::driver::Driver;
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "sitechat-cli", about = "Chat with a website from the terminal")]
struct Cli {
    #[arg(long, env = "SITECHAT_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    /// Website to extract before the first prompt.
    #[arg(long)]
    url: Option<String>,

    #[arg(long, env = "SITECHAT_DOWNLOAD_DIR", default_value = ".")]
    download_dir: PathBuf,

    #[arg(long, env = "SITECHAT_TIMEOUT_SECS", default_value_t = 120)]
    timeout_secs: u64,

    /// Log remote call failures to stderr.
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::ERROR })
        .init();

    let backend = HttpBackend::new(&cli.base_url, Duration::from_secs(cli.timeout_secs))?;
    tracing::debug!(base_url = backend.base_url(), "backend configured");

    let mut driver = Driver::new(backend, cli.download_dir, io::stdout());
    driver.start()?;
    if let Some(url) = cli.url {
        driver.handle_input(command::Input::Message(url)).await?;
    }

    driver.run(BufReader::new(tokio::io::stdin())).await
}
