//! factsift: look up contact details for a list of entities.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use factsift_server::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    // Logs go to stderr so `run` can stream CSV on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let code = cli::execute(Cli::parse()).await?;
    std::process::exit(code);
}
