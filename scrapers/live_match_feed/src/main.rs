use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use live_match_feed::{config::FeedConfig, web};

#[derive(Debug, Parser)]
#[command(author, version, about = "Serves a paginated JSON feed of live football matches", long_about = None)]
struct Cli {
    /// Address to bind (overrides FEED_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides FEED_PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = FeedConfig::from_env();
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    info!("Starting live match feed on {}:{}", config.server.host, config.server.port);
    web::serve(config).await
}
