//! UINJKT Repository API - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use uinjkt_repository_api::{Config, ConfigOverrides, FetchStrategy, Server};

#[derive(Parser, Debug)]
#[command(name = "uinjkt-repository-api")]
#[command(about = "JSON API over the UIN Jakarta institutional repository")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(long, short, env = "UINJKT_API_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Fetch strategy: static or rendered
    #[arg(long, value_enum)]
    strategy: Option<FetchStrategy>,

    /// Repository base URL, e.g. https://repository.uinjkt.ac.id
    #[arg(long)]
    base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().compact())
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting UINJKT repository API"
    );

    let overrides = ConfigOverrides {
        host: cli.host,
        port: cli.port,
        strategy: cli.strategy,
        base_url: cli.base_url,
    };
    let config = Config::load(cli.config.as_deref())?.apply_overrides(&overrides)?;

    let server = Server::new(config)?;
    server.run().await?;

    Ok(())
}
