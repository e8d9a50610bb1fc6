use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::net::{IpAddr, SocketAddr};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nytimes_proxy::config::Config;
use nytimes_proxy::gateway::ProxyServer;

#[derive(Parser)]
#[command(
    name = "nytimes-proxy",
    version,
    about = "Microservice that proxies the NYTimes Top Stories and Article Search APIs",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides NYTIMES_PROXY_LOG_FORMAT
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Host to bind; overrides NYTIMES_PROXY_BIND
        #[arg(long)]
        host: Option<String>,

        /// Port to bind; overrides NYTIMES_PROXY_BIND
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration and print the server summary
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A missing credential stops the process here, before anything is bound
    let config = Config::from_env().context("Failed to load configuration")?;

    let format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&format, &config.logging.level, cli.verbose)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let config = with_bind_override(config, host, port)?;
            tracing::info!(
                bind_address = %config.bind_address,
                base_url = %config.base_url,
                "Starting serve command"
            );
            serve(config).await?;
        }

        Commands::Info => {
            let server = ProxyServer::new(config)?;
            println!("{}", server.info().display());
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("nytimes_proxy=debug,tower_http=debug,info")
    } else {
        let directives = format!("nytimes_proxy={level},tower_http={level},warn");
        tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(directives))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

fn with_bind_override(
    mut config: Config,
    host: Option<String>,
    port: Option<u16>,
) -> Result<Config> {
    let ip = match host {
        Some(host) => host
            .parse::<IpAddr>()
            .with_context(|| format!("Invalid host address: {host}"))?,
        None => config.bind_address.ip(),
    };
    let port = port.unwrap_or_else(|| config.bind_address.port());

    config.bind_address = SocketAddr::new(ip, port);
    Ok(config)
}

async fn serve(config: Config) -> Result<()> {
    let server = ProxyServer::new(config)?;

    println!("{}", server.info().display());
    println!();

    server
        .start_with_shutdown(shutdown_signal())
        .await
        .context("Proxy server failed")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
