//! Svyazukha AI chat relay server binary.
//!
//! Serves `/ai-chat` and `/health` until interrupted.

use std::time::Duration;

use clap::Parser;
use svyazukha_api::config::ApiConfig;
use tracing::{info, warn};

/// CLI arguments. Unset flags fall back to the environment, then to defaults.
#[derive(Parser, Debug)]
#[command(name = "svyazukha_api_server", about = "Svyazukha AI chat relay server")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "BIND_ADDR")]
    bind_addr: Option<String>,

    /// Chat-completions endpoint.
    #[arg(long, env = "OPENAI_API_URL")]
    openai_api_url: Option<String>,

    /// Outbound request timeout in seconds.
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS")]
    upstream_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,svyazukha_api=debug,svyazukha_core=debug")
            }),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    if let Some(bind_addr) = args.bind_addr {
        config.bind_addr = bind_addr;
    }
    if let Some(url) = args.openai_api_url {
        config.openai_api_url = url;
    }
    if let Some(secs) = args.upstream_timeout_secs.filter(|s| *s > 0) {
        config.upstream_timeout = Duration::from_secs(secs);
    }

    info!(
        openai_api_url = %config.openai_api_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        "starting svyazukha_api_server"
    );
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; chat requests will fail with 500");
    }

    let bind_addr = config.bind_addr.clone();
    let state = svyazukha_api::AppState::new(&config)?;
    let app = svyazukha_api::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %listener.local_addr()?, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
