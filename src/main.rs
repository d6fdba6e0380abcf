use anyhow::Result;
use clap::Parser;
use reframe::config::Config;
use reframe::http::start_http_server;
use std::sync::Arc;
use tracing::info;

/// Reframe server: session endpoints plus the generation-service proxy
/// configuration for the wizard frontend.
#[derive(Parser, Debug)]
#[command(name = "reframe", version, about)]
struct Cli {
    /// Bind address for the HTTP server (overrides config and env)
    #[arg(long)]
    bind: Option<String>,

    /// Path to the TOML config file
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    reframe::load_env();

    if let Some(path) = cli.config {
        // Config::load reads REFRAME_CONFIG; the flag is a convenience alias.
        unsafe { std::env::set_var("REFRAME_CONFIG", path) };
    }

    let mut config = Config::load()?;
    if let Some(bind) = cli.bind {
        config.runtime.http_bind = bind
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid --bind address '{}': {}", bind, e))?;
    }

    tracing_subscriber::fmt()
        .with_env_filter(config.runtime.log_level.clone())
        .init();

    info!(
        backend_url = %config.generation.backend_url,
        "Starting Reframe server"
    );

    start_http_server(Arc::new(config)).await?;

    Ok(())
}
