use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

mod api;
mod config;

use config::{AppState, Overrides, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "vercel-mcp")]
#[command(about = "Read-only MCP gateway for the Vercel REST API", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "vercel-mcp.toml")]
    config: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Vercel API token
    #[arg(long, env = "VERCEL_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Team used when a query does not name one
    #[arg(long, env = "VERCEL_TEAM_ID")]
    team_id: Option<String>,

    /// Base URL of the Vercel API
    #[arg(long, env = "VERCEL_API_URL")]
    api_url: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "vercel_mcp=info,vercel_mcp_client=info,vercel_mcp_server=info,tower_http=debug".into()
    });

    match format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    tracing::info!("Starting Vercel MCP gateway");

    // Load configuration
    let config = ServerConfig::load(
        &args.config,
        Overrides {
            token: args.token,
            team_id: args.team_id,
            api_url: args.api_url,
        },
    )?;
    tracing::info!(
        upstream = %config.upstream.base_url,
        team = config.upstream.default_team_id.as_deref().unwrap_or("-"),
        "Configuration loaded"
    );

    let state = AppState::new(config)?;

    let addr = format!("{}:{}", args.host, args.port);
    api::serve(&addr, state).await?;

    Ok(())
}
