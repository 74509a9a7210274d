//! Shortlist Bridge - Entry Point
//!
//! Loads configuration, sets up logging, builds the bridge (with a
//! translation backend when `LLM_API_KEY` is set) and serves the HTTP API
//! until Ctrl-C.

use clap::Parser;
use shortlist_bridge::api;
use shortlist_bridge::bridge::Bridge;
use shortlist_bridge::core::config::BridgeConfig;
use shortlist_bridge::core::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Voice-command to shortlist-action bridge
#[derive(Parser, Debug)]
#[command(name = "shortlist-bridge")]
#[command(about = "Serve candidate upload, voice command and command queue endpoints")]
struct Args {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file and BRIDGE_BIND_ADDR
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shortlist_bridge=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = BridgeConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    tracing::info!(
        voice_log = config.voice_log_capacity,
        history = config.execution_history_capacity,
        retention = config.command_retention,
        strict_targets = config.translator.strict_target_names,
        "Shortlist bridge starting..."
    );

    let addr = config.bind_addr.clone();
    let bridge = Arc::new(Bridge::from_env(config)?);

    api::serve(bridge, &addr).await
}
