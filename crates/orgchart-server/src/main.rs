//! CLI binary entry point for the org chart directory server.
//!
//! Usage:
//!   orgchart-server [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>    Path to configuration TOML file
//!   -r, --rpc <ADDR>       RPC bind address (overrides config)
//!   -v, --verbose          Increase logging verbosity

use std::path::PathBuf;

use clap::Parser;

use orgchart_server::config::DirectoryConfig;
use orgchart_server::directory::OrgDirectory;
use orgchart_server::rpc_server::RpcServer;

/// Org chart server - keeps the reporting hierarchy consistent.
#[derive(Parser, Debug)]
#[command(name = "orgchart-server")]
#[command(about = "JSON-RPC directory of employees and designations")]
#[command(version)]
struct Cli {
    /// Path to configuration TOML file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON-RPC server bind address (e.g., 127.0.0.1:9480).
    #[arg(short, long, value_name = "ADDR")]
    rpc: Option<String>,

    /// Increase logging verbosity (can be repeated: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(orgchart_protocol::DEFAULT_CONFIG_PATH));
    let mut config = DirectoryConfig::load(Some(config_path.as_path()))?;

    if let Some(rpc) = cli.rpc {
        config.rpc.bind_addr = rpc;
    }

    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    if config.logging.json_format {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    match &config.source {
        Some(path) => tracing::info!(path = %path.display(), "Configuration loaded"),
        None => tracing::warn!(
            path = %config_path.display(),
            "Config file not found, using defaults"
        ),
    }

    let rpc_addr = config.rpc_socket_addr()?;

    tracing::info!(
        rpc = %rpc_addr,
        designations = config.catalog.designations.len(),
        "Starting org chart server"
    );

    let directory = OrgDirectory::from_config(&config.catalog)?.into_shared();

    let rpc_server = RpcServer::new(
        rpc_addr.to_string(),
        directory,
        config.rpc.max_connections,
    );

    tokio::select! {
        result = rpc_server.run() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "RPC server error");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
