//! BridgeListen CLI.
//!
//! # Commands
//! ```text
//! bridgelisten --config <file> height
//! bridgelisten --config <file> block <height> [--pretty]
//! bridgelisten --config <file> info
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bridgelisten_core::config::ListenConfig;
use bridgelisten_core::listener::ChainListen;
use bridgelisten_neo::NeoChainListen;

mod logging;

#[derive(Parser)]
#[command(
    name = "bridgelisten",
    about = "Extract cross-chain bridge records from Neo blocks",
    version
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the node's latest height and the explorer's extended height
    Height,

    /// Extract bridge records from one block and print them as JSON
    Block {
        /// Block height
        height: u64,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the effective configuration
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ListenConfig::load(&cli.config)
        .with_context(|| format!("load config '{}'", cli.config.display()))?;
    logging::init_tracing(&config.log);

    match cli.command {
        Commands::Height => cmd_height(config).await,
        Commands::Block { height, pretty } => cmd_block(config, height, pretty).await,
        Commands::Info => cmd_info(&config),
    }
}

// ─── Command implementations ─────────────────────────────────────────────────

async fn cmd_height(config: ListenConfig) -> Result<()> {
    let listen = NeoChainListen::from_config(config.neo)?;

    let latest = listen
        .latest_height()
        .await
        .context("query latest height")?;
    println!("Chain:    {} ({})", listen.chain_name(), listen.chain_id());
    println!("Latest:   {latest}");

    match listen.extend_latest_height().await {
        Ok(height) => println!("Extended: {height}"),
        Err(e) => {
            tracing::warn!(error = %e, url = %listen.config().extend_node_url, "extended height unavailable");
            println!("Extended: unavailable ({e})");
        }
    }
    Ok(())
}

async fn cmd_block(config: ListenConfig, height: u64, pretty: bool) -> Result<()> {
    let listen = NeoChainListen::from_config(config.neo)?;
    let records = listen
        .handle_new_block(height)
        .await
        .with_context(|| format!("handle block {height}"))?;

    tracing::info!(
        chain = listen.chain_name(),
        height,
        records = records.len(),
        "block extracted"
    );
    if pretty {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        println!("{}", serde_json::to_string(&records)?);
    }
    Ok(())
}

fn cmd_info(config: &ListenConfig) -> Result<()> {
    println!("BridgeListen v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
