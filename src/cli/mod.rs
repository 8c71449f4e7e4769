//! Command line entry point for the `vault-mcp` binary.

pub mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, ConfigOverrides};
use crate::mcp::{VaultServer, serve_stdio};
use crate::sync::{GitSync, RealGit};
use crate::vault::VaultClient;

pub use error::{AppError, AppResult};

#[derive(Parser, Debug)]
#[command(name = "vault-mcp")]
#[command(author, version, about = "MCP server for an Obsidian vault", long_about = None)]
pub struct Cli {
    /// Obsidian Local REST API URL (default: OBSIDIAN_API_URL env or http://localhost:27123)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// API key for the Local REST API (default: OBSIDIAN_API_KEY env)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Commit and push the vault after every change (default: GIT_AUTO_SYNC=true)
    #[arg(long, global = true)]
    pub git_auto_sync: bool,

    /// Git working copy of the vault (default: VAULT_PATH env)
    #[arg(long, global = true)]
    pub vault_path: Option<PathBuf>,

    /// Log level (default: LOG_LEVEL env or info)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Serve MCP over stdio (default)
    Serve,
    /// Check the vault API and the git repository, then exit
    Check,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            api_key: self.api_key.clone(),
            git_auto_sync: self.git_auto_sync,
            vault_path: self.vault_path.clone(),
            log_level: self.log_level.clone(),
        }
    }

    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}

/// Initialize tracing on stderr. Stdout belongs to the MCP transport.
fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter().into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Fail fast if the vault API or the git repository is unusable.
async fn preflight(vault: &VaultClient, sync: &GitSync<RealGit>) -> AppResult<serde_json::Value> {
    let status = vault.probe().await?;
    info!("Connected to Obsidian API at {}", vault.base_url());

    if sync.is_enabled() {
        sync.verify_repository().await?;
    } else {
        info!("Git auto-sync disabled");
    }

    Ok(status)
}

pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = Config::from_env(cli.overrides())?;

    init_tracing(&config);

    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("A rustls crypto provider was already installed");
    }

    let vault = VaultClient::from_config(&config)?;
    let sync = GitSync::from_config(RealGit::new(), &config);
    let status = preflight(&vault, &sync).await?;

    match cli.command() {
        Commands::Check => {
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        }
        Commands::Serve => {
            serve_stdio(VaultServer::new(vault, sync)).await?;
            Ok(())
        }
    }
}
