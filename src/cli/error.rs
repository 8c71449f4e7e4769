use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::mcp::ServeError;
use crate::sync::SyncError;
use crate::vault::VaultError;

/// Anything that stops the binary before or while serving.
#[derive(Error, Diagnostic, Debug)]
pub enum AppError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot reach the Obsidian API: {0}")]
    #[diagnostic(
        code(vault_mcp::cli::vault_unreachable),
        help(
            "Is Obsidian running with the Local REST API plugin enabled?\nCheck OBSIDIAN_API_URL and OBSIDIAN_API_KEY."
        )
    )]
    Vault(#[from] VaultError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Serve(#[from] ServeError),

    #[error("Failed to render vault status: {0}")]
    #[diagnostic(code(vault_mcp::cli::output))]
    Output(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;
