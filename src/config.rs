//! Runtime configuration.
//!
//! Configuration is resolved once at startup into an immutable [`Config`]
//! and handed to the vault client, the git sync handle and the MCP server.
//!
//! Priority for every field:
//! 1. Explicit command line flag
//! 2. Environment variable
//! 3. Built-in default

use std::env;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Default address of the Obsidian Local REST API (plain HTTP listener).
pub const DEFAULT_API_URL: &str = "http://localhost:27123";

/// Default log verbosity.
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_API_URL: &str = "OBSIDIAN_API_URL";
pub const ENV_API_KEY: &str = "OBSIDIAN_API_KEY";
pub const ENV_GIT_AUTO_SYNC: &str = "GIT_AUTO_SYNC";
pub const ENV_VAULT_PATH: &str = "VAULT_PATH";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

/// Errors raised while resolving configuration.
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("OBSIDIAN_API_KEY is required")]
    #[diagnostic(
        code(vault_mcp::config::missing_api_key),
        help(
            "Copy the API key from the Local REST API plugin settings in Obsidian.\nThen set OBSIDIAN_API_KEY or pass --api-key."
        )
    )]
    MissingApiKey,

    #[error("VAULT_PATH is required when GIT_AUTO_SYNC is enabled")]
    #[diagnostic(
        code(vault_mcp::config::missing_vault_path),
        help("Point VAULT_PATH at the git working copy of the vault, or disable GIT_AUTO_SYNC.")
    )]
    MissingVaultPath,
}

/// Values supplied on the command line. `None` falls through to the environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub git_auto_sync: bool,
    pub vault_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Immutable adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the vault API, without a trailing slash
    pub api_url: String,
    /// Bearer token for the vault API
    pub api_key: String,
    /// Mirror every mutation into a git commit
    pub git_auto_sync: bool,
    /// Git working copy of the vault
    pub vault_path: Option<PathBuf>,
    /// Log verbosity for this crate (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Resolve configuration from overrides and the process environment.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |key| env::var(key).ok())
    }

    /// Resolve configuration from overrides and an arbitrary key/value source.
    ///
    /// Empty values are treated as unset. The returned config has already
    /// passed [`Config::validate`].
    pub fn resolve<F>(overrides: ConfigOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let api_url = overrides
            .api_url
            .or_else(|| lookup(ENV_API_URL))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let api_key = overrides
            .api_key
            .filter(|key| !key.is_empty())
            .or_else(|| lookup(ENV_API_KEY))
            .ok_or(ConfigError::MissingApiKey)?;

        let git_auto_sync =
            overrides.git_auto_sync || lookup(ENV_GIT_AUTO_SYNC).as_deref() == Some("true");

        let vault_path = overrides
            .vault_path
            .or_else(|| lookup(ENV_VAULT_PATH).map(PathBuf::from));

        let log_level = overrides
            .log_level
            .or_else(|| lookup(ENV_LOG_LEVEL))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let config = Self {
            api_url,
            api_key,
            git_auto_sync,
            vault_path,
            log_level,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration-level startup preconditions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.git_auto_sync && self.vault_path.is_none() {
            return Err(ConfigError::MissingVaultPath);
        }
        Ok(())
    }

    /// Repository to mirror mutations into, if sync is active.
    pub fn sync_repository(&self) -> Option<&Path> {
        if self.git_auto_sync {
            self.vault_path.as_deref()
        } else {
            None
        }
    }

    /// Default tracing filter directive derived from `log_level`.
    pub fn log_filter(&self) -> String {
        format!("vault_mcp={}", self.log_level)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
