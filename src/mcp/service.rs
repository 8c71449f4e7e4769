//! MCP stdio service.
//!
//! Runs a [`VaultServer`] on stdin/stdout until the client disconnects.
//! Stdout carries the protocol, so logging must go to stderr.

use miette::Diagnostic;
use rmcp::{ServiceExt, transport::stdio};
use thiserror::Error;
use tracing::info;

use crate::sync::GitOps;

use super::server::VaultServer;

#[derive(Error, Diagnostic, Debug)]
pub enum ServeError {
    #[error("MCP session failed to initialize: {0}")]
    #[diagnostic(code(vault_mcp::mcp::initialize))]
    Initialize(String),

    #[error("MCP session terminated abnormally: {0}")]
    #[diagnostic(code(vault_mcp::mcp::session))]
    Session(String),
}

/// Serve `server` over stdio and wait for the session to end.
pub async fn serve_stdio<G: GitOps + 'static>(server: VaultServer<G>) -> Result<(), ServeError> {
    let running = server
        .serve(stdio())
        .await
        .map_err(|e| ServeError::Initialize(e.to_string()))?;

    info!("Obsidian MCP server started");

    let reason = running
        .waiting()
        .await
        .map_err(|e| ServeError::Session(e.to_string()))?;

    info!(?reason, "MCP session closed");
    Ok(())
}
