//! MCP server implementation
//!
//! [`VaultServer`] owns the vault client and the git sync handle and routes
//! tool calls by name to the handlers in [`super::tools`].

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::sync::{GitOps, GitSync, RealGit};
use crate::vault::VaultClient;

/// MCP server exposing vault operations as tools.
///
/// Generic over `G: GitOps` so tests can swap in a mock git.
pub struct VaultServer<G: GitOps = RealGit> {
    pub(crate) vault: Arc<VaultClient>,
    pub(crate) sync: Arc<GitSync<G>>,
    tool_router: ToolRouter<Self>,
}

impl<G: GitOps + 'static> VaultServer<G> {
    /// Create a new server
    ///
    /// # Arguments
    /// * `vault` - Client for the Local REST API
    /// * `sync` - Git sync handle, possibly disabled
    pub fn new(vault: VaultClient, sync: GitSync<G>) -> Self {
        Self {
            vault: Arc::new(vault),
            sync: Arc::new(sync),
            tool_router: Self::note_router() + Self::content_router(),
        }
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }
}

impl<G: GitOps> Clone for VaultServer<G> {
    fn clone(&self) -> Self {
        Self {
            vault: Arc::clone(&self.vault),
            sync: Arc::clone(&self.sync),
            tool_router: self.tool_router.clone(),
        }
    }
}

#[tool_handler(router = self.tool_router)]
impl<G: GitOps + 'static> ServerHandler for VaultServer<G> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "Obsidian vault server - create, read, update, delete, search and list notes, \
             append to the daily note, and create articles or notes from templates. \
             Changes are committed to git when auto-sync is enabled.",
        )
    }
}

#[cfg(test)]
#[path = "server_test.rs"]
mod server_test;
