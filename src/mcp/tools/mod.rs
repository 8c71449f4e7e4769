//! MCP tool implementations
//!
//! Tools are grouped by concern, each group contributing its own router
//! to [`VaultServer`](super::VaultServer):
//! - notes: plain note CRUD, search, listing and the daily note
//! - content: frontmatter articles and fixed templates

pub mod content;
pub mod notes;

#[cfg(test)]
mod content_test;

use rmcp::{ErrorData as McpError, model::*};
use serde_json::json;
use tracing::{error, warn};

use crate::sync::{GitOps, SyncError};
use crate::vault::VaultError;

use super::server::VaultServer;

/// Reject the call if any named argument is empty.
///
/// Runs before any backend request so a malformed call has no side effects.
pub(crate) fn ensure_present(fields: &[(&str, &str)], message: &str) -> Result<(), McpError> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    warn!(?missing, "{}", message);
    Err(McpError::invalid_params(
        message.to_string(),
        Some(json!({ "missing": missing })),
    ))
}

/// Map VaultError to McpError.
pub(crate) fn map_vault_error(action: &str, err: VaultError) -> McpError {
    error!("Failed to {}: {}", action, err);
    McpError::internal_error(
        err.to_string(),
        Some(json!({
            "error": err.to_string(),
            "status": err.status(),
        })),
    )
}

/// Map SyncError to McpError. The vault change has already been applied.
pub(crate) fn map_sync_error(path: &str, err: SyncError) -> McpError {
    McpError::internal_error(
        format!("{} was saved to the vault but git sync failed: {}", path, err),
        Some(json!({
            "path": path,
            "error": err.to_string(),
        })),
    )
}

pub(crate) fn serialization_error(err: serde_json::Error) -> McpError {
    McpError::internal_error(
        "serialization_error",
        Some(json!({"error": err.to_string()})),
    )
}

pub(crate) fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

impl<G: GitOps + 'static> VaultServer<G> {
    /// Mirror a successful write into git, surfacing failures to the caller.
    pub(crate) async fn sync_after_write(&self, path: &str, message: &str) -> Result<(), McpError> {
        self.sync
            .sync(message)
            .await
            .map(|_| ())
            .map_err(|err| map_sync_error(path, err))
    }
}
