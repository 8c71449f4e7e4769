//! Note tool implementations
//!
//! Handles createNote, appendToDaily, searchNotes, readNote, updateNote,
//! deleteNote and listNotes.

use chrono::{Local, Utc};
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::mcp::server::VaultServer;
use crate::mcp::tools::{
    ensure_present, map_vault_error, serialization_error, text_result,
};
use crate::sync::GitOps;
use crate::templates::{
    DEFAULT_NOTE_FOLDER, append_daily_entry, daily_note_path, daily_note_seed, iso_date,
    local_time, note_path,
};

/// Default number of search hits returned.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;
/// Folder listed when `listNotes` gets no folder.
pub const DEFAULT_LIST_FOLDER: &str = "/";

// Parameter types for tools
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateNoteParams {
    #[schemars(description = "Note title (without .md extension)")]
    pub title: String,
    #[schemars(description = "Note content in Markdown format")]
    pub content: String,
    #[schemars(description = "Folder path (default: Notes)")]
    pub folder: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AppendToDailyParams {
    #[schemars(description = "Content to append")]
    pub content: String,
    #[schemars(description = "Add a time heading before the content (default: true)")]
    pub timestamp: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchNotesParams {
    #[schemars(description = "Search query")]
    pub query: String,
    #[schemars(description = "Maximum results (default: 10)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ReadNoteParams {
    #[schemars(description = "Note path (e.g., Notes/MyNote.md)")]
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateNoteParams {
    #[schemars(description = "Note path")]
    pub path: String,
    #[schemars(description = "New content (replaces the whole note)")]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteNoteParams {
    #[schemars(description = "Note path")]
    pub path: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListNotesParams {
    #[schemars(description = "Folder path (default: /)")]
    pub folder: Option<String>,
}

#[tool_router(router = note_router, vis = "pub(crate)")]
impl<G: GitOps + 'static> VaultServer<G> {
    /// Create a note at `{folder}/{title}.md`
    #[tool(name = "createNote", description = "Create a new note in Obsidian")]
    pub async fn create_note(
        &self,
        params: Parameters<CreateNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        ensure_present(
            &[("title", params.title.as_str()), ("content", params.content.as_str())],
            "Title and content are required",
        )?;

        let folder = params
            .folder
            .unwrap_or_else(|| DEFAULT_NOTE_FOLDER.to_string());
        let path = note_path(&folder, &params.title);
        info!("Creating note: {}", path);

        self.vault
            .write_note(&path, &params.content)
            .await
            .map_err(|e| map_vault_error("create note", e))?;

        self.sync_after_write(&path, &format!("Add note: {}", params.title))
            .await?;

        Ok(text_result(format!("Note created successfully: {}", path)))
    }

    /// Append to today's daily note, creating it if needed
    #[tool(
        name = "appendToDaily",
        description = "Append content to today's daily note"
    )]
    pub async fn append_to_daily(
        &self,
        params: Parameters<AppendToDailyParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        ensure_present(&[("content", params.content.as_str())], "Content is required")?;

        let today = iso_date(&Utc::now());
        let path = daily_note_path(&today);
        info!("Appending to daily note: {}", path);

        // Any read failure means the note does not exist yet
        let current = match self.vault.read_note(&path).await {
            Ok(text) => text,
            Err(err) => {
                debug!("Daily note does not exist yet, creating new one ({})", err);
                daily_note_seed(&today)
            }
        };

        let time = params
            .timestamp
            .unwrap_or(true)
            .then(|| local_time(&Local::now()));
        let updated = append_daily_entry(&current, &params.content, time.as_deref());

        self.vault
            .write_note(&path, &updated)
            .await
            .map_err(|e| map_vault_error("update daily note", e))?;

        self.sync_after_write(&path, &format!("Update daily note: {}", today))
            .await?;

        Ok(text_result(format!("Daily note updated: {}", path)))
    }

    /// Simple search, truncated client-side
    #[tool(name = "searchNotes", description = "Search notes by query")]
    pub async fn search_notes(
        &self,
        params: Parameters<SearchNotesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        ensure_present(&[("query", params.query.as_str())], "Query is required")?;
        info!("Searching notes: {}", params.query);

        let mut results = self
            .vault
            .search_simple(&params.query)
            .await
            .map_err(|e| map_vault_error("search notes", e))?;
        results.truncate(params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT));

        let content = serde_json::to_string_pretty(&results).map_err(serialization_error)?;
        Ok(text_result(content))
    }

    #[tool(name = "readNote", description = "Read a note's content")]
    pub async fn read_note(
        &self,
        params: Parameters<ReadNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        ensure_present(&[("path", params.path.as_str())], "Path is required")?;
        info!("Reading note: {}", params.path);

        let content = self
            .vault
            .read_note(&params.path)
            .await
            .map_err(|e| map_vault_error("read note", e))?;

        Ok(text_result(content))
    }

    #[tool(name = "updateNote", description = "Update an existing note")]
    pub async fn update_note(
        &self,
        params: Parameters<UpdateNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        ensure_present(
            &[("path", params.path.as_str()), ("content", params.content.as_str())],
            "Path and content are required",
        )?;
        info!("Updating note: {}", params.path);

        self.vault
            .write_note(&params.path, &params.content)
            .await
            .map_err(|e| map_vault_error("update note", e))?;

        self.sync_after_write(&params.path, &format!("Update note: {}", params.path))
            .await?;

        Ok(text_result(format!(
            "Note updated successfully: {}",
            params.path
        )))
    }

    #[tool(name = "deleteNote", description = "Delete a note")]
    pub async fn delete_note(
        &self,
        params: Parameters<DeleteNoteParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        ensure_present(&[("path", params.path.as_str())], "Path is required")?;
        info!("Deleting note: {}", params.path);

        self.vault
            .delete_note(&params.path)
            .await
            .map_err(|e| map_vault_error("delete note", e))?;

        self.sync_after_write(&params.path, &format!("Delete note: {}", params.path))
            .await?;

        Ok(text_result(format!(
            "Note deleted successfully: {}",
            params.path
        )))
    }

    /// Raw folder listing from the vault API
    #[tool(name = "listNotes", description = "List notes in a folder")]
    pub async fn list_notes(
        &self,
        params: Parameters<ListNotesParams>,
    ) -> Result<CallToolResult, McpError> {
        let folder = params
            .0
            .folder
            .unwrap_or_else(|| DEFAULT_LIST_FOLDER.to_string());
        info!("Listing notes in: {}", folder);

        let listing = self
            .vault
            .list_folder(&folder)
            .await
            .map_err(|e| map_vault_error("list notes", e))?;

        let content = serde_json::to_string_pretty(&listing).map_err(serialization_error)?;
        Ok(text_result(content))
    }
}
