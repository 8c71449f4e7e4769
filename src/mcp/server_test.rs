//! Tests for MCP server initialization

use rmcp::ServerHandler;

use crate::mcp::VaultServer;
use crate::mock_vault::MockVault;
use crate::sync::{GitSync, MockGitOps};

#[tokio::test]
async fn test_server_info_advertises_tools() {
    let vault = MockVault::spawn().await;
    let server = VaultServer::new(vault.client(), GitSync::disabled(MockGitOps::new()));

    let info = server.get_info();

    assert!(
        info.capabilities.tools.is_some(),
        "Server should support tools"
    );
    assert!(
        info.instructions.is_some(),
        "Server should provide instructions"
    );
}

#[tokio::test]
async fn test_tool_catalog_matches_protocol_names() {
    let vault = MockVault::spawn().await;
    let server = VaultServer::new(vault.client(), GitSync::disabled(MockGitOps::new()));

    let mut names = server.tool_names();
    names.sort();

    assert_eq!(
        names,
        vec![
            "appendToDaily",
            "createArticle",
            "createFromTemplate",
            "createNote",
            "deleteNote",
            "listNotes",
            "readNote",
            "searchNotes",
            "updateNote",
        ]
    );
}

#[tokio::test]
async fn test_create_from_template_schema_lists_template_types() {
    let vault = MockVault::spawn().await;
    let server = VaultServer::new(vault.client(), GitSync::disabled(MockGitOps::new()));

    let tool = server
        .tool_router
        .list_all()
        .into_iter()
        .find(|tool| tool.name == "createFromTemplate")
        .expect("createFromTemplate should be registered");

    let schema = serde_json::to_string(&tool.input_schema).unwrap();
    assert!(schema.contains("templateType"));
    assert!(schema.contains("weeklyReport"));
    assert!(schema.contains("projectDoc"));
}

#[tokio::test]
async fn test_server_clone_shares_backend() {
    let vault = MockVault::spawn().await;
    let server = VaultServer::new(vault.client(), GitSync::disabled(MockGitOps::new()));
    let cloned = server.clone();

    assert!(std::sync::Arc::ptr_eq(&server.vault, &cloned.vault));
    assert!(std::sync::Arc::ptr_eq(&server.sync, &cloned.sync));
}
