//! Tests for article and template MCP tools

use std::os::unix::process::ExitStatusExt;
use std::path::PathBuf;
use std::process::{ExitStatus, Output};

use chrono::Utc;
use mockall::predicate::*;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, ErrorCode, RawContent};

use crate::mcp::VaultServer;
use crate::mcp::tools::content::*;
use crate::mock_vault::MockVault;
use crate::sync::{GitSync, MockGitOps};
use crate::templates::{TemplateType, iso_date};

fn text_of(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    }
}

fn ok_output() -> Output {
    Output {
        status: ExitStatus::from_raw(0),
        stdout: Vec::new(),
        stderr: Vec::new(),
    }
}

fn server(vault: &MockVault) -> VaultServer<MockGitOps> {
    VaultServer::new(vault.client(), GitSync::disabled(MockGitOps::new()))
}

fn article_params(title: &str, category: &str, content: &str) -> CreateArticleParams {
    CreateArticleParams {
        title: title.to_string(),
        category: category.to_string(),
        content: content.to_string(),
        tags: None,
        draft: None,
    }
}

fn template_params(template_type: TemplateType, title: &str) -> CreateFromTemplateParams {
    CreateFromTemplateParams {
        template_type,
        title: title.to_string(),
        category: None,
    }
}

// =============================================================================
// createArticle
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_create_article_path_and_frontmatter() {
    let vault = MockVault::spawn().await;
    let tools = server(&vault);
    let today = iso_date(&Utc::now());

    let params = CreateArticleParams {
        tags: Some(vec!["rust".to_string(), "mcp".to_string()]),
        draft: Some(false),
        ..article_params("Hello, World!", "Tech", "Body text")
    };
    let result = tools.create_article(Parameters(params)).await.unwrap();

    let path = format!("Articles/Tech/{}-hello--world-.md", today);
    assert_eq!(
        text_of(&result),
        format!("Article created successfully: {}", path)
    );

    let body = vault.note(&path).expect("article should be written");
    assert!(body.starts_with("---\ntitle: Hello, World!\ndate: "));
    assert!(body.contains("\ncategory: Tech\n"));
    assert!(body.contains("\ntags: [rust, mcp]\n"));
    assert!(body.contains("\ndraft: false\n"));
    assert!(body.contains("\nauthor: AI Assistant\n---\n\n"));
    assert!(body.ends_with("---\n\nBody text"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_article_defaults_to_draft_without_tags() {
    let vault = MockVault::spawn().await;
    let tools = server(&vault);

    tools
        .create_article(Parameters(article_params("Notes", "Review", "x")))
        .await
        .unwrap();

    let request = &vault.requests()[0];
    assert!(request.body.contains("\ntags: []\n"));
    assert!(request.body.contains("\ndraft: true\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_article_requires_all_fields() {
    let vault = MockVault::spawn().await;
    let tools = server(&vault);

    let err = tools
        .create_article(Parameters(article_params("T", "", "C")))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "Title, category and content are required");
    assert!(vault.requests().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_article_backend_error() {
    let vault = MockVault::spawn().await;
    vault.fail_with(500, "boom");
    let tools = server(&vault);

    let err = tools
        .create_article(Parameters(article_params("T", "Tech", "C")))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert!(err.message.contains("500"));
    assert!(err.message.contains("boom"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_article_commit_message() {
    let vault = MockVault::spawn().await;
    let mut git = MockGitOps::new();
    git.expect_add_all().times(1).returning(|_| Ok(ok_output()));
    git.expect_commit()
        .with(always(), eq("Add article: Launch"))
        .times(1)
        .returning(|_, _| Ok(ok_output()));
    git.expect_push().times(1).returning(|_| Ok(ok_output()));
    let tools = VaultServer::new(
        vault.client(),
        GitSync::new(git, Some(PathBuf::from("/tmp/vault"))),
    );

    tools
        .create_article(Parameters(article_params("Launch", "News", "x")))
        .await
        .unwrap();
}

// =============================================================================
// createFromTemplate
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_article_template_defaults_category() {
    let vault = MockVault::spawn().await;
    let tools = server(&vault);

    let result = tools
        .create_from_template(Parameters(template_params(TemplateType::Article, "My Post")))
        .await
        .unwrap();

    assert_eq!(
        text_of(&result),
        "Created from template: Articles/General/my-post.md"
    );
    let body = vault.note("Articles/General/my-post.md").unwrap();
    assert!(body.contains("# My Post"));
    assert!(body.contains("category: General"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_article_template_with_category() {
    let vault = MockVault::spawn().await;
    let tools = server(&vault);

    let params = CreateFromTemplateParams {
        category: Some("Tutorial".to_string()),
        ..template_params(TemplateType::Article, "My Post")
    };
    tools.create_from_template(Parameters(params)).await.unwrap();

    assert!(vault.note("Articles/Tutorial/my-post.md").is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_weekly_report_template_path() {
    let vault = MockVault::spawn().await;
    let tools = server(&vault);

    tools
        .create_from_template(Parameters(template_params(
            TemplateType::WeeklyReport,
            "ignored",
        )))
        .await
        .unwrap();

    let request = &vault.requests()[0];
    assert_eq!(request.method, "PUT");
    assert!(request.path.starts_with("Weekly Reports/"));
    assert!(request.path.contains("-W"));
    assert!(request.body.contains("type: weekly-report"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_project_doc_template_path() {
    let vault = MockVault::spawn().await;
    let tools = server(&vault);

    let result = tools
        .create_from_template(Parameters(template_params(
            TemplateType::ProjectDoc,
            "Vault Sync",
        )))
        .await
        .unwrap();

    assert_eq!(
        text_of(&result),
        "Created from template: Projects/vault-sync/README.md"
    );
    assert!(vault.note("Projects/vault-sync/README.md").is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_template_requires_title() {
    let vault = MockVault::spawn().await;
    let tools = server(&vault);

    let err = tools
        .create_from_template(Parameters(template_params(TemplateType::ProjectDoc, "")))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(err.message, "Title is required");
    assert!(vault.requests().is_empty());
}

#[test]
fn test_unknown_template_type_is_rejected() {
    let parsed: Result<CreateFromTemplateParams, _> = serde_json::from_value(serde_json::json!({
        "templateType": "meetingNotes",
        "title": "Standup",
    }));
    assert!(parsed.is_err());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_template_commit_message_uses_type_name() {
    let vault = MockVault::spawn().await;
    let mut git = MockGitOps::new();
    git.expect_add_all().times(1).returning(|_| Ok(ok_output()));
    git.expect_commit()
        .with(always(), eq("Add projectDoc: Vault Sync"))
        .times(1)
        .returning(|_, _| Ok(ok_output()));
    git.expect_push().times(1).returning(|_| Ok(ok_output()));
    let tools = VaultServer::new(
        vault.client(),
        GitSync::new(git, Some(PathBuf::from("/tmp/vault"))),
    );

    tools
        .create_from_template(Parameters(template_params(
            TemplateType::ProjectDoc,
            "Vault Sync",
        )))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_template_backend_error() {
    let vault = MockVault::spawn().await;
    vault.fail_with(503, "vault locked");
    let tools = server(&vault);

    let err = tools
        .create_from_template(Parameters(template_params(TemplateType::Article, "x")))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    assert!(err.message.contains("503"));
    assert!(err.message.contains("vault locked"));
}
