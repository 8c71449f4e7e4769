//! Structured content tools: articles with frontmatter and fixed templates.

use chrono::Utc;
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::mcp::server::VaultServer;
use crate::mcp::tools::{ensure_present, map_vault_error, text_result};
use crate::sync::GitOps;
use crate::templates::{TemplateType, article_note, render_template};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateArticleParams {
    #[schemars(description = "Article title")]
    pub title: String,
    #[schemars(description = "Article category (e.g., Tech, Tutorial, Review)")]
    pub category: String,
    #[schemars(description = "Article content")]
    pub content: String,
    #[schemars(description = "Article tags (default: none)")]
    pub tags: Option<Vec<String>>,
    #[schemars(description = "Is this a draft? (default: true)")]
    pub draft: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFromTemplateParams {
    #[schemars(description = "Template type: article, weeklyReport or projectDoc")]
    pub template_type: TemplateType,
    #[schemars(description = "Title or name")]
    pub title: String,
    #[schemars(description = "Category (for articles, default: General)")]
    pub category: Option<String>,
}

#[tool_router(router = content_router, vis = "pub(crate)")]
impl<G: GitOps + 'static> VaultServer<G> {
    /// Article under Articles/{category}/ with a generated frontmatter block
    #[tool(
        name = "createArticle",
        description = "Create a structured article with metadata"
    )]
    pub async fn create_article(
        &self,
        params: Parameters<CreateArticleParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        ensure_present(
            &[
                ("title", params.title.as_str()),
                ("category", params.category.as_str()),
                ("content", params.content.as_str()),
            ],
            "Title, category and content are required",
        )?;

        let note = article_note(
            &params.title,
            &params.category,
            &params.content,
            &params.tags.unwrap_or_default(),
            params.draft.unwrap_or(true),
            &Utc::now(),
        );
        info!("Creating article: {}", note.path);

        self.vault
            .write_note(&note.path, &note.content)
            .await
            .map_err(|e| map_vault_error("create article", e))?;

        self.sync_after_write(&note.path, &format!("Add article: {}", params.title))
            .await?;

        Ok(text_result(format!(
            "Article created successfully: {}",
            note.path
        )))
    }

    /// Render one of the fixed templates to its conventional location
    #[tool(
        name = "createFromTemplate",
        description = "Create a note from a predefined template"
    )]
    pub async fn create_from_template(
        &self,
        params: Parameters<CreateFromTemplateParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        ensure_present(&[("title", params.title.as_str())], "Title is required")?;

        let note = render_template(
            params.template_type,
            &params.title,
            params.category.as_deref(),
            &Utc::now(),
        );
        info!("Creating from template: {}", note.path);

        self.vault
            .write_note(&note.path, &note.content)
            .await
            .map_err(|e| map_vault_error("create from template", e))?;

        self.sync_after_write(
            &note.path,
            &format!("Add {}: {}", params.template_type, params.title),
        )
        .await?;

        Ok(text_result(format!("Created from template: {}", note.path)))
    }
}
