use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::vault::error::{VaultError, VaultResult};

/// Client for the Obsidian Local REST API.
///
/// Every request carries `Authorization: Bearer <api key>`. Non-2xx
/// responses become [`VaultError::Api`] carrying the status and body text.
pub struct VaultClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl VaultClient {
    /// Create a new vault client.
    ///
    /// When `base_url` uses `https`, certificate verification is turned off
    /// for this client only: the plugin serves a self-signed certificate on
    /// its secure port.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> VaultResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if base_url.starts_with("https://") {
            warn!(
                base_url = %base_url,
                "TLS certificate verification disabled for the vault API connection"
            );
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|source| VaultError::ClientBuild { source })?;

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> VaultResult<Self> {
        Self::new(config.api_url.clone(), config.api_key.clone())
    }

    /// Get the base URL being used
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create an authenticated request builder
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("Obsidian API request: {} {}", method, url);
        self.client.request(method, url).bearer_auth(&self.api_key)
    }

    /// Send a request, turning non-success statuses into [`VaultError::Api`].
    pub async fn send(builder: RequestBuilder) -> VaultResult<Response> {
        let response = builder.send().await?;
        Self::check_status(response).await
    }

    async fn check_status(response: Response) -> VaultResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(VaultError::Api { status, body })
    }

    /// `GET /` - server status, used as the startup reachability probe.
    pub async fn probe(&self) -> VaultResult<Value> {
        let response = Self::send(self.request(Method::GET, "/")).await?;
        let text = response.text().await?;
        // Older plugin versions answer with plain text
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    /// Read a note's Markdown content.
    pub async fn read_note(&self, path: &str) -> VaultResult<String> {
        let response = Self::send(self.request(Method::GET, &vault_path(path))).await?;
        Ok(response.text().await?)
    }

    /// Create or fully overwrite a note.
    pub async fn write_note(&self, path: &str, content: &str) -> VaultResult<()> {
        let builder = self
            .request(Method::PUT, &vault_path(path))
            .header(CONTENT_TYPE, "text/markdown")
            .body(content.to_string());
        Self::send(builder).await?;
        Ok(())
    }

    pub async fn delete_note(&self, path: &str) -> VaultResult<()> {
        Self::send(self.request(Method::DELETE, &vault_path(path))).await?;
        Ok(())
    }

    /// List a folder. The listing JSON is returned as the server sent it.
    pub async fn list_folder(&self, folder: &str) -> VaultResult<Value> {
        let response = Self::send(self.request(Method::GET, &vault_path(folder))).await?;
        Ok(response.json().await?)
    }

    /// `GET /search/simple?query=...`
    pub async fn search_simple(&self, query: &str) -> VaultResult<Vec<Value>> {
        let builder = self
            .request(Method::GET, "/search/simple")
            .query(&[("query", query)]);
        let response = Self::send(builder).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// API path for a vault-relative note or folder path.
///
/// The whole path is percent-encoded as one component, separators included.
pub fn vault_path(path: &str) -> String {
    format!("/vault/{}", urlencoding::encode(path))
}
