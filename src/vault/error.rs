use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum VaultError {
    #[error("Failed to connect to the Obsidian Local REST API")]
    #[diagnostic(
        code(vault_mcp::vault::connection_failed),
        help(
            "Make sure Obsidian is running and the Local REST API plugin is enabled.\nOr set OBSIDIAN_API_URL to point to the correct server."
        )
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Obsidian API error: {status} - {body}")]
    #[diagnostic(code(vault_mcp::vault::api_error))]
    Api { status: u16, body: String },

    #[error("Invalid response from Obsidian API: {message}")]
    #[diagnostic(
        code(vault_mcp::vault::invalid_response),
        help("The server returned data in an unexpected format.")
    )]
    InvalidResponse { message: String },

    #[error("Failed to build HTTP client")]
    #[diagnostic(code(vault_mcp::vault::client_build))]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

impl VaultError {
    /// HTTP status of a backend rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            VaultError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for VaultError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            VaultError::ConnectionFailed { source: e }
        } else {
            VaultError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(e: serde_json::Error) -> Self {
        VaultError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type VaultResult<T> = Result<T, VaultError>;
