//! HTTP client for the Obsidian Local REST API.

mod client;
pub mod error;


pub use client::{VaultClient, vault_path};
pub use error::{VaultError, VaultResult};
