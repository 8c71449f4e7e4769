pub mod cli;
pub mod config;
pub mod mcp;
pub mod sync;
pub mod templates;
pub mod vault;

#[cfg(test)]
mod mock_vault;
