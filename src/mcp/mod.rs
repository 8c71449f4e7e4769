//! Model Context Protocol (MCP) server implementation
//!
//! This module exposes the vault operations as MCP tools over stdio.
//!
//! # Architecture
//!
//! - **server**: [`VaultServer`], the tool router and `ServerHandler`
//! - **tools**: tool handlers grouped by concern, each with its own router
//!   - notes: createNote, appendToDaily, searchNotes, readNote, updateNote,
//!     deleteNote, listNotes
//!   - content: createArticle, createFromTemplate
//! - **service**: stdio transport wiring
//!
//! The server is generic over `G: GitOps` (no dynamic dispatch), so the git
//! side-effect can be mocked in tests.

pub mod server;
mod service;
pub mod tools;

pub use server::VaultServer;
pub use service::{ServeError, serve_stdio};
