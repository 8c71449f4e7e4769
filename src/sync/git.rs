//! Git operations for vault sync.
//!
//! This module provides a trait-based abstraction over the git command
//! line so the sync side-effect can be mocked in tests.

use miette::Diagnostic;
use std::path::Path;
use std::process::{Command, Output};
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Errors that can occur during git operations.
#[derive(Error, Diagnostic, Debug)]
pub enum GitError {
    #[error("Git command failed: {0}")]
    #[diagnostic(code(vault_mcp::sync::git::command_failed))]
    CommandFailed(String),

    #[error("git {command} exited with code {code}: {output}")]
    #[diagnostic(code(vault_mcp::sync::git::non_zero_exit))]
    NonZeroExit {
        command: String,
        code: i32,
        output: String,
    },

    #[error("Git not installed or not in PATH")]
    #[diagnostic(code(vault_mcp::sync::git::not_found))]
    GitNotFound,

    #[error("Repository directory does not exist: {0}")]
    #[diagnostic(code(vault_mcp::sync::git::missing_directory))]
    MissingDirectory(String),
}

impl GitError {
    /// True when a commit was refused because the working tree is clean.
    pub fn is_nothing_to_commit(&self) -> bool {
        match self {
            GitError::NonZeroExit { output, .. } => output.contains("nothing to commit"),
            GitError::CommandFailed(message) => message.contains("nothing to commit"),
            _ => false,
        }
    }
}

/// Trait for git operations. Can be mocked in tests.
#[cfg_attr(test, automock)]
pub trait GitOps: Send + Sync {
    /// `git status` - fails outside an initialized repository.
    fn status(&self, path: &Path) -> Result<Output, GitError>;

    /// `git add .`
    fn add_all(&self, path: &Path) -> Result<Output, GitError>;

    /// `git commit -m <message>`
    fn commit(&self, path: &Path, message: &str) -> Result<Output, GitError>;

    /// `git push` to the branch's configured upstream.
    fn push(&self, path: &Path) -> Result<Output, GitError>;
}

/// Real implementation of GitOps using std::process::Command.
#[derive(Clone, Copy, Default)]
pub struct RealGit;

impl RealGit {
    pub fn new() -> Self {
        Self
    }

    fn run_git(&self, path: &Path, args: &[&str]) -> Result<Output, GitError> {
        if !path.is_dir() {
            return Err(GitError::MissingDirectory(path.display().to_string()));
        }

        let output = Command::new("git")
            .args(args)
            .current_dir(path)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GitError::GitNotFound
                } else {
                    GitError::CommandFailed(e.to_string())
                }
            })?;

        if output.status.success() {
            return Ok(output);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        // git reports "nothing to commit" on stdout, real failures on stderr
        let combined = [stdout.trim(), stderr.trim()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        Err(GitError::NonZeroExit {
            command: args.first().copied().unwrap_or_default().to_string(),
            code: output.status.code().unwrap_or(-1),
            output: combined,
        })
    }
}

impl GitOps for RealGit {
    fn status(&self, path: &Path) -> Result<Output, GitError> {
        self.run_git(path, &["status"])
    }

    fn add_all(&self, path: &Path) -> Result<Output, GitError> {
        self.run_git(path, &["add", "."])
    }

    fn commit(&self, path: &Path, message: &str) -> Result<Output, GitError> {
        self.run_git(path, &["commit", "-m", message])
    }

    fn push(&self, path: &Path) -> Result<Output, GitError> {
        self.run_git(path, &["push"])
    }
}
