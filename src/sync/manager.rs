//! Sync manager - mirrors vault mutations into git commits.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::git::{GitError, GitOps};
use crate::config::Config;

/// Errors that can occur during sync operations.
#[derive(Error, Diagnostic, Debug)]
pub enum SyncError {
    #[error("git add failed: {0}")]
    #[diagnostic(code(vault_mcp::sync::add))]
    Add(#[source] GitError),

    #[error("git commit failed: {0}")]
    #[diagnostic(code(vault_mcp::sync::commit))]
    Commit(#[source] GitError),

    #[error("git push failed: {0}")]
    #[diagnostic(
        code(vault_mcp::sync::push),
        help("Check that the vault repository has an upstream branch and valid credentials.")
    )]
    Push(#[source] GitError),

    #[error("Git repository not found or not initialized at {path}")]
    #[diagnostic(
        code(vault_mcp::sync::not_a_repository),
        help("Run `git init` in the vault folder and configure a remote, or disable GIT_AUTO_SYNC.")
    )]
    NotARepository {
        path: PathBuf,
        #[source]
        source: GitError,
    },

    #[error("Sync task failed: {0}")]
    #[diagnostic(code(vault_mcp::sync::task))]
    Task(String),
}

/// What a sync run ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Sync disabled or no repository configured
    Skipped,
    /// Working tree was already clean
    NothingToCommit,
    /// Changes committed and pushed
    Pushed,
}

/// Runs `git add .`, `git commit -m`, `git push` in the vault repository.
///
/// Runs are serialised so two mutations never interleave their git steps.
pub struct GitSync<G: GitOps> {
    git: Arc<G>,
    repo: Option<PathBuf>,
    lock: Mutex<()>,
}

impl<G: GitOps + 'static> GitSync<G> {
    /// Create a sync handle. `None` disables sync entirely.
    pub fn new(git: G, repo: Option<PathBuf>) -> Self {
        Self {
            git: Arc::new(git),
            repo,
            lock: Mutex::new(()),
        }
    }

    pub fn from_config(git: G, config: &Config) -> Self {
        Self::new(git, config.sync_repository().map(Path::to_path_buf))
    }

    pub fn disabled(git: G) -> Self {
        Self::new(git, None)
    }

    pub fn is_enabled(&self) -> bool {
        self.repo.is_some()
    }

    pub fn repository(&self) -> Option<&Path> {
        self.repo.as_deref()
    }

    /// Check that the repository path holds an initialized git repository.
    ///
    /// A no-op when sync is disabled.
    pub async fn verify_repository(&self) -> Result<(), SyncError> {
        let Some(repo) = self.repo.clone() else {
            return Ok(());
        };
        let git = Arc::clone(&self.git);

        let checked = repo.clone();
        tokio::task::spawn_blocking(move || git.status(&checked))
            .await
            .map_err(|e| SyncError::Task(e.to_string()))?
            .map_err(|source| SyncError::NotARepository { path: repo, source })?;

        info!("Git repository verified");
        Ok(())
    }

    /// Stage, commit and push everything in the repository.
    ///
    /// A commit refused with "nothing to commit" counts as success.
    pub async fn sync(&self, message: &str) -> Result<SyncOutcome, SyncError> {
        let Some(repo) = self.repo.clone() else {
            info!("Git sync skipped (disabled or no vault path)");
            return Ok(SyncOutcome::Skipped);
        };

        let _guard = self.lock.lock().await;
        let git = Arc::clone(&self.git);
        let message = message.to_string();

        let outcome = tokio::task::spawn_blocking(move || run_steps(&*git, &repo, &message))
            .await
            .map_err(|e| SyncError::Task(e.to_string()))?;

        if let Err(err) = &outcome {
            error!("Git sync failed: {}", err);
        }
        outcome
    }
}

fn run_steps<G: GitOps + ?Sized>(
    git: &G,
    repo: &Path,
    message: &str,
) -> Result<SyncOutcome, SyncError> {
    git.add_all(repo).map_err(SyncError::Add)?;

    match git.commit(repo, message) {
        Ok(_) => {}
        Err(err) if err.is_nothing_to_commit() => {
            debug!("No changes to commit");
            return Ok(SyncOutcome::NothingToCommit);
        }
        Err(err) => return Err(SyncError::Commit(err)),
    }

    git.push(repo).map_err(SyncError::Push)?;
    info!("Git sync completed: {}", message);
    Ok(SyncOutcome::Pushed)
}
