//! Sync module - mirrors vault mutations into the vault's git repository.
//!
//! After every successful write through the vault API the working copy is
//! staged, committed and pushed, so the vault history follows the tool calls.

mod git;
mod manager;

#[cfg(test)]
pub use git::MockGitOps;
pub use git::{GitError, GitOps, RealGit};
pub use manager::{GitSync, SyncError, SyncOutcome};
