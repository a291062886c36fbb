pub mod client;
pub mod file;
pub mod repo_ref;
pub mod wire;

pub use client::{classify_status, GitHubClient};
pub use file::FileSource;
pub use repo_ref::RepoRef;

use crate::config::Config;
use crate::error::{PulseError, Result};
use crate::model::CommitRecord;
use std::path::Path;

pub trait CommitSource: Send + Sync {
    /// The repository's most recent commits, newest first, one API page.
    fn fetch_commits(&self, repo: &RepoRef) -> Result<Vec<CommitRecord>>;

    fn fetch_commit(&self, repo: &RepoRef, sha: &str) -> Result<CommitRecord>;

    /// Unified diff of a single commit against its first parent.
    fn fetch_diff(&self, repo: &RepoRef, sha: &str) -> Result<String>;
}

/// Accept full or abbreviated hex SHAs only; they end up in request paths.
pub fn check_sha(sha: &str) -> Result<&str> {
    let sha = sha.trim();
    if (4..=40).contains(&sha.len()) && sha.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(sha)
    } else {
        Err(PulseError::InvalidSha(sha.to_string()))
    }
}

/// Fetch with a spinner on stderr unless output must stay machine-readable.
pub fn fetch_commits_with_progress(
    source: &dyn CommitSource,
    repo: &RepoRef,
    show_progress: bool,
) -> Result<Vec<CommitRecord>> {
    if !show_progress {
        return source.fetch_commits(repo);
    }

    let pb = crate::util::spinner(format!("Fetching commits for {repo}..."));
    let result = source.fetch_commits(repo);
    match &result {
        Ok(commits) => pb.finish_with_message(format!("Fetched {} commits", commits.len())),
        Err(_) => pb.finish_and_clear(),
    }
    result
}

/// `--input` wins over the network.
pub fn open_source(config: &Config, input: Option<&Path>) -> Result<Box<dyn CommitSource>> {
    match input {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => Ok(Box::new(GitHubClient::new(&config.github)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_and_short_shas() {
        assert_eq!(check_sha("a1b2c3d").unwrap(), "a1b2c3d");
        assert_eq!(check_sha(" DEADBEEF ").unwrap(), "DEADBEEF");
        assert!(check_sha(&"f".repeat(40)).is_ok());
    }

    #[test]
    fn rejects_path_like_and_odd_input() {
        for bad in ["", "abc", "../../user", "abc1234/files", "abc1234?x=1", "xyz12345", &"a".repeat(41)] {
            assert!(matches!(check_sha(bad), Err(PulseError::InvalidSha(_))), "{bad:?}");
        }
    }
}
