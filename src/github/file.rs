use super::wire::{into_records, patch_diff, CommitPayload};
use super::{check_sha, CommitSource, RepoRef};
use crate::error::{PulseError, Result};
use crate::model::CommitRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// Commits read from a saved `GET /repos/{owner}/{repo}/commits` response.
///
/// Entries saved from the single-commit endpoint also carry `files[].patch`,
/// which is what [`CommitSource::fetch_diff`] serves.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn load_payloads(&self) -> Result<Vec<CommitPayload>> {
        let content = fs::read_to_string(&self.path)?;
        let payloads: Vec<CommitPayload> = serde_json::from_str(&content)?;
        log::info!("loaded {} commits from {}", payloads.len(), self.path.display());
        Ok(payloads)
    }

    fn find(&self, sha: &str) -> Result<CommitPayload> {
        let sha = check_sha(sha)?;
        self.load_payloads()?
            .into_iter()
            .find(|p| p.sha.starts_with(sha))
            .ok_or_else(|| PulseError::NotFound(format!("commit {sha} in {}", self.path.display())))
    }
}

impl CommitSource for FileSource {
    fn fetch_commits(&self, _repo: &RepoRef) -> Result<Vec<CommitRecord>> {
        into_records(self.load_payloads()?)
    }

    fn fetch_commit(&self, _repo: &RepoRef, sha: &str) -> Result<CommitRecord> {
        CommitRecord::try_from(self.find(sha)?)
    }

    fn fetch_diff(&self, _repo: &RepoRef, sha: &str) -> Result<String> {
        let payload = self.find(sha)?;
        patch_diff(&payload.files).ok_or_else(|| {
            PulseError::Upstream(format!(
                "no files[].patch saved for commit {} in {}",
                payload.sha,
                self.path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAVED: &str = r#"[
      {"sha": "abc1234ffff", "commit": {"author": {"name": "Ada", "date": "2024-01-02T03:04:05Z"}, "message": "stuff"},
       "author": {"login": "ada"},
       "files": [{"filename": "README.md", "patch": "@@ -1 +1 @@\n-a\n+b"}]},
      {"sha": "def5678eeee", "commit": {"author": {"name": "Bo", "date": "2024-01-01T03:04:05Z"}, "message": "more"},
       "author": null}
    ]"#;

    fn saved() -> (TempDir, FileSource) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("commits.json");
        fs::write(&path, SAVED).unwrap();
        (dir, FileSource::new(path))
    }

    fn repo() -> RepoRef {
        RepoRef::new("octo", "cat")
    }

    #[test]
    fn lists_and_resolves_abbreviated_shas() {
        let (_dir, source) = saved();
        assert_eq!(source.fetch_commits(&repo()).unwrap().len(), 2);
        let commit = source.fetch_commit(&repo(), "def5678").unwrap();
        assert_eq!(commit.sha, "def5678eeee");
    }

    #[test]
    fn serves_diff_from_saved_patches() {
        let (_dir, source) = saved();
        let diff = source.fetch_diff(&repo(), "abc1234").unwrap();
        assert!(diff.starts_with("diff --git a/README.md b/README.md\n"));
        assert!(diff.ends_with("-a\n+b\n"));
    }

    #[test]
    fn commit_without_patches_has_no_diff() {
        let (_dir, source) = saved();
        let err = source.fetch_diff(&repo(), "def5678").unwrap_err();
        assert!(matches!(err, PulseError::Upstream(ref m) if m.contains("files[].patch")));
    }

    #[test]
    fn unknown_and_invalid_shas() {
        let (_dir, source) = saved();
        assert!(matches!(source.fetch_commit(&repo(), "0000000"), Err(PulseError::NotFound(_))));
        assert!(matches!(source.fetch_diff(&repo(), "HEAD~1"), Err(PulseError::InvalidSha(_))));
    }
}
