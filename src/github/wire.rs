//! GitHub REST payloads. Everything the API may omit is optional here and
//! validated on conversion into [`CommitRecord`].

use crate::error::{PulseError, Result};
use crate::model::CommitRecord;
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CommitPayload {
    pub sha: String,
    pub commit: GitCommitPayload,
    /// The linked GitHub account; `null` for unrecognized emails.
    #[serde(default)]
    pub author: Option<AccountPayload>,
    /// Only present on single-commit responses.
    #[serde(default)]
    pub files: Vec<FilePayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitCommitPayload {
    #[serde(default)]
    pub author: Option<SignaturePayload>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignaturePayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountPayload {
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilePayload {
    pub filename: String,
    #[serde(default)]
    pub previous_filename: Option<String>,
    /// Omitted by GitHub for binary or very large files.
    #[serde(default)]
    pub patch: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

impl TryFrom<CommitPayload> for CommitRecord {
    type Error = PulseError;

    fn try_from(payload: CommitPayload) -> Result<Self> {
        let CommitPayload { sha, commit, author, .. } = payload;
        let malformed = |field| PulseError::MalformedRecord {
            sha: sha.clone(),
            field,
        };

        let signature = commit.author.ok_or_else(|| malformed("commit.author"))?;
        let author_date = signature
            .date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|d| d.with_timezone(&Utc))
            .ok_or_else(|| malformed("commit.author.date"))?;
        let author_display_name = signature
            .name
            .ok_or_else(|| malformed("commit.author.name"))?;

        let (author_login, author_avatar_url) = match author {
            Some(account) if !account.login.is_empty() => {
                (Some(account.login), account.avatar_url.filter(|u| !u.is_empty()))
            }
            _ => (None, None),
        };

        Ok(CommitRecord {
            sha,
            author_date,
            author_login,
            author_display_name,
            author_avatar_url,
            message: commit.message,
        })
    }
}

/// Convert a page of payloads, failing on the first malformed record.
pub fn into_records(payloads: Vec<CommitPayload>) -> Result<Vec<CommitRecord>> {
    payloads.into_iter().map(CommitRecord::try_from).collect()
}

/// Reassemble a unified diff from per-file patches. `None` when no file has one.
pub fn patch_diff(files: &[FilePayload]) -> Option<String> {
    let mut diff = String::new();
    for file in files {
        let Some(patch) = file.patch.as_deref() else {
            continue;
        };
        let old = file.previous_filename.as_deref().unwrap_or(&file.filename);
        diff.push_str(&format!(
            "diff --git a/{old} b/{new}\n--- a/{old}\n+++ b/{new}\n",
            new = file.filename
        ));
        diff.push_str(patch);
        if !patch.ends_with('\n') {
            diff.push('\n');
        }
    }
    (!diff.is_empty()).then_some(diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<Vec<CommitRecord>> {
        let payloads: Vec<CommitPayload> = serde_json::from_str(json)?;
        into_records(payloads)
    }

    #[test]
    fn converts_linked_and_unlinked_authors() {
        let records = decode(
            r#"[
              {"sha": "abc1234def", "commit": {"author": {"name": "Ada", "email": "ada@example.com", "date": "2024-01-02T03:04:05Z"}, "message": "Add engine\n\nBody"},
               "author": {"login": "ada", "avatar_url": "https://avatars.example/ada"}},
              {"sha": "fff0000", "commit": {"author": {"name": "Imported", "date": "2023-12-31T23:00:00+02:00"}, "message": "Old"},
               "author": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(records[0].author_login.as_deref(), Some("ada"));
        assert_eq!(records[0].author_avatar_url.as_deref(), Some("https://avatars.example/ada"));
        assert_eq!(records[0].summary(), "Add engine");
        assert_eq!(records[0].short_sha(), "abc1234");
        assert_eq!(records[1].author_login, None);
        assert_eq!(records[1].author_avatar_url, None);
        assert_eq!(records[1].author_date.to_rfc3339(), "2023-12-31T21:00:00+00:00");
    }

    #[test]
    fn missing_author_date_is_malformed() {
        let err = decode(r#"[{"sha": "deadbeef", "commit": {"author": {"name": "X"}, "message": "m"}}]"#)
            .unwrap_err();
        assert!(matches!(
            err,
            PulseError::MalformedRecord { ref sha, field: "commit.author.date" } if sha == "deadbeef"
        ));
    }

    #[test]
    fn unparseable_author_date_is_malformed() {
        let err = decode(
            r#"[{"sha": "d1", "commit": {"author": {"name": "X", "date": "last tuesday"}, "message": "m"}}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, PulseError::MalformedRecord { field: "commit.author.date", .. }));
    }

    #[test]
    fn missing_signature_is_malformed() {
        let err = decode(r#"[{"sha": "d2", "commit": {"message": "m"}}]"#).unwrap_err();
        assert!(matches!(err, PulseError::MalformedRecord { field: "commit.author", .. }));
    }

    #[test]
    fn patches_become_a_unified_diff() {
        let payload: CommitPayload = serde_json::from_str(
            r#"{"sha": "abc1234", "commit": {"message": "m"}, "files": [
                {"filename": "src/lib.rs", "patch": "@@ -1 +1 @@\n-old\n+new"},
                {"filename": "logo.png"},
                {"filename": "src/new.rs", "previous_filename": "src/old.rs", "patch": "@@ -0,0 +1 @@\n+x\n"}
            ]}"#,
        )
        .unwrap();

        let diff = patch_diff(&payload.files).unwrap();
        assert_eq!(
            diff,
            "diff --git a/src/lib.rs b/src/lib.rs\n--- a/src/lib.rs\n+++ b/src/lib.rs\n@@ -1 +1 @@\n-old\n+new\n\
             diff --git a/src/old.rs b/src/new.rs\n--- a/src/old.rs\n+++ b/src/new.rs\n@@ -0,0 +1 @@\n+x\n"
        );
        assert_eq!(patch_diff(&payload.files[1..2]), None);
    }
}
