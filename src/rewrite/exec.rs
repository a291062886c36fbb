use super::{GeminiRewriter, MessageRewriter};
use crate::cli::SourceArgs;
use crate::config::Config;
use crate::github::{open_source, CommitSource, RepoRef};
use crate::model::RewriteOutput;
use anyhow::Context;
use console::style;
use similar::{ChangeTag, TextDiff};

pub fn exec(config: &Config, source: SourceArgs, sha: String, json: bool) -> anyhow::Result<()> {
    let repo: RepoRef = source.repo.parse().context("Failed to parse repository")?;
    let commits = open_source(config, source.input.as_deref()).context("Failed to open commit source")?;
    let rewriter = GeminiRewriter::new(&config.ai).context("Failed to set up AI rewriter")?;

    let output = rewrite_commit(commits.as_ref(), &rewriter, &repo, &sha)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        output_comparison(&output);
    }
    Ok(())
}

pub fn rewrite_commit(
    source: &dyn CommitSource,
    rewriter: &dyn MessageRewriter,
    repo: &RepoRef,
    sha: &str,
) -> anyhow::Result<RewriteOutput> {
    let commit = source
        .fetch_commit(repo, sha)
        .with_context(|| format!("Failed to fetch commit {sha}"))?;
    let diff = source
        .fetch_diff(repo, &commit.sha)
        .with_context(|| format!("Failed to fetch diff for {}", commit.short_sha()))?;
    let rewritten = rewriter
        .rewrite(&commit.message, &diff)
        .context("Failed to rewrite commit message")?;

    Ok(RewriteOutput {
        sha: commit.sha,
        original: commit.message,
        rewritten,
    })
}

fn output_comparison(output: &RewriteOutput) {
    println!("{} {}", style("Commit").bold(), style(&output.sha).dim());
    println!("{}", "─".repeat(50));
    println!("{}", style("Original").bold());
    println!("{}\n", output.original.trim_end());
    println!("{}", style("Suggested").bold());
    println!("{}\n", output.rewritten);

    println!("{}", style("Changes").bold());
    let diff = TextDiff::from_lines(output.original.trim_end(), output.rewritten.as_str());
    for change in diff.iter_all_changes() {
        let line = change.to_string_lossy();
        let line = line.trim_end_matches('\n');
        match change.tag() {
            ChangeTag::Delete => println!("{}", style(format!("- {line}")).red()),
            ChangeTag::Insert => println!("{}", style(format!("+ {line}")).green()),
            ChangeTag::Equal => println!("  {line}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PulseError, Result};
    use crate::model::CommitRecord;
    use chrono::Utc;
    use std::sync::Mutex;

    struct OneCommit;

    impl CommitSource for OneCommit {
        fn fetch_commits(&self, _repo: &RepoRef) -> Result<Vec<CommitRecord>> {
            Ok(Vec::new())
        }

        fn fetch_commit(&self, _repo: &RepoRef, sha: &str) -> Result<CommitRecord> {
            Ok(CommitRecord {
                sha: format!("{sha}0000"),
                author_date: Utc::now(),
                author_login: Some("ada".to_string()),
                author_display_name: "Ada".to_string(),
                author_avatar_url: None,
                message: "stuff".to_string(),
            })
        }

        fn fetch_diff(&self, _repo: &RepoRef, sha: &str) -> Result<String> {
            Ok(format!("diff for {sha}"))
        }
    }

    #[derive(Default)]
    struct Recording {
        seen: Mutex<Vec<(String, String)>>,
    }

    impl MessageRewriter for Recording {
        fn rewrite(&self, original: &str, diff: &str) -> Result<String> {
            self.seen
                .lock()
                .map_err(|_| PulseError::Upstream("poisoned".to_string()))?
                .push((original.to_string(), diff.to_string()));
            Ok("Describe stuff properly".to_string())
        }
    }

    #[test]
    fn passes_message_and_diff_of_resolved_sha() {
        let rewriter = Recording::default();
        let out = rewrite_commit(&OneCommit, &rewriter, &RepoRef::new("a", "b"), "abc").unwrap();
        assert_eq!(out.sha, "abc0000");
        assert_eq!(out.original, "stuff");
        assert_eq!(out.rewritten, "Describe stuff properly");
        let seen = rewriter.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[("stuff".to_string(), "diff for abc0000".to_string())]);
    }

    #[test]
    fn saved_commit_with_patches_rewrites_offline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commits.json");
        std::fs::write(
            &path,
            r#"[{"sha": "abc1234", "commit": {"author": {"name": "Ada", "date": "2024-01-02T03:04:05Z"}, "message": "wip"},
                 "files": [{"filename": "src/main.rs", "patch": "@@ -1 +1 @@\n-a\n+b\n"}]}]"#,
        )
        .unwrap();

        let rewriter = Recording::default();
        let source = crate::github::FileSource::new(&path);
        let out = rewrite_commit(&source, &rewriter, &RepoRef::new("a", "b"), "abc1234").unwrap();
        assert_eq!(out.original, "wip");
        let seen = rewriter.seen.lock().unwrap();
        assert!(seen[0].1.contains("+++ b/src/main.rs"));
    }
}
