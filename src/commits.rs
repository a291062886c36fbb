use crate::cli::{OutputArgs, SourceArgs};
use crate::config::Config;
use crate::github::{fetch_commits_with_progress, open_source, RepoRef};
use crate::model::{CommitRecord, CommitsOutput, SCHEMA_VERSION};
use crate::util::truncate;
use anyhow::Context;
use chrono::Utc;
use console::style;
use std::collections::HashSet;

pub fn exec(
    config: &Config,
    source: SourceArgs,
    output: OutputArgs,
    author: Option<String>,
) -> anyhow::Result<()> {
    let repo: RepoRef = source.repo.parse().context("Failed to parse repository")?;
    let commit_source = open_source(config, source.input.as_deref())
        .context("Failed to open commit source")?;

    let machine_readable = output.json || output.ndjson;
    let commits = fetch_commits_with_progress(commit_source.as_ref(), &repo, !machine_readable)
        .with_context(|| format!("Failed to fetch commits for {repo}"))?;

    let entries = filter_by_author(commits, author.as_deref());

    if output.json {
        output_json(&entries, &repo, author)?;
    } else if output.ndjson {
        output_ndjson(&entries)?;
    } else {
        output_summary(&entries)?;
    }

    Ok(())
}

pub fn filter_by_author(commits: Vec<CommitRecord>, login: Option<&str>) -> Vec<CommitRecord> {
    match login {
        Some(login) => commits
            .into_iter()
            .filter(|c| {
                c.author_login
                    .as_deref()
                    .is_some_and(|l| l.eq_ignore_ascii_case(login))
            })
            .collect(),
        None => commits,
    }
}

fn output_json(entries: &[CommitRecord], repo: &RepoRef, author: Option<String>) -> anyhow::Result<()> {
    let output = CommitsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository: repo.to_string(),
        author,
        entries: entries.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(entries: &[CommitRecord]) -> anyhow::Result<()> {
    for entry in entries {
        println!("{}", serde_json::to_string(entry)?);
    }
    Ok(())
}

fn output_summary(entries: &[CommitRecord]) -> anyhow::Result<()> {
    println!("{}", style("Commits").bold());
    println!("{}", "─".repeat(50));

    if entries.is_empty() {
        println!("No commits found");
        return Ok(());
    }

    for commit in entries.iter().take(50) {
        let who = commit.author_login.as_deref().unwrap_or(&commit.author_display_name);
        println!(
            "{} {} {:<16} {}",
            style(commit.short_sha()).yellow(),
            style(commit.author_date.format("%Y-%m-%d")).dim(),
            truncate(who, 16),
            truncate(commit.summary(), 60)
        );
    }
    if entries.len() > 50 {
        println!("\n... and {} more commits", entries.len() - 50);
    }

    let unlinked = entries.iter().filter(|c| c.author_login.is_none()).count();
    let logins: HashSet<_> = entries.iter().filter_map(|c| c.author_login.as_deref()).collect();
    println!("\nTotal commits: {}", style(entries.len()).cyan());
    println!("Contributors: {}", style(logins.len()).yellow());
    if unlinked > 0 {
        println!("Commits without a GitHub account: {}", style(unlinked).dim());
    }

    Ok(())
}
