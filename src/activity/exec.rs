use super::{aggregate, output_json, output_ndjson, output_summary, parse_now, TimeWindow};
use crate::cli::{OutputArgs, SourceArgs};
use crate::config::Config;
use crate::github::{fetch_commits_with_progress, open_source, RepoRef};
use anyhow::Context;
use chrono::Utc;
use std::sync::Arc;

pub struct ActivityOptions {
    pub window: Option<String>,
    pub now: Option<String>,
    pub top: Option<usize>,
    pub interactive: bool,
}

pub fn exec(
    config: &Config,
    source: SourceArgs,
    output: OutputArgs,
    opts: ActivityOptions,
) -> anyhow::Result<()> {
    let repo: RepoRef = source.repo.parse().context("Failed to parse repository")?;
    let selection: TimeWindow = match opts.window.as_deref() {
        Some(w) => w.parse().context("Failed to parse time window")?,
        None => config.display.default_window()?,
    };
    let fixed_now = opts
        .now
        .as_deref()
        .map(parse_now)
        .transpose()
        .context("Failed to parse --now")?;

    let commit_source = open_source(config, source.input.as_deref())
        .context("Failed to open commit source")?;

    if opts.interactive {
        return crate::tui::run(config, Arc::from(commit_source), repo, selection, fixed_now)
            .map_err(|e| anyhow::anyhow!(e));
    }

    let machine_readable = output.json || output.ndjson;
    let commits = fetch_commits_with_progress(commit_source.as_ref(), &repo, !machine_readable)
        .with_context(|| format!("Failed to fetch commits for {repo}"))?;

    let now = fixed_now.unwrap_or_else(Utc::now);
    let report = aggregate(&commits, selection, now).context("Failed to aggregate commit activity")?;

    if output.json {
        output_json(&report, &repo, commits.len())?;
    } else if output.ndjson {
        output_ndjson(&report)?;
    } else {
        let top = opts.top.unwrap_or(config.display.top_contributors);
        output_summary(&report, &repo, commits.len(), top)?;
    }

    Ok(())
}
