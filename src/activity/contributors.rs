use super::series::build_daily_series;
use crate::model::{CommitRecord, ContributorSummary};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

struct ContributorAccum<'a> {
    display_name: &'a str,
    avatar_url: Option<&'a str>,
    commits: Vec<&'a CommitRecord>,
}

/// Group commits by login. Totals span the whole list; series are windowed.
pub fn build_contributor_summaries(
    commits: &[CommitRecord],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<ContributorSummary> {
    let mut by_login: HashMap<&str, ContributorAccum> = HashMap::new();

    for commit in commits {
        let Some(login) = commit.author_login.as_deref() else {
            continue;
        };

        let entry = by_login.entry(login).or_insert_with(|| ContributorAccum {
            display_name: &commit.author_display_name,
            avatar_url: None,
            commits: Vec::new(),
        });
        // last processed commit wins
        entry.display_name = &commit.author_display_name;
        entry.avatar_url = commit.author_avatar_url.as_deref();
        entry.commits.push(commit);
    }

    let mut contributors: Vec<ContributorSummary> = by_login
        .into_iter()
        .map(|(login, accum)| ContributorSummary {
            login: login.to_string(),
            display_name: accum.display_name.to_string(),
            avatar_url: accum.avatar_url.map(str::to_string),
            total_commits: accum.commits.len() as u32,
            daily_series: build_daily_series(accum.commits.iter().copied(), start, end),
        })
        .filter(|c| c.total_commits > 0)
        .collect();

    contributors.sort_by(|a, b| {
        b.total_commits
            .cmp(&a.total_commits)
            .then_with(|| a.login.cmp(&b.login))
    });
    contributors
}
