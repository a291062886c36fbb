use crate::activity::TimeWindow;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub author_date: DateTime<Utc>,
    pub author_login: Option<String>,
    pub author_display_name: String,
    pub author_avatar_url: Option<String>,
    pub message: String,
}

impl CommitRecord {
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    pub fn author_day(&self) -> NaiveDate {
        self.author_date.date_naive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

impl DailyCount {
    pub fn label(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorSummary {
    pub login: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub total_commits: u32,
    pub daily_series: Vec<DailyCount>,
}

impl ContributorSummary {
    pub fn window_commits(&self) -> u32 {
        self.daily_series.iter().map(|d| d.count).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub selection: TimeWindow,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Everything the presentation layer needs for one repository and window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub window: Window,
    pub daily_series: Vec<DailyCount>,
    pub contributors: Vec<ContributorSummary>,
}

impl ActivityReport {
    pub fn window_commits(&self) -> u32 {
        self.daily_series.iter().map(|d| d.count).sum()
    }

    pub fn busiest_day(&self) -> Option<&DailyCount> {
        self.daily_series
            .iter()
            .filter(|d| d.count > 0)
            .max_by(|a, b| a.count.cmp(&b.count).then_with(|| b.date.cmp(&a.date)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub window: TimeWindow,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_commits: usize,
    pub daily_series: Vec<DailyCount>,
    pub contributors: Vec<ContributorSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub author: Option<String>,
    pub entries: Vec<CommitRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteOutput {
    pub sha: String,
    pub original: String,
    pub rewritten: String,
}
