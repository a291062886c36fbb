use super::wire::{into_records, ApiMessage, CommitPayload};
use super::{check_sha, CommitSource, RepoRef};
use crate::config::GithubConfig;
use crate::error::{PulseError, Result};
use crate::model::CommitRecord;
use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const DIFF_MEDIA_TYPE: &str = "application/vnd.github.diff";
const API_VERSION: &str = "2022-11-28";

#[derive(Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
    token: Option<String>,
    per_page: u32,
}

impl GitHubClient {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("commitpulse/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout()?)
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: Some(config.token.clone()).filter(|t| !t.is_empty()),
            per_page: config.per_page.clamp(1, 100),
        })
    }

    fn get(&self, url: &str, accept: &str) -> Result<Response> {
        log::debug!("GET {url}");
        let mut request = self
            .http
            .get(url)
            .header(ACCEPT, accept)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        Ok(request.send()?)
    }

    fn commits_url(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}/{}/commits", self.api_url, repo.owner, repo.name)
    }
}

impl CommitSource for GitHubClient {
    fn fetch_commits(&self, repo: &RepoRef) -> Result<Vec<CommitRecord>> {
        let url = format!("{}?per_page={}", self.commits_url(repo), self.per_page);
        let response = self.get(&url, JSON_MEDIA_TYPE)?;
        let status = response.status();

        if status == StatusCode::CONFLICT {
            // GitHub answers 409 for a repository without any commits
            log::info!("{repo} has no commits yet");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().unwrap_or_default();
            return Err(classify_status(status, &headers, &body, repo));
        }

        let payloads: Vec<CommitPayload> = response.json()?;
        let records = into_records(payloads)?;
        log::info!("fetched {} commits from {repo}", records.len());
        Ok(records)
    }

    fn fetch_commit(&self, repo: &RepoRef, sha: &str) -> Result<CommitRecord> {
        let url = format!("{}/{}", self.commits_url(repo), check_sha(sha)?);
        let response = self.get(&url, JSON_MEDIA_TYPE)?;
        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().unwrap_or_default();
            return Err(classify_status(status, &headers, &body, repo));
        }

        let payload: CommitPayload = response.json()?;
        CommitRecord::try_from(payload)
    }

    fn fetch_diff(&self, repo: &RepoRef, sha: &str) -> Result<String> {
        let url = format!("{}/{}", self.commits_url(repo), check_sha(sha)?);
        let response = self.get(&url, DIFF_MEDIA_TYPE)?;
        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().unwrap_or_default();
            return Err(classify_status(status, &headers, &body, repo));
        }
        Ok(response.text()?)
    }
}

/// Map a non-success GitHub response onto a user-facing error.
pub fn classify_status(
    status: StatusCode,
    headers: &HeaderMap,
    body: &str,
    repo: &RepoRef,
) -> PulseError {
    let remaining = header_str(headers, "x-ratelimit-remaining");
    let exhausted = remaining.map(|r| r.trim() == "0").unwrap_or(false);

    if status == StatusCode::TOO_MANY_REQUESTS || (status == StatusCode::FORBIDDEN && exhausted) {
        let reset_at = header_str(headers, "x-ratelimit-reset")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));
        return PulseError::RateLimited {
            service: "GitHub",
            reset_at,
        };
    }

    let message = api_message(body);
    match status {
        StatusCode::NOT_FOUND => PulseError::NotFound(repo.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PulseError::Unauthorized(
            message.unwrap_or_else(|| "GitHub rejected the token".to_string()),
        ),
        _ => PulseError::Upstream(match message {
            Some(m) => format!("GitHub returned {status}: {m}"),
            None => format!("GitHub returned {status}"),
        }),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn api_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiMessage>(body)
        .ok()
        .map(|m| m.message)
        .filter(|m| !m.is_empty())
}
