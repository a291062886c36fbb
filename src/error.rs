use chrono::{DateTime, Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PulseError>;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Unknown time window '{0}' (expected week, month, year or all)")]
    InvalidSelection(String),
    #[error("Malformed commit record {sha}: missing or invalid {field}")]
    MalformedRecord { sha: String, field: &'static str },
    #[error("Not a GitHub repository: {0}")]
    InvalidRepoUrl(String),
    #[error("Not a commit SHA: '{0}' (expected 4 to 40 hex digits)")]
    InvalidSha(String),
    #[error("Repository not found: {0}")]
    NotFound(String),
    #[error("{service} rate limit exceeded{}", reset_hint(.reset_at))]
    RateLimited {
        service: &'static str,
        reset_at: Option<DateTime<Utc>>,
    },
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),
    #[error("AI completion blocked: {0}")]
    CompletionBlocked(String),
    #[error("AI completion returned no text")]
    EmptyCompletion,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("Config write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn reset_hint(reset_at: &Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(at) => format!(", resets at {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => String::new(),
    }
}
