use crate::activity::TimeWindow;
use crate::error::{PulseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_ENV: &str = "COMMITPULSE_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub github: GithubConfig,
    pub ai: AiConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    pub token: String,
    pub per_page: u32,
    pub timeout: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f64,
    pub max_diff_chars: usize,
    pub timeout: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_window: String,
    pub top_contributors: usize,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            token: String::new(),
            per_page: 30,
            timeout: "30s".to_string(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: String::new(),
            temperature: 0.2,
            max_diff_chars: 12_000,
            timeout: "60s".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_window: "month".to_string(),
            top_contributors: 10,
        }
    }
}

impl GithubConfig {
    pub fn timeout(&self) -> Result<Duration> {
        parse_timeout("github.timeout", &self.timeout)
    }
}

impl AiConfig {
    pub fn timeout(&self) -> Result<Duration> {
        parse_timeout("ai.timeout", &self.timeout)
    }
}

impl DisplayConfig {
    pub fn default_window(&self) -> Result<TimeWindow> {
        self.default_window.parse().map_err(|_| {
            PulseError::Config(format!(
                "display.default_window: unknown window '{}'",
                self.default_window
            ))
        })
    }
}

fn parse_timeout(key: &str, value: &str) -> Result<Duration> {
    humantime::parse_duration(value)
        .map_err(|e| PulseError::Config(format!("{key}: '{value}' is not a duration ({e})")))
}

impl Config {
    /// `explicit`, then `$COMMITPULSE_CONFIG`, then the platform config dir.
    pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        dirs::config_dir()
            .map(|dir| dir.join("commitpulse").join("config.toml"))
            .ok_or_else(|| PulseError::Config("could not determine config directory".to_string()))
    }

    /// Load the config file if present, then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = Self::config_path(explicit)?;
        let mut config = if path.exists() {
            log::debug!("reading config from {}", path.display());
            Self::from_toml(&fs::read_to_string(&path)?)?
        } else {
            log::debug!("no config at {}, using defaults", path.display());
            Self::default()
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("GITHUB_TOKEN").filter(|t| !t.is_empty()) {
            self.github.token = token;
        }
        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.is_empty()) {
            self.ai.api_key = key;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.github.timeout()?;
        self.ai.timeout()?;
        self.display.default_window()?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Copy with secrets replaced, for display.
    pub fn masked(&self) -> Self {
        let mut copy = self.clone();
        copy.github.token = mask(&copy.github.token);
        copy.ai.api_key = mask(&copy.ai.api_key);
        copy
    }
}

fn mask(secret: &str) -> String {
    let len = secret.chars().count();
    match len {
        0 => String::new(),
        1..=8 => "****".to_string(),
        _ => format!("****{}", secret.chars().skip(len - 4).collect::<String>()),
    }
}
