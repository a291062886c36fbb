use crate::error::{PulseError, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoRef {
    type Err = PulseError;

    /// Accepts `owner/repo`, `github.com/owner/repo`, http(s) URLs with extra
    /// path segments, and `git@github.com:owner/repo.git`.
    fn from_str(input: &str) -> Result<Self> {
        let invalid = || PulseError::InvalidRepoUrl(input.to_string());
        let trimmed = input.trim();

        let path = if let Some(rest) = trimmed.strip_prefix("git@") {
            let (host, path) = rest.split_once(':').ok_or_else(invalid)?;
            if !is_github_host(host) {
                return Err(invalid());
            }
            path
        } else {
            let without_scheme = trimmed
                .strip_prefix("https://")
                .or_else(|| trimmed.strip_prefix("http://"))
                .unwrap_or(trimmed);
            match without_scheme.split_once('/') {
                Some((host, path)) if host.contains('.') => {
                    if !is_github_host(host) {
                        return Err(invalid());
                    }
                    path
                }
                _ if without_scheme.len() != trimmed.len() => return Err(invalid()),
                _ => without_scheme,
            }
        };

        let path = path.split(['?', '#']).next().unwrap_or("");
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let owner = segments.next().ok_or_else(invalid)?;
        let name = segments.next().ok_or_else(invalid)?;
        let name = name.strip_suffix(".git").unwrap_or(name);

        if !is_valid_segment(owner) || !is_valid_segment(name) {
            return Err(invalid());
        }

        Ok(Self::new(owner, name))
    }
}

fn is_github_host(host: &str) -> bool {
    matches!(host.to_ascii_lowercase().as_str(), "github.com" | "www.github.com")
}

fn is_valid_segment(s: &str) -> bool {
    !s.is_empty()
        && s != "."
        && s != ".."
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<RepoRef> {
        s.parse()
    }

    #[test]
    fn accepts_common_forms() {
        let expected = RepoRef::new("rust-lang", "cargo");
        for input in [
            "rust-lang/cargo",
            "github.com/rust-lang/cargo",
            "https://github.com/rust-lang/cargo",
            "http://www.github.com/rust-lang/cargo/",
            "https://github.com/rust-lang/cargo.git",
            "https://github.com/rust-lang/cargo/tree/master/src",
            "https://github.com/rust-lang/cargo?tab=readme",
            "git@github.com:rust-lang/cargo.git",
            "  https://GitHub.com/rust-lang/cargo  ",
        ] {
            assert_eq!(parse(input).unwrap(), expected, "input: {input}");
        }
    }

    #[test]
    fn rejects_other_hosts_and_garbage() {
        for input in [
            "https://gitlab.com/a/b",
            "git@gitlab.com:a/b.git",
            "https://github.com/only-owner",
            "justaword",
            "",
            "a/b c",
            "https://github.com/../etc",
        ] {
            assert!(
                matches!(parse(input), Err(PulseError::InvalidRepoUrl(_))),
                "input: {input}"
            );
        }
    }

    #[test]
    fn displays_as_owner_slash_name() {
        let r = RepoRef::new("a", "b");
        assert_eq!(r.to_string(), "a/b");
        assert_eq!(r.html_url(), "https://github.com/a/b");
    }
}
