use crate::error::Result;
use crate::model::CommitRecord;
use std::time::{Duration, Instant};

const STATUS_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Timeline,
    Contributors,
    Commits,
}

impl View {
    pub const ALL: [View; 3] = [View::Timeline, View::Contributors, View::Commits];

    pub fn title(self) -> &'static str {
        match self {
            View::Timeline => "Timeline",
            View::Contributors => "Contributors",
            View::Commits => "Commits",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Messages from worker threads back to the UI loop.
pub enum ShellEvent {
    Commits {
        ticket: u64,
        result: Result<Vec<CommitRecord>>,
    },
    Rewrite {
        sha: String,
        result: Result<String>,
    },
}

pub struct RewritePanel {
    pub sha: String,
    pub original: String,
    /// `None` while the request is in flight.
    pub outcome: Option<std::result::Result<String, String>>,
}

impl RewritePanel {
    pub fn loading(commit: &CommitRecord) -> Self {
        Self {
            sha: commit.sha.clone(),
            original: commit.message.clone(),
            outcome: None,
        }
    }
}

pub struct TuiState {
    pub view: View,
    pub show_help: bool,
    pub contributor_selected: usize,
    pub commit_selected: usize,
    pub input_mode: bool,
    pub input: String,
    pub status_message: Option<(String, Instant)>,
    pub rewrite: Option<RewritePanel>,
    pub should_quit: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self {
            view: View::Timeline,
            show_help: false,
            contributor_selected: 0,
            commit_selected: 0,
            input_mode: false,
            input: String::new(),
            status_message: None,
            rewrite: None,
            should_quit: false,
        }
    }
}

impl TuiState {
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn status(&self) -> Option<&str> {
        self.status_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < STATUS_TTL)
            .map(|(msg, _)| msg.as_str())
    }

    /// Keep selections inside lists that may have shrunk.
    pub fn clamp_selections(&mut self, contributors: usize, commits: usize) {
        self.contributor_selected = self.contributor_selected.min(contributors.saturating_sub(1));
        self.commit_selected = self.commit_selected.min(commits.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_cycle_both_ways() {
        assert_eq!(View::Timeline.next(), View::Contributors);
        assert_eq!(View::Commits.next(), View::Timeline);
        assert_eq!(View::Timeline.prev(), View::Commits);
    }

    #[test]
    fn clamps_to_last_item() {
        let mut state = TuiState {
            contributor_selected: 9,
            commit_selected: 4,
            ..TuiState::default()
        };
        state.clamp_selections(3, 0);
        assert_eq!(state.contributor_selected, 2);
        assert_eq!(state.commit_selected, 0);
    }
}
