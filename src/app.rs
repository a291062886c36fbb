//! State owned by the interactive shell: the current repository, its commits,
//! the selected window and the report derived from them.

use crate::activity::{aggregate, TimeWindow};
use crate::error::Result;
use crate::github::RepoRef;
use crate::model::{ActivityReport, CommitRecord};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub ticket: u64,
    pub repo: RepoRef,
}

pub struct Dashboard {
    repo: Option<RepoRef>,
    commits: Vec<CommitRecord>,
    window: TimeWindow,
    report: ActivityReport,
    latest_ticket: u64,
    pending: Option<Submission>,
}

impl Dashboard {
    pub fn new(window: TimeWindow, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            repo: None,
            commits: Vec::new(),
            window,
            report: aggregate(&[], window, now)?,
            latest_ticket: 0,
            pending: None,
        })
    }

    /// Start loading `repo`. Any earlier in-flight submission is superseded.
    pub fn submit(&mut self, repo: RepoRef) -> Submission {
        self.latest_ticket += 1;
        let submission = Submission {
            ticket: self.latest_ticket,
            repo,
        };
        if let Some(previous) = self.pending.replace(submission.clone()) {
            log::debug!("submission {} for {} superseded", previous.ticket, previous.repo);
        }
        submission
    }

    /// Install the commits of a finished fetch. Returns `false` for stale tickets.
    pub fn complete(
        &mut self,
        ticket: u64,
        commits: Vec<CommitRecord>,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let Some(pending) = self.pending.as_ref().filter(|p| p.ticket == ticket) else {
            log::debug!("discarding stale result for submission {ticket}");
            return Ok(false);
        };

        let report = aggregate(&commits, self.window, now)?;
        self.repo = Some(pending.repo.clone());
        self.commits = commits;
        self.report = report;
        self.pending = None;
        Ok(true)
    }

    /// Mark the latest submission as failed. Returns `false` for stale tickets.
    pub fn fail(&mut self, ticket: u64) -> bool {
        if self.pending.as_ref().is_some_and(|p| p.ticket == ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn select_window(&mut self, window: TimeWindow, now: DateTime<Utc>) -> Result<()> {
        let report = aggregate(&self.commits, window, now)?;
        self.window = window;
        self.report = report;
        Ok(())
    }

    pub fn refresh(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.report = aggregate(&self.commits, self.window, now)?;
        Ok(())
    }

    pub fn report(&self) -> &ActivityReport {
        &self.report
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }

    pub fn repo(&self) -> Option<&RepoRef> {
        self.repo.as_ref()
    }

    pub fn pending(&self) -> Option<&Submission> {
        self.pending.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::parse_now;

    fn now() -> DateTime<Utc> {
        parse_now("2024-01-10T12:00:00Z").unwrap()
    }

    fn commit(sha: &str, date: &str, login: &str) -> CommitRecord {
        CommitRecord {
            sha: sha.to_string(),
            author_date: parse_now(date).unwrap(),
            author_login: Some(login.to_string()),
            author_display_name: login.to_uppercase(),
            author_avatar_url: None,
            message: format!("commit {sha}"),
        }
    }

    #[test]
    fn last_submission_wins() {
        let mut dash = Dashboard::new(TimeWindow::All, now()).unwrap();
        let first = dash.submit(RepoRef::new("a", "one"));
        let second = dash.submit(RepoRef::new("a", "two"));

        let installed = dash
            .complete(first.ticket, vec![commit("1", "2024-01-01", "x")], now())
            .unwrap();
        assert!(!installed);
        assert!(dash.commits().is_empty());
        assert!(dash.is_loading());

        let installed = dash
            .complete(second.ticket, vec![commit("2", "2024-01-02", "y")], now())
            .unwrap();
        assert!(installed);
        assert_eq!(dash.repo(), Some(&RepoRef::new("a", "two")));
        assert_eq!(dash.commits().len(), 1);
        assert!(!dash.is_loading());
    }

    #[test]
    fn new_fetch_replaces_commits_wholesale() {
        let mut dash = Dashboard::new(TimeWindow::All, now()).unwrap();
        let s = dash.submit(RepoRef::new("a", "b"));
        dash.complete(s.ticket, vec![commit("1", "2024-01-01", "x"), commit("2", "2024-01-02", "x")], now())
            .unwrap();
        let s = dash.submit(RepoRef::new("a", "b"));
        dash.complete(s.ticket, vec![commit("3", "2024-01-03", "z")], now()).unwrap();

        assert_eq!(dash.commits().len(), 1);
        assert_eq!(dash.report().contributors.len(), 1);
        assert_eq!(dash.report().contributors[0].login, "z");
    }

    #[test]
    fn failure_only_clears_latest() {
        let mut dash = Dashboard::new(TimeWindow::Month, now()).unwrap();
        let old = dash.submit(RepoRef::new("a", "b"));
        let new = dash.submit(RepoRef::new("a", "c"));
        assert!(!dash.fail(old.ticket));
        assert!(dash.is_loading());
        assert!(dash.fail(new.ticket));
        assert!(!dash.is_loading());
    }

    #[test]
    fn window_change_recomputes_series() {
        let mut dash = Dashboard::new(TimeWindow::All, now()).unwrap();
        let s = dash.submit(RepoRef::new("a", "b"));
        dash.complete(s.ticket, vec![commit("1", "2023-12-25", "x"), commit("2", "2024-01-09", "x")], now())
            .unwrap();
        assert_eq!(dash.report().window_commits(), 2);

        dash.select_window(TimeWindow::Week, now()).unwrap();
        assert_eq!(dash.window(), TimeWindow::Week);
        assert_eq!(dash.report().window_commits(), 1);
        assert_eq!(dash.report().daily_series.len(), 3);
        // totals stay window-independent
        assert_eq!(dash.report().contributors[0].total_commits, 2);
    }
}
