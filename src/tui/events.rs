use super::run::Shell;
use super::state::{ShellEvent, View};
use crate::activity::TimeWindow;
use crate::github::RepoRef;
use crossterm::event::{KeyCode, KeyEvent};

impl Shell {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.state.input_mode {
            self.handle_input_key(key.code);
            return;
        }

        if self.state.show_help {
            if matches!(key.code, KeyCode::Char('h') | KeyCode::Char('q') | KeyCode::Esc | KeyCode::F(1)) {
                self.state.show_help = false;
            }
            return;
        }

        if self.state.rewrite.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter) {
                self.state.rewrite = None;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.state.should_quit = true,
            KeyCode::Char('h') | KeyCode::F(1) => self.state.show_help = true,
            KeyCode::Tab => self.state.view = self.state.view.next(),
            KeyCode::BackTab => self.state.view = self.state.view.prev(),
            KeyCode::Char('1') => self.state.view = View::Timeline,
            KeyCode::Char('2') => self.state.view = View::Contributors,
            KeyCode::Char('3') => self.state.view = View::Commits,
            KeyCode::Char('w') => self.select_window(TimeWindow::Week),
            KeyCode::Char('m') => self.select_window(TimeWindow::Month),
            KeyCode::Char('y') => self.select_window(TimeWindow::Year),
            KeyCode::Char('a') => self.select_window(TimeWindow::All),
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::PageDown => self.move_selection(10),
            KeyCode::PageUp => self.move_selection(-10),
            KeyCode::Char('g') | KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::Char('G') | KeyCode::End => self.move_selection(isize::MAX),
            KeyCode::Char('o') => {
                self.state.input_mode = true;
                self.state.input.clear();
            }
            KeyCode::Char('R') => {
                if let Some(repo) = self.dashboard.repo().cloned() {
                    self.open(repo);
                }
            }
            KeyCode::Char('r') | KeyCode::Enter if self.state.view == View::Commits => {
                self.request_rewrite()
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.state.input_mode = false;
                self.state.input.clear();
            }
            KeyCode::Enter => {
                self.state.input_mode = false;
                let input = std::mem::take(&mut self.state.input);
                match input.parse::<RepoRef>() {
                    Ok(repo) => self.open(repo),
                    Err(e) => self.state.set_status(e.to_string()),
                }
            }
            KeyCode::Backspace => {
                self.state.input.pop();
            }
            KeyCode::Char(c) => self.state.input.push(c),
            _ => {}
        }
    }

    pub fn handle_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::Commits { ticket, result } => match result {
                Ok(commits) => {
                    let count = commits.len();
                    let now = self.now();
                    match self.dashboard.complete(ticket, commits, now) {
                        Ok(true) => {
                            self.state.contributor_selected = 0;
                            self.state.commit_selected = 0;
                            let repo = self.dashboard.repo().map(|r| r.to_string()).unwrap_or_default();
                            self.state.set_status(format!("Loaded {count} commits from {repo}"));
                        }
                        Ok(false) => {}
                        Err(e) => self.state.set_status(e.to_string()),
                    }
                }
                Err(e) => {
                    if self.dashboard.fail(ticket) {
                        log::debug!("fetch failed: {e}");
                        self.state.set_status(e.to_string());
                    }
                }
            },
            ShellEvent::Rewrite { sha, result } => {
                let Some(panel) = self.state.rewrite.as_mut().filter(|p| p.sha == sha) else {
                    log::debug!("dropping rewrite for closed panel {sha}");
                    return;
                };
                panel.outcome = Some(result.map_err(|e| e.to_string()));
            }
        }
    }

    fn select_window(&mut self, window: TimeWindow) {
        let now = self.now();
        match self.dashboard.select_window(window, now) {
            Ok(()) => {
                let report = self.dashboard.report();
                let contributors = report.contributors.len();
                let commits = self.dashboard.commits().len();
                self.state.clamp_selections(contributors, commits);
            }
            Err(e) => self.state.set_status(e.to_string()),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let (selected, len) = match self.state.view {
            View::Contributors => (
                &mut self.state.contributor_selected,
                self.dashboard.report().contributors.len(),
            ),
            View::Commits => (&mut self.state.commit_selected, self.dashboard.commits().len()),
            View::Timeline => return,
        };
        if len == 0 {
            *selected = 0;
            return;
        }
        let next = (*selected as isize).saturating_add(delta).clamp(0, len as isize - 1);
        *selected = next as usize;
    }
}
