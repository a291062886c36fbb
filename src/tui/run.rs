use super::draw::draw;
use super::state::{RewritePanel, ShellEvent, TuiState};
use crate::activity::TimeWindow;
use crate::app::Dashboard;
use crate::config::Config;
use crate::github::{CommitSource, RepoRef};
use crate::rewrite::{GeminiRewriter, MessageRewriter};
use chrono::{DateTime, Utc};
use crossterm::cursor::Show;
use crossterm::event::{poll, read, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use log::LevelFilter;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::panic;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub struct Shell {
    pub dashboard: Dashboard,
    pub state: TuiState,
    source: Arc<dyn CommitSource>,
    rewriter: Result<Arc<dyn MessageRewriter>, String>,
    fixed_now: Option<DateTime<Utc>>,
    tx: Sender<ShellEvent>,
    rx: Receiver<ShellEvent>,
}

impl Shell {
    pub fn new(
        source: Arc<dyn CommitSource>,
        rewriter: Result<Arc<dyn MessageRewriter>, String>,
        window: TimeWindow,
        fixed_now: Option<DateTime<Utc>>,
    ) -> crate::error::Result<Self> {
        let (tx, rx) = channel();
        let now = fixed_now.unwrap_or_else(Utc::now);
        Ok(Self {
            dashboard: Dashboard::new(window, now)?,
            state: TuiState::default(),
            source,
            rewriter,
            fixed_now,
            tx,
            rx,
        })
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.fixed_now.unwrap_or_else(Utc::now)
    }

    pub fn open(&mut self, repo: RepoRef) {
        let submission = self.dashboard.submit(repo);
        self.state.set_status(format!("Loading {}...", submission.repo));

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = source.fetch_commits(&submission.repo);
            let _ = tx.send(ShellEvent::Commits {
                ticket: submission.ticket,
                result,
            });
        });
    }

    pub fn request_rewrite(&mut self) {
        let rewriter = match &self.rewriter {
            Ok(r) => Arc::clone(r),
            Err(reason) => {
                let reason = reason.clone();
                self.state.set_status(reason);
                return;
            }
        };
        let (Some(repo), Some(commit)) = (
            self.dashboard.repo().cloned(),
            self.dashboard.commits().get(self.state.commit_selected).cloned(),
        ) else {
            return;
        };

        self.state.rewrite = Some(RewritePanel::loading(&commit));
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = source
                .fetch_diff(&repo, &commit.sha)
                .and_then(|diff| rewriter.rewrite(&commit.message, &diff));
            let _ = tx.send(ShellEvent::Rewrite {
                sha: commit.sha,
                result,
            });
        });
    }

    /// Apply every worker result that has arrived since the last frame.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.handle_event(event);
        }
    }
}

pub fn run(
    config: &Config,
    source: Arc<dyn CommitSource>,
    repo: RepoRef,
    window: TimeWindow,
    fixed_now: Option<DateTime<Utc>>,
) -> io::Result<()> {
    let rewriter: Result<Arc<dyn MessageRewriter>, String> = GeminiRewriter::new(&config.ai)
        .map(|r| Arc::new(r) as Arc<dyn MessageRewriter>)
        .map_err(|e| format!("AI rewrite unavailable: {e}"));
    let mut shell = Shell::new(source, rewriter, window, fixed_now).map_err(io::Error::other)?;
    shell.open(repo);

    let _quiet = QuietLogs::new();
    let _screen = ScreenGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    event_loop(&mut terminal, &mut shell)
}

/// Raw mode plus alternate screen, undone on drop and on panic.
struct ScreenGuard;

impl ScreenGuard {
    fn enter() -> io::Result<Self> {
        let hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore_screen();
            hook(info);
        }));

        let guard = ScreenGuard;
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        restore_screen();
        if !thread::panicking() {
            let _ = panic::take_hook();
        }
    }
}

fn restore_screen() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

/// Log lines on stderr would land on top of the alternate screen.
struct QuietLogs(LevelFilter);

impl QuietLogs {
    fn new() -> Self {
        let previous = log::max_level();
        log::set_max_level(LevelFilter::Off);
        Self(previous)
    }
}

impl Drop for QuietLogs {
    fn drop(&mut self) {
        log::set_max_level(self.0);
    }
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    shell: &mut Shell,
) -> io::Result<()> {
    loop {
        shell.drain_events();
        terminal.draw(|f| draw(f, shell))?;

        if poll(Duration::from_millis(200))? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                shell.handle_key(key_event);
            }
        }

        if shell.state.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_is_silenced_only_while_the_screen_is_up() {
        log::set_max_level(LevelFilter::Info);
        {
            let _quiet = QuietLogs::new();
            assert_eq!(log::max_level(), LevelFilter::Off);
        }
        assert_eq!(log::max_level(), LevelFilter::Info);
    }
}
