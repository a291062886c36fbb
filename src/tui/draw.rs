use super::run::Shell;
use super::state::View;
use super::views::{
    draw_commits_view, draw_contributors_view, draw_help_overlay, draw_rewrite_panel, draw_timeline_view,
};
use crate::activity::TimeWindow;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

pub fn draw(f: &mut Frame, shell: &Shell) {
    let size = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    let repo = shell
        .dashboard
        .repo()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "no repository".to_string());
    let window = shell.dashboard.window();
    let tabs = Tabs::new(View::ALL.iter().map(|v| v.title()).collect::<Vec<_>>())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{repo} · {}", window.title())),
        )
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .select(shell.state.view.index());
    f.render_widget(tabs, chunks[0]);

    let report = shell.dashboard.report();
    match shell.state.view {
        View::Timeline => draw_timeline_view(f, chunks[1], report),
        View::Contributors => draw_contributors_view(f, chunks[1], report, &shell.state),
        View::Commits => draw_commits_view(f, chunks[1], shell.dashboard.commits(), &shell.state),
    }

    f.render_widget(status_line(shell, window), chunks[2]);

    if let Some(panel) = &shell.state.rewrite {
        draw_rewrite_panel(f, size, panel);
    }
    if shell.state.show_help {
        draw_help_overlay(f, size);
    }
}

fn status_line(shell: &Shell, window: TimeWindow) -> Paragraph<'static> {
    if shell.state.input_mode {
        return Paragraph::new(Line::from(vec![
            Span::styled("Open repository: ", Style::default().fg(Color::Yellow)),
            Span::raw(shell.state.input.clone()),
            Span::styled("█", Style::default().fg(Color::Gray)),
        ]));
    }

    let text = if let Some(msg) = shell.state.status() {
        msg.to_string()
    } else if let Some(pending) = shell.dashboard.pending() {
        format!("Loading {}...", pending.repo)
    } else {
        let windows: Vec<String> = TimeWindow::ALL
            .iter()
            .map(|w| {
                let key = &w.as_str()[..1];
                if *w == window {
                    format!("[{key}]{}", &w.as_str()[1..])
                } else {
                    format!("{key}:{}", w.as_str())
                }
            })
            .collect();
        format!("{}  o:open  R:reload  h:help  q:quit", windows.join(" "))
    };
    Paragraph::new(text).style(Style::default().fg(Color::Gray))
}

/// Chooses a color based on relative intensity of commit activity.
pub fn get_intensity_color(count: u64, max: u64) -> Style {
    if max == 0 || count == 0 {
        return Style::default().fg(Color::DarkGray);
    }

    let ratio = count as f64 / max as f64;
    if ratio > 0.8 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if ratio > 0.6 {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if ratio > 0.4 {
        Style::default().fg(Color::Green)
    } else if ratio > 0.2 {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Blue)
    }
}
