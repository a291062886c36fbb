use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use super::{header_cell, selected_style};
use crate::model::CommitRecord;
use crate::tui::layout::scroll_offset;
use crate::tui::state::TuiState;
use crate::util::truncate;

/// Render the fetched commit list and the selected commit's full message.
pub fn draw_commits_view(f: &mut Frame, area: Rect, commits: &[CommitRecord], state: &TuiState) {
    if commits.is_empty() {
        let placeholder = Paragraph::new("No commits loaded")
            .block(Block::default().title("Commits").borders(Borders::ALL));
        f.render_widget(placeholder, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let height = chunks[0].height.saturating_sub(3) as usize;
    let offset = scroll_offset(state.commit_selected, commits.len(), height);
    let rows: Vec<Row> = commits
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, commit)| {
            let who = commit
                .author_login
                .as_deref()
                .unwrap_or(&commit.author_display_name);
            let row = Row::new(vec![
                Cell::from(commit.short_sha().to_string()).style(Style::default().fg(Color::Yellow)),
                Cell::from(commit.author_date.format("%Y-%m-%d").to_string()),
                Cell::from(truncate(who, 16)),
                Cell::from(truncate(commit.summary(), 60)),
            ]);
            if i == state.commit_selected {
                row.style(selected_style())
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(11),
            Constraint::Length(17),
            Constraint::Min(20),
        ],
    )
    .header(Row::new(vec![
        header_cell("SHA", Color::Cyan),
        header_cell("Date", Color::Cyan),
        header_cell("Author", Color::Cyan),
        header_cell("Summary", Color::Cyan),
    ]))
    .block(
        Block::default()
            .title(format!("Commits ({})", commits.len()))
            .borders(Borders::ALL),
    );
    f.render_widget(table, chunks[0]);

    let Some(commit) = commits.get(state.commit_selected) else {
        return;
    };

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![Span::styled("Commit: ", bold), Span::raw(commit.sha.clone())]),
        Line::from(vec![
            Span::styled("Author: ", bold),
            Span::raw(match &commit.author_login {
                Some(login) => format!("{} ({login})", commit.author_display_name),
                None => format!("{} (no GitHub account)", commit.author_display_name),
            }),
        ]),
        Line::from(vec![
            Span::styled("Date:   ", bold),
            Span::raw(commit.author_date.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ]),
        Line::from(""),
    ];
    lines.extend(commit.message.lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "r: rewrite message with AI",
        Style::default().fg(Color::Gray),
    )));

    let details = Paragraph::new(lines)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(details, chunks[1]);
}
