use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Sparkline, Table};
use ratatui::Frame;

use super::{header_cell, selected_style};
use crate::model::ActivityReport;
use crate::tui::layout::scroll_offset;
use crate::tui::state::TuiState;
use crate::util::{downsample, truncate};

/// Table of contributors by total commits with the selected one's activity.
pub fn draw_contributors_view(f: &mut Frame, area: Rect, report: &ActivityReport, state: &TuiState) {
    if report.contributors.is_empty() {
        let empty = Paragraph::new("No commits linked to GitHub accounts")
            .block(Block::default().title("Contributors").borders(Borders::ALL));
        f.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let height = chunks[0].height.saturating_sub(3) as usize;
    let offset = scroll_offset(state.contributor_selected, report.contributors.len(), height);
    let rows: Vec<Row> = report
        .contributors
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, c)| {
            let row = Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(truncate(&c.login, 20)),
                Cell::from(c.total_commits.to_string()),
                Cell::from(c.window_commits().to_string()),
            ]);
            if i == state.contributor_selected {
                row.style(selected_style())
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(7),
            Constraint::Length(7),
        ],
    )
    .header(Row::new(vec![
        header_cell("#", Color::Cyan),
        header_cell("Login", Color::Cyan),
        header_cell("Total", Color::Cyan),
        header_cell("Window", Color::Cyan),
    ]))
    .block(
        Block::default()
            .title(format!("Contributors ({})", report.contributors.len()))
            .borders(Borders::ALL),
    );
    f.render_widget(table, chunks[0]);

    let Some(selected) = report.contributors.get(state.contributor_selected) else {
        return;
    };

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(chunks[1]);

    let details = vec![
        Line::from(format!("Name:   {}", selected.display_name)),
        Line::from(format!("Login:  {}", selected.login)),
        Line::from(format!(
            "Avatar: {}",
            selected.avatar_url.as_deref().unwrap_or("-")
        )),
        Line::from(format!(
            "Commits: {} total, {} in window",
            selected.total_commits,
            selected.window_commits()
        )),
    ];
    f.render_widget(
        Paragraph::new(details).block(Block::default().title("Contributor").borders(Borders::ALL)),
        side[0],
    );

    let counts: Vec<u32> = selected.daily_series.iter().map(|d| d.count).collect();
    let width = side[1].width.saturating_sub(2).max(1) as usize;
    let data = downsample(&counts, width);
    let sparkline = Sparkline::default()
        .block(Block::default().title("Activity in window").borders(Borders::ALL))
        .data(&data)
        .style(Style::default().fg(Color::Blue));
    f.render_widget(sparkline, side[1]);
}
