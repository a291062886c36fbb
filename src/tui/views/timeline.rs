use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Sparkline, Table};
use ratatui::Frame;

use super::header_cell;
use crate::model::ActivityReport;
use crate::tui::draw::get_intensity_color;
use crate::util::downsample;

/// Render the window's commit sparkline, a short summary and the most recent days.
pub fn draw_timeline_view(f: &mut Frame, area: Rect, report: &ActivityReport) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let counts: Vec<u32> = report.daily_series.iter().map(|d| d.count).collect();
    let width = chunks[0].width.saturating_sub(2).max(1) as usize;
    let data = downsample(&counts, width);
    let sparkline = Sparkline::default()
        .block(Block::default().title("Commits per day").borders(Borders::ALL))
        .data(&data)
        .style(Style::default().fg(Color::Green));
    f.render_widget(sparkline, chunks[0]);

    let window = &report.window;
    let mut summary = vec![
        Line::from(format!(
            "{}: {} to {} ({} days)",
            window.selection.title(),
            window.start.format("%Y-%m-%d"),
            window.end.format("%Y-%m-%d"),
            report.daily_series.len()
        )),
        Line::from(format!(
            "Commits in window: {}   Contributors: {}",
            report.window_commits(),
            report.contributors.len()
        )),
    ];
    if let Some(day) = report.busiest_day() {
        summary.push(Line::from(format!("Busiest day: {} ({} commits)", day.label(), day.count)));
    }
    f.render_widget(
        Paragraph::new(summary).block(Block::default().title("Summary").borders(Borders::ALL)),
        chunks[1],
    );

    let visible = chunks[2].height.saturating_sub(3) as usize;
    let max = counts.iter().copied().max().unwrap_or(0) as u64;
    let rows: Vec<Row> = report
        .daily_series
        .iter()
        .rev()
        .take(visible)
        .map(|day| {
            let bar_width = if max == 0 { 0 } else { (day.count as u64 * 30).div_ceil(max) as usize };
            Row::new(vec![
                Cell::from(day.label()),
                Cell::from(day.count.to_string()),
                Cell::from("■".repeat(bar_width)).style(get_intensity_color(day.count as u64, max)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(12), Constraint::Length(8), Constraint::Min(10)],
    )
    .header(Row::new(vec![
        header_cell("Day", Color::Cyan),
        header_cell("Commits", Color::Cyan),
        header_cell("Activity", Color::Cyan),
    ]))
    .block(Block::default().title("Recent days").borders(Borders::ALL));
    f.render_widget(table, chunks[2]);
}
