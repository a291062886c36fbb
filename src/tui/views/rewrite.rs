use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::centered_rect;
use crate::tui::state::RewritePanel;

pub fn draw_rewrite_panel(f: &mut Frame, area: Rect, panel: &RewritePanel) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!("Rewrite {}", panel.sha.get(..7).unwrap_or(&panel.sha)))
        .borders(Borders::ALL);
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let original: Vec<Line> = panel.original.lines().map(|l| Line::from(l.to_string())).collect();
    f.render_widget(
        Paragraph::new(original)
            .block(Block::default().title("Original").borders(Borders::ALL))
            .wrap(Wrap { trim: false }),
        chunks[0],
    );

    let (title, lines, color) = match &panel.outcome {
        None => ("Suggested", vec![Line::from("Asking the AI service...")], Color::Gray),
        Some(Ok(text)) => (
            "Suggested",
            text.lines().map(|l| Line::from(l.to_string())).collect(),
            Color::Green,
        ),
        Some(Err(e)) => ("Error", vec![Line::from(e.clone())], Color::Red),
    };
    f.render_widget(
        Paragraph::new(lines)
            .style(Style::default().fg(color))
            .block(
                Block::default()
                    .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
                    .borders(Borders::ALL),
            )
            .wrap(Wrap { trim: false }),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new("Esc to close").style(Style::default().fg(Color::Gray)),
        chunks[2],
    );
}
