use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::centered_rect;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Views",
        &[
            ("Tab / Shift+Tab", "Cycle Timeline, Contributors, Commits"),
            ("1 2 3", "Jump to a view"),
        ],
    ),
    (
        "Time window",
        &[
            ("w", "This week (from Monday)"),
            ("m", "This month"),
            ("y", "This year"),
            ("a", "All time"),
        ],
    ),
    (
        "Lists",
        &[
            ("j k / ↑ ↓", "Move selection"),
            ("PgUp PgDn", "Move by ten"),
            ("g G", "First / last"),
        ],
    ),
    (
        "Repository",
        &[
            ("o", "Open another repository"),
            ("R", "Fetch the current repository again"),
            ("r / Enter", "AI rewrite of the selected commit message"),
        ],
    ),
    ("Other", &[("h / F1", "Toggle help"), ("q", "Quit")]),
];

pub fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let popup = centered_rect(64, 76, area);
    f.render_widget(Clear, popup);

    let heading = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);

    let mut lines = Vec::new();
    for (title, keys) in SECTIONS {
        lines.push(Line::from(Span::styled(*title, heading)));
        for (key, action) in *keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<16}"), key_style),
                Span::raw(*action),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Esc closes this overlay",
        Style::default().fg(Color::Gray),
    )));

    let help = Paragraph::new(lines)
        .block(Block::default().title("Keys").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(help, popup);
}
