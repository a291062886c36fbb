use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

mod commits;
mod contributors;
mod help;
mod rewrite;
mod timeline;

pub use commits::draw_commits_view;
pub use contributors::draw_contributors_view;
pub use help::draw_help_overlay;
pub use rewrite::draw_rewrite_panel;
pub use timeline::draw_timeline_view;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

pub(crate) fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}
