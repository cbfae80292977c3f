//! src/view/components/help_overlay.rs
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::view::theme::Palette;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Sorting",
        &[
            ("s", "Toggle A-Z / Z-A"),
            ("f", "Sort by the next column"),
        ],
    ),
    (
        "Searching",
        &[
            ("/", "Edit the first search input"),
            ("Tab", "Next search input"),
            ("Ctrl+T", "Search a different field with this input"),
            ("Esc/Enter", "Stop editing"),
            ("c", "Clear all search text"),
        ],
    ),
    (
        "Paging",
        &[
            ("←/PgUp/p", "Previous page"),
            ("→/PgDn/n", "Next page"),
            ("Home/End", "First / last page"),
            ("↑↓", "Move row selection"),
        ],
    ),
    (
        "Application",
        &[
            ("r", "Reset sort, search and page"),
            ("?", "Toggle this help"),
            ("q/Ctrl+C", "Quit"),
        ],
    ),
];

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame<'_>, palette: &Palette, area: Rect) {
        let overlay_area = Self::centered_rect(60, 70, area);
        frame.render_widget(Clear, overlay_area);

        let mut lines = Vec::new();
        for (title, keys) in SECTIONS {
            lines.push(Line::from(Span::styled(
                *title,
                Style::default().fg(palette.control).add_modifier(Modifier::BOLD),
            )));
            for (key, what) in *keys {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {key:<12}"), Style::default().fg(palette.header)),
                    Span::raw(*what),
                ]));
            }
            lines.push(Line::from(""));
        }

        let help = Paragraph::new(Text::from(lines))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(palette.accent))
                    .style(palette.base()),
            )
            .wrap(Wrap { trim: false });

        frame.render_widget(help, overlay_area);
    }

    fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(r);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vertical[1])[1]
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}
