//! src/view/components/search_bar.rs
//!
//! Header row: the sort toggle followed by one box per search input.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    engine::{filter::SearchQuery, sort::SortKey},
    model::ui_state::{UIMode, UIState},
    view::theme::Palette,
};

pub struct SearchBar;

impl SearchBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        ui_state: &UIState,
        search: &SearchQuery,
        sort: SortKey,
        palette: &Palette,
        area: Rect,
    ) {
        let mut constraints = vec![Constraint::Length(16)];
        constraints.extend(ui_state.search_fields.iter().map(|_| Constraint::Fill(1)));
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        let sort_button = Paragraph::new(Line::from(vec![
            Span::styled(sort.direction.label(), palette.enabled_style()),
            Span::styled(" (s)", Style::default().fg(palette.dim)),
        ]))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", sort.field.label()))
                .border_style(palette.border_style())
                .style(palette.base()),
        );
        frame.render_widget(sort_button, chunks[0]);

        for (idx, field) in ui_state.search_fields.iter().enumerate() {
            let editing = ui_state.mode == UIMode::Search && idx == ui_state.active_input;
            let area = chunks[idx + 1];

            let text = if editing {
                ui_state.input.as_str()
            } else {
                search.get(*field)
            };

            let (border, content) = if editing {
                (Style::default().fg(palette.accent), Style::default().fg(palette.foreground))
            } else if text.is_empty() {
                (palette.border_style(), Style::default().fg(palette.dim))
            } else {
                (palette.border_style(), Style::default().fg(palette.foreground))
            };

            let shown = if text.is_empty() && !editing {
                format!("Search by {}", field.label())
            } else {
                text.to_owned()
            };

            let input = Paragraph::new(shown).style(content).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", field.label()))
                    .border_style(border)
                    .style(palette.base()),
            );
            frame.render_widget(input, area);

            if editing {
                let before_cursor = &ui_state.input[..ui_state.input_cursor];
                frame.set_cursor_position(Position::new(
                    cursor_x(area, before_cursor),
                    area.y + 1,
                ));
            }
        }
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

/// Column for the text cursor inside a bordered input, kept off the border.
fn cursor_x(area: Rect, before_cursor: &str) -> u16 {
    let typed = u16::try_from(before_cursor.chars().count()).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(typed)
        .min(area.right().saturating_sub(2))
}
