//! src/view/components/pagination_bar.rs
//!
//! `Previous | Page X of Y | Next`, with the unusable end dimmed.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::{engine::view_engine::PageView, view::theme::Palette};

pub struct PaginationBar;

impl PaginationBar {
    pub fn new() -> Self {
        Self
    }

    pub fn page_label(view: &PageView<'_>) -> String {
        format!("Page {} of {}", view.page_index, view.total_pages)
    }

    pub fn render(&self, frame: &mut Frame<'_>, view: &PageView<'_>, palette: &Palette, area: Rect) {
        let control = |label: &'static str, disabled: bool| {
            let style = if disabled {
                palette.disabled_style()
            } else {
                palette.enabled_style()
            };
            Span::styled(label, style)
        };

        let line = Line::from(vec![
            control("◀ Previous", view.is_first_page),
            Span::raw("   "),
            Span::styled(Self::page_label(view), Style::default().fg(palette.foreground)),
            Span::raw("   "),
            control("Next ▶", view.is_last_page),
        ]);

        let bar = Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(palette.border_style())
                .style(palette.base()),
        );
        frame.render_widget(bar, area);
    }
}

impl Default for PaginationBar {
    fn default() -> Self {
        Self::new()
    }
}
