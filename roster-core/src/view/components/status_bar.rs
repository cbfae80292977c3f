//! src/view/components/status_bar.rs
//!
//! Bottom line: mode and key hints on the left, the latest notification (or
//! the row count) on the right.

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Widget},
};

use crate::{
    engine::view_engine::PageView,
    model::ui_state::{NotificationLevel, UIMode, UIState},
    view::theme::Palette,
};

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        ui_state: &UIState,
        view: &PageView<'_>,
        palette: &Palette,
        area: Rect,
    ) {
        let (mode_str, hints) = match ui_state.mode {
            UIMode::Browse => ("BROWSE", "/ search  s sort  f field  ←/→ page  ? help  q quit"),
            UIMode::Search => ("SEARCH", "Tab next input  Ctrl+T field  Esc done"),
        };

        let left = Line::from(vec![
            Span::styled(format!(" {mode_str} "), Style::default().fg(palette.background).bg(palette.accent)),
            Span::styled(format!(" {hints}"), Style::default().fg(palette.dim)),
        ]);

        let right = match &ui_state.notification {
            Some(n) => {
                let color = match n.level {
                    NotificationLevel::Info => palette.info,
                    NotificationLevel::Warning => palette.warning,
                };
                Span::styled(format!("{} ", n.message), Style::default().fg(color))
            }
            None => Span::styled(
                format!("{} of {} users ", view.filtered_count, view.total_count),
                Style::default().fg(palette.foreground),
            ),
        };

        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        Paragraph::new(left)
            .style(palette.base())
            .alignment(Alignment::Left)
            .render(layout[0], frame.buffer_mut());

        Paragraph::new(Line::from(right))
            .style(palette.base())
            .alignment(Alignment::Right)
            .render(layout[1], frame.buffer_mut());
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}
