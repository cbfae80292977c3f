//! src/view/ui.rs
//! ============================================================
//! Frame renderer: draws the whole screen from the current `AppState`.
//! The caller holds the state lock for the duration of one frame.

use std::time::{Duration, Instant};

use ratatui::prelude::*;
use tracing::{instrument, trace};

use crate::{
    config::Theme,
    model::{app_state::AppState, ui_state::UIOverlay},
    view::{
        components::{
            help_overlay::HelpOverlay, pagination_bar::PaginationBar,
            record_table::RecordTable, search_bar::SearchBar, status_bar::StatusBar,
        },
        theme::Palette,
    },
};

#[derive(Debug, Default)]
pub struct RenderStats {
    pub frames: u64,
    pub slow: u64,
    pub total: Duration,
}

pub struct UIRenderer {
    palette: Palette,
    theme: Theme,
    pub stats: RenderStats,
}

impl UIRenderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            palette: Palette::for_theme(theme),
            theme,
            stats: RenderStats::default(),
        }
    }

    #[instrument(level = "trace", skip_all)]
    pub fn render(&mut self, f: &mut Frame<'_>, app: &AppState) {
        let start = Instant::now();

        if app.ui.theme != self.theme {
            self.theme = app.ui.theme;
            self.palette = Palette::for_theme(self.theme);
        }

        let view = app.engine.view();
        let screen = f.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // sort toggle + search inputs
                Constraint::Min(3),    // table
                Constraint::Length(2), // pagination
                Constraint::Length(1), // status
            ])
            .split(screen);

        SearchBar::new().render(
            f,
            &app.ui,
            app.engine.search(),
            view.sort,
            &self.palette,
            chunks[0],
        );
        RecordTable::new().render(f, &view, &app.ui, &self.palette, chunks[1]);
        PaginationBar::new().render(f, &view, &self.palette, chunks[2]);
        StatusBar::new().render(f, &app.ui, &view, &self.palette, chunks[3]);

        if app.ui.overlay == UIOverlay::Help {
            HelpOverlay::new().render(f, &self.palette, screen);
        }

        let dur = start.elapsed();
        self.stats.total += dur;
        if dur.as_millis() > 16 {
            self.stats.slow += 1;
            trace!(ms = dur.as_millis(), "Slow frame");
        }
        self.stats.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::{
        config::Config,
        controller::{actions::Action, event_loop::apply_action},
        model::{dataset::Dataset, record::Record},
        view::components::record_table::EMPTY_MESSAGE,
    };

    fn app(count: usize, show_id: bool) -> AppState {
        let records = (1..=count)
            .map(|i| {
                Record::new(
                    i as i64,
                    &format!("First{i:02}"),
                    "Last",
                    "Female",
                    &format!("f{i}@mail.com"),
                    "Tester",
                )
            })
            .collect();
        let mut config = Config::default();
        config.view.show_id = show_id;
        AppState::from_config(Dataset::new(records).unwrap(), &config).unwrap()
    }

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut renderer = UIRenderer::new(Theme::Default);
        terminal.draw(|f| renderer.render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_first_page() {
        let screen = draw(&app(45, false));
        assert!(screen.contains("Page 1 of 3"));
        assert!(screen.contains("First01"));
        assert!(screen.contains("First Name A-Z"));
        assert!(!screen.contains("First21"));
        assert!(screen.contains("Previous"));
    }

    #[test]
    fn test_empty_state() {
        let mut app = app(45, false);
        apply_action(&mut app, Action::EnterSearch);
        for c in "nobody".chars() {
            apply_action(&mut app, Action::SearchInput(c));
        }

        let screen = draw(&app);
        assert!(screen.contains(EMPTY_MESSAGE));
        assert!(screen.contains("Page 1 of 1"));
    }

    #[test]
    fn test_id_column_toggle() {
        assert!(!draw(&app(3, false)).contains(" id "));
        assert!(draw(&app(3, true)).contains(" id "));
    }

    #[test]
    fn test_help_overlay_drawn() {
        let mut app = app(3, false);
        apply_action(&mut app, Action::ToggleHelp);
        assert!(draw(&app).contains("Toggle A-Z / Z-A"));
    }
}
