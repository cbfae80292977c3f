//! ``src/model/app_state.rs``
//! ============================================================================
//! # AppState: engine plus presentation state behind one lock

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    config::Config,
    engine::view_engine::ViewEngine,
    error::AppError,
    model::{
        dataset::Dataset,
        record::RecordField,
        ui_state::{NotificationLevel, RedrawFlag, UIMode, UIState},
    },
};

#[derive(Debug)]
pub struct AppState {
    pub engine: ViewEngine,
    pub ui: UIState,

    /// Search input layout to restore on reset
    default_search_fields: SmallVec<[RecordField; 4]>,
}

impl AppState {
    pub fn new(engine: ViewEngine, ui: UIState) -> Self {
        let default_search_fields = ui.search_fields.clone();
        Self {
            engine,
            ui,
            default_search_fields,
        }
    }

    /// Mount the view described by `config` over `dataset`.
    pub fn from_config(dataset: Dataset, config: &Config) -> Result<Self, AppError> {
        let state = config.view.initial_state()?;
        let ui = UIState::new(&config.view.search_fields, config.view.show_id, config.theme);
        Ok(Self::new(ViewEngine::new(dataset, state), ui))
    }

    /// Rows on the page currently shown.
    pub fn page_rows(&self) -> usize {
        self.engine.view().rows.len()
    }

    /// Load the focused field's search text into the edit buffer.
    pub fn sync_input(&mut self) {
        let text = self.engine.search().get(self.ui.active_field()).to_owned();
        self.ui.set_input(text);
    }

    /// Push the edit buffer to the engine as the focused field's text.
    pub fn apply_input(&mut self) -> bool {
        let field = self.ui.active_field();
        let changed = self.engine.set_search(field, &self.ui.input);
        if changed {
            self.after_refilter();
        }
        changed
    }

    /// Selection back to the top of the page and a full redraw.
    pub fn after_refilter(&mut self) {
        self.ui.selected = Some(0);
        self.ui.clamp_selection(self.page_rows());
        if self.engine.search().is_active() && self.engine.filtered_count() == 0 {
            self.ui.show_warning("No users match the search");
        } else if self
            .ui
            .notification
            .as_ref()
            .is_some_and(|n| n.level == NotificationLevel::Warning)
        {
            self.ui.dismiss_notification();
        }
        self.ui.request_redraw(RedrawFlag::All);
    }

    /// Same page, possibly fewer rows.
    pub fn after_page_change(&mut self) {
        self.ui.clamp_selection(self.page_rows());
        self.ui.request_redraw(RedrawFlag::Main);
    }

    pub fn reset(&mut self) {
        debug!("Resetting view and search inputs");
        self.engine.reset();
        self.ui.search_fields = self.default_search_fields.clone();
        self.ui.active_input = 0;
        self.ui.mode = UIMode::Browse;
        self.ui.clear_input();
        self.after_refilter();
    }
}
