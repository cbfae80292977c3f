pub mod error;

pub mod config;

pub mod cli;

pub mod engine {
    pub mod filter;
    pub use filter::SearchQuery;

    pub mod sort;
    pub use sort::{SortDirection, SortKey};

    pub mod page;
    pub use page::PageIndex;

    pub mod view_engine;
    pub use view_engine::{DisplayMode, PageView, ViewEngine};
}

pub mod controller {
    pub mod actions;
    pub use actions::Action;

    pub mod event_loop;
    pub use event_loop::EventLoop;
}

pub mod model {
    pub mod record;
    pub use record::{Record, RecordField, RecordId};

    pub mod dataset;
    pub use dataset::Dataset;

    pub mod view_state;
    pub use view_state::ViewState;

    pub mod app_state;

    pub mod ui_state;
    pub use ui_state::{Notification, NotificationLevel, RedrawFlag, UIMode, UIOverlay, UIState};
}

pub mod view {
    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod help_overlay;
        pub use help_overlay::HelpOverlay;
        pub mod pagination_bar;
        pub use pagination_bar::PaginationBar;
        pub mod record_table;
        pub use record_table::RecordTable;
        pub mod search_bar;
        pub use search_bar::SearchBar;
        pub mod status_bar;
        pub use status_bar::StatusBar;
    }

    pub use components::*;
}

pub mod logging;
pub use logging::Logger;

pub use error::AppError;

pub use model::{app_state::AppState, ui_state::UIState};
