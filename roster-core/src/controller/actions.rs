//! src/controller/actions.rs
//! ============================================================================
//! # Actions: everything the viewer can be asked to do
//!
//! Raw terminal events are mapped to these by the event loop, which keeps
//! key bindings in one place and lets the dispatch logic be tested without
//! a terminal.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /* sort */
    ToggleSortDirection,

    /// Sort by the next column, keeping the direction.
    CycleSortField,

    /* search */
    /// Start editing the first search input.
    EnterSearch,

    /// Stop editing; the search stays applied.
    ExitSearch,

    SearchInput(char),

    SearchBackspace,

    SearchCursorLeft,

    SearchCursorRight,

    /// Move focus to the next search input.
    NextSearchInput,

    /// Point the focused input at another field, carrying its text along.
    RetargetSearchInput,

    ClearSearch,

    /* paging */
    PrevPage,

    NextPage,

    FirstPage,

    LastPage,

    /* rows */
    MoveSelectionUp,

    MoveSelectionDown,

    /* view */
    ResetView,

    ToggleHelp,

    CloseOverlay,

    /// A terminal resize event.
    Resize(u16, u16),

    /// Periodic housekeeping (notification expiry).
    Tick,

    /// Event consumed, nothing to do.
    NoOp,

    Quit,
}
