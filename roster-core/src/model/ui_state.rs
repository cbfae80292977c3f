//! ``src/model/ui_state.rs``
//! ============================================================================
//! # UIState: presentation-only state for the terminal shell
//!
//! Everything here is about how the view is drawn and edited: input mode,
//! which search input has focus, the text buffer being typed, the selected
//! row, overlays and notifications. The data pipeline lives in
//! [`ViewEngine`](crate::engine::view_engine::ViewEngine).

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::config::Theme;
use crate::model::record::RecordField;

/// Redraw flags, OR-ed together until the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RedrawFlag {
    Main = 1,
    StatusBar = 2,
    Overlay = 4,
    Notification = 8,
    All = 15,
}

impl RedrawFlag {
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum UIMode {
    #[default]
    Browse = 0,

    /// Typing into the focused search input
    Search = 1,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum UIOverlay {
    #[default]
    None = 0,
    Help = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Info = 0,
    Warning = 1,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss_ms: Option<u32>,
}

#[derive(Debug)]
pub struct UIState {
    pub redraw_flags: AtomicU32,

    pub mode: UIMode,
    pub overlay: UIOverlay,

    /// Row within the current page
    pub selected: Option<usize>,

    /// One search input per entry, shown left to right
    pub search_fields: SmallVec<[RecordField; 4]>,
    pub active_input: usize,

    pub input: CompactString,
    pub input_cursor: usize,

    pub show_id: bool,
    pub theme: Theme,

    pub notification: Option<Notification>,
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(&[RecordField::Email, RecordField::Gender], false, Theme::Default)
    }
}

impl UIState {
    pub fn new(search_fields: &[RecordField], show_id: bool, theme: Theme) -> Self {
        Self {
            redraw_flags: AtomicU32::new(RedrawFlag::All.bits() as u32),
            mode: UIMode::Browse,
            overlay: UIOverlay::None,
            selected: Some(0),
            search_fields: SmallVec::from_slice(search_fields),
            active_input: 0,
            input: CompactString::default(),
            input_cursor: 0,
            show_id,
            theme,
            notification: None,
        }
    }

    #[inline]
    pub fn request_redraw(&self, flag: RedrawFlag) {
        self.redraw_flags
            .fetch_or(flag.bits() as u32, Ordering::Relaxed);
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw_flags.load(Ordering::Relaxed) != 0
    }

    #[inline]
    pub fn clear_redraw(&self) {
        self.redraw_flags.store(0, Ordering::Relaxed);
    }

    /* -------------------------- notifications ------------------------- */

    pub fn show_notification(
        &mut self,
        message: impl Into<CompactString>,
        level: NotificationLevel,
        auto_dismiss_ms: Option<u32>,
    ) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            timestamp: Instant::now(),
            auto_dismiss_ms,
        });
        self.request_redraw(RedrawFlag::Notification);
    }

    pub fn show_info(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Info, Some(3000));
    }

    pub fn show_warning(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Warning, Some(5000));
    }

    pub fn dismiss_notification(&mut self) {
        if self.notification.take().is_some() {
            self.request_redraw(RedrawFlag::Notification);
        }
    }

    /// Drop an expired notification. Returns whether one was dropped.
    pub fn update_notification(&mut self) -> bool {
        if let Some(notification) = &self.notification
            && let Some(auto_dismiss_ms) = notification.auto_dismiss_ms
            && notification.timestamp.elapsed().as_millis() > u128::from(auto_dismiss_ms)
        {
            self.notification = None;
            self.request_redraw(RedrawFlag::Notification);
            return true;
        }
        false
    }

    /* ------------------------------ input ----------------------------- */

    /// Field the focused search input filters on.
    pub fn active_field(&self) -> RecordField {
        self.search_fields
            .get(self.active_input)
            .copied()
            .unwrap_or(RecordField::FirstName)
    }

    pub fn clear_input(&mut self) {
        self.input = CompactString::default();
        self.input_cursor = 0;
    }

    pub fn set_input(&mut self, text: impl Into<CompactString>) {
        self.input = text.into();
        self.input_cursor = self.input.len();
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut input_str = self.input.to_string();
        input_str.insert(self.input_cursor, ch);
        self.input = input_str.into();
        self.input_cursor += ch.len_utf8();
    }

    pub fn delete_char_before(&mut self) -> bool {
        let Some((char_pos, _)) = self.input[..self.input_cursor].char_indices().next_back() else {
            return false;
        };
        let mut input_str = self.input.to_string();
        input_str.remove(char_pos);
        self.input = input_str.into();
        self.input_cursor = char_pos;
        true
    }

    pub fn move_cursor_left(&mut self) {
        if let Some((pos, _)) = self.input[..self.input_cursor].char_indices().next_back() {
            self.input_cursor = pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(ch) = self.input[self.input_cursor..].chars().next() {
            self.input_cursor += ch.len_utf8();
        }
    }

    /// Focus the next search input, wrapping around.
    pub fn focus_next_input(&mut self) {
        if !self.search_fields.is_empty() {
            self.active_input = (self.active_input + 1) % self.search_fields.len();
        }
    }

    /// Point the focused input at the next field no other input uses.
    /// Returns `(old, new)` when it changed.
    pub fn retarget_active_input(&mut self) -> Option<(RecordField, RecordField)> {
        let from = *self.search_fields.get(self.active_input)?;
        let mut to = from.next();
        while to != from {
            if !self.search_fields.contains(&to) {
                self.search_fields[self.active_input] = to;
                return Some((from, to));
            }
            to = to.next();
        }
        None
    }

    /* ---------------------------- selection --------------------------- */

    pub fn select_next(&mut self, rows: usize) {
        if rows == 0 {
            self.selected = None;
            return;
        }
        let next = self.selected.map_or(0, |i| (i + 1).min(rows - 1));
        self.selected = Some(next);
    }

    pub fn select_prev(&mut self, rows: usize) {
        if rows == 0 {
            self.selected = None;
            return;
        }
        let prev = self.selected.map_or(0, |i| i.saturating_sub(1));
        self.selected = Some(prev);
    }

    /// Keep the selection inside a page of `rows` rows.
    pub fn clamp_selection(&mut self, rows: usize) {
        self.selected = match (rows, self.selected) {
            (0, _) => None,
            (_, None) => Some(0),
            (n, Some(i)) => Some(i.min(n - 1)),
        };
    }

    pub fn toggle_help(&mut self) {
        self.overlay = match self.overlay {
            UIOverlay::Help => UIOverlay::None,
            UIOverlay::None => UIOverlay::Help,
        };
        self.request_redraw(RedrawFlag::Overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redraw_flags() {
        let ui = UIState::default();
        assert!(ui.needs_redraw());

        ui.clear_redraw();
        assert!(!ui.needs_redraw());

        ui.request_redraw(RedrawFlag::StatusBar);
        ui.request_redraw(RedrawFlag::Main);
        assert_eq!(ui.redraw_flags.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_input_editing_multibyte() {
        let mut ui = UIState::default();
        for ch in "Zoë".chars() {
            ui.insert_char(ch);
        }
        assert_eq!(ui.input, "Zoë");
        assert_eq!(ui.input_cursor, 4);

        ui.move_cursor_left();
        assert_eq!(ui.input_cursor, 2);
        ui.insert_char('x');
        assert_eq!(ui.input, "Zoxë");

        ui.move_cursor_right();
        assert!(ui.delete_char_before());
        assert_eq!(ui.input, "Zox");

        ui.clear_input();
        assert!(!ui.delete_char_before());
    }

    #[test]
    fn test_focus_cycles_inputs() {
        let mut ui = UIState::default();
        assert_eq!(ui.active_field(), RecordField::Email);
        ui.focus_next_input();
        assert_eq!(ui.active_field(), RecordField::Gender);
        ui.focus_next_input();
        assert_eq!(ui.active_field(), RecordField::Email);
    }

    #[test]
    fn test_retarget_skips_fields_in_use() {
        let mut ui = UIState::new(
            &[RecordField::JobTitle, RecordField::Id],
            false,
            Theme::Default,
        );
        // JobTitle.next() wraps to Id, which is taken by the other input
        assert_eq!(
            ui.retarget_active_input(),
            Some((RecordField::JobTitle, RecordField::FirstName))
        );
        assert_eq!(ui.search_fields.as_slice(), &[RecordField::FirstName, RecordField::Id]);
    }

    #[test]
    fn test_selection_bounds() {
        let mut ui = UIState::default();
        ui.select_prev(5);
        assert_eq!(ui.selected, Some(0));
        for _ in 0..10 {
            ui.select_next(5);
        }
        assert_eq!(ui.selected, Some(4));

        ui.clamp_selection(2);
        assert_eq!(ui.selected, Some(1));
        ui.clamp_selection(0);
        assert_eq!(ui.selected, None);
    }

    #[test]
    fn test_notifications() {
        let mut ui = UIState::default();
        ui.show_notification("pinned", NotificationLevel::Info, None);
        assert!(!ui.update_notification());
        assert_eq!(ui.notification.as_ref().map(|n| n.level), Some(NotificationLevel::Info));

        ui.show_notification("gone", NotificationLevel::Warning, Some(0));
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert!(ui.update_notification());
        assert!(ui.notification.is_none());

        ui.show_warning("again");

        ui.dismiss_notification();
        assert!(ui.notification.is_none());
    }

    #[test]
    fn test_help_toggle() {
        let mut ui = UIState::default();
        ui.toggle_help();
        assert_eq!(ui.overlay, UIOverlay::Help);
        ui.toggle_help();
        assert_eq!(ui.overlay, UIOverlay::None);
    }
}
