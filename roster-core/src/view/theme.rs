//! src/view/theme.rs
//! ============================================================================
//! # Colour Palettes
//!
//! The default palette is Catppuccin Mocha
//! (https://github.com/catppuccin/catppuccin); `high_contrast` uses the
//! terminal's own colours for low-colour terminals.

use ratatui::style::{Color, Modifier, Style};
use tracing::{debug, instrument};

use crate::config::Theme;

pub const BACKGROUND: Color = Color::Rgb(30, 30, 46); // Base
pub const CURRENT_LINE: Color = Color::Rgb(69, 71, 90); // Surface1
pub const FOREGROUND: Color = Color::Rgb(205, 214, 244); // Text
pub const COMMENT: Color = Color::Rgb(127, 132, 156); // Overlay1
pub const CYAN: Color = Color::Rgb(137, 220, 235); // Sky
pub const GREEN: Color = Color::Rgb(166, 227, 161); // Green
pub const ORANGE: Color = Color::Rgb(250, 179, 135); // Peach
pub const PURPLE: Color = Color::Rgb(203, 166, 247); // Mauve
pub const RED: Color = Color::Rgb(243, 139, 168); // Red
pub const YELLOW: Color = Color::Rgb(249, 226, 175); // Yellow

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub dim: Color,
    pub highlight: Color,
    pub header: Color,
    pub accent: Color,
    pub control: Color,
    pub border: Color,
    pub info: Color,
    pub warning: Color,
}

pub const MOCHA: Palette = Palette {
    background: BACKGROUND,
    foreground: FOREGROUND,
    dim: COMMENT,
    highlight: CURRENT_LINE,
    header: YELLOW,
    accent: PURPLE,
    control: CYAN,
    border: COMMENT,
    info: GREEN,
    warning: ORANGE,
};

pub const HIGH_CONTRAST: Palette = Palette {
    background: Color::Reset,
    foreground: Color::White,
    dim: Color::DarkGray,
    highlight: Color::Blue,
    header: Color::Yellow,
    accent: Color::Magenta,
    control: Color::Cyan,
    border: Color::White,
    info: Color::Green,
    warning: Color::Yellow,
};

impl Palette {
    #[instrument(level = "debug")]
    pub fn for_theme(theme: Theme) -> Self {
        let palette = match theme {
            Theme::Default => MOCHA,
            Theme::HighContrast => HIGH_CONTRAST,
        };
        debug!("Background: {:?}", palette.background);
        debug!("Foreground: {:?}", palette.foreground);
        palette
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.background).fg(self.foreground)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Controls that can't be used right now.
    pub fn disabled_style(&self) -> Style {
        Style::default().fg(self.dim).add_modifier(Modifier::DIM)
    }

    pub fn enabled_style(&self) -> Style {
        Style::default().fg(self.control).add_modifier(Modifier::BOLD)
    }
}
