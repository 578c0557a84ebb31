use ratatui::style::{Color, Modifier, Style};

use crate::storage::ThemeMode;

/// Colours for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub on_accent: Color,
    pub bar_bg: Color,
    pub error: Color,
    pub success: Color,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                fg: Color::Rgb(250, 250, 250),
                bg: Color::Rgb(9, 9, 11),
                muted: Color::Rgb(113, 113, 122),
                accent: Color::Rgb(16, 185, 129),
                on_accent: Color::Rgb(250, 250, 250),
                bar_bg: Color::Rgb(24, 24, 27),
                error: Color::Rgb(239, 68, 68),
                success: Color::Rgb(16, 185, 129),
            },
            ThemeMode::Light => Self {
                fg: Color::Rgb(15, 23, 42),
                bg: Color::Rgb(248, 250, 252),
                muted: Color::Rgb(100, 116, 139),
                accent: Color::Rgb(5, 150, 105),
                on_accent: Color::Rgb(255, 255, 255),
                bar_bg: Color::Rgb(226, 232, 240),
                error: Color::Rgb(220, 38, 38),
                success: Color::Rgb(5, 150, 105),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default().fg(self.on_accent).bg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bar_bg)
    }
}
