//! Colors for the selection prompt

use ratatui::style::Color;

pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub selection: Color,
    pub dimmed: Color,
    pub hint: Color,
    pub enabled: Color,
    pub disabled: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Green,
            text: Color::Reset,
            selection: Color::Cyan,
            dimmed: Color::DarkGray,
            hint: Color::Yellow,
            enabled: Color::Green,
            disabled: Color::Red,
        }
    }
}
